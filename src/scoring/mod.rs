// Public API - what other modules can use
pub use rules::{
    defense_goal_points, forward_goal_points, goalie_points, player_points, skater_assist_points,
    team_bonus_points,
};

// Internal modules
mod rules;
