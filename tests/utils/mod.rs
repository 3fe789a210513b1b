pub mod actions;
pub mod assertions;
pub mod payload_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::StandingsAssertion;
#[allow(unused_imports)]
pub use payload_builders::{overtime, regulation, BoxScoreBuilder};
#[allow(unused_imports)]
pub use setup::{default_roster, player, TestSetup, TestSetupBuilder};
