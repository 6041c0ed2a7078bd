//! AI components (aggression controller, intents, cue table)

pub mod controller;
pub mod intents;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod controller_tests;

// Re-export all components
pub use controller::*;
pub use intents::*;
