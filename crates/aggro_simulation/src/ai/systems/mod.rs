//! AI systems (strategic layer logic)

pub mod aggression;
pub mod intents;
pub mod reactions;

// Re-export all systems
pub use aggression::*;
pub use intents::*;
pub use reactions::*;
