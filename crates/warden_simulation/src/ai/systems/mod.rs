//! AI systems (strategic layer logic)

pub mod fsm;

// Re-export all systems
pub use fsm::*;
