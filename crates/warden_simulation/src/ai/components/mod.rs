//! AI components

pub mod fsm;
pub mod target;


// Re-export all components
pub use fsm::*;
pub use target::*;
