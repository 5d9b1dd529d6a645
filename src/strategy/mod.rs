// src/strategy/mod.rs

pub mod implementations;
pub mod optimization;
pub mod traits;

pub use implementations::{NewsvendorPolicy, OptimalPolicy, ReorderPointPolicy};
pub use traits::OrderPolicy;
