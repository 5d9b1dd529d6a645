// src/model/mod.rs

pub mod demand;
pub mod inventory;

pub use demand::{DemandModel, DemandSpec};
