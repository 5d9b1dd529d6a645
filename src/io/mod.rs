// src/io/mod.rs

pub mod demand;
pub mod problem;
pub mod reporting;
