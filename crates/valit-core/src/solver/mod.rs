pub mod config;
mod domain;
pub mod engine;
pub mod error;
pub mod ids;
pub mod metrics;
pub mod model;
pub mod solution;
mod value_table;

#[cfg(test)]
mod tests;
