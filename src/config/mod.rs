//! Configuration for infraagent.
//!
//! Values come from three layers, later ones winning:
//! built-in defaults, an optional `infraagent.yaml`, and environment variables
//! (after `.env` has been loaded by `main`).

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

pub use model::Config;
