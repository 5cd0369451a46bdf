//! FISC simulator library.

/// Object-file loading into decoded programs.
pub mod loader;
/// Cycle runner and per-cycle state rendering.
pub mod runner;

#[cfg(test)]
use tempfile as _;
