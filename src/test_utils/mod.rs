//! Test utilities for unit and HTTP-level testing.
//!
//! This module provides:
//! - Test data factories for creating valid test fixtures
//! - A fixed clock and deterministic analyzer stubs
//! - A builder for an `AppState` backed by in-memory storage

mod analyzer_mocks;
mod app_state_builder;
mod factories;

pub use analyzer_mocks::*;
pub use app_state_builder::*;
pub use factories::*;
