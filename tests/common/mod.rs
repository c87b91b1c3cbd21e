//! Common test utilities for metadelta CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated environment with source/target trees and a fake `sf`
//! - Assertion macros: `assert_packaged!`, `assert_not_packaged!`
//! - Fixtures: Reusable artifact content and validator scripts

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
