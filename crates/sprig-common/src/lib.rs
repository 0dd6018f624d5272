//! Common utilities for sprig.
//!
//! This crate provides shared infrastructure used by all pipeline stages:
//! - **Warning System** - colored terminal output for tolerated malformed input

pub mod warning;
