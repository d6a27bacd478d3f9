//! Shared utilities for the Prepvio progress service.
//!
//! This crate provides common functionality used across the other crates:
//! - Validation logic for watch-progress payloads

pub mod validation;
