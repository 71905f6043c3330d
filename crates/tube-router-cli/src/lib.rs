//! Tube router CLI library.
//!
//! This crate provides command-line interface utilities for the tube router,
//! including terminal styling and output formatting.

pub mod output;
pub mod terminal;
