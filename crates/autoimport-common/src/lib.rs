//! Common types and utilities for the autoimport rewriter.
//!
//! This crate provides foundational types used across all autoimport crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, diagnostic codes)
//! - Limits for recursion depth and scope walks
//! - Line/column positions for reporting (`LineMap`, `Position`)

// Diagnostics reported by the scanner and parser
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};
