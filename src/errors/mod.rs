//! Error types and diagnostic reporting for the scanner.
//!
//! This module defines:
//!
//! - Error structures carrying the line/column and raw source line
//! - The recoverable and fatal error variants
//! - The `DiagnosticSink` collaborator scan errors are reported to

pub mod errors;
