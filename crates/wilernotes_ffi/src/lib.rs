//! Flutter-facing FFI surface for WilerNotes.
//!
//! Use-case functions live in `api`; they accept primitive values and return
//! plain envelopes so the Dart shell never handles Rust errors directly.

pub mod api;
