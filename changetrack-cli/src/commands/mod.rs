//! Command implementations for the changetrack CLI
//!
//! Each command module exposes the entry points `main` dispatches to.

pub mod compare;
pub mod completions;
