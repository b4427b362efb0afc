//! Bargeflow CLI library.
//!
//! Output formatting and terminal helpers for the `bargeflow-cli` binary,
//! kept in a library so they can be unit tested.

pub mod output;
pub mod terminal;
