//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module so text and JSON
//! formatting stay consistent between commands. Diagnostics go through the
//! `log` facade instead.

pub mod output;
