//! core
//!
//! Core domain types and configuration for gitlink.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid, RefName, ObjectType
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod types;
