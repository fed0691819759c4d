//! Core type definitions used across the Wedplan workspace.

pub mod id;

pub use id::*;
