//! Core type definitions used across the Unitrack workspace.

pub mod id;

pub use id::*;
