//! Core type definitions used across the ElderEase workspace.

pub mod id;

pub use id::*;
