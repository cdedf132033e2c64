//! Shared helpers for time handling and ratio arithmetic

pub mod math;
pub mod time;
