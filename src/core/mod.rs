//! Core infrastructure shared across the crate

pub mod sync;
