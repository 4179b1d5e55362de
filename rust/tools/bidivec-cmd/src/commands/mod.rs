//! Command implementations for bidivec-cmd

pub mod bench;
pub mod trace;
