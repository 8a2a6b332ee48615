//! Adapter implementations for student command ports.

pub mod http;
pub mod memory;
