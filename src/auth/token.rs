//! Token payload types.

pub mod secret;
pub mod set;
