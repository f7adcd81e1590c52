//! OAuth 2.0 token lifecycle: secrets, issued token sets, credential state, and the manager
//! that keeps a valid bearer token on hand.

pub mod token;

mod authorization;
mod credentials;
mod manager;
mod metrics;

pub use authorization::*;
pub use credentials::*;
pub use manager::*;
pub use metrics::*;
pub use token::{secret::*, set::*};
