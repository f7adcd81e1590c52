//! Records hydrated from API responses and parameter payloads sent to write endpoints.
//!
//! Records are plain data. Fields the API may omit or null are `Option`s (or empty
//! collections) so hydration tolerates sparse responses.

mod app;
mod directory;
mod event;
mod rate_limit;
mod saml;
mod session;
mod user;

pub use app::*;
pub use directory::*;
pub use event::*;
pub use rate_limit::*;
pub use saml::*;
pub use session::*;
pub use user::*;
