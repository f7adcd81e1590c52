//! Optional observability hooks for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every façade operation inside an `onelogin_client.operation` span
//!   carrying the `operation` name, and to emit `debug`/`warn` events from the paginator and the
//!   token manager.
//! - Enable `metrics` to increment the `onelogin_client_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a façade operation.
	Attempt,
	/// Operation returned a result.
	Success,
	/// Operation failed; the last-error slot holds the details.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Why a cursor walk ended before the server ran out of pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HaltReason {
	/// The configured `max_pages` cap was reached.
	PageCap,
	/// The server returned the cursor it was just sent.
	EchoedCursor,
}
impl HaltReason {
	/// Returns a stable label suitable for event fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HaltReason::PageCap => "page_cap",
			HaltReason::EchoedCursor => "echoed_cursor",
		}
	}
}
