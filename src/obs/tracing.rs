// self
use crate::{_prelude::*, obs::HaltReason};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span wrapping one façade or token-manager operation.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a span tagged with the operation name.
	pub fn new(operation: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("onelogin_client.operation", operation);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = operation;

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a `debug` event after each page of a cursor walk.
pub fn page_fetched(page: usize, received: usize, collected: usize) {
	#[cfg(feature = "tracing")]
	tracing::debug!(page, received, collected, "Fetched page.");
	#[cfg(not(feature = "tracing"))]
	let _ = (page, received, collected);
}

/// Emits a `warn` event when a cursor walk stops while the server still offers a cursor.
pub fn pagination_halted(reason: HaltReason, pages: usize) {
	#[cfg(feature = "tracing")]
	tracing::warn!(reason = reason.as_str(), pages, "Stopped following pagination cursors.");
	#[cfg(not(feature = "tracing"))]
	let _ = (reason, pages);
}

/// Emits a `debug` event for token lifecycle transitions (`acquire`, `refresh`, `revoke`).
pub fn token_event(stage: &'static str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(stage, "Token state updated.");
	#[cfg(not(feature = "tracing"))]
	let _ = stage;
}
