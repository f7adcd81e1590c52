// self
use crate::obs::Outcome;

/// Records an operation outcome via the global metrics recorder (when enabled).
pub fn record_operation_outcome(operation: &'static str, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"onelogin_client_operation_total",
			"operation" => operation,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}
