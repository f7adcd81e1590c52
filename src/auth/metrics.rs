// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters for token lifecycle calls made by one manager.
#[derive(Debug, Default)]
pub struct TokenMetrics {
	acquisitions: AtomicU64,
	refreshes: AtomicU64,
	revocations: AtomicU64,
	failures: AtomicU64,
}
impl TokenMetrics {
	/// Tokens minted through the client-credentials grant.
	pub fn acquisitions(&self) -> u64 {
		self.acquisitions.load(Ordering::Relaxed)
	}

	/// Tokens minted through the refresh grant.
	pub fn refreshes(&self) -> u64 {
		self.refreshes.load(Ordering::Relaxed)
	}

	/// Token pairs revoked.
	pub fn revocations(&self) -> u64 {
		self.revocations.load(Ordering::Relaxed)
	}

	/// Lifecycle calls that failed for any reason.
	pub fn failures(&self) -> u64 {
		self.failures.load(Ordering::Relaxed)
	}

	pub(crate) fn record_acquisition(&self) {
		self.acquisitions.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_refresh(&self) {
		self.refreshes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_revocation(&self) {
		self.revocations.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failures.fetch_add(1, Ordering::Relaxed);
	}
}
