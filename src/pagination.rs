//! Cursor-driven list retrieval.
//!
//! A list call starts from a [`ListQuery`], becomes a [`PageRequest`], and is driven by
//! [`CursorPaginator::collect`], which keeps requesting pages while fewer than `limit` items
//! were gathered and the server keeps handing out an `after_cursor`.

// self
use crate::{
	_prelude::*,
	envelope::{self, Envelope},
	obs::{self, HaltReason},
};

/// Page size the API uses when no limit is sent, and the default client-side cap.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
/// Default safety cap on pages fetched by one list call.
pub const DEFAULT_MAX_PAGES: usize = 1000;
/// Query parameter carrying the forward cursor.
pub const AFTER_CURSOR: &str = "after_cursor";

const LIMIT: &str = "limit";

/// Caller-supplied list parameters: an optional item limit plus arbitrary filters.
///
/// A `limit` filter is interpreted as the item limit when it parses as a non-negative integer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
	limit: Option<usize>,
	filters: BTreeMap<String, String>,
}
impl ListQuery {
	/// Creates an empty query (default limit, no filters).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the maximum number of items to return; `0` means the default.
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Adds a filter such as `email`, `since`, or `fields`.
	pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(key.into(), value.into());

		self
	}

	/// Requested item limit, if any.
	pub fn limit(&self) -> Option<usize> {
		self.limit
	}

	/// Filters sent with every page request.
	pub fn filters(&self) -> &BTreeMap<String, String> {
		&self.filters
	}

	fn insert(&mut self, key: String, value: String) {
		let limit = if key == LIMIT { value.trim().parse::<usize>().ok() } else { None };

		match limit {
			Some(limit) => self.limit = Some(limit),
			None => {
				self.filters.insert(key, value);
			},
		}
	}
}
impl<K, V> FromIterator<(K, V)> for ListQuery
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut query = Self::default();

		for (key, value) in iter {
			query.insert(key.into(), value.into());
		}

		query
	}
}

/// State of one paginated call: the item limit, outgoing filters, and the current cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
	limit: usize,
	filters: BTreeMap<String, String>,
}
impl PageRequest {
	/// Builds the request for a caller query.
	///
	/// A limit below the server page size is sent as `limit` so pages shrink to match. A limit
	/// at or above it stays client-side only.
	pub fn from_query(query: ListQuery) -> Self {
		let ListQuery { limit, mut filters } = query;
		let limit = effective_limit(limit);

		if limit < DEFAULT_PAGE_LIMIT {
			filters.insert(LIMIT.into(), limit.to_string());
		}

		Self { limit, filters }
	}

	/// Builds a request whose limit is never transmitted.
	pub fn client_side(limit: usize) -> Self {
		Self { limit: effective_limit(Some(limit)), filters: BTreeMap::new() }
	}

	/// Maximum number of items the call returns.
	pub fn limit(&self) -> usize {
		self.limit
	}

	/// Cursor the next request will send, if any.
	pub fn cursor(&self) -> Option<&str> {
		self.filters.get(AFTER_CURSOR).map(String::as_str)
	}

	/// Query parameters for the next page request.
	pub fn query_pairs(&self) -> Vec<(String, String)> {
		self.filters.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
	}

	/// Moves the request forward to `cursor`.
	pub fn advance(&mut self, cursor: impl Into<String>) {
		self.filters.insert(AFTER_CURSOR.into(), cursor.into());
	}
}
impl From<ListQuery> for PageRequest {
	fn from(query: ListQuery) -> Self {
		Self::from_query(query)
	}
}

/// Drives sequential page requests for one list call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorPaginator {
	max_pages: usize,
}
impl CursorPaginator {
	/// Creates a paginator that never fetches more than `max_pages` pages (at least one).
	pub fn new(max_pages: usize) -> Self {
		Self { max_pages: max_pages.max(1) }
	}

	/// Page cap in effect.
	pub fn max_pages(&self) -> usize {
		self.max_pages
	}

	/// Collects up to `request.limit()` records, hydrated as `T`.
	///
	/// `fetch` receives the query parameters for each page and resolves with the decoded
	/// envelope. The walk ends when the limit is reached (mid-page included), when a page has
	/// no `after_cursor`, when the server repeats the cursor it was just sent, or when the page
	/// cap is hit. The last two log a warning and return what was gathered.
	pub async fn collect<T, F, Fut>(&self, mut request: PageRequest, mut fetch: F) -> Result<Vec<T>>
	where
		T: DeserializeOwned,
		F: FnMut(Vec<(String, String)>) -> Fut,
		Fut: Future<Output = Result<Envelope>>,
	{
		let limit = request.limit();
		let mut items = Vec::new();
		let mut pages = 0;

		loop {
			let page = fetch(request.query_pairs()).await?;
			let records = page.records();

			pages += 1;

			for record in records.iter().take(limit - items.len()) {
				items.push(envelope::hydrate(record)?);
			}

			obs::page_fetched(pages, records.len(), items.len());

			if items.len() >= limit {
				break;
			}

			let Some(cursor) = page.after_cursor() else {
				break;
			};

			if request.cursor() == Some(cursor) {
				obs::pagination_halted(HaltReason::EchoedCursor, pages);

				break;
			}
			if pages >= self.max_pages {
				obs::pagination_halted(HaltReason::PageCap, pages);

				break;
			}

			request.advance(cursor);
		}

		Ok(items)
	}
}
impl Default for CursorPaginator {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_PAGES)
	}
}

fn effective_limit(limit: Option<usize>) -> usize {
	match limit {
		None | Some(0) => DEFAULT_PAGE_LIMIT,
		Some(limit) => limit,
	}
}
