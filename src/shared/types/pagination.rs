//! Page request parsing and page metadata calculation.
//!
//! [`PageRequest`] is built once per incoming request from the raw query
//! string, handed to the storage layer (which consumes `limit`, `offset()`,
//! `sort` and `searchs` and reports back a total row count), then finalized
//! with [`PageRequest::paginate`] before serialization.
//!
//! Field names on the wire (`totalRows`, `toRows`, `searchs`, ...) are part
//! of an existing API contract and must not change.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::validations::sanitize_limit;

/// Page size applied when the query string carries no usable `limit`.
pub const DEFAULT_LIMIT: i64 = 10;
/// Page number applied when the query string carries no usable `page`.
pub const DEFAULT_PAGE: i64 = 1;
/// Sort expression applied when the query string carries no `sort`.
pub const DEFAULT_SORT: &str = "id desc";
/// Smallest page size ever used for page arithmetic. A `limit` below this
/// is raised to it, so `totalPages` can never divide by zero.
pub const MIN_LIMIT: i64 = 1;

/// One search predicate, parsed from a `column.action=query` query pair.
///
/// `action` is passed through without validation; which actions exist and
/// what they mean is decided by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Search {
    pub column: String,
    pub action: String,
    pub query: String,
}

/// Paged request/response state for a list endpoint.
///
/// Request-scoped: parse with [`PageRequest::from_query_pairs`], let the
/// storage layer fill `rows` and the total count, call
/// [`PageRequest::paginate`], serialize, discard.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest<T> {
    /// Page size (rows per page).
    pub limit: i64,
    /// Current page, 1-based.
    pub page: i64,
    /// Total row count across all pages, 0 until reported by storage.
    pub total_rows: i64,
    /// Derived: ceil(totalRows / limit). Filled by `paginate`.
    pub total_pages: i64,
    /// Raw sort expression, e.g. `"id desc"`. Not validated here.
    pub sort: String,
    /// Link to page 1. Filled by `paginate`.
    pub first_page: String,
    /// Link to the last page. Filled by `paginate`.
    pub last_page: String,
    /// Link to the previous page, empty when on page 1.
    pub previous_page: String,
    /// Link to the next page, empty when on the last page.
    pub next_page: String,
    /// First row (1-based, inclusive) shown on this page, 0 when the page
    /// is out of range.
    pub from_row: i64,
    /// Last row shown on this page. Legacy wire name `toRows`. Not clamped
    /// to `totalRows`: the last page may report a larger value than the
    /// number of rows it actually carries.
    #[serde(rename = "toRows")]
    pub to_row: i64,
    /// Search predicates in query-string order. Legacy wire name `searchs`.
    pub searchs: Vec<Search>,
    /// The page of result records, attached by the storage layer.
    pub rows: Vec<T>,
}

impl<T> Default for PageRequest<T> {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
            total_rows: 0,
            total_pages: 0,
            sort: DEFAULT_SORT.to_string(),
            first_page: String::new(),
            last_page: String::new(),
            previous_page: String::new(),
            next_page: String::new(),
            from_row: 0,
            to_row: 0,
            searchs: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl<T> PageRequest<T> {
    /// Build a page request from decoded query pairs, in wire order.
    ///
    /// Recognized keys: `limit` and `page` (integers; unparsable values are
    /// silently ignored and the previous value kept) and `sort` (verbatim).
    /// Any other key containing a `.` is split on the first dot into
    /// `column.action` and collected as a [`Search`].
    ///
    /// For a repeated key the last value wins; a repeated search key keeps
    /// its first position but takes the last value. Because the input is an
    /// ordered slice, `searchs` order is deterministic and equals
    /// query-string order.
    pub fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let mut req = Self::default();

        for (key, value) in pairs {
            match key.as_str() {
                "limit" => {
                    if let Ok(limit) = value.parse() {
                        req.limit = limit;
                    }
                }
                "page" => {
                    if let Ok(page) = value.parse() {
                        req.page = page;
                    }
                }
                "sort" => req.sort = value.clone(),
                _ => {
                    if let Some((column, action)) = key.split_once('.') {
                        let existing = req
                            .searchs
                            .iter_mut()
                            .find(|s| s.column == column && s.action == action);
                        match existing {
                            Some(search) => search.query = value.clone(),
                            None => req.searchs.push(Search {
                                column: column.to_string(),
                                action: action.to_string(),
                                query: value.clone(),
                            }),
                        }
                    }
                }
            }
        }

        req.limit = sanitize_limit(req.limit);
        req
    }

    /// Number of rows to skip before the current page begins.
    ///
    /// No bounds check: a page beyond the data set yields an offset the
    /// storage layer answers with an empty page, and a non-positive page
    /// yields a non-positive offset.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Store the total row count reported by the storage layer.
    pub fn set_total_rows(&mut self, total_rows: i64) {
        self.total_rows = total_rows;
    }

    /// Derive `totalPages`, the `fromRow..toRows` range and the four
    /// navigation links from `totalRows`, `page` and `limit`.
    ///
    /// Page 1 always gets `1..limit`. A page within range gets
    /// `offset()+1..page*limit` (deliberately not clamped to `totalRows`).
    /// A page beyond the last one keeps both row markers at 0.
    pub fn paginate(&mut self) -> &mut Self {
        self.limit = sanitize_limit(self.limit);

        let total_pages = ((self.total_rows as f64) / (self.limit as f64)).ceil() as i64;

        let (from_row, to_row) = if self.page == 1 {
            (1, self.limit)
        } else if self.page <= total_pages {
            (self.offset() + 1, self.page * self.limit)
        } else {
            (0, 0)
        };

        self.from_row = from_row;
        self.to_row = to_row;
        self.total_pages = total_pages;

        self.first_page = self.link_first();
        self.last_page = self.link_last();
        self.previous_page = self.link_prev();
        self.next_page = self.link_next();

        self
    }

    /// Relative link to the given page, carrying the current limit, sort
    /// and search predicates.
    ///
    /// Sort, column, action and query values are percent-encoded so that
    /// reserved characters cannot break the produced URL; the structural
    /// `?`, `&`, `=` and `.` separators stay literal.
    pub fn page_link(&self, page: i64) -> String {
        let mut link = format!(
            "?limit={}&page={}&sort={}",
            self.limit,
            page,
            encode(&self.sort)
        );
        for search in &self.searchs {
            link.push_str(&format!(
                "&{}.{}={}",
                encode(&search.column),
                encode(&search.action),
                encode(&search.query)
            ));
        }
        link
    }

    /// Whether the current page has a predecessor.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether the current page has a successor.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Link to the previous page, or an empty string on page 1.
    pub fn link_prev(&self) -> String {
        if self.has_prev() {
            self.page_link(self.page - 1)
        } else {
            String::new()
        }
    }

    /// Link to the next page, or an empty string on the last page.
    pub fn link_next(&self) -> String {
        if self.has_next() {
            self.page_link(self.page + 1)
        } else {
            String::new()
        }
    }

    /// Link to page 1, regardless of the current page.
    pub fn link_first(&self) -> String {
        self.page_link(1)
    }

    /// Link to the last page. Before `paginate` ran this produces `page=0`.
    pub fn link_last(&self) -> String {
        self.page_link(self.total_pages)
    }
}

fn encode(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

// ── Tests ──────────────────────────────────────────────────────
