//! Paging window for user listings.

/// Number of records returned when the caller asks for an out-of-range count.
pub const DEFAULT_LIST_COUNT: i64 = 10;
/// Largest page a caller may request.
pub const MAX_LIST_COUNT: i64 = 10;

/// Sanitised `(offset, limit)` pair handed to the store.
///
/// ## Invariants
/// - `offset >= 0`.
/// - `1 <= limit <= MAX_LIST_COUNT`.
///
/// # Examples
/// ```
/// use users_service::domain::ListWindow;
///
/// let window = ListWindow::clamped(-5, 0);
/// assert_eq!((window.offset(), window.limit()), (0, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    offset: i64,
    limit: i64,
}

impl ListWindow {
    /// Build a window from raw caller input.
    ///
    /// Counts outside `1..=MAX_LIST_COUNT` are reset to
    /// [`DEFAULT_LIST_COUNT`] rather than rejected; negative starts become 0.
    pub fn clamped(start: i64, count: i64) -> Self {
        let limit = if (1..=MAX_LIST_COUNT).contains(&count) {
            count
        } else {
            DEFAULT_LIST_COUNT
        };
        Self {
            offset: start.max(0),
            limit,
        }
    }

    /// Rows to skip.
    pub fn offset(self) -> i64 {
        self.offset
    }

    /// Maximum rows to return.
    pub fn limit(self) -> i64 {
        self.limit
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self::clamped(0, DEFAULT_LIST_COUNT)
    }
}
