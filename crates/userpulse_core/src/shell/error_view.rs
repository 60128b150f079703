//! Fallback view for unresolved routes.
//!
//! Stateless by contract: the routing layer renders it whenever no route
//! matches, and it performs no reads or writes.

/// Translation key for the error headline.
pub const TITLE_KEY: &str = "an_error_occurred";

/// Translation key for the not-found body line.
pub const BODY_KEY: &str = "page_not_found";

/// Message keys the presentation layer renders, in order.
pub fn message_keys() -> [&'static str; 2] {
    [TITLE_KEY, BODY_KEY]
}
