//! Shared constants used across Folio crates.

use std::time::Duration;

/// Default API port for Folio.
pub const DEFAULT_PORT: u16 = 38420;

/// Default maximum form body size accepted by the save endpoint.
pub const DEFAULT_MAX_FORM_SIZE: usize = 10 * 1024 * 1024;

/// Default timeout for a single gate status request.
pub const DEFAULT_GATE_TIMEOUT_SECS: u64 = 10;

/// How long a successfully fetched gate status stays fresh.
pub const GATE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Gate state assumed before any successful fetch. `true` is the restrictive state.
pub const DEFAULT_GATE_STATUS: bool = true;

/// Form field carrying the comma-separated article order.
pub const ORDER_FIELD: &str = "order-input";
/// Suffix of the per-article title field (`<id>_Title`).
pub const TITLE_SUFFIX: &str = "_Title";
/// Suffix of the per-article author text override field (`<id>_Authortext`).
pub const AUTHOR_TEXT_SUFFIX: &str = "_Authortext";
/// Suffix of the per-article markdown body field (`<id>_Content`).
pub const CONTENT_SUFFIX: &str = "_Content";
