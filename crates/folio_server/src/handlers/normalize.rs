//! Path parameter normalization.

use folio_core::AppError;
use std::str::FromStr;

/// Parse a path identifier, tolerating one leading `/`.
///
/// `"/123"` and `"123"` both parse; `"//1"`, `"/1/1"` and `"32a"` do not.
pub(super) fn parse_path_param<T: FromStr>(raw: &str, name: &str) -> Result<T, AppError> {
    let trimmed = raw.strip_prefix('/').unwrap_or(raw);
    trimmed
        .parse::<T>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} '{}'", name, raw)))
}
