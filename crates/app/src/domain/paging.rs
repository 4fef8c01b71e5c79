//! SQL bindings for page requests.

use quarry::pagination::PageRequest;

/// Bind values for one `LIMIT`/`OFFSET` page query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageWindow {
    /// `ILIKE` pattern, `None` when the request carries no search.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    pub(crate) fn new(request: &PageRequest) -> Result<Self, sqlx::Error> {
        let offset =
            i64::try_from(request.offset()).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        Ok(Self {
            search: request.search_term().map(search_pattern),
            limit: i64::from(request.limit),
            offset,
        })
    }
}

/// Convert a `COUNT(*)` result into a total.
pub(crate) fn decode_total(count: i64) -> Result<u64, sqlx::Error> {
    u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: "count".to_string(),
        source: Box::new(e),
    })
}

/// Build a case-insensitive substring pattern, escaping `LIKE` metacharacters.
pub(crate) fn search_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);

    pattern.push('%');

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn window_uses_request_offset() -> TestResult {
        let window = PageWindow::new(&PageRequest::new(3, 10))?;

        assert_eq!(window.limit, 10);
        assert_eq!(window.offset, 20);
        assert_eq!(window.search, None);

        Ok(())
    }

    #[test]
    fn window_wraps_search_in_wildcards() -> TestResult {
        let request = PageRequest::new(1, 10).with_search(Some("carr"));
        let window = PageWindow::new(&request)?;

        assert_eq!(window.search.as_deref(), Some("%carr%"));

        Ok(())
    }

    #[test]
    fn pattern_escapes_metacharacters() {
        assert_eq!(search_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn negative_count_is_rejected() {
        assert!(decode_total(-1).is_err());
    }
}
