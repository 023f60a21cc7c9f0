/// Pagination window for listing records.
///
/// Records are always listed in identifier order; `skip` drops that many
/// from the front and `limit` caps how many are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordQuery {
    /// Number of records to skip.
    pub skip: usize,

    /// Maximum number of records to return.
    pub limit: usize,
}

impl RecordQuery {
    /// Default page size.
    pub const DEFAULT_LIMIT: usize = 100;

    /// Creates a query returning the first page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query returning every record.
    pub fn all() -> Self {
        Self {
            skip: 0,
            limit: usize::MAX,
        }
    }

    /// Sets the number of records to skip.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Sets the maximum number of records to return.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for RecordQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window() {
        let query = RecordQuery::new();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 100);
    }

    #[test]
    fn builder_sets_window() {
        let query = RecordQuery::new().skip(5).limit(10);
        assert_eq!(query, RecordQuery { skip: 5, limit: 10 });
    }
}
