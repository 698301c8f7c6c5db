use crate::shared::types::pagination::MIN_LIMIT;

/// Raise a page size to the safe minimum so page arithmetic can never
/// divide by zero. Values of `MIN_LIMIT` and above pass through unchanged.
pub fn sanitize_limit(limit: i64) -> i64 {
    limit.max(MIN_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raises_non_positive_limits() {
        assert_eq!(sanitize_limit(0), MIN_LIMIT);
        assert_eq!(sanitize_limit(-10), MIN_LIMIT);
    }

    #[test]
    fn keeps_valid_limits() {
        assert_eq!(sanitize_limit(1), 1);
        assert_eq!(sanitize_limit(50), 50);
    }
}
