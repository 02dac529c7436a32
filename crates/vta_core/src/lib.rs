pub mod db;
pub mod demo;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod repo;
pub mod store;
pub mod validate;

#[cfg(test)]
mod tests {
    use super::domain::Collection;
    use super::error::AppError;

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new("DB_TEST", "db failed").with_retryable(false);
        assert_eq!(err.code, "DB_TEST");
        assert_eq!(err.message, "db failed");
        assert_eq!(err.retryable, false);
    }

    #[test]
    fn collection_round_trips_through_str() {
        for c in [Collection::ForumPosts, Collection::CourseContent] {
            assert_eq!(Collection::parse(c.as_str()), Some(c));
        }
        assert_eq!(Collection::parse("attachments"), None);
    }
}
