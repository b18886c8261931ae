//! Database health check port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Port for checking that the hosted database answers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Whether a lightweight request against the database succeeds
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn DatabaseHealthPort) {}

    #[tokio::test]
    async fn mock_reports_availability() {
        let mut mock = MockDatabaseHealthPort::new();
        mock.expect_is_available().returning(|| false);
        assert!(!mock.is_available().await);
    }
}
