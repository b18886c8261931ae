//! OAuth identity provider port

#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the hosted identity provider's OAuth entry point
#[cfg_attr(test, automock)]
pub trait IdentityProviderPort: Send + Sync {
    /// Build the URL a browser should be redirected to for sign-in
    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, ApplicationError>;
}
