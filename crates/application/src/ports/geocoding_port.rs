//! Geocoding port
//!
//! Resolves free-text place names to canonical locations.

use async_trait::async_trait;
use domain::{Locale, Location};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for place name resolution
///
/// Implementations hold no per-request mutable state and may be called
/// concurrently for different place names.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a place name to the first matching location
    ///
    /// # Errors
    ///
    /// - `ApplicationError::NotFound` when the lookup returns no result
    /// - `ApplicationError::Transport` when the network call fails
    async fn resolve(
        &self,
        place_name: &str,
        locale: Locale,
    ) -> Result<Location, ApplicationError>;
}
