//! Repository trait for domain mappings.

use crate::domain::entities::{MapOutcome, Mapping, NewMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for domain→site mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Counts mappings attached to a site.
    ///
    /// Read-only; [`Self::insert_if_unclaimed`] applies the same count inside
    /// its own transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_for_site(&self, site_id: i64) -> Result<i64, AppError>;

    /// Whether a site (at path `/`) or a mapping already answers on `domain`.
    ///
    /// Read-only; [`Self::insert_if_unclaimed`] applies the same check inside
    /// its own transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn is_domain_claimed(&self, domain: &str) -> Result<bool, AppError>;

    /// Inserts an active mapping if the mapping rule allows it.
    ///
    /// The rule: the site has no mapping yet (unless `allow_multi`), and the
    /// domain is not claimed by any site or mapping. Evaluating the rule and
    /// inserting happen atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_if_unclaimed(
        &self,
        new_mapping: NewMapping,
        allow_multi: bool,
    ) -> Result<MapOutcome, AppError>;

    /// Lists mappings of a site, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_site(&self, site_id: i64) -> Result<Vec<Mapping>, AppError>;

    /// Round-trips to the database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
