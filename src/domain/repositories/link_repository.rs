//! Store trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// The store behind the service: exactly five operations, each atomic on a
/// single record.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - process memory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a link unless its code is already taken.
    ///
    /// The existence check and the insert are one operation: of several
    /// concurrent callers with the same code, exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create_if_absent(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn get_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Deletes a link. Returns `Ok(false)` if no link had this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Adds one click and stamps `last_clicked` with the current time, as a single
    /// operation. Returns `Ok(false)` if no link had this code.
    ///
    /// Concurrent increments on the same code never lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_click(&self, code: &str) -> Result<bool, AppError>;
}
