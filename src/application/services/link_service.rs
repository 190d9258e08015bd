//! Link creation, lookup, deletion and redirect service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, generate_code, is_reserved, validate_custom_code,
};
use crate::utils::url_normalizer::{normalize_url, validate_target_url};

/// Generate-then-insert attempts before code allocation fails.
const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Service for creating and resolving short links.
///
/// Holds no state of its own: every mutation is a single atomic store call, so
/// one instance is shared by all request tasks.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service on top of a store.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `raw_url` - Target as submitted; normalized before validation
    /// - `custom_code` - Optional code; an empty string counts as absent
    /// - `serving_host` - Host the request arrived on, for the self-redirect check
    ///
    /// # Code Allocation
    ///
    /// - A custom code is format-checked, then inserted with create-if-absent
    /// - Otherwise a random 6-character code is generated and inserted, retrying
    ///   up to 5 times on collision
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is invalid.
    /// Returns [`AppError::Conflict`] if the custom code is taken.
    /// Returns [`AppError::Internal`] on store errors or when every generated
    /// code collided.
    pub async fn create_link(
        &self,
        raw_url: &str,
        custom_code: Option<String>,
        serving_host: Option<&str>,
    ) -> Result<Link, AppError> {
        let url = normalize_url(raw_url)
            .and_then(|normalized| {
                validate_target_url(&normalized, serving_host).map(|_| normalized)
            })
            .map_err(|e| {
                tracing::debug!(url = raw_url, reason = %e, "Rejected target URL");
                AppError::bad_request("Invalid URL")
            })?;

        match custom_code.filter(|code| !code.is_empty()) {
            Some(code) => {
                validate_custom_code(&code)?;
                self.repository
                    .create_if_absent(NewLink::new(code, url))
                    .await
            }
            None => self.create_with_generated_code(url).await,
        }
    }

    /// Lists every link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.repository.list_all().await
    }

    /// Retrieves a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .get_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Not found"))
    }

    /// Deletes a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if self.repository.delete_by_code(code).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Not found"))
        }
    }

    /// Resolves a code for a redirect and counts the click.
    ///
    /// The increment has completed when this returns, so a following read sees
    /// it. A link deleted between lookup and increment is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn follow_link(&self, code: &str) -> Result<Link, AppError> {
        let link = self.get_link(code).await?;

        if !self.repository.increment_click(code).await? {
            return Err(AppError::not_found("Not found"));
        }

        Ok(link)
    }

    async fn create_with_generated_code(&self, url: String) -> Result<Link, AppError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            if is_reserved(&code) {
                tracing::debug!(attempt, code = %code, "Generated code is reserved, retrying");
                continue;
            }

            match self
                .repository
                .create_if_absent(NewLink::new(code, url.clone()))
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict(_)) => {
                    tracing::debug!(attempt, "Generated code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Could not allocate a unique code"
        );
        Err(AppError::internal("Failed to allocate a unique code"))
    }
}
