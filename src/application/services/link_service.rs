//! Link creation, resolution and listing.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use serde_json::json;

/// Maximum number of candidate codes tried before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating, resolving and listing shortened links.
///
/// Deduplication is a lookup followed by an insert. Two concurrent requests
/// for the same URL can both miss the lookup and create two records.
#[derive(Clone)]
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    code_generator: Arc<dyn CodeGenerator>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        code_generator: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self {
            link_repository,
            code_generator,
        }
    }

    /// Returns the existing link for `original_url`, or creates one.
    ///
    /// The URL is stored verbatim; only emptiness is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty.
    /// Returns [`AppError::Internal`] on storage errors or when no free code is found.
    pub async fn shorten(&self, original_url: &str) -> Result<Link, AppError> {
        if original_url.is_empty() {
            return Err(AppError::bad_request(
                "Please provide a URL",
                json!({ "field": "originalUrl" }),
            ));
        }

        if let Some(existing) = self
            .link_repository
            .find_by_original_url(original_url)
            .await?
        {
            tracing::debug!(code = %existing.code, "Reusing existing short link");
            return Ok(existing);
        }

        self.create(original_url).await
    }

    /// Creates a new link for `original_url` with a freshly generated code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors or code exhaustion.
    pub async fn create(&self, original_url: &str) -> Result<Link, AppError> {
        let code = self.generate_unique_code().await?;

        let link = self
            .link_repository
            .create(NewLink {
                code,
                original_url: original_url.to_string(),
            })
            .await?;

        tracing::info!(code = %link.code, "Short link created");
        Ok(link)
    }

    /// Looks up a link by code without modifying it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Resolves a code for a redirect, counting the click.
    ///
    /// Unknown codes are rejected before any write happens. A link purged
    /// between the lookup and the increment is also reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        self.get_link_by_code(code).await?;

        self.link_repository
            .increment_clicks(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Lists all live links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Checks that the storage backend answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the backend is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Generates a code not yet present in storage, retrying on collision.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = self.code_generator.generate()?;

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            tracing::warn!(%code, "Short code collision, retrying");
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("URL not found", json!({ "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::MockCodeGenerator;
    use chrono::Utc;

    fn create_test_link(id: i64, code: &str, url: &str, clicks: i64) -> Link {
        Link::new(id, code.to_string(), url.to_string(), Utc::now(), clicks)
    }

    fn fixed_generator(code: &'static str) -> MockCodeGenerator {
        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .returning(move || Ok(code.to_string()));
        generator
    }

    #[tokio::test]
    async fn test_shorten_creates_new_link() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .withf(|url| url == "https://example.com/a")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.code == "abc123" && new_link.original_url == "https://example.com/a"
            })
            .times(1)
            .returning(|new_link| {
                Ok(create_test_link(
                    1,
                    &new_link.code,
                    &new_link.original_url,
                    0,
                ))
            });

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(fixed_generator("abc123")));

        let link = service.shorten("https://example.com/a").await.unwrap();

        assert_eq!(link.original_url, "https://example.com/a");
        assert_eq!(link.code, "abc123");
        assert_eq!(link.clicks, 0);
    }

    #[tokio::test]
    async fn test_shorten_reuses_existing_link() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = create_test_link(5, "existing", "https://example.com", 7);
        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_create().times(0);

        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(0);

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(generator));

        let link = service.shorten("https://example.com").await.unwrap();

        assert_eq!(link.id, 5);
        assert_eq!(link.code, "existing");
        assert_eq!(link.clicks, 7);
    }

    #[tokio::test]
    async fn test_shorten_rejects_empty_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_original_url().times(0);

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let result = service.shorten("").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_propagates_storage_error() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .returning(|_| Err(AppError::internal("Internal server error", json!({}))));

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let result = service.shorten("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();
        let mut generator = MockCodeGenerator::new();

        let mut seq = mockall::Sequence::new();
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("taken".to_string()));
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("free".to_string()));

        let taken = create_test_link(1, "taken", "https://other.com", 0);
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "taken")
            .times(1)
            .returning(move |_| Ok(Some(taken.clone())));
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "free")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_create()
            .withf(|new_link| new_link.code == "free")
            .times(1)
            .returning(|new_link| Ok(create_test_link(2, &new_link.code, &new_link.original_url, 0)));

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(generator));

        let link = service.create("https://example.com").await.unwrap();
        assert_eq!(link.code, "free");
    }

    #[tokio::test]
    async fn test_create_gives_up_after_max_attempts() {
        let mut mock_repo = MockLinkRepository::new();

        let taken = create_test_link(1, "taken", "https://other.com", 0);
        mock_repo
            .expect_find_by_code()
            .times(MAX_CODE_ATTEMPTS)
            .returning(move |_| Ok(Some(taken.clone())));
        mock_repo.expect_create().times(0);

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(fixed_generator("taken")));

        let result = service.create("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_resolve_increments_clicks() {
        let mut mock_repo = MockLinkRepository::new();

        let link = create_test_link(3, "abc123", "https://example.com/a", 0);
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let incremented = create_test_link(3, "abc123", "https://example.com/a", 1);
        mock_repo
            .expect_increment_clicks()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(incremented.clone())));

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let resolved = service.resolve("abc123").await.unwrap();

        assert_eq!(resolved.original_url, "https://example.com/a");
        assert_eq!(resolved.clicks, 1);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_does_not_mutate() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_increment_clicks().times(0);

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let result = service.resolve("missing").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_link_purged_before_increment() {
        let mut mock_repo = MockLinkRepository::new();

        let link = create_test_link(3, "gone", "https://example.com", 0);
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(None));

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let result = service.resolve("gone").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_all_passes_through() {
        let mut mock_repo = MockLinkRepository::new();

        let links = vec![
            create_test_link(2, "newer", "https://example.com/2", 0),
            create_test_link(1, "older", "https://example.com/1", 4),
        ];
        mock_repo
            .expect_list_all()
            .times(1)
            .returning(move || Ok(links.clone()));

        let service = LinkService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let listed = service.list_all().await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].code, "newer");
    }
}
