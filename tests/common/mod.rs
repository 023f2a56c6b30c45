#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use sqlx::PgPool;
use tower_http::normalize_path::NormalizePath;

use link_shortener::domain::entities::{Link, NewLink};
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::routes::app_router;
use link_shortener::state::AppState;
use link_shortener::utils::code_generator::RandomCodeGenerator;

/// Link storage backed by a vector, mirroring the PostgreSQL semantics.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record directly, bypassing code generation.
    pub fn insert(&self, code: &str, url: &str, created_at: DateTime<Utc>, clicks: i64) {
        let mut links = self.links.lock().unwrap();
        let id = links.len() as i64 + 1;
        links.push(Link::new(
            id,
            code.to_string(),
            url.to_string(),
            created_at,
            clicks,
        ));
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.code == code)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::internal("Internal server error", json!({})));
        }

        let link = Link::new(
            links.len() as i64 + 1,
            new_link.code,
            new_link.original_url,
            Utc::now(),
            0,
        );
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get(code))
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.original_url == original_url)
            .cloned())
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut links = self.links.lock().unwrap();
        Ok(links.iter_mut().find(|l| l.code == code).map(|l| {
            l.clicks += 1;
            l.clone()
        }))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links = self.links.lock().unwrap().clone();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.created_at >= cutoff);
        Ok((before - links.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Repository whose every call fails like an unreachable database.
pub struct FailingLinkRepository;

fn storage_down() -> AppError {
    AppError::from(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(storage_down())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(storage_down())
    }

    async fn find_by_original_url(&self, _original_url: &str) -> Result<Option<Link>, AppError> {
        Err(storage_down())
    }

    async fn increment_clicks(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(storage_down())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        Err(storage_down())
    }

    async fn purge_created_before(&self, _cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        Err(storage_down())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(storage_down())
    }
}

pub fn create_test_state(repository: Arc<dyn LinkRepository>) -> AppState {
    AppState::new(
        repository,
        Arc::new(RandomCodeGenerator::default()),
        Duration::hours(24),
    )
}

/// Directory holding the bundled web UI.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// The production router with its middleware stack, ready for `TestServer`.
pub fn test_router(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state, STATIC_DIR))
}

pub async fn insert_link_at(pool: &PgPool, code: &str, url: &str, created_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO links (code, original_url, created_at) VALUES ($1, $2, $3)")
        .bind(code)
        .bind(url)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn clicks_of(pool: &PgPool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}
