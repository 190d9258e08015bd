//! In-memory implementation of the link store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Non-durable link store backed by a sharded concurrent map.
///
/// Every operation touches one entry under that entry's shard lock, which gives
/// the same per-record atomicity the PostgreSQL store gets from single statements.
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
    last_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create_if_absent(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.code) {
            Entry::Occupied(_) => Err(AppError::conflict("Code already exists")),
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
                let link = Link::new(id, slot.key().clone(), new_link.url, Utc::now());
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(links)
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn increment_click(&self, code: &str) -> Result<bool, AppError> {
        match self.links.get_mut(code) {
            Some(mut entry) => {
                entry.record_click(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryLinkRepository::new();

        let created = repo
            .create_if_absent(NewLink::new("abc123", "https://example.com"))
            .await
            .unwrap();

        assert_eq!(created.code, "abc123");
        assert_eq!(created.clicks, 0);
        assert!(created.last_clicked.is_none());

        let found = repo.get_by_code("abc123").await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_create_conflict_keeps_first_record() {
        let repo = InMemoryLinkRepository::new();
        repo.create_if_absent(NewLink::new("taken1", "https://first.com"))
            .await
            .unwrap();

        let result = repo
            .create_if_absent(NewLink::new("taken1", "https://second.com"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        let stored = repo.get_by_code("taken1").await.unwrap().unwrap();
        assert_eq!(stored.url, "https://first.com");
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryLinkRepository::new();
        for code in ["first1", "second", "third3"] {
            repo.create_if_absent(NewLink::new(code, "https://example.com"))
                .await
                .unwrap();
        }

        let codes: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.code)
            .collect();

        assert_eq!(codes, vec!["third3", "second", "first1"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryLinkRepository::new();
        repo.create_if_absent(NewLink::new("gone12", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.delete_by_code("gone12").await.unwrap());
        assert!(!repo.delete_by_code("gone12").await.unwrap());
        assert!(repo.get_by_code("gone12").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_increment_unknown_code() {
        let repo = InMemoryLinkRepository::new();

        assert!(!repo.increment_click("nope12").await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(InMemoryLinkRepository::new());
        repo.create_if_absent(NewLink::new("hot123", "https://example.com"))
            .await
            .unwrap();

        let tasks: Vec<_> = (0..200)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_click("hot123").await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().unwrap());
        }

        let link = repo.get_by_code("hot123").await.unwrap().unwrap();
        assert_eq!(link.clicks, 200);
        assert!(link.last_clicked.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creators_single_winner() {
        let repo = Arc::new(InMemoryLinkRepository::new());

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create_if_absent(NewLink::new("race12", format!("https://{i}.example.com")))
                        .await
                })
            })
            .collect();

        let mut winners = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => winners += 1,
                Err(AppError::Conflict(_)) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }
}
