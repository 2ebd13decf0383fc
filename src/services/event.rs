//! Event service
//!
//! Serves paginated event listings and the facet values used to filter them.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::db::repositories::EventRepository;
use crate::models::{paginate, Event, EventsPage, FilterSection, PageRequest};
use crate::services::error::PlatformError;
use crate::services::resources::ResourceStore;

pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        Self { repo }
    }

    /// One page of events in start-date order.
    /// Pages past the end come back empty.
    pub async fn get_events(&self, request: PageRequest) -> Result<EventsPage, PlatformError> {
        let events = self.load_events().await?;
        let (data, metadata) = paginate(events, request);
        Ok(EventsPage { metadata, data })
    }

    /// Facets over every stored event, independent of any pagination
    pub async fn get_events_filters(&self) -> Result<FilterSection, PlatformError> {
        let events = self.load_events().await?;
        Ok(FilterSection::from_events(&events))
    }

    async fn load_events(&self) -> Result<Vec<Event>, PlatformError> {
        self.repo.list().await.map_err(|e| {
            let err = PlatformError::internal(e);
            tracing::warn!("Failed to load events: {}", err);
            err
        })
    }

    /// Store the default events when the event store is empty
    pub async fn seed_defaults(&self, resources: &ResourceStore) -> Result<usize> {
        if self.repo.count().await? > 0 {
            return Ok(0);
        }

        let json = resources.events().await?;
        let events: Vec<Event> =
            serde_json::from_str(&json).context("Default events resource is invalid")?;

        for event in &events {
            self.repo.save(event).await?;
        }

        tracing::info!("Seeded {} default event(s)", events.len());
        Ok(events.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxEventRepository;
    use crate::db::{create_test_pool, migrations, DynDatabasePool};
    use crate::models::test_factories::create_event;
    use crate::models::EventType;

    async fn setup_test_service() -> (DynDatabasePool, Arc<dyn EventRepository>, EventService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let repo = SqlxEventRepository::boxed(pool.clone());
        let service = EventService::new(repo.clone());

        (pool, repo, service)
    }

    async fn store_events(repo: &Arc<dyn EventRepository>, count: usize) {
        for i in 0..count {
            let event = create_event(
                &format!("event-{:02}", i),
                EventType::Online,
                "Rust",
                "Online",
                2000 + i as i32,
            );
            repo.save(&event).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_no_events_is_empty_page() {
        let (_pool, _repo, service) = setup_test_service().await;

        let page = service.get_events(PageRequest::new(1, 10).unwrap()).await.unwrap();

        assert!(page.data.items.is_empty());
        assert_eq!(page.metadata.total_items, 0);
        assert_eq!(page.metadata.total_pages, 0);
    }

    #[tokio::test]
    async fn test_events_are_paginated_in_start_order() {
        let (_pool, repo, service) = setup_test_service().await;
        store_events(&repo, 12).await;

        let page = service.get_events(PageRequest::new(2, 5).unwrap()).await.unwrap();

        let ids: Vec<_> = page.data.items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["event-05", "event-06", "event-07", "event-08", "event-09"]);
        assert_eq!(page.metadata.total_items, 12);
        assert_eq!(page.metadata.total_pages, 3);
        assert_eq!(page.metadata.current_page, 2);
        assert_eq!(page.metadata.page_size, 5);
    }

    #[tokio::test]
    async fn test_out_of_range_page_is_empty() {
        let (_pool, repo, service) = setup_test_service().await;
        store_events(&repo, 3).await;

        let page = service.get_events(PageRequest::new(5, 10).unwrap()).await.unwrap();

        assert!(page.data.items.is_empty());
        assert_eq!(page.metadata.total_items, 3);
    }

    #[tokio::test]
    async fn test_same_request_same_slice() {
        let (_pool, repo, service) = setup_test_service().await;
        store_events(&repo, 7).await;
        let request = PageRequest::new(2, 3).unwrap();

        let first = service.get_events(request).await.unwrap();
        let second = service.get_events(request).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_filters_cover_all_events() {
        let (_pool, repo, service) = setup_test_service().await;
        repo.save(&create_event("1", EventType::InPerson, "Career", "London", 2024)).await.unwrap();
        repo.save(&create_event("2", EventType::Online, "Python", "Online", 2023)).await.unwrap();
        repo.save(&create_event("3", EventType::Online, "Career", "Online", 2024)).await.unwrap();

        let filters = service.get_events_filters().await.unwrap();

        assert_eq!(filters.event_types, vec![EventType::InPerson, EventType::Online]);
        assert_eq!(filters.topics, vec!["Career", "Python"]);
        assert_eq!(filters.locations, vec!["London", "Online"]);
        assert_eq!(filters.years, vec![2024, 2023]);
    }

    #[tokio::test]
    async fn test_malformed_event_is_internal_error() {
        let (pool, _repo, service) = setup_test_service().await;
        pool.execute("INSERT INTO events (id, start_date, data) VALUES ('x', '2024', 'oops')")
            .await
            .unwrap();

        assert!(matches!(
            service.get_events(PageRequest::default()).await,
            Err(PlatformError::PlatformInternal { .. })
        ));
        assert!(matches!(
            service.get_events_filters().await,
            Err(PlatformError::PlatformInternal { .. })
        ));
    }

    #[tokio::test]
    async fn test_seed_defaults_only_when_empty() {
        let (_pool, repo, service) = setup_test_service().await;
        let resources = ResourceStore::embedded();

        let seeded = service.seed_defaults(&resources).await.unwrap();

        assert!(seeded > 0);
        assert_eq!(repo.count().await.unwrap(), seeded as u64);
        assert_eq!(service.seed_defaults(&resources).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seed_defaults_skips_populated_store() {
        let (_pool, repo, service) = setup_test_service().await;
        store_events(&repo, 1).await;

        assert_eq!(service.seed_defaults(&ResourceStore::embedded()).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::db::repositories::SqlxEventRepository;
    use crate::db::{create_test_pool, migrations};
    use crate::models::test_factories::create_event;
    use crate::models::EventType;
    use proptest::prelude::*;

    fn event_strategy() -> impl Strategy<Value = Event> {
        (
            "[a-z]{1,8}",
            prop_oneof![Just(EventType::InPerson), Just(EventType::Online), Just(EventType::Hybrid)],
            prop_oneof![Just("Rust"), Just("Career"), Just("Python")],
            prop_oneof![Just("London"), Just("Online"), Just("Dublin")],
            2018i32..2026,
        )
            .prop_map(|(id, event_type, topic, location, year)| {
                create_event(&id, event_type, topic, location, year)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        /// Filters depend only on the event set, never on how it is paged
        #[test]
        fn filters_independent_of_pagination(
            events in prop::collection::vec(event_strategy(), 0..20),
            page in 1i64..5,
            size in 1i64..8,
        ) {
            let (paged, filters) = tokio_test::block_on(async {
                let pool = create_test_pool().await.unwrap();
                migrations::run_migrations(&pool).await.unwrap();
                let repo = SqlxEventRepository::boxed(pool);
                for event in &events {
                    repo.save(event).await.unwrap();
                }
                let service = EventService::new(repo);

                let paged = service.get_events(PageRequest::new(page, size).unwrap()).await.unwrap();
                let filters = service.get_events_filters().await.unwrap();
                (paged, filters)
            });

            prop_assert!(paged.data.items.len() <= size as usize);

            // Saving an existing id replaces the earlier event
            let stored: std::collections::BTreeMap<_, _> =
                events.iter().map(|e| (e.id.clone(), e.clone())).collect();
            let stored: Vec<Event> = stored.into_values().collect();
            prop_assert_eq!(filters, FilterSection::from_events(&stored));
        }
    }
}
