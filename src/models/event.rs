//! Event records and the facets computed over them

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::pagination::{PageData, Pagination};
use super::sections::{Image, LinkItem};

/// How attendees join an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    InPerson,
    Online,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub topic: String,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_profile: Option<LinkItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_profile: Option<LinkItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_link: Option<LinkItem>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Event {
    /// Sortable form of the start date stored next to the document
    pub fn start_key(&self) -> String {
        self.start_date.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// One page of events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsPage {
    pub metadata: Pagination,
    pub data: PageData<Event>,
}

/// Facet values available across all events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSection {
    /// Distinct event types in declaration order
    pub event_types: Vec<EventType>,
    /// Distinct topics, ascending
    pub topics: Vec<String>,
    /// Distinct locations, ascending
    pub locations: Vec<String>,
    /// Distinct start years, most recent first
    pub years: Vec<i32>,
}

impl FilterSection {
    pub fn from_events(events: &[Event]) -> Self {
        let mut event_types = BTreeSet::new();
        let mut topics = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut years = BTreeSet::new();

        for event in events {
            event_types.insert(event.event_type);
            topics.insert(event.topic.trim().to_string());
            locations.insert(event.location.trim().to_string());
            years.insert(event.start_date.year());
        }

        topics.remove("");
        locations.remove("");

        Self {
            event_types: event_types.into_iter().collect(),
            topics: topics.into_iter().collect(),
            locations: locations.into_iter().collect(),
            years: years.into_iter().rev().collect(),
        }
    }
}
