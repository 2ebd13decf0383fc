//! Data models
//!
//! This module contains the data structures served by the CMS backend:
//! - Page identifiers and the typed page aggregates
//! - Shared page sections (hero, contact, members, links)
//! - Events, event facets and pagination types

mod event;
mod page_type;
mod pages;
mod pagination;
mod sections;

pub use event::{Event, EventType, EventsPage, FilterSection};
pub use page_type::{PageSource, PageType};
pub use pages::{
    AboutUsPage, CmsPage, CodeOfConductItem, CodeOfConductPage, CollaboratorPage, FooterPage,
    LandingPage, MembersByType, TeamPage,
};
pub use pagination::{
    paginate, PageData, PageRequest, PageRequestError, Pagination, DEFAULT_CURRENT_PAGE,
    DEFAULT_PAGE_SIZE,
};
pub use sections::{
    Contact, Country, HeroSection, Image, ImageType, LinkItem, ListSection, Member, MemberType,
    PageSection, SocialNetwork, SocialNetworkType,
};

/// Untyped stored representation of a page
pub type Document = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
pub(crate) mod test_factories {
    pub use super::event::test_factories::*;
    pub use super::pages::test_factories::*;
}
