//! Services layer - Business logic
//!
//! This module contains the business logic of the CMS backend.
//! Services are responsible for:
//! - Looking up page content and decoding it into typed pages
//! - Paginating event listings and computing their facets
//! - Translating storage and decoding failures into `PlatformError`

pub mod content;
pub mod converter;
pub mod error;
pub mod event;
pub mod resources;

pub use content::ContentService;
pub use converter::ConversionError;
pub use error::PlatformError;
pub use event::EventService;
pub use resources::ResourceStore;
