//! Decoding of stored content into typed pages
//!
//! Decoding is all-or-nothing: a document that is missing a required field,
//! carries a value of the wrong shape, or has an unknown top-level field is
//! rejected with a [`ConversionError`] and no partial page escapes.

use thiserror::Error;

use crate::models::{
    AboutUsPage, CmsPage, CodeOfConductPage, CollaboratorPage, Document, FooterPage, LandingPage,
    PageType, TeamPage,
};

/// A stored document or resource did not match its page schema
#[derive(Debug, Error)]
#[error("{source}")]
pub struct ConversionError {
    page_type: PageType,
    #[source]
    source: serde_json::Error,
}

impl ConversionError {
    fn new(page_type: PageType, source: serde_json::Error) -> Self {
        Self { page_type, source }
    }

    pub fn page_type(&self) -> PageType {
        self.page_type
    }
}

/// Decode an untyped document into page `P`
pub fn from_document<P: CmsPage>(document: Document) -> Result<P, ConversionError> {
    serde_json::from_value(serde_json::Value::Object(document))
        .map_err(|e| ConversionError::new(P::PAGE_TYPE, e))
}

/// Decode raw JSON text into page `P`
pub fn from_json<P: CmsPage>(json: &str) -> Result<P, ConversionError> {
    serde_json::from_str(json).map_err(|e| ConversionError::new(P::PAGE_TYPE, e))
}

/// Parse raw JSON text into an untyped document, checking it decodes as `page_type`
pub fn to_checked_document(page_type: PageType, json: &str) -> Result<Document, ConversionError> {
    let document: Document =
        serde_json::from_str(json).map_err(|e| ConversionError::new(page_type, e))?;

    match page_type {
        PageType::LandingPage => check::<LandingPage>(&document)?,
        PageType::Team => check::<TeamPage>(&document)?,
        PageType::AboutUs => check::<AboutUsPage>(&document)?,
        PageType::CodeOfConduct => check::<CodeOfConductPage>(&document)?,
        PageType::Collaborator => check::<CollaboratorPage>(&document)?,
        PageType::Footer => check::<FooterPage>(&document)?,
    }

    Ok(document)
}

fn check<P: CmsPage>(document: &Document) -> Result<(), ConversionError> {
    from_document::<P>(document.clone()).map(drop)
}
