//! Content service
//!
//! Looks up page content and decodes it into typed pages:
//! - Document-backed pages come from the page repository
//! - Resource-backed pages (code of conduct, collaborators) come from JSON resources

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::db::repositories::PageRepository;
use crate::models::{
    paginate, AboutUsPage, CmsPage, CodeOfConductPage, CollaboratorPage, FooterPage, LandingPage,
    PageRequest, PageSource, PageType, TeamPage,
};
use crate::services::converter::{self, ConversionError};
use crate::services::error::PlatformError;
use crate::services::resources::ResourceStore;

pub struct ContentService {
    repo: Arc<dyn PageRepository>,
    resources: Arc<ResourceStore>,
}

impl ContentService {
    pub fn new(repo: Arc<dyn PageRepository>, resources: Arc<ResourceStore>) -> Self {
        Self { repo, resources }
    }

    /// Fetch and decode the stored document of page `P`
    pub async fn get_page<P: CmsPage>(&self) -> Result<P, PlatformError> {
        let page_type = P::PAGE_TYPE;

        let document = self
            .repo
            .find_by_id(page_type.id())
            .await
            .map_err(|e| internal(page_type, e))?
            .ok_or_else(|| {
                tracing::debug!("No document stored for {}", page_type.id());
                PlatformError::ContentNotFound(page_type)
            })?;

        converter::from_document(document).map_err(decode_failed)
    }

    /// Read and decode the JSON resource of page `P`
    pub async fn get_resource_page<P: CmsPage>(&self) -> Result<P, PlatformError> {
        let page_type = P::PAGE_TYPE;

        let json = self
            .resources
            .page(page_type)
            .await
            .map_err(|e| internal(page_type, e))?;

        converter::from_json(&json).map_err(decode_failed)
    }

    pub async fn get_landing_page(&self) -> Result<LandingPage, PlatformError> {
        self.get_page().await
    }

    pub async fn get_team(&self) -> Result<TeamPage, PlatformError> {
        self.get_page().await
    }

    pub async fn get_about_us(&self) -> Result<AboutUsPage, PlatformError> {
        self.get_page().await
    }

    pub async fn get_footer(&self) -> Result<FooterPage, PlatformError> {
        self.get_page().await
    }

    pub async fn get_code_of_conduct(&self) -> Result<CodeOfConductPage, PlatformError> {
        self.get_resource_page().await
    }

    /// Collaborator page with its member list cut to the requested page
    pub async fn get_collaborator(
        &self,
        request: PageRequest,
    ) -> Result<CollaboratorPage, PlatformError> {
        let mut page: CollaboratorPage = self.get_resource_page().await?;

        let (data, metadata) = paginate(std::mem::take(&mut page.collaborators), request);
        page.collaborators = data.items;
        page.metadata = Some(metadata);

        Ok(page)
    }

    /// Store the embedded default document of every document-backed page
    /// type that has none. Existing documents are left untouched.
    pub async fn seed_defaults(&self) -> Result<usize> {
        let mut seeded = 0;

        for page_type in PageType::ALL {
            if page_type.source() != PageSource::Document
                || self.repo.exists(page_type.id()).await?
            {
                continue;
            }

            let json = self.resources.page(page_type).await?;
            let document = converter::to_checked_document(page_type, &json)
                .with_context(|| format!("Default content for {} is invalid", page_type))?;
            self.repo.save(page_type.id(), &document).await?;

            tracing::info!("Seeded default content for {}", page_type);
            seeded += 1;
        }

        Ok(seeded)
    }
}

fn internal(page_type: PageType, err: impl Into<anyhow::Error>) -> PlatformError {
    let err = PlatformError::internal(err);
    tracing::warn!("Failed to load content of {}: {}", page_type, err);
    err
}

fn decode_failed(err: ConversionError) -> PlatformError {
    tracing::warn!("Content of {} does not match its schema: {}", err.page_type(), err);
    PlatformError::internal(err)
}
