//! JSON resources backing file-based pages and default content
//!
//! Layout, both on disk and embedded:
//! - `pages/<page file>`: one JSON document per page type
//! - `events.json`: array of default events

use anyhow::{Context, Result};
use rust_embed::RustEmbed;
use std::path::PathBuf;

use crate::models::PageType;

/// Resources compiled into the binary
#[derive(RustEmbed)]
#[folder = "resources/"]
#[include = "*.json"]
struct EmbeddedResources;

pub const EVENTS_FILE: &str = "events.json";

/// Reads resources from an optional override directory, falling back to the embedded copies
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    dir: Option<PathBuf>,
}

impl ResourceStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    /// Store backed only by the embedded resources
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Raw JSON of a page resource
    pub async fn page(&self, page_type: PageType) -> Result<String> {
        self.read(&format!("pages/{}", page_type.file_name())).await
    }

    /// Raw JSON of the default event list
    pub async fn events(&self) -> Result<String> {
        self.read(EVENTS_FILE).await
    }

    async fn read(&self, relative: &str) -> Result<String> {
        if let Some(dir) = &self.dir {
            let path = dir.join(relative);
            let exists = tokio::fs::try_exists(&path)
                .await
                .with_context(|| format!("Failed to access resource {}", path.display()))?;
            if exists {
                tracing::debug!("Reading resource from {}", path.display());
                return tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read resource {}", path.display()));
            }
        }

        let file = EmbeddedResources::get(relative)
            .ok_or_else(|| anyhow::anyhow!("Resource not found: {}", relative))?;
        String::from_utf8(file.data.into_owned())
            .with_context(|| format!("Resource {} is not valid UTF-8", relative))
    }
}
