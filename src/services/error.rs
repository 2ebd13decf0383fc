//! Service-level error taxonomy

use thiserror::Error;

use crate::models::PageType;

/// Failures surfaced by the content and event services.
///
/// Both variants are terminal for the request that raised them.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// No document is stored for the page type
    #[error("Content of Page {0} not found")]
    ContentNotFound(PageType),

    /// Conversion or I/O failed; `message` is the underlying error's message
    #[error("{message}")]
    PlatformInternal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PlatformError {
    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        let source = source.into();
        Self::PlatformInternal {
            message: source.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_page_type() {
        let err = PlatformError::ContentNotFound(PageType::Team);
        assert_eq!(err.to_string(), "Content of Page TEAM not found");
    }

    #[test]
    fn test_internal_keeps_source_message() {
        let err = PlatformError::internal(anyhow::anyhow!("Invalid JSON"));

        assert_eq!(err.to_string(), "Invalid JSON");
        assert!(std::error::Error::source(&err).is_some());
    }
}
