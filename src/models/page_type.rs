//! Page type identifiers

use serde::{Deserialize, Serialize};

/// Where the content of a page type lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    /// Stored as a document in the page repository
    Document,
    /// Read as raw JSON from a resource file
    Resource,
}

/// CMS content category. Each variant owns exactly one storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    LandingPage,
    Team,
    AboutUs,
    CodeOfConduct,
    Collaborator,
    Footer,
}

impl PageType {
    pub const ALL: [PageType; 6] = [
        PageType::LandingPage,
        PageType::Team,
        PageType::AboutUs,
        PageType::CodeOfConduct,
        PageType::Collaborator,
        PageType::Footer,
    ];

    /// Name used in messages and in the storage key
    pub fn name(&self) -> &'static str {
        match self {
            Self::LandingPage => "LANDING_PAGE",
            Self::Team => "TEAM",
            Self::AboutUs => "ABOUT_US",
            Self::CodeOfConduct => "CODE_OF_CONDUCT",
            Self::Collaborator => "COLLABORATOR",
            Self::Footer => "FOOTER",
        }
    }

    /// Storage key of the page document
    pub fn id(&self) -> &'static str {
        match self {
            Self::LandingPage => "page:LANDING_PAGE",
            Self::Team => "page:TEAM",
            Self::AboutUs => "page:ABOUT_US",
            Self::CodeOfConduct => "page:CODE_OF_CONDUCT",
            Self::Collaborator => "page:COLLABORATOR",
            Self::Footer => "page:FOOTER",
        }
    }

    /// File name of the page's JSON resource
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::LandingPage => "landing_page.json",
            Self::Team => "team.json",
            Self::AboutUs => "about_us.json",
            Self::CodeOfConduct => "code_of_conduct.json",
            Self::Collaborator => "collaborator.json",
            Self::Footer => "footer.json",
        }
    }

    pub fn source(&self) -> PageSource {
        match self {
            Self::CodeOfConduct | Self::Collaborator => PageSource::Resource,
            _ => PageSource::Document,
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_uses_screaming_name() {
        assert_eq!(PageType::LandingPage.to_string(), "LANDING_PAGE");
        assert_eq!(PageType::AboutUs.to_string(), "ABOUT_US");
    }

    #[test]
    fn test_storage_keys_are_unique() {
        let ids: HashSet<_> = PageType::ALL.iter().map(|p| p.id()).collect();
        assert_eq!(ids.len(), PageType::ALL.len());
    }

    #[test]
    fn test_storage_key_embeds_name() {
        for page_type in PageType::ALL {
            assert_eq!(page_type.id(), format!("page:{}", page_type.name()));
        }
    }

    #[test]
    fn test_serde_matches_display() {
        let json = serde_json::to_string(&PageType::CodeOfConduct).unwrap();
        assert_eq!(json, "\"CODE_OF_CONDUCT\"");
    }

    #[test]
    fn test_resource_backed_types() {
        assert_eq!(PageType::CodeOfConduct.source(), PageSource::Resource);
        assert_eq!(PageType::Collaborator.source(), PageSource::Resource);
        assert_eq!(PageType::Team.source(), PageSource::Document);
    }
}
