//! Typed CMS page aggregates
//!
//! Every page is bound to one [`PageType`] through the [`CmsPage`] trait.
//! Pages reject unknown top-level fields so that a stored document either
//! decodes completely or not at all.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::event::Event;
use super::page_type::PageType;
use super::pagination::Pagination;
use super::sections::{
    Contact, HeroSection, LinkItem, ListSection, Member, PageSection, SocialNetwork,
};

/// A page aggregate decodable from its stored form
pub trait CmsPage: Serialize + DeserializeOwned + Send + 'static {
    const PAGE_TYPE: PageType;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LandingPage {
    pub id: String,
    pub hero_section: HeroSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_banner_section: Option<PageSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub programmes: Option<ListSection<PageSection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<ListSection<Event>>,
    pub volunteer_section: PageSection,
}

impl CmsPage for LandingPage {
    const PAGE_TYPE: PageType = PageType::LandingPage;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersByType {
    #[serde(default)]
    pub directors: Vec<Member>,
    #[serde(default)]
    pub leaders: Vec<Member>,
    #[serde(default)]
    pub evangelists: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeamPage {
    pub id: String,
    pub hero_section: HeroSection,
    pub section: PageSection,
    pub contact: Contact,
    #[serde(default)]
    pub members_by_type: MembersByType,
}

impl CmsPage for TeamPage {
    const PAGE_TYPE: PageType = PageType::Team;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AboutUsPage {
    pub id: String,
    pub hero_section: HeroSection,
    #[serde(default)]
    pub items: Vec<PageSection>,
    pub contact: Contact,
}

impl CmsPage for AboutUsPage {
    const PAGE_TYPE: PageType = PageType::AboutUs;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeOfConductItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkItem>,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CodeOfConductPage {
    pub id: String,
    pub hero_section: HeroSection,
    pub page: PageSection,
    pub items: Vec<CodeOfConductItem>,
}

impl CmsPage for CodeOfConductPage {
    const PAGE_TYPE: PageType = PageType::CodeOfConduct;
}

/// Collaborator listing. `metadata` is only present on paginated responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CollaboratorPage {
    pub id: String,
    pub hero_section: HeroSection,
    pub section: PageSection,
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Pagination>,
    #[serde(default)]
    pub collaborators: Vec<Member>,
}

impl CmsPage for CollaboratorPage {
    const PAGE_TYPE: PageType = PageType::Collaborator;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FooterPage {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub network: Vec<SocialNetwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkItem>,
}

impl CmsPage for FooterPage {
    const PAGE_TYPE: PageType = PageType::Footer;
}

/// Page fixtures shared by service and API tests
#[cfg(test)]
pub(crate) mod test_factories {
    use super::*;
    use crate::models::sections::{Country, MemberType, SocialNetworkType};

    pub fn create_hero(title: &str) -> HeroSection {
        HeroSection {
            title: title.to_string(),
            description: Some(format!("{} description", title)),
            images: Vec::new(),
        }
    }

    pub fn create_contact() -> Contact {
        Contact {
            title: "Contact us".to_string(),
            links: vec![SocialNetwork {
                network_type: SocialNetworkType::Email,
                link: "mailto:london@womencodingcommunity.com".to_string(),
            }],
        }
    }

    pub fn create_member(name: &str, member_type: MemberType) -> Member {
        Member {
            full_name: name.to_string(),
            position: "Software Engineer".to_string(),
            member_type,
            images: Vec::new(),
            country: Country {
                country_code: "GB".to_string(),
                country_name: "United Kingdom".to_string(),
            },
            city: Some("London".to_string()),
            job_title: None,
            company_name: None,
            network: Vec::new(),
        }
    }

    pub fn create_landing_page() -> LandingPage {
        LandingPage {
            id: PageType::LandingPage.id().to_string(),
            hero_section: create_hero("Hero"),
            full_banner_section: None,
            programmes: None,
            events: None,
            volunteer_section: PageSection::new("Volunteer"),
        }
    }

    pub fn create_team_page() -> TeamPage {
        TeamPage {
            id: PageType::Team.id().to_string(),
            hero_section: create_hero("Team"),
            section: PageSection::new("Meet the team"),
            contact: create_contact(),
            members_by_type: MembersByType {
                directors: vec![create_member("Director", MemberType::Director)],
                leaders: vec![create_member("Leader", MemberType::Leader)],
                evangelists: Vec::new(),
            },
        }
    }

    pub fn create_about_us_page() -> AboutUsPage {
        AboutUsPage {
            id: PageType::AboutUs.id().to_string(),
            hero_section: create_hero("About us"),
            items: vec![PageSection::new("Mission"), PageSection::new("Vision")],
            contact: create_contact(),
        }
    }

    pub fn create_footer_page() -> FooterPage {
        FooterPage {
            id: PageType::Footer.id().to_string(),
            title: "Follow us".to_string(),
            subtitle: None,
            description: None,
            network: create_contact().links,
            link: Some(LinkItem::new("Join", "https://slack.womencodingcommunity.com")),
        }
    }

    pub fn create_code_of_conduct_page() -> CodeOfConductPage {
        CodeOfConductPage {
            id: PageType::CodeOfConduct.id().to_string(),
            hero_section: create_hero("Code of conduct"),
            page: PageSection::new("Our pledge"),
            items: vec![CodeOfConductItem {
                title: "Be respectful".to_string(),
                description: None,
                link: None,
                items: vec!["No harassment".to_string()],
            }],
        }
    }

    pub fn create_collaborator_page(members: usize) -> CollaboratorPage {
        CollaboratorPage {
            id: PageType::Collaborator.id().to_string(),
            hero_section: create_hero("Collaborators"),
            section: PageSection::new("Our collaborators"),
            contact: create_contact(),
            metadata: None,
            collaborators: (1..=members)
                .map(|i| create_member(&format!("Collaborator {}", i), MemberType::Collaborator))
                .collect(),
        }
    }
}
