use serde::{Deserialize, Serialize};

/// Directory groups, listed in display order by [`MemberCategory::ALL`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MemberCategory {
    Leadership,
    Construction,
    Tech,
    Service,
    Finance,
    Manufacturing,
    Other,
}

impl MemberCategory {
    pub const ALL: [MemberCategory; 7] = [
        MemberCategory::Leadership,
        MemberCategory::Construction,
        MemberCategory::Tech,
        MemberCategory::Service,
        MemberCategory::Finance,
        MemberCategory::Manufacturing,
        MemberCategory::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MemberCategory::Leadership => "leadership",
            MemberCategory::Construction => "construction",
            MemberCategory::Tech => "tech",
            MemberCategory::Service => "service",
            MemberCategory::Finance => "finance",
            MemberCategory::Manufacturing => "manufacturing",
            MemberCategory::Other => "other",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MemberCategory::Leadership => "Leadership",
            MemberCategory::Construction => "Construction & Real Estate",
            MemberCategory::Tech => "IT & Technology",
            MemberCategory::Service => "Services",
            MemberCategory::Finance => "Finance",
            MemberCategory::Manufacturing => "Manufacturing & Printing",
            MemberCategory::Other => "Other Members",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            MemberCategory::Leadership => "👔",
            MemberCategory::Construction => "🏗️",
            MemberCategory::Tech => "💻",
            MemberCategory::Service => "🌸",
            MemberCategory::Finance => "🏦",
            MemberCategory::Manufacturing => "📄",
            MemberCategory::Other => "👥",
        }
    }

    /// Accent color used for the group's card border
    pub fn color(self) -> &'static str {
        match self {
            MemberCategory::Leadership => "#667eea",
            MemberCategory::Construction => "#f093fb",
            MemberCategory::Tech => "#4facfe",
            MemberCategory::Service => "#43e97b",
            MemberCategory::Finance => "#fa709a",
            MemberCategory::Manufacturing => "#feca57",
            MemberCategory::Other => "#95a5a6",
        }
    }
}

impl From<String> for MemberCategory {
    fn from(value: String) -> Self {
        MemberCategory::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(MemberCategory::Other)
    }
}

/// Role within the organisation. Korean role names from older rosters are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MemberRole {
    President,
    Secretary,
    Member,
    Other(String),
}

impl MemberRole {
    pub fn label(&self) -> &str {
        match self {
            MemberRole::President => "President",
            MemberRole::Secretary => "Secretary",
            MemberRole::Member => "Member",
            MemberRole::Other(name) => name,
        }
    }

    /// Badge class for the role; plain members get no badge
    pub fn badge_class(&self) -> Option<&'static str> {
        match self {
            MemberRole::President => Some("bg-primary"),
            MemberRole::Secretary => Some("bg-info"),
            MemberRole::Member => None,
            MemberRole::Other(_) => Some("bg-secondary"),
        }
    }
}

impl From<String> for MemberRole {
    fn from(value: String) -> Self {
        match value.trim() {
            "president" | "청년회장" => MemberRole::President,
            "secretary" | "총무" => MemberRole::Secretary,
            "" | "member" | "회원" => MemberRole::Member,
            other => MemberRole::Other(other.to_string()),
        }
    }
}

impl From<MemberRole> for String {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::President => "president".to_string(),
            MemberRole::Secretary => "secretary".to_string(),
            MemberRole::Member => "member".to_string(),
            MemberRole::Other(name) => name,
        }
    }
}

/// An entry of the member roster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub name: String,
    #[serde(default = "default_role")]
    pub role: MemberRole,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub field: String,
    pub category: MemberCategory,
    #[serde(default)]
    pub image: String,
    #[serde(default, rename = "desc", alias = "description")]
    pub description: String,
}

fn default_role() -> MemberRole {
    MemberRole::Member
}
