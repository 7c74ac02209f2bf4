//! Role-based navigation visibility.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Application role of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    Admin,
    Member,
}

impl AppRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Member => ROLE_MEMBER,
        }
    }
}

/// Stored string value for the admin role.
pub const ROLE_ADMIN: &str = "admin";
/// Stored string value for the member role.
pub const ROLE_MEMBER: &str = "member";

/// Parses one role from its stored string value.
pub fn parse_role(value: &str) -> Result<AppRole, RoleParseError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(RoleParseError::EmptyRole);
    }

    match normalized {
        ROLE_ADMIN => Ok(AppRole::Admin),
        ROLE_MEMBER => Ok(AppRole::Member),
        other => Err(RoleParseError::UnsupportedRole(other.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleParseError {
    EmptyRole,
    UnsupportedRole(String),
}

impl Display for RoleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRole => write!(f, "role value must not be empty"),
            Self::UnsupportedRole(value) => write!(f, "role is unsupported: {value}"),
        }
    }
}

impl Error for RoleParseError {}

/// Navigable section of the dashboard. Declaration order is navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Dashboard,
    Members,
    Tasks,
    Meetings,
    Communication,
}

impl Section {
    pub fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Members => "members",
            Self::Tasks => "tasks",
            Self::Meetings => "meetings",
            Self::Communication => "communication",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Members => "Members",
            Self::Tasks => "Tasks",
            Self::Meetings => "Meetings",
            Self::Communication => "Communication",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Members => "/members",
            Self::Tasks => "/tasks",
            Self::Meetings => "/meetings",
            Self::Communication => "/communication",
        }
    }
}

const ALL_SECTIONS: [Section; 5] = [
    Section::Dashboard,
    Section::Members,
    Section::Tasks,
    Section::Meetings,
    Section::Communication,
];

/// Sections a role may navigate to, in navigation order.
///
/// Members only see the read-only dashboard; admins also get the record
/// management pages.
pub fn visible_sections(role: AppRole) -> BTreeSet<Section> {
    match role {
        AppRole::Admin => ALL_SECTIONS.into_iter().collect(),
        AppRole::Member => BTreeSet::from([Section::Dashboard]),
    }
}
