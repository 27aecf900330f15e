use crate::models::types::UserName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of named links a profile may hold.
pub const MAX_LINKS: usize = 10;

/// Link name -> URL. Sorted by name so listings are stable.
pub type Links = BTreeMap<String, String>;

/// A player's profile: an optional bio and a bounded set of named links.
///
/// `bio: Some("")` is a set (but empty) bio. `links: None` means the profile never had
/// links, `Some(empty)` means all of them were removed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub owner: UserName,
    pub bio: Option<String>,
    pub links: Option<Links>,
}

impl Profile {
    pub fn empty(owner: UserName) -> Self {
        Self {
            owner,
            bio: None,
            links: None,
        }
    }

    /// True when there is nothing to show: no bio field and no links field.
    pub fn is_empty(&self) -> bool {
        self.bio.is_none() && self.links.is_none()
    }

    pub fn link_count(&self) -> usize {
        self.links.as_ref().map_or(0, |l| l.len())
    }

    pub fn link(&self, name: &str) -> Option<&str> {
        self.links.as_ref()?.get(name).map(String::as_str)
    }
}

/// On-disk shape of a profile. The owner is not stored; it is the record key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

impl ProfileRecord {
    pub fn into_profile(self, owner: UserName) -> Profile {
        Profile {
            owner,
            bio: self.bio,
            links: self.links,
        }
    }
}

impl From<&Profile> for ProfileRecord {
    fn from(p: &Profile) -> Self {
        Self {
            bio: p.bio.clone(),
            links: p.links.clone(),
        }
    }
}
