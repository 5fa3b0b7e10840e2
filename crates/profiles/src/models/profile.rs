use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::{capitalize, construct_image_url};

/// A validated user profile as served by the upstream API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Identifier assigned by the upstream API
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
    pub username: String,
    /// Avatar image URL
    pub image: String,

    /// ISO-8601 date (`1996-05-30`) or date-time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

/// Postal address of a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Employment details of a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub title: String,
}

impl Profile {
    /// Name shown in listings, e.g. "Emily Johnson".
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            capitalize(&self.first_name),
            capitalize(&self.last_name)
        )
    }

    /// Absolute avatar URL.
    ///
    /// Validation only admits absolute http(s) images, so for a validated
    /// profile this is `image` unchanged. Bare tokens are resolved against
    /// the image host only for profiles built directly.
    pub fn avatar_url(&self) -> String {
        construct_image_url(&self.image)
    }
}

/// Identifier used for single-profile lookups.
///
/// The upstream API accepts the numeric id in the path, but lookups may
/// also come from user input (route parameters), so the raw text is kept.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ProfileId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ProfileId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
