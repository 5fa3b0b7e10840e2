use profiledeck_profiles::{Profile, ProfilePage};
use serde::{Deserialize, Serialize};

/// A validated profile plus the derived fields a client renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    #[serde(flatten)]
    pub profile: Profile,
    pub display_name: String,
    pub avatar_url: String,
}

impl From<Profile> for ProfileDto {
    fn from(profile: Profile) -> Self {
        Self {
            display_name: profile.display_name(),
            avatar_url: profile.avatar_url(),
            profile,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileDto>,
    pub next_cursor: Option<u32>,
}

impl From<ProfilePage> for ProfileListResponse {
    fn from(page: ProfilePage) -> Self {
        Self {
            profiles: page.records.into_iter().map(ProfileDto::from).collect(),
            next_cursor: page.next_cursor,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
