use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::db::RecordId;

pub type ProfileId = RecordId;

pub const TABLE_NAME: &str = "profile";

/// An end-user identity, owner of personal playlists.
/// Account management lives outside this crate, only what playlists need is kept here.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Profile {
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfileId>,
    pub name: Arc<str>,
}

impl_record!(Profile, TABLE_NAME);
