use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{genre::GenreId, impl_record};
use crate::db::RecordId;

pub type CreatorId = RecordId;

pub const TABLE_NAME: &str = "creator";

/// A curator: an editorial entity that owns platform-wide playlists.
/// Unlike a [`super::profile::Profile`], a [`Creator`] isn't a single end-user.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Creator {
    /// The unique identifier for this [`Creator`].
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub id: Option<CreatorId>,
    pub name: Arc<str>,
    #[serde(default)]
    pub description: Option<Arc<str>>,
    /// The genres this [`Creator`] curates.
    #[serde(default)]
    pub genres: Vec<GenreId>,
}

impl_record!(Creator, TABLE_NAME);

impl std::fmt::Display for Creator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Curator '{}'>", self.name)
    }
}
