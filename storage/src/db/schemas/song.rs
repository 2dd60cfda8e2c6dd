use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{artist::ArtistId, disc::DiscId, impl_record};
use crate::db::RecordId;

pub type SongId = RecordId;

pub const TABLE_NAME: &str = "song";

/// This struct holds all the metadata about a particular [`Song`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Song {
    /// The unique identifier for this [`Song`].
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub id: Option<SongId>,
    /// Title of the [`Song`].
    pub title: Arc<str>,
    /// The track number of this [`Song`] on its disc.
    #[serde(default)]
    pub track: Option<u16>,
    #[serde(default)]
    pub explicit: bool,
    /// Length in seconds, if the audio is known.
    #[serde(default)]
    pub length: Option<u32>,
    /// The disc (and through it, the album) this [`Song`] is on.
    pub disc: DiscId,
    /// Featured artists, on top of the album's artists.
    #[serde(default)]
    pub additional_artists: Vec<ArtistId>,
}

impl_record!(Song, TABLE_NAME);

impl std::fmt::Display for Song {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Song '{}'>", self.title)
    }
}
