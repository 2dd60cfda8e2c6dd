use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{artist::ArtistId, genre::GenreId, impl_record};
use crate::db::RecordId;

pub type AlbumId = RecordId;

pub const TABLE_NAME: &str = "album";

/// This struct holds all the metadata about a particular [`Album`].
/// An [`Album`] is split into [`super::disc::Disc`]s, which hold its [`super::song::Song`]s.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Album {
    /// The unique identifier for this [`Album`].
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub id: Option<AlbumId>,
    /// Title of the [`Album`].
    pub title: Arc<str>,
    /// Liner notes.
    #[serde(default)]
    pub notes: Option<Arc<str>>,
    #[serde(default)]
    pub genre: Option<GenreId>,
    /// Release date of this [`Album`].
    #[serde(default)]
    pub release: Option<NaiveDate>,
    /// Unpublished albums (and their songs) are only visible to staff.
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub copyright: Option<Arc<str>>,
    /// Artists of the [`Album`]. (Can be multiple)
    #[serde(default)]
    pub artists: Vec<ArtistId>,
}

impl_record!(Album, TABLE_NAME);

impl std::fmt::Display for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Album '{}'>", self.title)
    }
}
