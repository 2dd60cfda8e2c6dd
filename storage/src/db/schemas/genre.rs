use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::db::RecordId;

pub type GenreId = RecordId;

pub const TABLE_NAME: &str = "genre";

/// A musical genre, curators are associated with the genres they cover.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Genre {
    /// The unique identifier for this [`Genre`].
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub id: Option<GenreId>,
    /// Title of the [`Genre`].
    pub title: Arc<str>,
    #[serde(default)]
    pub description: Option<Arc<str>>,
}

impl_record!(Genre, TABLE_NAME);

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Genre '{}'>", self.title)
    }
}
