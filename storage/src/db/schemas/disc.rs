use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{album::AlbumId, impl_record};
use crate::db::RecordId;

pub type DiscId = RecordId;

pub const TABLE_NAME: &str = "disc";

/// A sub-grouping of an [`super::album::Album`]'s tracks.
/// (Most albums only have 1).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Disc {
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub id: Option<DiscId>,
    pub name: Arc<str>,
    /// The album this disc belongs to.
    pub album: AlbumId,
}

impl_record!(Disc, TABLE_NAME);
