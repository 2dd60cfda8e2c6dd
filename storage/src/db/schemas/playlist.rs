use std::{collections::HashSet, convert::Infallible, str::FromStr, sync::Arc};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{creator::CreatorId, impl_record, profile::ProfileId, song::SongId};
use crate::db::RecordId;

pub type PlaylistId = RecordId;

pub const TABLE_NAME: &str = "playlist";

/// This struct holds all the metadata about a particular [`Playlist`].
/// A [`Playlist`] is a collection of [`super::song::Song`]s.
///
/// Membership ([`Playlist::songs`]) is a set, the order the songs should be played in is kept
/// separately in [`Playlist::songs_order`]. The two can drift apart, see
/// [`Playlist::verify_songs_and_songs_order`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Playlist {
    /// The unique identifier for this [`Playlist`].
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub id: Option<PlaylistId>,
    pub title: Arc<str>,
    #[serde(default)]
    pub description: Option<Arc<str>>,
    /// Who the [`Playlist`] belongs to.
    pub owner: PlaylistOwner,
    /// Keys to every [`super::song::Song`] in this [`Playlist`], without duplicates.
    #[serde(default)]
    pub songs: Vec<SongId>,
    /// The order to present [`Playlist::songs`] in.
    #[serde(default)]
    pub songs_order: SongsOrder,
}

impl_record!(Playlist, TABLE_NAME);

impl Playlist {
    /// Check that the recorded order covers exactly the songs of the playlist.
    #[must_use]
    pub fn verify_songs_and_songs_order(&self) -> bool {
        self.songs_order.matches(&self.songs)
    }

    /// The curator that owns this playlist, if it isn't a personal one.
    #[must_use]
    pub const fn creator(&self) -> Option<CreatorId> {
        match self.owner {
            PlaylistOwner::Creator(id) => Some(id),
            PlaylistOwner::Profile(_) => None,
        }
    }
}

impl std::fmt::Display for Playlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Playlist '{}'>", self.title)
    }
}

/// A playlist belongs to exactly one of a curator or a user profile.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistOwner {
    /// An editorial playlist, visible platform-wide and searchable.
    Creator(CreatorId),
    /// A personal playlist.
    Profile(ProfileId),
}

/// Where to put a song in a [`SongsOrder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    /// At this index, or at the end if the index is past it.
    At(usize),
    /// After every other song.
    #[default]
    End,
}

impl Position {
    /// Negative positions mean "append".
    #[must_use]
    pub fn from_signed(position: i64) -> Self {
        usize::try_from(position).map_or(Self::End, Self::At)
    }
}

impl From<Option<usize>> for Position {
    fn from(position: Option<usize>) -> Self {
        position.map_or(Self::End, Self::At)
    }
}

/// An explicit order over the songs of a [`Playlist`].
///
/// Persisted as song ids joined by commas, without whitespace (`"5,12,3"`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongsOrder(Vec<SongId>);

impl SongsOrder {
    /// Parse a persisted order, tokens that aren't plain digits are dropped.
    #[must_use]
    pub fn decode(raw: &str) -> Self {
        Self(
            raw.split(',')
                .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
                .filter_map(|token| token.parse().ok())
                .collect(),
        )
    }

    #[must_use]
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SongId] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, song_id: SongId) -> bool {
        self.0.contains(&song_id)
    }

    /// Put `song_id` at `position`, moving it if it's already in the order.
    ///
    /// The position is clamped to the length of the order before the song is taken out, so
    /// moving a song "past the end" always appends it.
    pub fn place(&mut self, song_id: SongId, position: Position) {
        let position = match position {
            Position::At(index) => index.min(self.0.len()),
            Position::End => self.0.len(),
        };

        self.remove(song_id);

        let position = position.min(self.0.len());
        self.0.insert(position, song_id);
    }

    /// Take every occurrence of `song_id` out of the order.
    pub fn remove(&mut self, song_id: SongId) {
        self.0.retain(|id| *id != song_id);
    }

    /// Whether this order holds exactly the songs in `membership`, once each.
    #[must_use]
    pub fn matches(&self, membership: &[SongId]) -> bool {
        if self.0.len() != membership.len() {
            return false;
        }

        let ordered: HashSet<&SongId> = self.0.iter().collect();
        let members: HashSet<&SongId> = membership.iter().collect();
        ordered.len() == self.0.len() && ordered == members
    }
}

impl From<Vec<SongId>> for SongsOrder {
    fn from(ids: Vec<SongId>) -> Self {
        Self(ids)
    }
}

impl FromStr for SongsOrder {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::decode(s))
    }
}

impl std::fmt::Display for SongsOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for SongsOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for SongsOrder {
    /// `null` and the empty string both mean "no recorded order".
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::decode).unwrap_or_default())
    }
}
