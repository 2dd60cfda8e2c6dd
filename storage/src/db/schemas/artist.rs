use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::db::RecordId;

pub type ArtistId = RecordId;

pub const TABLE_NAME: &str = "artist";

/// This struct holds all the metadata about a particular [`Artist`].
/// An [`Artist`] is either a solo act or a group whose members are other [`Artist`]s.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Artist {
    /// The unique identifier for this [`Artist`].
    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub id: Option<ArtistId>,
    /// The [`Artist`]'s name.
    pub name: Arc<str>,
    /// Whether this [`Artist`] is a group.
    #[serde(default)]
    pub is_group: bool,
    /// For a group, its members. For a member, the groups it belongs to.
    #[serde(default)]
    pub group_members: Vec<ArtistId>,
    #[serde(default)]
    pub bio: Option<Arc<str>>,
    /// Comma separated names the [`Artist`] goes by.
    #[serde(default)]
    pub nicknames: Option<Arc<str>>,
}

impl_record!(Artist, TABLE_NAME);

impl Artist {
    /// Iterate over the individual nicknames of this [`Artist`], trimmed and without empty entries.
    pub fn nicknames(&self) -> impl Iterator<Item = &str> {
        self.nicknames
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|nickname| !nickname.is_empty())
    }
}

impl std::fmt::Display for Artist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_group { "Group" } else { "Artist" };
        write!(f, "<{kind} '{}'>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn artist(name: &str, is_group: bool, nicknames: Option<&str>) -> Artist {
        Artist {
            id: None,
            name: name.into(),
            is_group,
            group_members: vec![],
            bio: None,
            nicknames: nicknames.map(Into::into),
        }
    }

    #[rstest]
    #[case(artist("Quavo", false, None), "<Artist 'Quavo'>")]
    #[case(artist("The Fugees", true, None), "<Group 'The Fugees'>")]
    fn test_display(#[case] artist: Artist, #[case] expected: &str) {
        assert_eq!(artist.to_string(), expected);
    }

    #[rstest]
    #[case(None, vec![])]
    #[case(Some(""), vec![])]
    #[case(Some("Huncho"), vec!["Huncho"])]
    #[case(Some("Huncho, Quavious ,,Quavo Stuntin"), vec!["Huncho", "Quavious", "Quavo Stuntin"])]
    fn test_nicknames(#[case] raw: Option<&str>, #[case] expected: Vec<&str>) {
        let artist = artist("Quavo", false, raw);
        assert_eq!(artist.nicknames().collect::<Vec<_>>(), expected);
    }
}
