//! Ranking of search results by how close they are to the search term.
use serde::Serialize;
use tyne_storage::db::schemas::{
    album::Album, artist::Artist, creator::Creator, genre::Genre, playlist::Playlist, song::Song,
};

/// Anything that can be ranked against a search term.
pub trait Ranked {
    /// The string compared with the search term: the title of albums, songs, playlists, and
    /// genres, the name of artists and curators.
    fn rank_key(&self) -> &str;
}

macro_rules! ranked_by {
    ($schema:ty, $field:ident) => {
        impl Ranked for $schema {
            #[inline]
            fn rank_key(&self) -> &str {
                &self.$field
            }
        }
    };
}

ranked_by!(Album, title);
ranked_by!(Song, title);
ranked_by!(Playlist, title);
ranked_by!(Genre, title);
ranked_by!(Artist, name);
ranked_by!(Creator, name);

/// A single result of any type, as found in the top results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SearchItem {
    Album(Album),
    Song(Song),
    Artist(Artist),
    Playlist(Playlist),
    Genre(Genre),
    Curator(Creator),
}

impl Ranked for SearchItem {
    fn rank_key(&self) -> &str {
        match self {
            Self::Album(album) => album.rank_key(),
            Self::Song(song) => song.rank_key(),
            Self::Artist(artist) => artist.rank_key(),
            Self::Playlist(playlist) => playlist.rank_key(),
            Self::Genre(genre) => genre.rank_key(),
            Self::Curator(creator) => creator.rank_key(),
        }
    }
}

/// Levenshtein distance between the lowercase forms of `term` and `key`.
#[must_use]
pub fn distance(term: &str, key: &str) -> usize {
    strsim::levenshtein(&term.to_lowercase(), &key.to_lowercase())
}

/// Sort `items` by ascending distance to `term`.
/// Items at the same distance keep their relative order.
pub fn rank<T: Ranked>(term: &str, items: &mut [T]) {
    let term = term.to_lowercase();
    items.sort_by_cached_key(|item| strsim::levenshtein(&term, &item.rank_key().to_lowercase()));
}
