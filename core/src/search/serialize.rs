//! Wire-format projections of search results.
//!
//! These are what a client of the search gets: related records are resolved and embedded, and
//! every entry of the top results is tagged with its `item_type`.
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::{Connection, Surreal};
use tyne_storage::{
    db::{
        schemas::{
            album::{Album, AlbumId},
            artist::{Artist, ArtistId},
            creator::{Creator, CreatorId},
            genre::{Genre, GenreId},
            playlist::{Playlist, PlaylistId, PlaylistOwner},
            song::{Song, SongId},
        },
    },
    errors::Error,
};

use super::{SearchItem, SearchResults};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistView {
    pub id: Option<ArtistId>,
    pub name: Arc<str>,
    pub is_group: bool,
    /// Only set for groups.
    pub group_members: Option<Vec<ArtistView>>,
    pub bio: Option<Arc<str>>,
}

impl ArtistView {
    /// Project an artist without resolving anything.
    #[must_use]
    pub fn brief(artist: &Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
            is_group: artist.is_group,
            group_members: None,
            bio: artist.bio.clone(),
        }
    }

    /// Project an artist, embedding its members if it's a group.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn load<C: Connection>(db: &Surreal<C>, artist: &Artist) -> Result<Self, Error> {
        let group_members = if artist.is_group {
            Some(
                artist
                    .read_group_members(db)
                    .await?
                    .iter()
                    .map(Self::brief)
                    .collect(),
            )
        } else {
            None
        };

        Ok(Self {
            group_members,
            ..Self::brief(artist)
        })
    }

    async fn load_all<C: Connection>(
        db: &Surreal<C>,
        artists: &[Artist],
    ) -> Result<Vec<Self>, Error> {
        let mut views = Vec::with_capacity(artists.len());
        for artist in artists {
            views.push(Self::load(db, artist).await?);
        }
        Ok(views)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreView {
    pub id: Option<GenreId>,
    pub title: Arc<str>,
    pub description: Option<Arc<str>>,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            title: genre.title.clone(),
            description: genre.description.clone(),
        }
    }
}

/// An album, without its discs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumView {
    pub id: Option<AlbumId>,
    pub title: Arc<str>,
    pub notes: Option<Arc<str>>,
    pub genre: Option<GenreView>,
    pub release: Option<NaiveDate>,
    pub artists: Vec<ArtistView>,
    pub copyright: Option<Arc<str>>,
    pub published: bool,
}

impl AlbumView {
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn load<C: Connection>(db: &Surreal<C>, album: &Album) -> Result<Self, Error> {
        let genre = match album.genre {
            Some(id) => Genre::read(db, id).await?.as_ref().map(GenreView::from),
            None => None,
        };

        Ok(Self {
            id: album.id,
            title: album.title.clone(),
            notes: album.notes.clone(),
            genre,
            release: album.release,
            artists: ArtistView::load_all(db, &album.read_artists(db).await?).await?,
            copyright: album.copyright.clone(),
            published: album.published,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongView {
    pub id: Option<SongId>,
    pub track: Option<u16>,
    pub title: Arc<str>,
    pub explicit: bool,
    pub length: Option<u32>,
    pub additional_artists: Vec<ArtistView>,
    /// The album the song is on, only attached to songs found by a search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<AlbumView>,
}

impl SongView {
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn load<C: Connection>(db: &Surreal<C>, song: &Song) -> Result<Self, Error> {
        Ok(Self {
            id: song.id,
            track: song.track,
            title: song.title.clone(),
            explicit: song.explicit,
            length: song.length,
            additional_artists: ArtistView::load_all(db, &song.read_additional_artists(db).await?)
                .await?,
            album: None,
        })
    }

    /// Like [`SongView::load`], with the song's album attached.
    ///
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn load_with_album<C: Connection>(
        db: &Surreal<C>,
        song: &Song,
    ) -> Result<Self, Error> {
        let album = match song.read_album(db).await? {
            Some(album) => Some(AlbumView::load(db, &album).await?),
            None => None,
        };
        Ok(Self {
            album,
            ..Self::load(db, song).await?
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistView {
    pub id: Option<PlaylistId>,
    pub title: Arc<str>,
    pub description: Option<Arc<str>>,
    pub owner: PlaylistOwner,
    /// The songs of the playlist, in the playlist's order.
    pub songs: Vec<SongView>,
}

impl PlaylistView {
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn load<C: Connection>(db: &Surreal<C>, playlist: &Playlist) -> Result<Self, Error> {
        let mut songs = vec![];
        for song in playlist.songs_by_order(db).await? {
            songs.push(SongView::load(db, &song).await?);
        }

        Ok(Self {
            id: playlist.id,
            title: playlist.title.clone(),
            description: playlist.description.clone(),
            owner: playlist.owner,
            songs,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorView {
    pub id: Option<CreatorId>,
    pub name: Arc<str>,
    pub description: Option<Arc<str>>,
    pub genres: Vec<GenreView>,
}

impl CreatorView {
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn load<C: Connection>(db: &Surreal<C>, creator: &Creator) -> Result<Self, Error> {
        Ok(Self {
            id: creator.id,
            name: creator.name.clone(),
            description: creator.description.clone(),
            genres: creator
                .read_genres(db)
                .await?
                .iter()
                .map(GenreView::from)
                .collect(),
        })
    }
}

/// An entry of the serialized top results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "item_type", rename_all = "UPPERCASE")]
pub enum ItemView {
    Album(AlbumView),
    Song(SongView),
    Artist(ArtistView),
    Playlist(PlaylistView),
    Genre(GenreView),
    Curator(CreatorView),
}

impl ItemView {
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn load<C: Connection>(db: &Surreal<C>, item: &SearchItem) -> Result<Self, Error> {
        Ok(match item {
            SearchItem::Album(album) => Self::Album(AlbumView::load(db, album).await?),
            SearchItem::Song(song) => Self::Song(SongView::load_with_album(db, song).await?),
            SearchItem::Artist(artist) => Self::Artist(ArtistView::load(db, artist).await?),
            SearchItem::Playlist(playlist) => {
                Self::Playlist(PlaylistView::load(db, playlist).await?)
            }
            SearchItem::Genre(genre) => Self::Genre(GenreView::from(genre)),
            SearchItem::Curator(creator) => Self::Curator(CreatorView::load(db, creator).await?),
        })
    }
}

/// The serialized counterpart of [`SearchResults`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedResults {
    pub top_results: Vec<ItemView>,
    pub albums: Vec<AlbumView>,
    pub songs: Vec<SongView>,
    pub artists: Vec<ArtistView>,
    pub playlists: Vec<PlaylistView>,
    pub genres: Vec<GenreView>,
    pub curators: Vec<CreatorView>,
}

impl SerializedResults {
    /// # Errors
    ///
    /// Propagates store errors.
    pub async fn load<C: Connection>(
        db: &Surreal<C>,
        results: &SearchResults,
    ) -> Result<Self, Error> {
        let mut serialized = Self {
            artists: ArtistView::load_all(db, &results.artists).await?,
            genres: results.genres.iter().map(GenreView::from).collect(),
            ..Self::default()
        };
        for item in &results.top_results {
            serialized.top_results.push(ItemView::load(db, item).await?);
        }
        for album in &results.albums {
            serialized.albums.push(AlbumView::load(db, album).await?);
        }
        for song in &results.songs {
            serialized
                .songs
                .push(SongView::load_with_album(db, song).await?);
        }
        for playlist in &results.playlists {
            serialized
                .playlists
                .push(PlaylistView::load(db, playlist).await?);
        }
        for creator in &results.curators {
            serialized
                .curators
                .push(CreatorView::load(db, creator).await?);
        }
        Ok(serialized)
    }
}
