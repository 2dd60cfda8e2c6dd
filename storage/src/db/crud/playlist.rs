//! CRUD operations for the playlist table, and the upkeep of each playlist's song order.
//!
//! None of the ordering operations fail because of bad input: out of range positions are
//! clamped, a stale order degrades to membership order, and a playlist that was never stored is
//! left alone. Only errors from the database itself are returned.
//!
//! Ordering changes are applied to the stored playlist, not to the caller's copy: each one reads
//! the playlist, changes its songs and order, and writes them back only if nobody changed them in
//! the meantime, starting over otherwise. Two writers never lose each other's changes, even when
//! one of them holds an outdated copy.
use log::{debug, warn};
use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        create_record,
        queries::{
            playlist::{read_stored_songs, swap_songs},
            search,
        },
        read_record, read_records,
        schemas::{
            playlist::{Playlist, PlaylistId, Position, SongsOrder},
            song::{Song, SongId},
        },
    },
    errors::Error,
};

/// The songs of a playlist and its order, as they are in the database.
#[derive(Debug, Deserialize)]
struct StoredSongs {
    #[serde(default)]
    songs: Vec<SongId>,
    #[serde(default)]
    songs_order: Option<String>,
}

impl Playlist {
    #[instrument(skip(db))]
    pub async fn create<C: Connection>(db: &Surreal<C>, playlist: Self) -> Result<Self, Error> {
        create_record(db, playlist).await
    }

    #[instrument(skip(db))]
    pub async fn read<C: Connection>(
        db: &Surreal<C>,
        id: PlaylistId,
    ) -> Result<Option<Self>, Error> {
        read_record(db, id).await
    }

    /// Curator playlists whose title, description, or curator's name or genres contain `term`,
    /// ignoring case. Personal playlists are never found.
    #[instrument(skip(db))]
    pub async fn search<C: Connection>(db: &Surreal<C>, term: &str) -> Result<Vec<Self>, Error> {
        let query = search::playlists();
        let index = search::result_index(&query);
        Ok(db
            .query(query)
            .bind(("term", term.to_lowercase()))
            .await?
            .take(index)?)
    }

    /// Write `songs` and `songs_order` to the stored playlist, if its songs and order are still
    /// those of `expected`.
    /// Returns the playlist as written, or `None` if it changed or no longer exists.
    async fn compare_and_swap_songs<C: Connection>(
        db: &Surreal<C>,
        id: PlaylistId,
        expected: StoredSongs,
        songs: Vec<SongId>,
        songs_order: SongsOrder,
    ) -> Result<Option<Self>, Error> {
        Ok(db
            .query(swap_songs())
            .bind(("id", id))
            .bind(("new_songs", songs))
            .bind(("new_songs_order", songs_order))
            .bind(("songs", expected.songs))
            .bind(("songs_order", expected.songs_order))
            .await?
            .take(0)?)
    }

    /// Apply `f` to the songs and order of the stored copy of this playlist, and refresh `self`
    /// with the result. Does nothing for a playlist that was never stored.
    async fn modify_stored<C, F>(&mut self, db: &Surreal<C>, f: F) -> Result<(), Error>
    where
        C: Connection,
        F: Fn(&mut Vec<SongId>, &mut SongsOrder),
    {
        let Some(id) = self.id else {
            debug!("{self} has not been stored yet, leaving it alone");
            return Ok(());
        };

        loop {
            let stored: Option<StoredSongs> = db
                .query(read_stored_songs())
                .bind(("id", id))
                .await?
                .take(0)?;
            let stored = stored.ok_or(Error::NotFound)?;

            let stored_order = stored
                .songs_order
                .as_deref()
                .map(SongsOrder::decode)
                .unwrap_or_default();
            let mut songs = stored.songs.clone();
            let mut songs_order = stored_order.clone();
            f(&mut songs, &mut songs_order);

            if songs == stored.songs && songs_order == stored_order {
                *self = Self::read(db, id).await?.ok_or(Error::NotFound)?;
                return Ok(());
            }

            if let Some(written) =
                Self::compare_and_swap_songs(db, id, stored, songs, songs_order).await?
            {
                *self = written;
                return Ok(());
            }
            debug!("{self} changed while it was being written to, trying again");
        }
    }

    /// Place `song_id` at `position` in the playlist's order, moving it there if it's already in
    /// the order.
    ///
    /// Positions past the end append. Membership is left as is.
    #[instrument(skip(db))]
    pub async fn set_song_order<C: Connection>(
        &mut self,
        db: &Surreal<C>,
        song_id: SongId,
        position: Position,
    ) -> Result<(), Error> {
        self.modify_stored(db, |_, order| order.place(song_id, position))
            .await
    }

    /// Add `song` to the playlist, at `position` in its order.
    /// Songs that are already in the playlist aren't moved.
    #[instrument(skip(db))]
    pub async fn add_song_to_playlist<C: Connection>(
        &mut self,
        db: &Surreal<C>,
        song: &Song,
        position: Position,
    ) -> Result<(), Error> {
        let Some(song_id) = song.id else {
            warn!("can't add {song} to {self}, the song has not been stored yet");
            return Ok(());
        };

        self.modify_stored(db, |songs, order| {
            if !songs.contains(&song_id) {
                songs.push(song_id);
                order.place(song_id, position);
            }
        })
        .await
    }

    /// Take a song out of the playlist, and out of its order.
    #[instrument(skip(db))]
    pub async fn remove_song_from_playlist<C: Connection>(
        &mut self,
        db: &Surreal<C>,
        song_id: SongId,
    ) -> Result<(), Error> {
        self.modify_stored(db, |songs, order| {
            songs.retain(|id| *id != song_id);
            order.remove(song_id);
        })
        .await
    }

    /// Rebuild the order from the playlist's membership, in membership order.
    ///
    /// This is how a playlist whose order has drifted from its songs is repaired.
    #[instrument(skip(db))]
    pub async fn reset_order_to_membership<C: Connection>(
        &mut self,
        db: &Surreal<C>,
    ) -> Result<(), Error> {
        self.modify_stored(db, |songs, order| {
            let mut rebuilt = SongsOrder::default();
            for song_id in songs.iter() {
                rebuilt.place(*song_id, Position::End);
            }
            *order = rebuilt;
        })
        .await
    }

    /// Read the songs of the playlist, in membership order.
    #[instrument(skip(db))]
    pub async fn read_songs<C: Connection>(&self, db: &Surreal<C>) -> Result<Vec<Song>, Error> {
        self.resolve(db, &self.songs).await
    }

    /// Read the songs of the playlist in the playlist's order.
    ///
    /// If the order doesn't cover exactly the playlist's songs, it can't be trusted: the songs
    /// are returned in membership order instead, and a warning is logged.
    #[instrument(skip(db))]
    pub async fn songs_by_order<C: Connection>(
        &self,
        db: &Surreal<C>,
    ) -> Result<Vec<Song>, Error> {
        if self.verify_songs_and_songs_order() {
            self.resolve(db, self.songs_order.as_slice()).await
        } else {
            warn!(
                "the song order of {self} ({}) doesn't match its songs, falling back to membership order",
                self.songs_order
            );
            self.read_songs(db).await
        }
    }

    async fn resolve<C: Connection>(
        &self,
        db: &Surreal<C>,
        ids: &[SongId],
    ) -> Result<Vec<Song>, Error> {
        let songs: Vec<Song> = read_records(db, ids).await?;
        if songs.len() < ids.len() {
            warn!(
                "{} of the songs in {self} no longer exist",
                ids.len() - songs.len()
            );
        }
        Ok(songs)
    }
}
