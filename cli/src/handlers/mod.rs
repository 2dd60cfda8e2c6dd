pub mod implementations;
pub mod printing;

#[cfg(test)]
mod smoke_tests;

use std::{fmt, io, path::PathBuf};

use clap::Subcommand;
use surrealdb::{Connection, Surreal};
use tyne_core::config::Settings;
use tyne_storage::db::schemas::{
    album::AlbumId, artist::ArtistId, playlist::PlaylistId, song::SongId,
};

pub trait CommandHandler {
    type Output;

    async fn handle<C: Connection, W1: fmt::Write + Send, W2: fmt::Write + Send>(
        &self,
        db: &Surreal<C>,
        settings: &Settings,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output;
}

/// Lets an [`io::Write`] (like stdout) be used where a [`fmt::Write`] is expected.
pub struct WriteAdapter<W>(pub W);

impl<W: io::Write> fmt::Write for WriteAdapter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Search the catalogue
    Search {
        /// What we're searching for
        term: String,
        /// Include unpublished albums and their songs
        #[clap(long)]
        staff: bool,
        /// Print the results as JSON, the way a client of the search receives them
        #[clap(long)]
        raw: bool,
    },
    /// Playlist control
    Playlist {
        #[clap(subcommand)]
        command: PlaylistCommand,
    },
    /// Browse albums
    Album {
        #[clap(subcommand)]
        command: AlbumCommand,
    },
    /// Browse artists
    Artist {
        #[clap(subcommand)]
        command: ArtistCommand,
    },
    /// Catalogue maintenance
    Catalog {
        #[clap(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum AlbumCommand {
    /// List every album, published or not
    List,
    /// Show an album with its discs and songs
    Show {
        /// The id of the album
        id: AlbumId,
    },
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum ArtistCommand {
    /// List every artist
    List,
    /// Show an artist, with their nicknames and group members
    Show {
        /// The id of the artist
        id: ArtistId,
    },
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum CatalogCommand {
    /// Count the records of every table
    Stats,
    /// Write the whole catalogue to a SurrealQL file
    Export {
        /// Where to write the export, the parent directory must exist
        #[clap(value_hint = clap::ValueHint::FilePath)]
        path: PathBuf,
    },
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum PlaylistCommand {
    /// Show the songs of a playlist, in order
    Show {
        /// The id of the playlist
        id: PlaylistId,
    },
    /// Add a song to a playlist
    Add {
        /// The id of the playlist
        id: PlaylistId,
        /// The id of the song
        song_id: SongId,
        /// Where to put the song in the playlist's order, appended if unset, negative, or past
        /// the end
        #[clap(long, allow_negative_numbers = true)]
        position: Option<i64>,
    },
    /// Move a song of a playlist to another position
    Move {
        /// The id of the playlist
        id: PlaylistId,
        /// The id of the song
        song_id: SongId,
        /// The new position of the song, appended if negative or past the end
        #[clap(allow_negative_numbers = true)]
        position: i64,
    },
    /// Remove a song from a playlist
    Remove {
        /// The id of the playlist
        id: PlaylistId,
        /// The id of the song
        song_id: SongId,
    },
    /// Rebuild the order of a playlist from its songs
    Reset {
        /// The id of the playlist
        id: PlaylistId,
    },
    /// Check that the order of a playlist covers exactly its songs
    Verify {
        /// The id of the playlist
        id: PlaylistId,
    },
}
