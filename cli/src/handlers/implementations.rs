use std::fmt::Write;

use super::{
    AlbumCommand, ArtistCommand, CatalogCommand, Command, CommandHandler, PlaylistCommand,
    printing,
};

use surrealdb::{Connection, Surreal};
use tyne_core::{config::Settings, search::MusicSearch};
use tyne_storage::db::{
    queries::generic::Count,
    schemas::{
        TABLES,
        album::Album,
        artist::Artist,
        playlist::{Playlist, PlaylistId, Position},
        song::Song,
    },
};

impl CommandHandler for Command {
    type Output = anyhow::Result<()>;

    async fn handle<C: Connection, W1: Write + Send, W2: Write + Send>(
        &self,
        db: &Surreal<C>,
        settings: &Settings,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output {
        match self {
            Self::Search { term, staff, raw } => {
                let mut search = MusicSearch::new(db, term.as_str(), *staff)
                    .with_top_results_per_type(settings.search.top_results_per_type);

                if *raw {
                    let serialized = search.serialized(false).await?;
                    writeln!(stdout, "{}", serde_json::to_string_pretty(serialized)?)?;
                } else {
                    let results = search.results(false).await?;
                    write!(stdout, "{}", printing::search_results(results)?)?;
                }

                if let Some(time_taken) = search.time_taken() {
                    log::info!("search for {term:?} took {time_taken:?}");
                }
                Ok(())
            }
            Self::Playlist { command } => command.handle(db, settings, stdout, stderr).await,
            Self::Album { command } => command.handle(db, settings, stdout, stderr).await,
            Self::Artist { command } => command.handle(db, settings, stdout, stderr).await,
            Self::Catalog { command } => command.handle(db, settings, stdout, stderr).await,
        }
    }
}

/// Read a playlist, complaining on `stderr` if it doesn't exist.
async fn find_playlist<C: Connection, W: Write>(
    db: &Surreal<C>,
    id: PlaylistId,
    stderr: &mut W,
) -> anyhow::Result<Option<Playlist>> {
    let playlist = Playlist::read(db, id).await?;
    if playlist.is_none() {
        writeln!(stderr, "Playlist {id} not found")?;
    }
    Ok(playlist)
}

impl CommandHandler for PlaylistCommand {
    type Output = anyhow::Result<()>;

    #[allow(clippy::too_many_lines)]
    async fn handle<C: Connection, W1: Write + Send, W2: Write + Send>(
        &self,
        db: &Surreal<C>,
        _: &Settings,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output {
        match self {
            Self::Show { id } => {
                let Some(playlist) = find_playlist(db, *id, stderr).await? else {
                    return Ok(());
                };
                if !playlist.verify_songs_and_songs_order() {
                    writeln!(
                        stderr,
                        "The order of {playlist} is stale, showing its songs in the order they were added"
                    )?;
                }
                let songs = playlist.songs_by_order(db).await?;
                write!(stdout, "{}", printing::playlist_songs(&playlist, &songs)?)?;
                Ok(())
            }
            Self::Add {
                id,
                song_id,
                position,
            } => {
                let Some(mut playlist) = find_playlist(db, *id, stderr).await? else {
                    return Ok(());
                };
                let Some(song) = Song::read(db, *song_id).await? else {
                    writeln!(stderr, "Song {song_id} not found")?;
                    return Ok(());
                };
                if playlist.songs.contains(song_id) {
                    writeln!(stderr, "{song} is already in {playlist}")?;
                    return Ok(());
                }

                let position = position.map_or(Position::End, Position::from_signed);
                playlist.add_song_to_playlist(db, &song, position).await?;
                writeln!(stdout, "Added {song} to {playlist}")?;
                Ok(())
            }
            Self::Move {
                id,
                song_id,
                position,
            } => {
                let Some(mut playlist) = find_playlist(db, *id, stderr).await? else {
                    return Ok(());
                };
                if !playlist.songs.contains(song_id) {
                    writeln!(stderr, "Song {song_id} is not in {playlist}")?;
                    return Ok(());
                }

                playlist
                    .set_song_order(db, *song_id, Position::from_signed(*position))
                    .await?;
                writeln!(stdout, "Order of {playlist}: {}", playlist.songs_order)?;
                Ok(())
            }
            Self::Remove { id, song_id } => {
                let Some(mut playlist) = find_playlist(db, *id, stderr).await? else {
                    return Ok(());
                };
                if !playlist.songs.contains(song_id) && !playlist.songs_order.contains(*song_id) {
                    writeln!(stderr, "Song {song_id} is not in {playlist}")?;
                    return Ok(());
                }

                playlist.remove_song_from_playlist(db, *song_id).await?;
                writeln!(stdout, "Removed song {song_id} from {playlist}")?;
                Ok(())
            }
            Self::Reset { id } => {
                let Some(mut playlist) = find_playlist(db, *id, stderr).await? else {
                    return Ok(());
                };

                playlist.reset_order_to_membership(db).await?;
                writeln!(stdout, "Order of {playlist}: {}", playlist.songs_order)?;
                Ok(())
            }
            Self::Verify { id } => {
                let Some(playlist) = find_playlist(db, *id, stderr).await? else {
                    return Ok(());
                };

                if playlist.verify_songs_and_songs_order() {
                    writeln!(stdout, "The order of {playlist} matches its songs")?;
                } else {
                    let songs = playlist
                        .songs
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(",");
                    writeln!(
                        stdout,
                        "The order of {playlist} is stale: ordered [{}], songs [{songs}]",
                        playlist.songs_order
                    )?;
                }
                Ok(())
            }
        }
    }
}

impl CommandHandler for AlbumCommand {
    type Output = anyhow::Result<()>;

    async fn handle<C: Connection, W1: Write + Send, W2: Write + Send>(
        &self,
        db: &Surreal<C>,
        _: &Settings,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output {
        match self {
            Self::List => {
                let albums = Album::read_all(db).await?;
                write!(stdout, "{}", printing::ranked_list("Albums", &albums)?)?;
            }
            Self::Show { id } => {
                let Some(album) = Album::read(db, *id).await? else {
                    writeln!(stderr, "Album {id} not found")?;
                    return Ok(());
                };
                let discs = album.read_discs(db).await?;
                let songs = album.read_songs(db).await?;
                write!(
                    stdout,
                    "{}",
                    printing::album_details(&album, &discs, &songs)?
                )?;
            }
        }
        Ok(())
    }
}

impl CommandHandler for ArtistCommand {
    type Output = anyhow::Result<()>;

    async fn handle<C: Connection, W1: Write + Send, W2: Write + Send>(
        &self,
        db: &Surreal<C>,
        _: &Settings,
        stdout: &mut W1,
        stderr: &mut W2,
    ) -> Self::Output {
        match self {
            Self::List => {
                let artists = Artist::read_all(db).await?;
                write!(stdout, "{}", printing::ranked_list("Artists", &artists)?)?;
            }
            Self::Show { id } => {
                let Some(artist) = Artist::read(db, *id).await? else {
                    writeln!(stderr, "Artist {id} not found")?;
                    return Ok(());
                };
                let members = artist.read_group_members(db).await?;
                write!(stdout, "{}", printing::artist_details(&artist, &members)?)?;
            }
        }
        Ok(())
    }
}

impl CommandHandler for CatalogCommand {
    type Output = anyhow::Result<()>;

    async fn handle<C: Connection, W1: Write + Send, W2: Write + Send>(
        &self,
        db: &Surreal<C>,
        _: &Settings,
        stdout: &mut W1,
        _: &mut W2,
    ) -> Self::Output {
        match self {
            Self::Stats => {
                for table in TABLES {
                    writeln!(stdout, "{table}: {}", Count::count(db, table).await?)?;
                }
            }
            Self::Export { path } => {
                db.export(path).await?;
                writeln!(stdout, "Exported the catalogue to {}", path.display())?;
            }
        }
        Ok(())
    }
}
