//! Handles displaying the output of various commands in a human readable format.

use std::fmt::Write;

use tyne_core::search::{Ranked, SearchItem, SearchResults};
use tyne_storage::db::{
    Record,
    schemas::{album::Album, artist::Artist, disc::Disc, playlist::Playlist, song::Song},
};

fn id_of<T: Record>(record: &T) -> String {
    record
        .id()
        .map_or_else(|| String::from("unsaved"), |id| id.to_string())
}

/// One line per item: its id and its display string.
pub fn ranked_list<T: Ranked + Record>(prefix: &str, items: &[T]) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "{prefix}:")?;

    for item in items {
        writeln!(output, "\t{}: \"{}\"", id_of(item), item.rank_key())?;
    }

    Ok(output)
}

/// Empty sections are left out.
fn section<T: Ranked + Record>(
    output: &mut String,
    prefix: &str,
    items: &[T],
) -> Result<(), std::fmt::Error> {
    if !items.is_empty() {
        output.push_str(&ranked_list(prefix, items)?);
    }
    Ok(())
}

const fn item_kind(item: &SearchItem) -> &'static str {
    match item {
        SearchItem::Album(_) => "album",
        SearchItem::Song(_) => "song",
        SearchItem::Artist(_) => "artist",
        SearchItem::Playlist(_) => "playlist",
        SearchItem::Genre(_) => "genre",
        SearchItem::Curator(_) => "curator",
    }
}

fn item_id(item: &SearchItem) -> String {
    match item {
        SearchItem::Album(album) => id_of(album),
        SearchItem::Song(song) => id_of(song),
        SearchItem::Artist(artist) => id_of(artist),
        SearchItem::Playlist(playlist) => id_of(playlist),
        SearchItem::Genre(genre) => id_of(genre),
        SearchItem::Curator(creator) => id_of(creator),
    }
}

pub fn search_results(results: &SearchResults) -> Result<String, std::fmt::Error> {
    if results.is_empty() {
        return Ok(String::from("No results\n"));
    }

    let mut output = String::new();

    writeln!(output, "Top Results:")?;
    for item in &results.top_results {
        writeln!(
            output,
            "\t{} {}: \"{}\"",
            item_kind(item),
            item_id(item),
            item.rank_key()
        )?;
    }

    section(&mut output, "Albums", &results.albums)?;
    section(&mut output, "Songs", &results.songs)?;
    section(&mut output, "Artists", &results.artists)?;
    section(&mut output, "Playlists", &results.playlists)?;
    section(&mut output, "Genres", &results.genres)?;
    section(&mut output, "Curators", &results.curators)?;

    Ok(output)
}

pub fn playlist_songs(playlist: &Playlist, songs: &[Song]) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "{} (id: {}):", playlist.title, id_of(playlist))?;

    for (i, song) in songs.iter().enumerate() {
        writeln!(output, "\t{}: \"{}\" (id: {}),", i, song.title, id_of(song))?;
    }

    Ok(output)
}

/// An album, then every disc with its songs in track order.
pub fn album_details(album: &Album, discs: &[Disc], songs: &[Song]) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    let status = if album.published { "published" } else { "unpublished" };
    writeln!(output, "{} (id: {}, {status}):", album.title, id_of(album))?;

    for disc in discs {
        writeln!(output, "\t{} (id: {}):", disc.name, id_of(disc))?;
        for song in songs.iter().filter(|song| Some(song.disc) == disc.id) {
            let track = song
                .track
                .map_or_else(|| String::from("-"), |track| track.to_string());
            writeln!(output, "\t\t{track}. \"{}\" (id: {}),", song.title, id_of(song))?;
        }
    }

    Ok(output)
}

/// An artist with their nicknames, and either their members or the groups they're in.
pub fn artist_details(artist: &Artist, related: &[Artist]) -> Result<String, std::fmt::Error> {
    let mut output = String::new();

    writeln!(output, "{} (id: {}):", artist.name, id_of(artist))?;

    let nicknames = artist
        .nicknames()
        .map(|nickname| format!("\"{nickname}\""))
        .collect::<Vec<_>>();
    if !nicknames.is_empty() {
        writeln!(output, "\tnicknames: {}", nicknames.join(", "))?;
    }

    if !related.is_empty() {
        let label = if artist.is_group { "members" } else { "groups" };
        writeln!(output, "\t{label}:")?;
        for other in related {
            writeln!(output, "\t\t{}: \"{}\"", id_of(other), other.name)?;
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_str_eq;
    use tyne_storage::test_utils::{album, artist, genre, group, playlist, song};

    #[test]
    fn test_ranked_list() {
        let genres = [genre("Hip-Hop")];
        assert_str_eq!(
            ranked_list("Genres", &genres).unwrap(),
            "Genres:\n\tunsaved: \"Hip-Hop\"\n"
        );
    }

    #[test]
    fn test_search_results_skips_empty_sections() {
        let results = SearchResults {
            top_results: vec![SearchItem::Genre(genre("Hip-Hop"))],
            genres: vec![genre("Hip-Hop")],
            ..SearchResults::default()
        };
        assert_str_eq!(
            search_results(&results).unwrap(),
            "Top Results:\n\tgenre unsaved: \"Hip-Hop\"\nGenres:\n\tunsaved: \"Hip-Hop\"\n"
        );
    }

    #[test]
    fn test_no_results() {
        assert_str_eq!(
            search_results(&SearchResults::default()).unwrap(),
            "No results\n"
        );
    }

    #[test]
    fn test_empty_playlist() {
        let playlist = playlist(
            "Road Trip",
            tyne_storage::db::schemas::playlist::PlaylistOwner::Profile(1),
        );
        assert_str_eq!(
            playlist_songs(&playlist, &[]).unwrap(),
            "Road Trip (id: unsaved):\n"
        );
    }

    #[test]
    fn test_album_details() {
        let wax = Album {
            id: Some(3),
            ..album("WAX", false)
        };
        let disc = Disc {
            id: Some(7),
            name: "Disc 1".into(),
            album: 3,
        };
        let songs = [
            Song {
                id: Some(1),
                track: Some(1),
                ..song("Timmy", &disc)
            },
            Song {
                id: Some(2),
                ..song("Hidden Track", &disc)
            },
        ];

        assert_str_eq!(
            album_details(&wax, &[disc], &songs).unwrap(),
            "WAX (id: 3, unpublished):\n\tDisc 1 (id: 7):\n\t\t1. \"Timmy\" (id: 1),\n\t\t-. \"Hidden Track\" (id: 2),\n"
        );
    }

    #[test]
    fn test_artist_details() {
        let quavo = Artist {
            id: Some(1),
            nicknames: Some("Huncho, , Quavious ".into()),
            ..artist("Quavo")
        };
        let migos = Artist {
            id: Some(4),
            ..group("Migos")
        };

        assert_str_eq!(
            artist_details(&quavo, &[migos.clone()]).unwrap(),
            "Quavo (id: 1):\n\tnicknames: \"Huncho\", \"Quavious\"\n\tgroups:\n\t\t4: \"Migos\"\n"
        );
        assert_str_eq!(
            artist_details(&migos, &[quavo]).unwrap(),
            "Migos (id: 4):\n\tmembers:\n\t\t1: \"Quavo\"\n"
        );
    }
}
