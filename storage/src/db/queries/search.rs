//! Queries finding the records that match a search term.
//!
//! Every query takes the lowercased term as `$term` and matches it as a substring of the
//! lowercased text fields. The records are returned in key order, ranking happens elsewhere.
//! The matching records are always the result of the last statement.
use crate::db::schemas::{album, artist, creator, disc, genre, playlist, song};

/// `field` contains `$term`, ignoring case. Missing fields never match a non empty term.
fn contains_term(field: &str) -> String {
    format!("string::lowercase({field} OR '') CONTAINS $term")
}

/// Query to find albums by title, liner notes, or the name of any of their artists.
/// Unpublished albums are only found when `$staff_view` is set.
///
/// Compiles to:
/// ```sql, ignore
/// LET $artists = (SELECT VALUE key FROM artist WHERE string::lowercase(name OR '') CONTAINS $term);
/// SELECT * FROM album WHERE ($staff_view OR published) AND (
///     string::lowercase(title OR '') CONTAINS $term
///     OR string::lowercase(notes OR '') CONTAINS $term
///     OR artists ANYINSIDE $artists
/// ) ORDER BY key
/// ```
#[must_use]
pub fn albums() -> String {
    format!(
        "LET $artists = (SELECT VALUE key FROM {artist} WHERE {name});
SELECT * FROM {album} WHERE ($staff_view OR published) AND ({title} OR {notes} OR artists ANYINSIDE $artists) ORDER BY key",
        artist = artist::TABLE_NAME,
        album = album::TABLE_NAME,
        name = contains_term("name"),
        title = contains_term("title"),
        notes = contains_term("notes"),
    )
}

/// Query to find songs by title, the name of any featured artist, or the title or any artist
/// of their album.
/// Songs of unpublished albums are only found when `$staff_view` is set.
///
/// Compiles to:
/// ```sql, ignore
/// LET $artists = (SELECT VALUE key FROM artist WHERE string::lowercase(name OR '') CONTAINS $term);
/// LET $published = (SELECT VALUE key FROM album WHERE published);
/// LET $visible = (SELECT VALUE key FROM disc WHERE album INSIDE $published);
/// LET $albums = (SELECT VALUE key FROM album WHERE
///     string::lowercase(title OR '') CONTAINS $term OR artists ANYINSIDE $artists);
/// LET $discs = (SELECT VALUE key FROM disc WHERE album INSIDE $albums);
/// SELECT * FROM song WHERE ($staff_view OR disc INSIDE $visible) AND (
///     string::lowercase(title OR '') CONTAINS $term
///     OR additional_artists ANYINSIDE $artists
///     OR disc INSIDE $discs
/// ) ORDER BY key
/// ```
#[must_use]
pub fn songs() -> String {
    format!(
        "LET $artists = (SELECT VALUE key FROM {artist} WHERE {name});
LET $published = (SELECT VALUE key FROM {album} WHERE published);
LET $visible = (SELECT VALUE key FROM {disc} WHERE album INSIDE $published);
LET $albums = (SELECT VALUE key FROM {album} WHERE {title} OR artists ANYINSIDE $artists);
LET $discs = (SELECT VALUE key FROM {disc} WHERE album INSIDE $albums);
SELECT * FROM {song} WHERE ($staff_view OR disc INSIDE $visible) AND ({title} OR additional_artists ANYINSIDE $artists OR disc INSIDE $discs) ORDER BY key",
        artist = artist::TABLE_NAME,
        album = album::TABLE_NAME,
        disc = disc::TABLE_NAME,
        song = song::TABLE_NAME,
        name = contains_term("name"),
        title = contains_term("title"),
    )
}

/// Query to find artists by name, nicknames, or the name of any group member.
///
/// Compiles to:
/// ```sql, ignore
/// LET $named = (SELECT VALUE key FROM artist WHERE string::lowercase(name OR '') CONTAINS $term);
/// SELECT * FROM artist WHERE key INSIDE $named OR group_members ANYINSIDE $named
///     OR string::lowercase(nicknames OR '') CONTAINS $term ORDER BY key
/// ```
#[must_use]
pub fn artists() -> String {
    format!(
        "LET $named = (SELECT VALUE key FROM {artist} WHERE {name});
SELECT * FROM {artist} WHERE key INSIDE $named OR group_members ANYINSIDE $named OR {nicknames} ORDER BY key",
        artist = artist::TABLE_NAME,
        name = contains_term("name"),
        nicknames = contains_term("nicknames"),
    )
}

/// Query to find curator playlists by title, description, or the name or any genre of their
/// curator. Personal playlists are never found.
///
/// Compiles to:
/// ```sql, ignore
/// LET $genres = (SELECT VALUE key FROM genre WHERE string::lowercase(title OR '') CONTAINS $term);
/// LET $curators = (SELECT VALUE key FROM creator WHERE
///     string::lowercase(name OR '') CONTAINS $term OR genres ANYINSIDE $genres);
/// SELECT * FROM playlist WHERE owner.creator != NONE AND (
///     string::lowercase(title OR '') CONTAINS $term
///     OR string::lowercase(description OR '') CONTAINS $term
///     OR owner.creator INSIDE $curators
/// ) ORDER BY key
/// ```
#[must_use]
pub fn playlists() -> String {
    format!(
        "LET $genres = (SELECT VALUE key FROM {genre} WHERE {title});
LET $curators = (SELECT VALUE key FROM {creator} WHERE {name} OR genres ANYINSIDE $genres);
SELECT * FROM {playlist} WHERE owner.creator != NONE AND ({title} OR {description} OR owner.creator INSIDE $curators) ORDER BY key",
        genre = genre::TABLE_NAME,
        creator = creator::TABLE_NAME,
        playlist = playlist::TABLE_NAME,
        title = contains_term("title"),
        name = contains_term("name"),
        description = contains_term("description"),
    )
}

/// Query to find genres by title.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM genre WHERE string::lowercase(title OR '') CONTAINS $term ORDER BY key
/// ```
#[must_use]
pub fn genres() -> String {
    format!(
        "SELECT * FROM {} WHERE {} ORDER BY key",
        genre::TABLE_NAME,
        contains_term("title")
    )
}

/// Query to find curators by name or by the title of any of their genres.
///
/// Compiles to:
/// ```sql, ignore
/// LET $genres = (SELECT VALUE key FROM genre WHERE string::lowercase(title OR '') CONTAINS $term);
/// SELECT * FROM creator WHERE string::lowercase(name OR '') CONTAINS $term
///     OR genres ANYINSIDE $genres ORDER BY key
/// ```
#[must_use]
pub fn curators() -> String {
    format!(
        "LET $genres = (SELECT VALUE key FROM {genre} WHERE {title});
SELECT * FROM {creator} WHERE {name} OR genres ANYINSIDE $genres ORDER BY key",
        genre = genre::TABLE_NAME,
        creator = creator::TABLE_NAME,
        title = contains_term("title"),
        name = contains_term("name"),
    )
}

/// The index of the statement holding the matches of `query`.
#[must_use]
pub fn result_index(query: &str) -> usize {
    query.matches(';').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::validate_query;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::albums(albums(), 1)]
    #[case::songs(songs(), 5)]
    #[case::artists(artists(), 1)]
    #[case::playlists(playlists(), 2)]
    #[case::genres(genres(), 0)]
    #[case::curators(curators(), 1)]
    fn test_queries_parse(#[case] query: String, #[case] index: usize) {
        validate_query(&query);
        assert_eq!(result_index(&query), index);
        assert!(query.ends_with("ORDER BY key"));
    }

    #[test]
    fn test_contains_term() {
        assert_eq!(
            contains_term("notes"),
            "string::lowercase(notes OR '') CONTAINS $term"
        );
    }
}
