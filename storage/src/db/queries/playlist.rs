use crate::db::schemas::playlist;

/// Query to read the songs of the playlist `$id` and its order, as stored.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT songs, songs_order FROM type::thing('playlist', $id)
/// ```
#[must_use]
pub fn read_stored_songs() -> String {
    format!(
        "SELECT songs, songs_order FROM type::thing('{}', $id)",
        playlist::TABLE_NAME
    )
}

/// Query to replace the songs and the order of the playlist `$id`, but only if they are still
/// `$songs` and `$songs_order`.
/// Returns nothing when the playlist changed in the meantime, or doesn't exist.
///
/// Compiles to:
/// ```sql, ignore
/// UPDATE type::thing('playlist', $id) SET songs = $new_songs, songs_order = $new_songs_order
///     WHERE songs = $songs AND songs_order = $songs_order RETURN AFTER
/// ```
#[must_use]
pub fn swap_songs() -> String {
    format!(
        "UPDATE type::thing('{}', $id) SET songs = $new_songs, songs_order = $new_songs_order WHERE songs = $songs AND songs_order = $songs_order RETURN AFTER",
        playlist::TABLE_NAME
    )
}
