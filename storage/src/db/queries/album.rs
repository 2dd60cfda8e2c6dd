use crate::db::schemas::{disc, song};

/// Query to read the discs of the album `$album`, in key order.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM disc WHERE album = $album ORDER BY key
/// ```
#[must_use]
pub fn read_discs() -> String {
    format!(
        "SELECT * FROM {} WHERE album = $album ORDER BY key",
        disc::TABLE_NAME
    )
}

/// Query to read the songs on any of the discs `$discs`.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM song WHERE disc INSIDE $discs ORDER BY key
/// ```
#[must_use]
pub fn read_songs_on_discs() -> String {
    format!(
        "SELECT * FROM {} WHERE disc INSIDE $discs ORDER BY key",
        song::TABLE_NAME
    )
}
