use crate::db::schemas::artist;

/// Query to record, on both sides, that the artist `$artist` is a member of the group `$group`.
/// Each side only lists the other once.
///
/// Compiles to:
/// ```sql, ignore
/// BEGIN TRANSACTION;
/// UPDATE type::thing('artist', $group) SET group_members = array::union(group_members, [$artist]);
/// UPDATE type::thing('artist', $artist) SET group_members = array::union(group_members, [$group]);
/// COMMIT TRANSACTION;
/// ```
#[must_use]
pub fn add_to_group() -> String {
    let table = artist::TABLE_NAME;
    format!(
        "BEGIN TRANSACTION;
UPDATE type::thing('{table}', $group) SET group_members = array::union(group_members, [$artist]);
UPDATE type::thing('{table}', $artist) SET group_members = array::union(group_members, [$group]);
COMMIT TRANSACTION;"
    )
}
