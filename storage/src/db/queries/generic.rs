use log::warn;
use serde::Deserialize;
use surrealdb::{Connection, Surreal};

use crate::{db::RecordId, errors::Error};

/// The table holding the last key handed out for every other table.
pub const COUNTER_TABLE: &str = "counter";

/// Struct to assist deserializing the results of the count queries
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Count {
    count: u64,
}

impl Count {
    /// Count the number of items in a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or if the result cannot be deserialized.
    pub async fn count<C: Connection>(db: &Surreal<C>, table: &str) -> Result<u64, Error> {
        let result: Option<Self> = db.query(count(table)).await?.take(0)?;
        Ok(result.map_or_else(
            || {
                warn!("When counting entries in table {table}, no count was returned");
                0
            },
            |c| c.count,
        ))
    }
}

/// The last key handed out for a table.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
pub struct Counter {
    pub last: RecordId,
}

/// Query to count the records of a table.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT count() FROM {table} GROUP ALL
/// ```
#[must_use]
pub fn count(table: &str) -> String {
    format!("SELECT count() FROM {table} GROUP ALL")
}

/// Query to read every record of a table, in key order.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM {table} ORDER BY key
/// ```
#[must_use]
pub fn read_all(table: &str) -> String {
    format!("SELECT * FROM {table} ORDER BY key")
}

/// Query to read the records of a table whose keys are in `$keys`.
///
/// Compiles to:
/// ```sql, ignore
/// SELECT * FROM {table} WHERE key INSIDE $keys
/// ```
#[must_use]
pub fn read_many(table: &str) -> String {
    format!("SELECT * FROM {table} WHERE key INSIDE $keys")
}

/// Query to hand out the next key of the table `$table`.
///
/// Compiles to:
/// ```sql, ignore
/// UPSERT type::thing('counter', $table) SET last = (last OR 0) + 1 RETURN AFTER
/// ```
#[must_use]
pub fn next_key() -> String {
    format!("UPSERT type::thing('{COUNTER_TABLE}', $table) SET last = (last OR 0) + 1 RETURN AFTER")
}

/// Query to make sure the key `$key` of the table `$table` is never handed out.
///
/// Compiles to:
/// ```sql, ignore
/// UPSERT type::thing('counter', $table) SET last = math::max([last OR 0, $key]) RETURN AFTER
/// ```
#[must_use]
pub fn raise_counter() -> String {
    format!(
        "UPSERT type::thing('{COUNTER_TABLE}', $table) SET last = math::max([last OR 0, $key]) RETURN AFTER"
    )
}

/// Query to make the `key` field of a table unique.
///
/// Compiles to:
/// ```sql, ignore
/// DEFINE INDEX IF NOT EXISTS {table}_key ON TABLE {table} FIELDS key UNIQUE
/// ```
#[must_use]
pub fn define_key_index(table: &str) -> String {
    format!("DEFINE INDEX IF NOT EXISTS {table}_key ON TABLE {table} FIELDS key UNIQUE")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::validate_query;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::count(count("song"), "SELECT count() FROM song GROUP ALL")]
    #[case::read_all(read_all("album"), "SELECT * FROM album ORDER BY key")]
    #[case::read_many(read_many("artist"), "SELECT * FROM artist WHERE key INSIDE $keys")]
    #[case::next_key(
        next_key(),
        "UPSERT type::thing('counter', $table) SET last = (last OR 0) + 1 RETURN AFTER"
    )]
    #[case::raise_counter(
        raise_counter(),
        "UPSERT type::thing('counter', $table) SET last = math::max([last OR 0, $key]) RETURN AFTER"
    )]
    #[case::define_key_index(
        define_key_index("disc"),
        "DEFINE INDEX IF NOT EXISTS disc_key ON TABLE disc FIELDS key UNIQUE"
    )]
    fn test_queries(#[case] query: String, #[case] expected: &str) {
        assert_eq!(query, expected);
        validate_query(&query);
    }
}
