//! The SurrealQL queries behind the CRUD operations.
//!
//! Table names are spliced into the queries, values are always passed as bound parameters.
pub mod album;
pub mod artist;
pub mod generic;
pub mod playlist;
pub mod search;

/// Check that `query` is valid SurrealQL.
#[cfg(test)]
pub fn validate_query(query: &str) {
    let parsed = surrealdb::syn::parse(query);
    assert!(parsed.is_ok(), "{query:?} doesn't parse: {parsed:?}");
}
