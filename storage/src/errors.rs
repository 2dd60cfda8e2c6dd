use thiserror::Error;

use crate::db::RecordId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SurrealDB error: {0}")]
    DbError(#[from] surrealdb::Error),
    #[error("Item is missing an Id.")]
    NoId,
    #[error("Item not found.")]
    NotFound,
    #[error("Item {table}:{key} already exists.")]
    AlreadyExists { table: &'static str, key: RecordId },
    #[error("Id {0} is too large to be stored.")]
    IdOutOfRange(RecordId),
}
