//! CRUD operations for the genre table
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        create_record,
        queries::search,
        read_record, read_records,
        schemas::genre::{Genre, GenreId},
    },
    errors::Error,
};

impl Genre {
    #[instrument(skip(db))]
    pub async fn create<C: Connection>(db: &Surreal<C>, genre: Self) -> Result<Self, Error> {
        create_record(db, genre).await
    }

    #[instrument(skip(db))]
    pub async fn read<C: Connection>(db: &Surreal<C>, id: GenreId) -> Result<Option<Self>, Error> {
        read_record(db, id).await
    }

    /// Read the genres with the given ids, skipping any that no longer exist.
    #[instrument(skip(db))]
    pub async fn read_many<C: Connection>(
        db: &Surreal<C>,
        ids: &[GenreId],
    ) -> Result<Vec<Self>, Error> {
        read_records(db, ids).await
    }

    /// Genres whose title contains `term`, ignoring case.
    #[instrument(skip(db))]
    pub async fn search<C: Connection>(db: &Surreal<C>, term: &str) -> Result<Vec<Self>, Error> {
        Ok(db
            .query(search::genres())
            .bind(("term", term.to_lowercase()))
            .await?
            .take(0)?)
    }
}
