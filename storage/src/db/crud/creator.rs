//! CRUD operations for the creator (curator) table
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        create_record,
        queries::search,
        read_record,
        schemas::{
            creator::{Creator, CreatorId},
            genre::Genre,
        },
    },
    errors::Error,
};

impl Creator {
    #[instrument(skip(db))]
    pub async fn create<C: Connection>(db: &Surreal<C>, creator: Self) -> Result<Self, Error> {
        create_record(db, creator).await
    }

    #[instrument(skip(db))]
    pub async fn read<C: Connection>(
        db: &Surreal<C>,
        id: CreatorId,
    ) -> Result<Option<Self>, Error> {
        read_record(db, id).await
    }

    /// Curators whose name, or the title of any of whose genres, contains `term`, ignoring case.
    #[instrument(skip(db))]
    pub async fn search<C: Connection>(db: &Surreal<C>, term: &str) -> Result<Vec<Self>, Error> {
        let query = search::curators();
        let index = search::result_index(&query);
        Ok(db
            .query(query)
            .bind(("term", term.to_lowercase()))
            .await?
            .take(index)?)
    }

    /// The genres this curator covers, skipping any that no longer exist.
    #[instrument(skip(db))]
    pub async fn read_genres<C: Connection>(&self, db: &Surreal<C>) -> Result<Vec<Genre>, Error> {
        Genre::read_many(db, &self.genres).await
    }
}
