pub mod crud;
pub mod queries;
pub mod schemas;

use std::path::PathBuf;

use log::info;
use serde::{Serialize, de::DeserializeOwned};
use surrealdb::{
    Connection, Surreal,
    engine::local::{Db, SurrealKv},
};
use tracing::instrument;

use crate::errors::Error;

use queries::generic::{Counter, define_key_index, next_key, raise_counter, read_all, read_many};

pub const NAMESPACE: &str = "tyne";
pub const DATABASE: &str = "music";

/// Key of a stored record, unique within its table.
/// Allocated by the database, starting at 1.
pub type RecordId = u64;

/// A document that lives in one table of the catalogue.
///
/// The key of a stored record is both the key of its surrealdb record id (`album:7`) and its
/// `key` field, which is what relations between records hold.
/// A record whose [`Record::id`] is `None` has not been stored yet.
pub trait Record:
    Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static
{
    const TABLE_NAME: &'static str;

    fn id(&self) -> Option<RecordId>;

    fn set_id(&mut self, id: RecordId);
}

/// Open the catalogue stored at `path`, creating it if it doesn't exist yet.
///
/// # Errors
///
/// Fails if the catalogue can't be opened.
pub async fn init_database(path: PathBuf) -> Result<Surreal<Db>, Error> {
    let db = Surreal::new::<SurrealKv>(path.clone()).await?;
    prepare(&db).await?;
    info!("Connected to the catalogue at {}", path.display());
    Ok(db)
}

/// Select the catalogue's namespace and database, and define the indexes every table needs.
///
/// # Errors
///
/// Fails if a definition is rejected.
pub async fn prepare<C: Connection>(db: &Surreal<C>) -> Result<(), Error> {
    db.use_ns(NAMESPACE).use_db(DATABASE).await?;
    for table in schemas::TABLES {
        db.query(define_key_index(table)).await?.check()?;
    }
    Ok(())
}

/// The surrealdb record id of `key` in `table`.
///
/// # Errors
///
/// Returns [`Error::IdOutOfRange`] for keys surrealdb can't hold.
pub fn thing(table: &str, key: RecordId) -> Result<surrealdb::RecordId, Error> {
    let key = i64::try_from(key).map_err(|_| Error::IdOutOfRange(key))?;
    Ok(surrealdb::RecordId::from_table_key(table, key))
}

/// Store a new record.
///
/// A record without an id is given the next free key of its table.
/// A record with an id is stored under it, unless a record with that key already exists.
///
/// # Errors
///
/// Returns [`Error::AlreadyExists`] if the key is taken.
#[instrument(skip(db))]
pub async fn create_record<C: Connection, T: Record>(
    db: &Surreal<C>,
    mut record: T,
) -> Result<T, Error> {
    let key = match record.id() {
        Some(key) => {
            if read_record::<C, T>(db, key).await?.is_some() {
                return Err(Error::AlreadyExists {
                    table: T::TABLE_NAME,
                    key,
                });
            }
            let _: Option<Counter> = db
                .query(raise_counter())
                .bind(("table", T::TABLE_NAME))
                .bind(("key", key))
                .await?
                .take(0)?;
            key
        }
        None => {
            let counter: Option<Counter> = db
                .query(next_key())
                .bind(("table", T::TABLE_NAME))
                .await?
                .take(0)?;
            counter.ok_or(Error::NoId)?.last
        }
    };

    record.set_id(key);
    let created: Option<T> = db.create(thing(T::TABLE_NAME, key)?).content(record).await?;
    created.ok_or(Error::NotFound)
}

#[instrument(skip(db))]
pub async fn read_record<C: Connection, T: Record>(
    db: &Surreal<C>,
    key: RecordId,
) -> Result<Option<T>, Error> {
    Ok(db.select(thing(T::TABLE_NAME, key)?).await?)
}

/// Every record of a table, in ascending key order.
#[instrument(skip(db))]
pub async fn read_all_records<C: Connection, T: Record>(db: &Surreal<C>) -> Result<Vec<T>, Error> {
    Ok(db.query(read_all(T::TABLE_NAME)).await?.take(0)?)
}

/// The records with the given keys, in the order of `keys`.
/// Keys without a record are skipped.
#[instrument(skip(db))]
pub async fn read_records<C: Connection, T: Record>(
    db: &Surreal<C>,
    keys: &[RecordId],
) -> Result<Vec<T>, Error> {
    if keys.is_empty() {
        return Ok(vec![]);
    }

    let found: Vec<T> = db
        .query(read_many(T::TABLE_NAME))
        .bind(("keys", keys.to_vec()))
        .await?
        .take(0)?;

    Ok(keys
        .iter()
        .filter_map(|key| found.iter().find(|record| record.id() == Some(*key)))
        .cloned()
        .collect())
}

/// Overwrite a stored record, returns `None` if there was nothing to overwrite.
///
/// # Errors
///
/// Returns [`Error::NoId`] if the record was never stored.
#[instrument(skip(db))]
pub async fn update_record<C: Connection, T: Record>(
    db: &Surreal<C>,
    record: T,
) -> Result<Option<T>, Error> {
    let key = record.id().ok_or(Error::NoId)?;
    Ok(db
        .update(thing(T::TABLE_NAME, key)?)
        .content(record)
        .await?)
}

/// Remove a record, returning it if it existed.
#[instrument(skip(db))]
pub async fn delete_record<C: Connection, T: Record>(
    db: &Surreal<C>,
    key: RecordId,
) -> Result<Option<T>, Error> {
    Ok(db.delete(thing(T::TABLE_NAME, key)?).await?)
}
