//! CRUD operations for the album table
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        create_record,
        queries::{
            album::{read_discs, read_songs_on_discs},
            search,
        },
        read_all_records, read_record, read_records,
        schemas::{
            album::{Album, AlbumId},
            artist::Artist,
            disc::Disc,
            song::Song,
        },
    },
    errors::Error,
};

impl Album {
    #[instrument(skip(db))]
    pub async fn create<C: Connection>(db: &Surreal<C>, album: Self) -> Result<Self, Error> {
        create_record(db, album).await
    }

    #[instrument(skip(db))]
    pub async fn read_all<C: Connection>(db: &Surreal<C>) -> Result<Vec<Self>, Error> {
        read_all_records(db).await
    }

    #[instrument(skip(db))]
    pub async fn read<C: Connection>(db: &Surreal<C>, id: AlbumId) -> Result<Option<Self>, Error> {
        read_record(db, id).await
    }

    /// Albums whose title, notes, or any artist's name contain `term`, ignoring case.
    /// Only published albums unless `staff_view`.
    #[instrument(skip(db))]
    pub async fn search<C: Connection>(
        db: &Surreal<C>,
        term: &str,
        staff_view: bool,
    ) -> Result<Vec<Self>, Error> {
        let query = search::albums();
        let index = search::result_index(&query);
        Ok(db
            .query(query)
            .bind(("term", term.to_lowercase()))
            .bind(("staff_view", staff_view))
            .await?
            .take(index)?)
    }

    /// Read the artists credited on this album, skipping any that no longer exist.
    #[instrument(skip(db))]
    pub async fn read_artists<C: Connection>(&self, db: &Surreal<C>) -> Result<Vec<Artist>, Error> {
        read_records(db, &self.artists).await
    }

    #[instrument(skip(db))]
    pub async fn read_discs<C: Connection>(&self, db: &Surreal<C>) -> Result<Vec<Disc>, Error> {
        let Some(id) = self.id else {
            return Ok(vec![]);
        };
        Ok(db.query(read_discs()).bind(("album", id)).await?.take(0)?)
    }

    /// Every song on the album, disc by disc, in track order.
    #[instrument(skip(db))]
    pub async fn read_songs<C: Connection>(&self, db: &Surreal<C>) -> Result<Vec<Song>, Error> {
        let discs = self
            .read_discs(db)
            .await?
            .into_iter()
            .filter_map(|disc| disc.id)
            .collect::<Vec<_>>();
        if discs.is_empty() {
            return Ok(vec![]);
        }

        let songs: Vec<Song> = db
            .query(read_songs_on_discs())
            .bind(("discs", discs.clone()))
            .await?
            .take(0)?;

        let mut songs = songs
            .into_iter()
            .filter_map(|song| {
                let disc = discs.iter().position(|disc| *disc == song.disc)?;
                Some((disc, song))
            })
            .collect::<Vec<_>>();
        songs.sort_by_key(|(disc, song)| (*disc, song.track.is_none(), song.track));
        Ok(songs.into_iter().map(|(_, song)| song).collect())
    }
}
