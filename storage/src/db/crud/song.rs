//! CRUD operations for the song table
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        create_record,
        queries::search,
        read_record, read_records,
        schemas::{
            album::Album,
            artist::Artist,
            disc::Disc,
            song::{Song, SongId},
        },
    },
    errors::Error,
};

impl Song {
    #[instrument(skip(db))]
    pub async fn create<C: Connection>(db: &Surreal<C>, song: Self) -> Result<Self, Error> {
        create_record(db, song).await
    }

    #[instrument(skip(db))]
    pub async fn read<C: Connection>(db: &Surreal<C>, id: SongId) -> Result<Option<Self>, Error> {
        read_record(db, id).await
    }

    /// Songs whose title, album title, any album artist's name, or any featured artist's name
    /// contain `term`, ignoring case. Only songs of published albums unless `staff_view`.
    #[instrument(skip(db))]
    pub async fn search<C: Connection>(
        db: &Surreal<C>,
        term: &str,
        staff_view: bool,
    ) -> Result<Vec<Self>, Error> {
        let query = search::songs();
        let index = search::result_index(&query);
        Ok(db
            .query(query)
            .bind(("term", term.to_lowercase()))
            .bind(("staff_view", staff_view))
            .await?
            .take(index)?)
    }

    /// The album this song is on, found through its disc.
    #[instrument(skip(db))]
    pub async fn read_album<C: Connection>(&self, db: &Surreal<C>) -> Result<Option<Album>, Error> {
        match read_record::<C, Disc>(db, self.disc).await? {
            Some(disc) => read_record(db, disc.album).await,
            None => Ok(None),
        }
    }

    #[instrument(skip(db))]
    pub async fn read_additional_artists<C: Connection>(
        &self,
        db: &Surreal<C>,
    ) -> Result<Vec<Artist>, Error> {
        read_records(db, &self.additional_artists).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{init_test_database, song, wax_catalog};

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[tokio::test]
    async fn test_read_album_through_disc() -> Result<()> {
        let db = init_test_database().await?;
        let catalog = wax_catalog(&db).await?;

        assert_eq!(
            catalog.timmy.read_album(&db).await?,
            Some(catalog.wax_deluxe)
        );
        assert_eq!(
            catalog.platinum_intro.read_album(&db).await?,
            Some(catalog.wax_platinum)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_read_album_of_orphan_song() -> Result<()> {
        let db = init_test_database().await?;
        let orphan = Song {
            disc: 404,
            ..song(
                "Orphan",
                &Disc {
                    id: None,
                    name: "Nowhere".into(),
                    album: 0,
                },
            )
        };

        assert_eq!(orphan.read_album(&db).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_read_additional_artists() -> Result<()> {
        let db = init_test_database().await?;
        let catalog = wax_catalog(&db).await?;

        assert_eq!(
            catalog.timmy.read_additional_artists(&db).await?,
            vec![catalog.takeoff]
        );
        assert!(
            catalog
                .slippery
                .read_additional_artists(&db)
                .await?
                .is_empty()
        );
        Ok(())
    }

    #[rstest]
    #[case::title("timmy", false, vec!["Timmy"])]
    #[case::album_title("deluxe", false, vec!["Timmy", "Slippery"])]
    #[case::album_artist("QUAVO", false, vec!["Timmy", "Slippery"])]
    #[case::featured_artist("takeoff", false, vec!["Timmy"])]
    #[case::unpublished_hidden("platinum", false, vec![])]
    #[case::unpublished_for_staff("platinum", true, vec!["Platinum Intro"])]
    #[case::everything_for_staff("", true, vec!["Timmy", "Slippery", "Platinum Intro"])]
    #[tokio::test]
    async fn test_search(
        #[case] term: &str,
        #[case] staff_view: bool,
        #[case] expected: Vec<&str>,
    ) -> Result<()> {
        let db = init_test_database().await?;
        wax_catalog(&db).await?;

        let titles = Song::search(&db, term, staff_view)
            .await?
            .into_iter()
            .map(|song| song.title.to_string())
            .collect::<Vec<_>>();
        assert_eq!(titles, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_staff_find_songs_without_an_album() -> Result<()> {
        let db = init_test_database().await?;
        wax_catalog(&db).await?;
        let orphan = Song::create(
            &db,
            Song {
                disc: 404,
                ..song(
                    "Orphan Timmy",
                    &Disc {
                        id: None,
                        name: "Nowhere".into(),
                        album: 0,
                    },
                )
            },
        )
        .await?;

        assert!(!Song::search(&db, "orphan", false).await?.contains(&orphan));
        assert_eq!(Song::search(&db, "orphan", true).await?, vec![orphan]);
        Ok(())
    }
}
