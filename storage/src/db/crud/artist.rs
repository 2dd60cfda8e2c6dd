//! CRUD operations for the artist table
use log::debug;
use surrealdb::{Connection, Surreal};
use tracing::instrument;

use crate::{
    db::{
        create_record,
        queries::{artist::add_to_group, search},
        read_all_records, read_record, read_records,
        schemas::artist::{Artist, ArtistId},
    },
    errors::Error,
};

impl Artist {
    #[instrument(skip(db))]
    pub async fn create<C: Connection>(db: &Surreal<C>, artist: Self) -> Result<Self, Error> {
        create_record(db, artist).await
    }

    #[instrument(skip(db))]
    pub async fn read_all<C: Connection>(db: &Surreal<C>) -> Result<Vec<Self>, Error> {
        read_all_records(db).await
    }

    #[instrument(skip(db))]
    pub async fn read<C: Connection>(
        db: &Surreal<C>,
        id: ArtistId,
    ) -> Result<Option<Self>, Error> {
        read_record(db, id).await
    }

    /// Artists whose name, nicknames, or any group member's name contain `term`, ignoring case.
    #[instrument(skip(db))]
    pub async fn search<C: Connection>(db: &Surreal<C>, term: &str) -> Result<Vec<Self>, Error> {
        let query = search::artists();
        let index = search::result_index(&query);
        Ok(db
            .query(query)
            .bind(("term", term.to_lowercase()))
            .await?
            .take(index)?)
    }

    /// For a group, its members. For anyone else, the groups they're in.
    #[instrument(skip(db))]
    pub async fn read_group_members<C: Connection>(
        &self,
        db: &Surreal<C>,
    ) -> Result<Vec<Self>, Error> {
        read_records(db, &self.group_members).await
    }

    /// Add `artist` to the group `group`.
    ///
    /// Only groups take members, and groups can't be members themselves.
    /// Membership goes both ways: the group lists the artist, and the artist lists the group.
    ///
    /// # Returns
    ///
    /// Whether the artist is a member of the group afterwards.
    #[instrument(skip(db))]
    pub async fn add_artist_to_group<C: Connection>(
        db: &Surreal<C>,
        group: ArtistId,
        artist: ArtistId,
    ) -> Result<bool, Error> {
        if group == artist {
            return Ok(false);
        }

        let (Some(group_record), Some(artist_record)) =
            (Self::read(db, group).await?, Self::read(db, artist).await?)
        else {
            return Err(Error::NotFound);
        };

        if !group_record.is_group || artist_record.is_group {
            debug!("refusing to add {artist_record} to {group_record}");
            return Ok(false);
        }

        db.query(add_to_group())
            .bind(("group", group))
            .bind(("artist", artist))
            .await?
            .check()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{artist, group, init_test_database, wax_catalog};

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[tokio::test]
    async fn test_add_artist_to_group() -> Result<()> {
        let db = init_test_database().await?;
        let quavo = Artist::create(&db, artist("Quavo")).await?;
        let takeoff = Artist::create(&db, artist("Takeoff")).await?;
        let offset = Artist::create(&db, artist("Offset")).await?;
        let migos = Artist::create(&db, group("Migos")).await?;
        let fugees = Artist::create(&db, group("The Fugees")).await?;

        let migos_id = migos.id.unwrap_or_default();
        for member in [&quavo, &takeoff, &offset] {
            assert!(Artist::add_artist_to_group(&db, migos_id, member.id.unwrap_or_default()).await?);
        }
        // groups can't join groups
        assert!(!Artist::add_artist_to_group(&db, migos_id, fugees.id.unwrap_or_default()).await?);
        // adding twice doesn't duplicate
        assert!(Artist::add_artist_to_group(&db, migos_id, quavo.id.unwrap_or_default()).await?);

        let migos = Artist::read(&db, migos_id).await?.unwrap_or(migos);
        let names = migos
            .read_group_members(&db)
            .await?
            .into_iter()
            .map(|member| member.name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Quavo", "Takeoff", "Offset"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_membership_is_symmetric() -> Result<()> {
        let db = init_test_database().await?;
        let quavo = Artist::create(&db, artist("Quavo")).await?;
        let takeoff = Artist::create(&db, artist("Takeoff")).await?;
        let migos = Artist::create(&db, group("Migos")).await?;
        let (quavo_id, migos_id) = (quavo.id.unwrap_or_default(), migos.id.unwrap_or_default());

        Artist::add_artist_to_group(&db, migos_id, quavo_id).await?;
        Artist::add_artist_to_group(&db, migos_id, quavo_id).await?;
        // a solo artist can't take members
        assert!(!Artist::add_artist_to_group(&db, quavo_id, takeoff.id.unwrap_or_default()).await?);
        // nor join itself
        assert!(!Artist::add_artist_to_group(&db, migos_id, migos_id).await?);

        let quavo = Artist::read(&db, quavo_id).await?.unwrap_or(quavo);
        assert_eq!(quavo.group_members, vec![migos_id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_missing_artist_to_group() -> Result<()> {
        let db = init_test_database().await?;
        let migos = Artist::create(&db, group("Migos")).await?;

        let result = Artist::add_artist_to_group(&db, migos.id.unwrap_or_default(), 404).await;
        assert!(matches!(result, Err(Error::NotFound)));
        Ok(())
    }

    #[rstest]
    #[case::name("offset", vec!["Offset"])]
    #[case::ignores_case("QUAVO", vec!["Quavo", "Migos"])]
    #[case::nickname("huncho", vec!["Quavo"])]
    #[case::member_name("takeoff", vec!["Takeoff", "Migos"])]
    #[case::nothing("fugees", vec![])]
    #[tokio::test]
    async fn test_search(#[case] term: &str, #[case] expected: Vec<&str>) -> Result<()> {
        let db = init_test_database().await?;
        let catalog = wax_catalog(&db).await?;
        for member in [&catalog.quavo, &catalog.takeoff] {
            Artist::add_artist_to_group(
                &db,
                catalog.migos.id.unwrap_or_default(),
                member.id.unwrap_or_default(),
            )
            .await?;
        }

        let names = Artist::search(&db, term)
            .await?
            .into_iter()
            .map(|artist| artist.name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, expected);
        Ok(())
    }
}
