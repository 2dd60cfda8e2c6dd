//! Fixtures shared by the tests of every crate in the workspace.
use std::{ops::RangeInclusive, sync::Arc};

use chrono::NaiveDate;
use rand::seq::IteratorRandom;
use surrealdb::{
    Connection, Surreal,
    engine::local::{Db, Mem},
};

use crate::{
    db::{
        create_record, prepare,
        schemas::{
            album::Album,
            artist::Artist,
            creator::Creator,
            disc::Disc,
            genre::Genre,
            playlist::{Playlist, PlaylistOwner, SongsOrder},
            profile::Profile,
            song::Song,
        },
    },
    errors::Error,
};

/// A fresh, empty, in-memory catalogue.
///
/// # Errors
///
/// Fails if the in-memory database can't be started.
pub async fn init_test_database() -> Result<Surreal<Db>, Error> {
    let db = Surreal::new::<Mem>(()).await?;
    prepare(&db).await?;
    Ok(db)
}

#[must_use]
pub fn artist(name: &str) -> Artist {
    Artist {
        id: None,
        name: name.into(),
        is_group: false,
        group_members: vec![],
        bio: None,
        nicknames: None,
    }
}

#[must_use]
pub fn group(name: &str) -> Artist {
    Artist {
        is_group: true,
        ..artist(name)
    }
}

#[must_use]
pub fn album(title: &str, published: bool) -> Album {
    Album {
        id: None,
        title: title.into(),
        notes: None,
        genre: None,
        release: NaiveDate::from_ymd_opt(2021, 5, 12),
        published,
        copyright: None,
        artists: vec![],
    }
}

#[must_use]
pub fn song(title: &str, disc: &Disc) -> Song {
    Song {
        id: None,
        title: title.into(),
        track: None,
        explicit: false,
        length: None,
        disc: disc.id.unwrap_or_default(),
        additional_artists: vec![],
    }
}

#[must_use]
pub fn genre(title: &str) -> Genre {
    Genre {
        id: None,
        title: title.into(),
        description: None,
    }
}

#[must_use]
pub fn creator(name: &str) -> Creator {
    Creator {
        id: None,
        name: name.into(),
        description: None,
        genres: vec![],
    }
}

#[must_use]
pub fn playlist(title: &str, owner: PlaylistOwner) -> Playlist {
    Playlist {
        id: None,
        title: title.into(),
        description: None,
        owner,
        songs: vec![],
        songs_order: SongsOrder::default(),
    }
}

/// Store an album along with its first disc.
///
/// # Errors
///
/// Propagates database errors.
pub async fn create_album_with_disc<C: Connection>(
    db: &Surreal<C>,
    album: Album,
) -> Result<(Album, Disc), Error> {
    let album = Album::create(db, album).await?;
    let disc = create_record(
        db,
        Disc {
            id: None,
            name: Arc::from("Disc 1"),
            album: album.id.ok_or(Error::NoId)?,
        },
    )
    .await?;
    Ok((album, disc))
}

/// A small catalogue built around the "WAX" albums, used across the search and playlist tests.
#[derive(Debug, Clone)]
pub struct WaxCatalog {
    pub hip_hop: Genre,
    pub pop_curator: Creator,
    pub hip_hop_curator: Creator,
    pub quavo: Artist,
    pub takeoff: Artist,
    pub offset: Artist,
    pub migos: Artist,
    /// published, by Quavo
    pub wax_deluxe: Album,
    /// published, with liner notes
    pub wax: Album,
    /// not published
    pub wax_platinum: Album,
    /// on "WAX (Deluxe)", featuring Takeoff
    pub timmy: Song,
    /// on "WAX (Deluxe)"
    pub slippery: Song,
    /// on "WAX Platinum Edition"
    pub platinum_intro: Song,
    pub profile: Profile,
    /// curated by "Tyne Music Pop"
    pub all_time_pop: Playlist,
    /// a personal playlist
    pub home_work: Playlist,
    /// curated by "Tyne Music Hip-Hop"
    pub quavo_must_listens: Playlist,
}

/// Populate `db` with the [`WaxCatalog`].
///
/// # Errors
///
/// Propagates database errors.
pub async fn wax_catalog<C: Connection>(db: &Surreal<C>) -> Result<WaxCatalog, Error> {
    let hip_hop = Genre::create(db, genre("Hip-Hop")).await?;
    let pop_curator = Creator::create(
        db,
        Creator {
            genres: vec![hip_hop.id.ok_or(Error::NoId)?],
            ..creator("Tyne Music Pop")
        },
    )
    .await?;
    let hip_hop_curator = Creator::create(db, creator("Tyne Music Hip-Hop")).await?;

    let quavo = Artist::create(
        db,
        Artist {
            nicknames: Some("Huncho, Quavious".into()),
            ..artist("Quavo")
        },
    )
    .await?;
    let takeoff = Artist::create(db, artist("Takeoff")).await?;
    let offset = Artist::create(db, artist("Offset")).await?;
    let migos = Artist::create(db, group("Migos")).await?;

    let (wax_deluxe, deluxe_disc) = create_album_with_disc(
        db,
        Album {
            genre: hip_hop.id,
            artists: vec![quavo.id.ok_or(Error::NoId)?],
            ..album("WAX (Deluxe)", true)
        },
    )
    .await?;
    let timmy = Song::create(
        db,
        Song {
            track: Some(1),
            length: Some(285),
            additional_artists: vec![takeoff.id.ok_or(Error::NoId)?],
            ..song("Timmy", &deluxe_disc)
        },
    )
    .await?;
    let slippery = Song::create(
        db,
        Song {
            track: Some(2),
            ..song("Slippery", &deluxe_disc)
        },
    )
    .await?;

    let (wax, _) = create_album_with_disc(
        db,
        Album {
            genre: hip_hop.id,
            notes: Some("Liner notes for the original pressing".into()),
            ..album("WAX", true)
        },
    )
    .await?;

    let (wax_platinum, platinum_disc) = create_album_with_disc(
        db,
        Album {
            genre: hip_hop.id,
            ..album("WAX Platinum Edition", false)
        },
    )
    .await?;
    let platinum_intro = Song::create(
        db,
        Song {
            track: Some(1),
            ..song("Platinum Intro", &platinum_disc)
        },
    )
    .await?;

    let profile = create_record(
        db,
        Profile {
            id: None,
            name: "pl".into(),
        },
    )
    .await?;

    let all_time_pop = Playlist::create(
        db,
        playlist(
            "All Time Pop",
            PlaylistOwner::Creator(pop_curator.id.ok_or(Error::NoId)?),
        ),
    )
    .await?;
    let home_work = Playlist::create(
        db,
        playlist(
            "Home work",
            PlaylistOwner::Profile(profile.id.ok_or(Error::NoId)?),
        ),
    )
    .await?;
    let quavo_must_listens = Playlist::create(
        db,
        playlist(
            "Quavo Must Listens",
            PlaylistOwner::Creator(hip_hop_curator.id.ok_or(Error::NoId)?),
        ),
    )
    .await?;

    Ok(WaxCatalog {
        hip_hop,
        pop_curator,
        hip_hop_curator,
        quavo,
        takeoff,
        offset,
        migos,
        wax_deluxe,
        wax,
        wax_platinum,
        timmy,
        slippery,
        platinum_intro,
        profile,
        all_time_pop,
        home_work,
        quavo_must_listens,
    })
}

/// The words every name in an [`arb_catalog`] is made of, so that searching for one of them
/// finds a good share of the catalogue.
pub const ARB_WORDS: [&str; 6] = ["wax", "neon", "tide", "echo", "velvet", "gold"];

pub fn arb_vec<T>(
    item_strategy: &impl Fn() -> T,
    range: RangeInclusive<usize>,
) -> impl Fn() -> Vec<T> + '_
where
    T: Clone + std::fmt::Debug + Sized,
{
    move || {
        let size = range
            .clone()
            .choose(&mut rand::thread_rng())
            .unwrap_or_default();
        Vec::from_iter(std::iter::repeat_with(|| item_strategy()).take(size))
    }
}

/// One to three words of [`ARB_WORDS`], in mixed case.
#[must_use]
pub fn arb_name() -> String {
    arb_vec(&arb_term, 1..=3)().join(" ")
}

/// A word of [`ARB_WORDS`], possibly capitalised or shouted.
#[must_use]
pub fn arb_term() -> String {
    let rng = &mut rand::thread_rng();
    let word = ARB_WORDS.iter().choose(rng).copied().unwrap_or("wax");
    match (0..3u8).choose(rng).unwrap_or_default() {
        0 => word.to_uppercase(),
        1 => format!("{}{}", word[..1].to_uppercase(), &word[1..]),
        _ => word.to_string(),
    }
}

/// Up to `max` of `ids`, in random order.
fn arb_subset(ids: &[u64], max: usize) -> Vec<u64> {
    let rng = &mut rand::thread_rng();
    let amount = (0..=max.min(ids.len())).choose(rng).unwrap_or_default();
    ids.iter().copied().choose_multiple(rng, amount)
}

/// Populate `db` with a random catalogue with at least six albums, songs, artists, curator
/// playlists, genres and curators, all named from [`ARB_WORDS`].
///
/// # Errors
///
/// Propagates database errors.
pub async fn arb_catalog<C: Connection>(db: &Surreal<C>) -> Result<(), Error> {
    let names = arb_vec(&arb_name, 6..=12);

    let mut genres = vec![];
    for title in names() {
        genres.extend(Genre::create(db, genre(&title)).await?.id);
    }

    let mut curators = vec![];
    for name in names() {
        let curator = Creator {
            genres: arb_subset(&genres, 2),
            ..creator(&name)
        };
        curators.extend(Creator::create(db, curator).await?.id);
    }

    let mut artists = vec![];
    for name in names() {
        let artist = Artist {
            is_group: rand::random(),
            nicknames: rand::random::<bool>().then(|| arb_name().into()),
            ..artist(&name)
        };
        artists.extend(Artist::create(db, artist).await?.id);
    }

    let mut songs = vec![];
    for title in names() {
        let (_, disc) = create_album_with_disc(
            db,
            Album {
                notes: rand::random::<bool>().then(|| arb_name().into()),
                artists: arb_subset(&artists, 2),
                ..album(&title, rand::random())
            },
        )
        .await?;
        for (track, title) in arb_vec(&arb_name, 1..=3)().into_iter().enumerate() {
            let song = Song {
                track: u16::try_from(track + 1).ok(),
                additional_artists: arb_subset(&artists, 1),
                ..song(&title, &disc)
            };
            songs.extend(Song::create(db, song).await?.id);
        }
    }

    for title in names() {
        let owner = curators
            .iter()
            .copied()
            .choose(&mut rand::thread_rng())
            .ok_or(Error::NoId)?;
        let members = arb_subset(&songs, 4);
        Playlist::create(
            db,
            Playlist {
                description: rand::random::<bool>().then(|| arb_name().into()),
                songs_order: SongsOrder::from(members.clone()),
                songs: members,
                ..playlist(&title, PlaylistOwner::Creator(owner))
            },
        )
        .await?;
    }
    let profile = create_record(
        db,
        Profile {
            id: None,
            name: arb_name().into(),
        },
    )
    .await?;
    Playlist::create(
        db,
        playlist(
            &arb_name(),
            PlaylistOwner::Profile(profile.id.ok_or(Error::NoId)?),
        ),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{queries::generic::Count, schemas::TABLES};

    use anyhow::Result;

    #[test]
    fn test_arb_name_uses_the_vocabulary() {
        for _ in 0..50 {
            let name = arb_name();
            let words = name.split(' ').collect::<Vec<_>>();
            assert!((1..=3).contains(&words.len()), "{name:?}");
            assert!(
                words
                    .iter()
                    .all(|word| ARB_WORDS.contains(&word.to_lowercase().as_str())),
                "{name:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_arb_catalog_sizes() -> Result<()> {
        let db = init_test_database().await?;
        arb_catalog(&db).await?;

        for table in TABLES {
            let count = Count::count(&db, table).await?;
            let minimum = match table {
                "profile" => 1,
                // the curator playlists, plus a personal one
                "playlist" => 7,
                _ => 6,
            };
            assert!(count >= minimum, "only {count} records in {table}");
        }
        Ok(())
    }
}
