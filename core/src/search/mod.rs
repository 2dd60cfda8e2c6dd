//! Searching the catalogue.
//!
//! A [`MusicSearch`] looks for a single term across albums, songs, artists, curator playlists,
//! genres, and curators. Every list of results is ranked by the edit distance between the term and
//! the display string of each result, and the closest results of each type are blended into a
//! list of top results.
//!
//! ```ignore
//! let mut search = MusicSearch::new(&db, "drake", false);
//! let results = search.results(false).await?;
//! ```
//!
//! The database is only queried once per search: later calls reuse the results unless asked to
//! refresh them.
use std::{
    fmt,
    time::{Duration, Instant},
};

use log::debug;
use serde::Serialize;
use surrealdb::{Connection, Surreal};
use tracing::instrument;
use tyne_storage::db::schemas::{
    album::Album, artist::Artist, creator::Creator, genre::Genre, playlist::Playlist, song::Song,
};

use crate::errors::SearchError;

pub mod ranking;
pub mod serialize;

pub use ranking::{Ranked, SearchItem, distance};
pub use serialize::SerializedResults;

/// How many results of each type make it into the top results by default.
pub const DEFAULT_TOP_RESULTS_PER_TYPE: usize = 5;

/// The results of a search, each list sorted by ascending distance to the term.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    /// The closest results of every type, blended together.
    pub top_results: Vec<SearchItem>,
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
    pub artists: Vec<Artist>,
    pub playlists: Vec<Playlist>,
    pub genres: Vec<Genre>,
    pub curators: Vec<Creator>,
}

impl SearchResults {
    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top_results.is_empty()
            && self.albums.is_empty()
            && self.songs.is_empty()
            && self.artists.is_empty()
            && self.playlists.is_empty()
            && self.genres.is_empty()
            && self.curators.is_empty()
    }

    async fn compute<C: Connection>(
        db: &Surreal<C>,
        term: &str,
        staff_view: bool,
        top_results_per_type: usize,
    ) -> Result<Self, SearchError> {
        let mut results = Self {
            top_results: Vec::new(),
            albums: Album::search(db, term, staff_view).await?,
            songs: Song::search(db, term, staff_view).await?,
            artists: Artist::search(db, term).await?,
            playlists: Playlist::search(db, term).await?,
            genres: Genre::search(db, term).await?,
            curators: Creator::search(db, term).await?,
        };

        ranking::rank(term, &mut results.albums);
        ranking::rank(term, &mut results.songs);
        ranking::rank(term, &mut results.artists);
        ranking::rank(term, &mut results.playlists);
        ranking::rank(term, &mut results.genres);
        ranking::rank(term, &mut results.curators);

        results.top_results = results.top_results(term, top_results_per_type);
        Ok(results)
    }

    /// The first `per_type` results of every list, re-ranked together.
    /// A result can be in both its own list and the top results.
    fn top_results(&self, term: &str, per_type: usize) -> Vec<SearchItem> {
        let mut top_results = self
            .albums
            .iter()
            .take(per_type)
            .cloned()
            .map(SearchItem::Album)
            .chain(self.songs.iter().take(per_type).cloned().map(SearchItem::Song))
            .chain(self.artists.iter().take(per_type).cloned().map(SearchItem::Artist))
            .chain(
                self.playlists
                    .iter()
                    .take(per_type)
                    .cloned()
                    .map(SearchItem::Playlist),
            )
            .chain(self.genres.iter().take(per_type).cloned().map(SearchItem::Genre))
            .chain(self.curators.iter().take(per_type).cloned().map(SearchItem::Curator))
            .collect::<Vec<_>>();

        ranking::rank(term, &mut top_results);
        top_results
    }
}

/// What [`MusicSearch::get_results`] hands back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchOutput<'a> {
    Raw(&'a SearchResults),
    Serialized(&'a SerializedResults),
}

/// A search of the catalogue for a single term.
///
/// The results, and separately their serialized form, are computed on first use and cached for
/// the lifetime of the search.
pub struct MusicSearch<'db, C: Connection> {
    db: &'db Surreal<C>,
    term: String,
    staff_view: bool,
    top_results_per_type: usize,
    results: Option<SearchResults>,
    serialized: Option<SerializedResults>,
    time_taken: Option<Duration>,
}

impl<C: Connection> fmt::Debug for MusicSearch<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MusicSearch")
            .field("term", &self.term)
            .field("staff_view", &self.staff_view)
            .field("top_results_per_type", &self.top_results_per_type)
            .field("cached", &self.results.is_some())
            .field("time_taken", &self.time_taken)
            .finish_non_exhaustive()
    }
}

impl<'db, C: Connection> MusicSearch<'db, C> {
    /// Prepare a search for `term`.
    /// Unpublished albums, and their songs, are only found when `staff_view` is set.
    ///
    /// Nothing is read from the database until results are asked for.
    #[must_use]
    pub fn new(db: &'db Surreal<C>, term: impl Into<String>, staff_view: bool) -> Self {
        Self {
            db,
            term: term.into(),
            staff_view,
            top_results_per_type: DEFAULT_TOP_RESULTS_PER_TYPE,
            results: None,
            serialized: None,
            time_taken: None,
        }
    }

    /// Change how many results of each type are blended into the top results.
    #[must_use]
    pub fn with_top_results_per_type(mut self, per_type: usize) -> Self {
        if self.top_results_per_type != per_type {
            self.top_results_per_type = per_type;
            self.invalidate();
        }
        self
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub const fn staff_view(&self) -> bool {
        self.staff_view
    }

    /// How long the last retrieval of results took, `None` if results were never asked for.
    #[must_use]
    pub const fn time_taken(&self) -> Option<Duration> {
        self.time_taken
    }

    /// Drop the cached results, the next retrieval searches the database again.
    pub fn invalidate(&mut self) {
        self.results.take();
        self.serialized.take();
    }

    /// The results of the search.
    ///
    /// # Errors
    ///
    /// Fails if the database can't be read.
    #[instrument(skip(self), fields(term = %self.term, staff_view = self.staff_view))]
    pub async fn results(&mut self, refresh: bool) -> Result<&SearchResults, SearchError> {
        let start = Instant::now();
        if refresh {
            self.invalidate();
        }

        let results = match self.results.take() {
            Some(results) => results,
            None => {
                SearchResults::compute(
                    self.db,
                    &self.term,
                    self.staff_view,
                    self.top_results_per_type,
                )
                .await?
            }
        };

        self.time_taken = Some(start.elapsed());
        debug!("searching for {:?} took {:?}", self.term, start.elapsed());
        Ok(&*self.results.insert(results))
    }

    /// The results of the search in wire format.
    ///
    /// # Errors
    ///
    /// Fails if the database can't be read.
    #[instrument(skip(self), fields(term = %self.term, staff_view = self.staff_view))]
    pub async fn serialized(&mut self, refresh: bool) -> Result<&SerializedResults, SearchError> {
        let start = Instant::now();
        if refresh {
            self.invalidate();
        }

        let Self {
            db,
            term,
            staff_view,
            top_results_per_type,
            results,
            serialized,
            time_taken,
        } = self;

        let computed = match results.take() {
            Some(results) => results,
            None => {
                SearchResults::compute(*db, term.as_str(), *staff_view, *top_results_per_type)
                    .await?
            }
        };
        let results = results.insert(computed);
        let loaded = match serialized.take() {
            Some(serialized) => serialized,
            None => SerializedResults::load(*db, results).await?,
        };

        *time_taken = Some(start.elapsed());
        debug!("serialized search for {term:?} took {:?}", start.elapsed());
        Ok(&*serialized.insert(loaded))
    }

    /// Get the results, serialized or not.
    /// With `refresh`, both the results and their serialized form are computed again.
    ///
    /// # Errors
    ///
    /// Fails if the database can't be read.
    pub async fn get_results(
        &mut self,
        serialize: bool,
        refresh: bool,
    ) -> Result<SearchOutput<'_>, SearchError> {
        if serialize {
            self.serialized(refresh).await.map(SearchOutput::Serialized)
        } else {
            self.results(refresh).await.map(SearchOutput::Raw)
        }
    }
}
