use crate::core::{
    error::LookupError,
    ranker::{rank_results, DEFAULT_MAX_RESULTS},
    resolver::resolve_location,
    spatial::filter_within_radius,
};
use crate::models::{ResolvedLocation, SearchQuery, SearchRadius, SearchResult};
use crate::services::Dataset;

/// Outcome of a location search
#[derive(Debug)]
pub struct SearchOutcome<'a> {
    pub location: ResolvedLocation,
    pub radius: SearchRadius,
    pub result: SearchResult<'a>,
}

/// Search orchestrator - runs the lookup pipeline for a single query
///
/// # Pipeline Stages
/// 1. Resolve suburb/postcode to a centroid
/// 2. Categorical filters + bounding box pre-filter + Haversine radius check
/// 3. Sort by distance and truncate
#[derive(Debug, Clone, Copy)]
pub struct SchoolFinder {
    max_results: usize,
}

impl SchoolFinder {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Find the schools near the location described by `query`
    ///
    /// # Arguments
    /// * `dataset` - The loaded reference data
    /// * `query` - Location input, radius and filters
    ///
    /// # Returns
    /// The resolved centroid and the ranked schools. No matches is a valid
    /// result, not an error.
    pub fn search<'a>(
        &self,
        dataset: &'a Dataset,
        query: &SearchQuery,
    ) -> Result<SearchOutcome<'a>, LookupError> {
        let location = resolve_location(
            dataset,
            query.postcode.as_deref(),
            query.suburb.as_deref(),
        )?;

        tracing::debug!(
            "Resolved location to ({:.4}, {:.4}) via {:?}",
            location.coordinates.latitude,
            location.coordinates.longitude,
            location.source
        );

        let hits = filter_within_radius(
            location.coordinates,
            query.radius.km(),
            dataset.schools(),
            &query.filters,
        );

        let result = rank_results(hits, self.max_results);

        Ok(SearchOutcome {
            location,
            radius: query.radius,
            result,
        })
    }
}

impl Default for SchoolFinder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}
