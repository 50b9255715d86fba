use crate::core::error::LookupError;
use crate::models::{CentroidSource, Coordinates, ResolvedLocation};
use crate::services::{normalize_suburb, Dataset};

/// Resolve a suburb and/or postcode to a centroid
///
/// Strategy:
/// 1. Postcode given: exact lookup in the postcode centroid table
/// 2. Suburb given: lookup in the suburb index of the centroid table,
///    restricted to the postcode when one was also supplied
/// 3. Fallback: median coordinate of schools in that suburb (and postcode)
///
/// Blank input counts as absent.
pub fn resolve_location(
    dataset: &Dataset,
    postcode: Option<&str>,
    suburb: Option<&str>,
) -> Result<ResolvedLocation, LookupError> {
    let postcode = normalize_input(postcode);
    let suburb = normalize_input(suburb);

    if postcode.is_none() && suburb.is_none() {
        return Err(LookupError::InvalidQuery(
            "Please enter a suburb or postcode.".to_string(),
        ));
    }

    if let Some(postcode) = postcode {
        if let Some(centroid) = dataset.postcode(postcode) {
            return Ok(ResolvedLocation {
                coordinates: centroid.coordinates,
                source: CentroidSource::Postcode,
            });
        }
    }

    if let Some(suburb) = suburb {
        if let Some(coordinates) = lookup_suburb(dataset, suburb, postcode) {
            return Ok(ResolvedLocation {
                coordinates,
                source: CentroidSource::Suburb,
            });
        }

        if let Some(coordinates) = suburb_median(dataset, suburb, postcode) {
            return Ok(ResolvedLocation {
                coordinates,
                source: CentroidSource::SchoolMedian,
            });
        }
    }

    Err(LookupError::LocationNotFound(describe_input(suburb, postcode)))
}

/// First centroid-table entry for the suburb, optionally narrowed by postcode
pub fn lookup_suburb(dataset: &Dataset, suburb: &str, postcode: Option<&str>) -> Option<Coordinates> {
    dataset
        .suburb_centroids(suburb)
        .find(|centroid| postcode.map_or(true, |p| centroid.postcode == p))
        .map(|centroid| centroid.coordinates)
}

/// Median latitude and median longitude of the schools in a suburb
///
/// Only schools with usable coordinates take part. Latitude and longitude
/// medians are computed independently.
pub fn suburb_median(dataset: &Dataset, suburb: &str, postcode: Option<&str>) -> Option<Coordinates> {
    let wanted = normalize_suburb(suburb);

    let (mut lats, mut lons): (Vec<f64>, Vec<f64>) = dataset
        .schools()
        .iter()
        .filter(|school| {
            school
                .suburb
                .as_deref()
                .is_some_and(|s| normalize_suburb(s) == wanted)
        })
        .filter(|school| {
            postcode.map_or(true, |p| school.postcode.as_deref().map(str::trim) == Some(p))
        })
        .filter_map(|school| school.searchable_coordinates())
        .map(|c| (c.latitude, c.longitude))
        .unzip();

    let latitude = median(&mut lats)?;
    let longitude = median(&mut lons)?;

    Some(Coordinates::new(latitude, longitude))
}

/// Median of a set of values; even counts average the two middle values
pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

fn normalize_input(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn describe_input(suburb: Option<&str>, postcode: Option<&str>) -> String {
    match (suburb, postcode) {
        (Some(suburb), Some(postcode)) => format!("{} {}", suburb, postcode),
        (Some(suburb), None) => suburb.to_string(),
        (None, Some(postcode)) => postcode.to_string(),
        (None, None) => String::new(),
    }
}
