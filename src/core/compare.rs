use crate::core::error::LookupError;
use crate::models::ComparedSchool;
use crate::services::Dataset;

/// Maximum number of schools that can be compared side by side
pub const MAX_COMPARE: usize = 3;

/// Fetch the schools to compare, all or nothing
///
/// More than [`MAX_COMPARE`] identifiers is rejected before any lookup.
/// Repeated identifiers are collapsed keeping first-seen order. Distances,
/// when supplied, are attached by each school's first position in `ids`.
pub fn assemble_comparison<'a>(
    dataset: &'a Dataset,
    ids: &[u32],
    distances: &[f64],
) -> Result<Vec<ComparedSchool<'a>>, LookupError> {
    if ids.len() > MAX_COMPARE {
        return Err(LookupError::ComparisonLimitExceeded {
            requested: ids.len(),
            max: MAX_COMPARE,
        });
    }

    if ids.is_empty() {
        return Err(LookupError::InvalidQuery(
            "Please select schools to compare.".to_string(),
        ));
    }

    // (id, position in the supplied list) for the first occurrence of each id
    let mut unique_ids: Vec<(u32, usize)> = Vec::with_capacity(ids.len());
    for (position, &id) in ids.iter().enumerate() {
        if !unique_ids.iter().any(|&(seen, _)| seen == id) {
            unique_ids.push((id, position));
        }
    }

    unique_ids
        .iter()
        .map(|&(id, position)| -> Result<ComparedSchool<'a>, LookupError> {
            let school = dataset.school(id).ok_or(LookupError::SchoolNotFound(id))?;
            Ok(ComparedSchool {
                school,
                distance_km: distances.get(position).copied(),
            })
        })
        .collect()
}

/// Parse a comma-separated list of school ids, e.g. "12,40,7"
pub fn parse_id_list(raw: &str) -> Result<Vec<u32>, LookupError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|_| LookupError::InvalidQuery(format!("Invalid school id: {}", part)))
        })
        .collect()
}

/// Parse a comma-separated list of distances.
///
/// Distances are advisory display data, so any unparseable entry discards
/// the whole list rather than failing the comparison.
pub fn parse_distance_list(raw: &str) -> Vec<f64> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f64>().ok().filter(|d| d.is_finite() && *d >= 0.0))
        .collect::<Option<Vec<f64>>>()
        .unwrap_or_default()
}
