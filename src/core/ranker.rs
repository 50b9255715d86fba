use std::cmp::Ordering;

use crate::models::{SchoolHit, SearchResult};

/// Default cap on the number of schools returned by a search
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Sort hits by distance and truncate to `max_results`
///
/// Ties on distance are broken by name (case-insensitive first, then exact)
/// and finally by id, so equal inputs always rank the same way. The total
/// number of hits before truncation is kept on the result.
pub fn rank_results(hits: Vec<SchoolHit<'_>>, max_results: usize) -> SearchResult<'_> {
    let total_matches = hits.len();

    // Lowercase names are computed once per hit, not per comparison
    let mut keyed: Vec<(String, SchoolHit<'_>)> = hits
        .into_iter()
        .map(|hit| (hit.school.name.to_lowercase(), hit))
        .collect();

    keyed.sort_by(|(a_key, a), (b_key, b)| compare_hits(a_key, a, b_key, b));

    let schools = keyed
        .into_iter()
        .take(max_results)
        .map(|(_, hit)| hit)
        .collect();

    SearchResult {
        schools,
        total_matches,
    }
}

/// Ranking order: distance ascending, then name ascending
fn compare_hits(a_key: &str, a: &SchoolHit<'_>, b_key: &str, b: &SchoolHit<'_>) -> Ordering {
    a.distance_km
        .total_cmp(&b.distance_km)
        .then_with(|| a_key.cmp(b_key))
        .then_with(|| a.school.name.cmp(&b.school.name))
        .then_with(|| a.school.id.cmp(&b.school.id))
}

/// Human-readable result count, e.g. "Found 12 schools within 5 km"
pub fn summarize(total_matches: usize, radius_km: u32) -> String {
    match total_matches {
        0 => format!("No schools found within {} km", radius_km),
        1 => format!("Found 1 school within {} km", radius_km),
        n => format!("Found {} schools within {} km", n, radius_km),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AmenityFlags, SchoolLevel, SchoolRecord, Sector};

    fn create_school(id: u32, name: &str) -> SchoolRecord {
        SchoolRecord {
            id,
            school_code: None,
            name: name.to_string(),
            level: SchoolLevel::Primary,
            sector: Sector::Government,
            coordinates: None,
            street: None,
            suburb: None,
            postcode: None,
            phone: None,
            email: None,
            website: None,
            enrolment: None,
            icsea: None,
            lbote_pct: None,
            indigenous_pct: None,
            gender: None,
            specialty_type: None,
            subtype: None,
            selective: None,
            amenities: AmenityFlags::default(),
        }
    }

    #[test]
    fn test_sorted_by_distance() {
        let schools = vec![create_school(1, "A"), create_school(2, "B"), create_school(3, "C")];
        let hits = vec![
            SchoolHit { school: &schools[0], distance_km: 3.2 },
            SchoolHit { school: &schools[1], distance_km: 0.4 },
            SchoolHit { school: &schools[2], distance_km: 1.7 },
        ];

        let result = rank_results(hits, 10);
        let ids: Vec<u32> = result.schools.iter().map(|h| h.school.id).collect();

        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(result.total_matches, 3);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let schools = vec![
            create_school(1, "Zetland Public School"),
            create_school(2, "abbotsford Public School"),
            create_school(3, "Marrickville Public School"),
        ];
        let hits = schools
            .iter()
            .map(|school| SchoolHit { school, distance_km: 2.0 })
            .collect();

        let result = rank_results(hits, 10);
        let names: Vec<&str> = result.schools.iter().map(|h| h.school.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["abbotsford Public School", "Marrickville Public School", "Zetland Public School"]
        );
    }

    #[test]
    fn test_ties_fall_back_to_exact_name_then_id() {
        let schools = vec![
            create_school(7, "Newtown Public School"),
            create_school(4, "newtown public school"),
            create_school(2, "Newtown Public School"),
        ];
        let hits = schools
            .iter()
            .map(|school| SchoolHit { school, distance_km: 1.0 })
            .collect();

        let result = rank_results(hits, 10);
        let ids: Vec<u32> = result.schools.iter().map(|h| h.school.id).collect();

        // Same lowercase key; uppercase sorts first, then id
        assert_eq!(ids, vec![2, 7, 4]);
    }

    #[test]
    fn test_truncates_but_keeps_total() {
        let schools: Vec<SchoolRecord> = (0..80).map(|i| create_school(i, &format!("S{:02}", i))).collect();
        let hits = schools
            .iter()
            .enumerate()
            .map(|(i, school)| SchoolHit { school, distance_km: i as f64 * 0.05 })
            .collect();

        let result = rank_results(hits, DEFAULT_MAX_RESULTS);

        assert_eq!(result.schools.len(), 50);
        assert_eq!(result.total_matches, 80);
        assert_eq!(result.schools[0].school.id, 0);
    }

    #[test]
    fn test_summary_wording() {
        assert_eq!(summarize(0, 5), "No schools found within 5 km");
        assert_eq!(summarize(1, 3), "Found 1 school within 3 km");
        assert_eq!(summarize(12, 10), "Found 12 schools within 10 km");
    }
}
