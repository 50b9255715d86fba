use crate::core::{
    distance::{calculate_bounding_box, distance_between, is_within_bounding_box},
    filters::matches_filters,
};
use crate::models::{Coordinates, FilterSet, SchoolHit, SchoolRecord};

/// Find the schools within `radius_km` of a centroid
///
/// # Pipeline Stages
/// 1. Categorical filters (level, sector, amenities)
/// 2. Bounding box pre-filter
/// 3. Exact Haversine check against the radius
///
/// Schools without usable coordinates never take part. The returned hits
/// are in dataset order; ranking happens separately.
pub fn filter_within_radius<'a>(
    centroid: Coordinates,
    radius_km: f64,
    schools: &'a [SchoolRecord],
    filters: &FilterSet,
) -> Vec<SchoolHit<'a>> {
    let bbox = calculate_bounding_box(centroid.latitude, centroid.longitude, radius_km);

    let hits: Vec<SchoolHit<'a>> = schools
        .iter()
        .filter(|school| matches_filters(school, filters))
        .filter_map(|school| {
            let coordinates = school.searchable_coordinates()?;

            if !is_within_bounding_box(coordinates.latitude, coordinates.longitude, &bbox) {
                return None;
            }

            let distance_km = distance_between(centroid, coordinates);
            (distance_km <= radius_km).then_some(SchoolHit { school, distance_km })
        })
        .collect();

    tracing::debug!(
        "Radius filter kept {} of {} schools within {} km",
        hits.len(),
        schools.len(),
        radius_km
    );

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AmenityFlags, SchoolLevel, SearchFilter, Sector};

    fn create_school(id: u32, level: SchoolLevel, coords: Option<(f64, f64)>) -> SchoolRecord {
        SchoolRecord {
            id,
            school_code: None,
            name: format!("School {}", id),
            level,
            sector: Sector::Government,
            coordinates: coords.map(|(lat, lon)| Coordinates::new(lat, lon)),
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

    const SYDNEY: Coordinates = Coordinates {
        latitude: -33.8688,
        longitude: 151.2093,
    };

    #[test]
    fn test_keeps_only_schools_within_radius() {
        let schools = vec![
            create_school(1, SchoolLevel::Primary, Some((-33.87, 151.21))), // ~0.1km
            create_school(2, SchoolLevel::Primary, Some((-33.90, 151.24))), // ~4.4km
            create_school(3, SchoolLevel::Primary, Some((-33.8150, 151.0011))), // Parramatta ~20km
        ];

        let hits = filter_within_radius(SYDNEY, 5.0, &schools, &FilterSet::new());
        let ids: Vec<u32> = hits.iter().map(|h| h.school.id).collect();

        assert_eq!(ids, vec![1, 2]);
        assert!(hits.iter().all(|h| h.distance_km <= 5.0));
    }

    #[test]
    fn test_null_coordinates_never_match() {
        let schools = vec![
            create_school(1, SchoolLevel::Primary, None),
            create_school(2, SchoolLevel::Primary, Some((0.0, 0.0))),
        ];

        // Even a radius covering the globe does not include them
        let hits = filter_within_radius(SYDNEY, 25_000.0, &schools, &FilterSet::new());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_out_of_bounds_coordinates_excluded() {
        // Auckland is well outside NSW
        let schools = vec![create_school(1, SchoolLevel::Primary, Some((-36.85, 174.76)))];

        let hits = filter_within_radius(SYDNEY, 5_000.0, &schools, &FilterSet::new());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_filters_apply_before_distance() {
        let schools = vec![
            create_school(1, SchoolLevel::Primary, Some((-33.87, 151.21))),
            create_school(2, SchoolLevel::Secondary, Some((-33.87, 151.21))),
        ];

        let filters = FilterSet::new().with(SearchFilter::Level(SchoolLevel::Secondary));
        let hits = filter_within_radius(SYDNEY, 3.0, &schools, &filters);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].school.id, 2);
    }

    #[test]
    fn test_zero_matches_is_not_an_error() {
        let schools = vec![create_school(1, SchoolLevel::Primary, Some((-30.5, 152.0)))];
        let hits = filter_within_radius(SYDNEY, 3.0, &schools, &FilterSet::new());

        assert!(hits.is_empty());
    }
}
