use std::collections::{BTreeSet, HashMap};

use crate::models::{PostcodeCentroid, SchoolLevel, SchoolRecord};

/// Read-only reference data loaded once at startup
///
/// Holds the schools table, the postcode centroid table and the indexes the
/// lookup pipeline needs. Nothing here is mutated after construction, so a
/// shared `Arc<Dataset>` is safe to read from every worker.
#[derive(Debug, Default)]
pub struct Dataset {
    schools: Vec<SchoolRecord>,
    by_id: HashMap<u32, usize>,
    postcodes: HashMap<String, PostcodeCentroid>,
    // lowercase suburb -> postcodes carrying that suburb, in table order
    suburbs: HashMap<String, Vec<String>>,
}

impl Dataset {
    /// Build a dataset and its lookup indexes.
    ///
    /// Duplicate school ids and postcodes keep their first occurrence.
    pub fn new(schools: Vec<SchoolRecord>, postcodes: Vec<PostcodeCentroid>) -> Self {
        let mut by_id = HashMap::with_capacity(schools.len());
        for (index, school) in schools.iter().enumerate() {
            by_id.entry(school.id).or_insert(index);
        }

        let mut postcode_table: HashMap<String, PostcodeCentroid> =
            HashMap::with_capacity(postcodes.len());
        let mut suburbs: HashMap<String, Vec<String>> = HashMap::new();

        for centroid in postcodes {
            let key = centroid.postcode.trim().to_string();
            if postcode_table.contains_key(&key) {
                continue;
            }
            if let Some(suburb) = centroid.suburb.as_deref().map(normalize_suburb) {
                if !suburb.is_empty() {
                    suburbs.entry(suburb).or_default().push(key.clone());
                }
            }
            postcode_table.insert(key, centroid);
        }

        Self {
            schools,
            by_id,
            postcodes: postcode_table,
            suburbs,
        }
    }

    pub fn schools(&self) -> &[SchoolRecord] {
        &self.schools
    }

    pub fn school(&self, id: u32) -> Option<&SchoolRecord> {
        self.by_id.get(&id).map(|&index| &self.schools[index])
    }

    pub fn school_count(&self) -> usize {
        self.schools.len()
    }

    pub fn postcode_count(&self) -> usize {
        self.postcodes.len()
    }

    /// Exact lookup in the postcode centroid table
    pub fn postcode(&self, postcode: &str) -> Option<&PostcodeCentroid> {
        self.postcodes.get(postcode.trim())
    }

    /// Centroid table entries whose suburb matches case-insensitively
    pub fn suburb_centroids<'a>(
        &'a self,
        suburb: &str,
    ) -> impl Iterator<Item = &'a PostcodeCentroid> + 'a {
        self.suburbs
            .get(&normalize_suburb(suburb))
            .into_iter()
            .flatten()
            .filter_map(move |postcode| self.postcodes.get(postcode))
    }

    /// Distinct levels of schooling present in the dataset, sorted
    pub fn distinct_levels(&self) -> Vec<SchoolLevel> {
        self.schools
            .iter()
            .map(|school| school.level)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Trimmed, lowercased suburb name used for case-insensitive matching
pub fn normalize_suburb(suburb: &str) -> String {
    suburb.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AmenityFlags, Coordinates, Sector};

    fn school(id: u32, name: &str, level: SchoolLevel) -> SchoolRecord {
        SchoolRecord {
            id,
            school_code: None,
            name: name.to_string(),
            level,
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

    fn centroid(postcode: &str, suburb: Option<&str>, lat: f64, lon: f64) -> PostcodeCentroid {
        PostcodeCentroid {
            postcode: postcode.to_string(),
            coordinates: Coordinates::new(lat, lon),
            suburb: suburb.map(str::to_string),
        }
    }

    #[test]
    fn test_school_lookup_by_id() {
        let dataset = Dataset::new(
            vec![school(7, "A", SchoolLevel::Primary), school(9, "B", SchoolLevel::Secondary)],
            vec![],
        );

        assert_eq!(dataset.school(9).map(|s| s.name.as_str()), Some("B"));
        assert!(dataset.school(8).is_none());
    }

    #[test]
    fn test_duplicate_postcodes_keep_first() {
        let dataset = Dataset::new(
            vec![],
            vec![
                centroid("2000", Some("Sydney"), -33.87, 151.21),
                centroid("2000", Some("Haymarket"), -30.0, 150.0),
            ],
        );

        assert_eq!(dataset.postcode_count(), 1);
        assert_eq!(dataset.postcode(" 2000 ").map(|c| c.coordinates.latitude), Some(-33.87));
        assert_eq!(dataset.suburb_centroids("haymarket").count(), 0);
    }

    #[test]
    fn test_suburb_lookup_is_case_insensitive() {
        let dataset = Dataset::new(
            vec![],
            vec![
                centroid("2150", Some("Parramatta"), -33.81, 151.00),
                centroid("2124", Some("Parramatta"), -33.80, 151.01),
            ],
        );

        let postcodes: Vec<_> = dataset
            .suburb_centroids("  PARRAMATTA ")
            .map(|c| c.postcode.as_str())
            .collect();
        assert_eq!(postcodes, vec!["2150", "2124"]);
    }

    #[test]
    fn test_distinct_levels_sorted_and_unique() {
        let dataset = Dataset::new(
            vec![
                school(1, "A", SchoolLevel::Secondary),
                school(2, "B", SchoolLevel::Primary),
                school(3, "C", SchoolLevel::Secondary),
            ],
            vec![],
        );

        assert_eq!(
            dataset.distinct_levels(),
            vec![SchoolLevel::Primary, SchoolLevel::Secondary]
        );
    }
}
