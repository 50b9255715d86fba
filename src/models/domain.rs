use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::distance::is_within_bounding_box;

/// Approximate extent of New South Wales, used to reject bad coordinates
pub const NSW_BOUNDS: BoundingBox = BoundingBox {
    min_lat: -38.0,
    max_lat: -28.0,
    min_lon: 140.9,
    max_lon: 154.0,
};

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when the point falls inside the NSW bounds
    pub fn is_within_nsw(&self) -> bool {
        is_within_bounding_box(self.latitude, self.longitude, &NSW_BOUNDS)
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Level of schooling as published in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchoolLevel {
    Primary,
    Secondary,
    Central,
    Infants,
    SpecificPurposes,
    EnvironmentalEducation,
    Other,
}

impl SchoolLevel {
    pub const ALL: [SchoolLevel; 7] = [
        SchoolLevel::Primary,
        SchoolLevel::Secondary,
        SchoolLevel::Central,
        SchoolLevel::Infants,
        SchoolLevel::SpecificPurposes,
        SchoolLevel::EnvironmentalEducation,
        SchoolLevel::Other,
    ];

    /// Strict parse of a user- or dataset-supplied level label.
    ///
    /// Accepts the dataset's full labels ("Primary School") as well as the
    /// short snake_case names used in the API ("primary").
    pub fn from_label(raw: &str) -> Option<Self> {
        let level = match raw.trim().to_ascii_lowercase().as_str() {
            "primary" | "primary school" => SchoolLevel::Primary,
            "secondary" | "secondary school" | "high school" => SchoolLevel::Secondary,
            "central" | "central/community school" | "community school" => SchoolLevel::Central,
            "infants" | "infants school" => SchoolLevel::Infants,
            "specific_purposes" | "special" | "ssp" | "schools for specific purposes" => {
                SchoolLevel::SpecificPurposes
            }
            "environmental_education" | "environmental education centre" => {
                SchoolLevel::EnvironmentalEducation
            }
            "other" | "other school" => SchoolLevel::Other,
            _ => return None,
        };
        Some(level)
    }

    /// Lenient parse used by the dataset loader; unknown labels become `Other`
    pub fn parse_lenient(raw: &str) -> Self {
        Self::from_label(raw).unwrap_or(SchoolLevel::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchoolLevel::Primary => "Primary School",
            SchoolLevel::Secondary => "Secondary School",
            SchoolLevel::Central => "Central/Community School",
            SchoolLevel::Infants => "Infants School",
            SchoolLevel::SpecificPurposes => "Schools for Specific Purposes",
            SchoolLevel::EnvironmentalEducation => "Environmental Education Centre",
            SchoolLevel::Other => "Other School",
        }
    }
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// School sector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    #[default]
    Government,
    Catholic,
    Independent,
}

impl Sector {
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "government" | "public" => Some(Sector::Government),
            "catholic" | "non-government catholic" => Some(Sector::Catholic),
            "independent" | "non-government independent" => Some(Sector::Independent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sector::Government => "Government",
            Sector::Catholic => "Catholic",
            Sector::Independent => "Independent",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selective enrolment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectiveStatus {
    NotSelective,
    PartiallySelective,
    FullySelective,
}

impl SelectiveStatus {
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "not selective" => Some(SelectiveStatus::NotSelective),
            "partially selective" => Some(SelectiveStatus::PartiallySelective),
            "fully selective" => Some(SelectiveStatus::FullySelective),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SelectiveStatus::NotSelective => "Not Selective",
            SelectiveStatus::PartiallySelective => "Partially Selective",
            SelectiveStatus::FullySelective => "Fully Selective",
        }
    }
}

/// Programs and services a school may offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Preschool,
    IntensiveEnglish,
    OpportunityClass,
    DistanceEducation,
}

/// Amenity flags carried on each school record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenityFlags {
    pub preschool: bool,
    pub intensive_english: bool,
    pub opportunity_class: bool,
    pub distance_education: bool,
}

impl AmenityFlags {
    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Preschool => self.preschool,
            Amenity::IntensiveEnglish => self.intensive_english,
            Amenity::OpportunityClass => self.opportunity_class,
            Amenity::DistanceEducation => self.distance_education,
        }
    }
}

/// Immutable row from the schools dataset
#[derive(Debug, Clone, Serialize)]
pub struct SchoolRecord {
    pub id: u32,
    pub school_code: Option<String>,
    pub name: String,
    pub level: SchoolLevel,
    pub sector: Sector,
    pub coordinates: Option<Coordinates>,
    pub street: Option<String>,
    pub suburb: Option<String>,
    pub postcode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    /// Full-time-equivalent enrolment for the latest year
    pub enrolment: Option<f64>,
    pub icsea: Option<u32>,
    /// Raw percentage; the dataset uses `np` for suppressed values
    pub lbote_pct: Option<String>,
    pub indigenous_pct: Option<String>,
    pub gender: Option<String>,
    pub specialty_type: Option<String>,
    pub subtype: Option<String>,
    pub selective: Option<SelectiveStatus>,
    pub amenities: AmenityFlags,
}

impl SchoolRecord {
    /// Coordinates usable for distance search.
    ///
    /// Records with no coordinates or coordinates outside NSW return `None`.
    pub fn searchable_coordinates(&self) -> Option<Coordinates> {
        self.coordinates.filter(Coordinates::is_within_nsw)
    }

    /// Unknown selective status counts as not selective
    pub fn is_selective(&self) -> bool {
        matches!(
            self.selective,
            Some(SelectiveStatus::PartiallySelective | SelectiveStatus::FullySelective)
        )
    }
}

/// Postcode centroid from the bundled reference table
#[derive(Debug, Clone, PartialEq)]
pub struct PostcodeCentroid {
    pub postcode: String,
    pub coordinates: Coordinates,
    pub suburb: Option<String>,
}

/// Search radius choices offered to users
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SearchRadius {
    Km3,
    #[default]
    Km5,
    Km10,
}

impl SearchRadius {
    pub const ALL: [SearchRadius; 3] = [SearchRadius::Km3, SearchRadius::Km5, SearchRadius::Km10];

    pub fn km(&self) -> f64 {
        f64::from(u32::from(*self))
    }
}

impl From<SearchRadius> for u32 {
    fn from(radius: SearchRadius) -> Self {
        match radius {
            SearchRadius::Km3 => 3,
            SearchRadius::Km5 => 5,
            SearchRadius::Km10 => 10,
        }
    }
}

impl TryFrom<u32> for SearchRadius {
    type Error = String;

    fn try_from(km: u32) -> Result<Self, Self::Error> {
        match km {
            3 => Ok(SearchRadius::Km3),
            5 => Ok(SearchRadius::Km5),
            10 => Ok(SearchRadius::Km10),
            other => Err(format!("radius must be one of 3, 5 or 10 km (got {})", other)),
        }
    }
}

impl fmt::Display for SearchRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", u32::from(*self))
    }
}

/// A single categorical search filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchFilter {
    Level(SchoolLevel),
    Sector(Sector),
    Amenity(Amenity),
    NotSelective,
}

/// Set of categorical filters applied to a search.
///
/// Levels and sectors are alternatives (any may match); amenities and the
/// not-selective flag are all required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: BTreeSet<SearchFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: SearchFilter) -> Self {
        self.filters.insert(filter);
        self
    }

    pub fn insert(&mut self, filter: SearchFilter) {
        self.filters.insert(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchFilter> {
        self.filters.iter()
    }

    pub fn levels(&self) -> impl Iterator<Item = SchoolLevel> + '_ {
        self.filters.iter().filter_map(|f| match f {
            SearchFilter::Level(level) => Some(*level),
            _ => None,
        })
    }

    pub fn sectors(&self) -> impl Iterator<Item = Sector> + '_ {
        self.filters.iter().filter_map(|f| match f {
            SearchFilter::Sector(sector) => Some(*sector),
            _ => None,
        })
    }

    pub fn amenities(&self) -> impl Iterator<Item = Amenity> + '_ {
        self.filters.iter().filter_map(|f| match f {
            SearchFilter::Amenity(amenity) => Some(*amenity),
            _ => None,
        })
    }

    pub fn requires_not_selective(&self) -> bool {
        self.filters.contains(&SearchFilter::NotSelective)
    }
}

impl FromIterator<SearchFilter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = SearchFilter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

/// Request-scoped search parameters
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub suburb: Option<String>,
    pub postcode: Option<String>,
    pub radius: SearchRadius,
    pub filters: FilterSet,
}

impl SearchQuery {
    pub fn for_postcode(postcode: &str) -> Self {
        Self {
            postcode: Some(postcode.to_string()),
            ..Self::default()
        }
    }

    pub fn for_suburb(suburb: &str) -> Self {
        Self {
            suburb: Some(suburb.to_string()),
            ..Self::default()
        }
    }

    pub fn with_radius(mut self, radius: SearchRadius) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }
}

/// Which lookup stage produced a centroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentroidSource {
    Postcode,
    Suburb,
    SchoolMedian,
}

/// Centroid resolved from user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLocation {
    pub coordinates: Coordinates,
    pub source: CentroidSource,
}

/// A school that survived the radius filter, with its distance from the centroid
#[derive(Debug, Clone, Copy)]
pub struct SchoolHit<'a> {
    pub school: &'a SchoolRecord,
    pub distance_km: f64,
}

/// Ranked and truncated search hits
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    pub schools: Vec<SchoolHit<'a>>,
    /// Number of matches before truncation
    pub total_matches: usize,
}

/// A school assembled for side-by-side comparison
#[derive(Debug, Clone, Copy)]
pub struct ComparedSchool<'a> {
    pub school: &'a SchoolRecord,
    pub distance_km: Option<f64>,
}
