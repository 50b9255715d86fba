use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::Dataset;
use crate::config::DataSettings;
use crate::models::{
    AmenityFlags, Coordinates, PostcodeCentroid, SchoolLevel, SchoolRecord, Sector,
    SelectiveStatus,
};

/// Errors that can occur while loading the reference data
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the schools master dataset.
///
/// Every column is read as text so one garbled cell never rejects a row;
/// numeric columns are parsed leniently afterwards.
#[derive(Debug, Deserialize)]
struct SchoolRow {
    #[serde(rename = "School_code", default)]
    school_code: Option<String>,
    #[serde(rename = "School_name", default)]
    school_name: Option<String>,
    #[serde(rename = "Street", default)]
    street: Option<String>,
    #[serde(rename = "Town_suburb", default)]
    town_suburb: Option<String>,
    #[serde(rename = "Postcode", default)]
    postcode: Option<String>,
    #[serde(rename = "Phone", default)]
    phone: Option<String>,
    #[serde(rename = "School_Email", default)]
    email: Option<String>,
    #[serde(rename = "Website", default)]
    website: Option<String>,
    #[serde(rename = "latest_year_enrolment_FTE", default)]
    enrolment: Option<String>,
    #[serde(rename = "Indigenous_pct", default)]
    indigenous_pct: Option<String>,
    #[serde(rename = "LBOTE_pct", default)]
    lbote_pct: Option<String>,
    #[serde(rename = "ICSEA_value", default)]
    icsea: Option<String>,
    #[serde(rename = "Level_of_schooling", default)]
    level: Option<String>,
    #[serde(rename = "Selective_school", default)]
    selective: Option<String>,
    #[serde(rename = "Opportunity_class", default)]
    opportunity_class: Option<String>,
    #[serde(rename = "School_specialty_type", default)]
    specialty_type: Option<String>,
    #[serde(rename = "School_subtype", default)]
    subtype: Option<String>,
    #[serde(rename = "Preschool_ind", default)]
    preschool: Option<String>,
    #[serde(rename = "Distance_education", default)]
    distance_education: Option<String>,
    #[serde(rename = "Intensive_english_centre", default)]
    intensive_english: Option<String>,
    #[serde(rename = "School_gender", default)]
    gender: Option<String>,
    #[serde(rename = "Latitude", default)]
    latitude: Option<String>,
    #[serde(rename = "Longitude", default)]
    longitude: Option<String>,
    #[serde(rename = "Sector", default)]
    sector: Option<String>,
}

/// One row of the postcode centroid table
#[derive(Debug, Deserialize)]
struct PostcodeRow {
    postcode: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    suburb: Option<String>,
}

/// Load the full dataset described by the data settings.
///
/// The schools file is required. A missing postcode table is tolerated:
/// location lookups then fall back to suburb medians.
pub fn load_dataset(settings: &DataSettings) -> Result<Dataset, DatasetError> {
    let schools = load_schools_csv(&settings.schools_path)?;

    let postcodes = match settings.postcodes_path.as_deref() {
        Some(path) if Path::new(path).exists() => load_postcodes_csv(path)?,
        Some(path) => {
            tracing::warn!(
                "Postcode table {} not found, falling back to suburb medians",
                path
            );
            Vec::new()
        }
        None => {
            tracing::warn!("No postcode table configured, falling back to suburb medians");
            Vec::new()
        }
    };

    let dataset = Dataset::new(schools, postcodes);
    tracing::info!(
        "Dataset loaded: {} schools, {} postcodes",
        dataset.school_count(),
        dataset.postcode_count()
    );

    Ok(dataset)
}

/// Load schools from a CSV file on disk
pub fn load_schools_csv<P: AsRef<Path>>(path: P) -> Result<Vec<SchoolRecord>, DatasetError> {
    let path = path.as_ref();
    let file = open_existing(path)?;
    tracing::info!("Loading schools from {}", path.display());
    read_schools(file)
}

/// Load postcode centroids from a CSV file on disk
pub fn load_postcodes_csv<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<PostcodeCentroid>, DatasetError> {
    let path = path.as_ref();
    let file = open_existing(path)?;
    tracing::info!("Loading postcodes from {}", path.display());
    read_postcodes(file)
}

fn open_existing(path: &Path) -> Result<File, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::MissingFile(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

/// Parse schools CSV content.
///
/// Ids are assigned in file order starting at 1. Rows that cannot be
/// deserialized or have no school name are skipped.
pub fn read_schools<R: Read>(reader: R) -> Result<Vec<SchoolRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    csv_reader.headers()?;

    let mut schools = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in csv_reader.deserialize::<SchoolRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping schools row {}: {}", line + 2, e);
                skipped += 1;
                continue;
            }
        };

        let id = u32::try_from(schools.len() + 1).unwrap_or(u32::MAX);
        match school_from_row(id, row) {
            Some(school) => schools.push(school),
            None => {
                tracing::warn!("Skipping schools row {}: missing school name", line + 2);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} malformed school rows", skipped);
    }
    tracing::debug!("Parsed {} school rows", schools.len());

    Ok(schools)
}

/// Parse postcode centroid CSV content, skipping malformed rows
pub fn read_postcodes<R: Read>(reader: R) -> Result<Vec<PostcodeCentroid>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    csv_reader.headers()?;

    let mut postcodes = Vec::new();
    let mut skipped = 0usize;

    for (line, result) in csv_reader.deserialize::<PostcodeRow>().enumerate() {
        match result {
            Ok(row) if !row.postcode.is_empty() => postcodes.push(PostcodeCentroid {
                postcode: row.postcode,
                coordinates: Coordinates::new(row.latitude, row.longitude),
                suburb: non_empty(row.suburb),
            }),
            Ok(_) => {
                tracing::warn!("Skipping postcode row {}: empty postcode", line + 2);
                skipped += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping postcode row {}: {}", line + 2, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} malformed postcode rows", skipped);
    }

    Ok(postcodes)
}

fn school_from_row(id: u32, row: SchoolRow) -> Option<SchoolRecord> {
    let name = non_empty(row.school_name)?;

    let coordinates = match (parse_float(row.latitude.as_deref()), parse_float(row.longitude.as_deref())) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => None,
    };

    Some(SchoolRecord {
        id,
        school_code: non_empty(row.school_code),
        name,
        level: row
            .level
            .as_deref()
            .map(SchoolLevel::parse_lenient)
            .unwrap_or(SchoolLevel::Other),
        sector: row
            .sector
            .as_deref()
            .and_then(Sector::from_label)
            .unwrap_or_default(),
        coordinates,
        street: non_empty(row.street),
        suburb: non_empty(row.town_suburb),
        postcode: non_empty(row.postcode),
        phone: non_empty(row.phone),
        email: non_empty(row.email),
        website: non_empty(row.website),
        enrolment: parse_float(row.enrolment.as_deref()),
        icsea: parse_int(row.icsea.as_deref()),
        lbote_pct: non_empty(row.lbote_pct),
        indigenous_pct: non_empty(row.indigenous_pct),
        gender: non_empty(row.gender),
        specialty_type: non_empty(row.specialty_type),
        subtype: non_empty(row.subtype),
        selective: row.selective.as_deref().and_then(SelectiveStatus::from_label),
        amenities: AmenityFlags {
            preschool: is_yes(row.preschool.as_deref()),
            intensive_english: is_yes(row.intensive_english.as_deref()),
            opportunity_class: is_yes(row.opportunity_class.as_deref()),
            distance_education: is_yes(row.distance_education.as_deref()),
        },
    })
}

/// Trimmed value, or `None` when blank
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a float, returning `None` for blank or garbled cells
pub fn parse_float(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a non-negative integer, accepting "1043.0" style cells
pub fn parse_int(value: Option<&str>) -> Option<u32> {
    parse_float(value)
        .filter(|v| *v >= 0.0 && *v <= f64::from(u32::MAX))
        .map(|v| v as u32)
}

/// Dataset flag columns use "Y" for yes
fn is_yes(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHOOLS_CSV: &str = "\
School_code,School_name,Town_suburb,Postcode,Level_of_schooling,Selective_school,Opportunity_class,Preschool_ind,Intensive_english_centre,Distance_education,latest_year_enrolment_FTE,ICSEA_value,LBOTE_pct,Latitude,Longitude
1001,Fort Street Public School, Millers Point ,2000 ,Primary School,,Y,N,,,405.2,1180.0,np,-33.8586,151.2047
8001,Sydney Boys High School,Moore Park,2021,Secondary School,Fully Selective,,,,,1210,1210,45,-33.8928,151.2243
2002,Outback Public School,Nowhere,2999,Primary School,,,y,,Y,,,,,
9999,,Sydney,2000,Primary School,,,,,,,,,,
";

    #[test]
    fn test_read_schools_parses_rows() {
        let schools = read_schools(SCHOOLS_CSV.as_bytes()).unwrap();

        // Nameless row is skipped
        assert_eq!(schools.len(), 3);

        let fort_street = &schools[0];
        assert_eq!(fort_street.id, 1);
        assert_eq!(fort_street.suburb.as_deref(), Some("Millers Point"));
        assert_eq!(fort_street.postcode.as_deref(), Some("2000"));
        assert_eq!(fort_street.level, SchoolLevel::Primary);
        assert_eq!(fort_street.icsea, Some(1180));
        assert_eq!(fort_street.enrolment, Some(405.2));
        assert_eq!(fort_street.lbote_pct.as_deref(), Some("np"));
        assert!(fort_street.amenities.opportunity_class);
        assert!(!fort_street.amenities.preschool);
        assert!(fort_street.coordinates.is_some());
        assert_eq!(fort_street.sector, Sector::Government);

        let boys_high = &schools[1];
        assert_eq!(boys_high.selective, Some(SelectiveStatus::FullySelective));
        assert!(boys_high.is_selective());
    }

    #[test]
    fn test_missing_values_become_none() {
        let schools = read_schools(SCHOOLS_CSV.as_bytes()).unwrap();
        let outback = &schools[2];

        assert!(outback.coordinates.is_none());
        assert!(outback.icsea.is_none());
        assert!(outback.enrolment.is_none());
        assert!(outback.amenities.preschool);
        assert!(outback.amenities.distance_education);
    }

    #[test]
    fn test_read_postcodes_skips_bad_rows() {
        let csv = "postcode,latitude,longitude,suburb\n2000,-33.8688,151.2093,Sydney\n2150,not-a-number,151.0,Parramatta\n2021,-33.89,151.22,\n";
        let postcodes = read_postcodes(csv.as_bytes()).unwrap();

        assert_eq!(postcodes.len(), 2);
        assert_eq!(postcodes[0].postcode, "2000");
        assert_eq!(postcodes[0].suburb.as_deref(), Some("Sydney"));
        assert!(postcodes[1].suburb.is_none());
    }

    #[test]
    fn test_lenient_number_parsing() {
        assert_eq!(parse_float(Some(" 12.5 ")), Some(12.5));
        assert_eq!(parse_float(Some("")), None);
        assert_eq!(parse_float(Some("n/a")), None);
        assert_eq!(parse_int(Some("1043.0")), Some(1043));
        assert_eq!(parse_int(Some("-3")), None);
        assert_eq!(parse_int(None), None);
    }

    #[test]
    fn test_missing_schools_file() {
        let err = load_schools_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, DatasetError::MissingFile(_)));
    }
}
