//! View models for the search, detail and comparison pages.
//!
//! Missing values are rendered with explicit markers instead of being
//! dropped, so every page shows the same set of fields.

use crate::core::finder::SearchOutcome;
use crate::core::ranker::summarize;
use crate::models::{
    CompareResponse, ComparedSchool, LevelOption, SchoolDetail, SchoolHit, SchoolLevel,
    SchoolRecord, SchoolSummary, SearchResponse, SelectiveStatus,
};

/// Marker for fields the dataset does not provide
pub const NOT_AVAILABLE: &str = "Not available";

/// Marker for suppressed or unparseable percentages
pub const DATA_NOT_AVAILABLE: &str = "Data not available";

/// Convert gender codes to plain English
pub fn format_gender(gender: Option<&str>) -> String {
    match gender.map(str::trim).filter(|g| !g.is_empty()) {
        None => NOT_AVAILABLE.to_string(),
        Some("Coed" | "Co-ed" | "Co-educational") => "Boys & Girls".to_string(),
        Some("Boys") => "Boys Only".to_string(),
        Some("Girls") => "Girls Only".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Bucket enrolment numbers into size categories
pub fn format_school_size(enrolment: Option<f64>) -> &'static str {
    match enrolment {
        None => NOT_AVAILABLE,
        Some(n) if n < 300.0 => "Small School",
        Some(n) if n <= 800.0 => "Medium School",
        Some(_) => "Large School",
    }
}

pub fn format_enrolment(enrolment: Option<f64>) -> String {
    enrolment.map_or_else(|| NOT_AVAILABLE.to_string(), |n| format!("{:.0}", n))
}

pub fn format_icsea(icsea: Option<u32>) -> String {
    icsea.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Language background other than English, e.g. "45% Multi-lingual background"
pub fn format_lbote(lbote_pct: Option<&str>) -> String {
    match parse_percentage(lbote_pct) {
        Some(pct) => format!("{:.0}% Multi-lingual background", pct),
        None => DATA_NOT_AVAILABLE.to_string(),
    }
}

pub fn format_percentage(value: Option<&str>) -> String {
    match parse_percentage(value) {
        Some(pct) => format!("{:.0}%", pct),
        None => DATA_NOT_AVAILABLE.to_string(),
    }
}

// "np" marks suppressed values in the dataset
fn parse_percentage(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("np"))
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub fn format_selective(selective: Option<SelectiveStatus>) -> String {
    selective.map_or_else(|| NOT_AVAILABLE.to_string(), |s| s.label().to_string())
}

/// Specialty type with friendlier wording for the standard curriculum
pub fn format_specialty(value: Option<&str>) -> Option<String> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;

    if value.eq_ignore_ascii_case("comprehensive") {
        return Some("Comprehensive (standard curriculum)".to_string());
    }

    Some(value.to_string())
}

/// Labels for the special programs a school offers
pub fn special_features(school: &SchoolRecord) -> Vec<String> {
    let mut features = Vec::new();

    if school.amenities.intensive_english {
        features.push("English Language Support Centre".to_string());
    }
    if school.amenities.opportunity_class {
        features.push("Advanced Classes (OC)".to_string());
    }
    if let Some(specialty) = format_specialty(school.specialty_type.as_deref()) {
        features.push(specialty);
    }

    features
}

/// Round a distance to two decimals for display
#[inline]
pub fn round_distance(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

fn or_not_available(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

pub fn summary_view(hit: &SchoolHit<'_>) -> SchoolSummary {
    let school = hit.school;

    SchoolSummary {
        id: school.id,
        name: school.name.clone(),
        level: school.level.label().to_string(),
        sector: school.sector.label().to_string(),
        suburb: or_not_available(school.suburb.as_deref()),
        postcode: school.postcode.clone(),
        distance_km: round_distance(hit.distance_km),
        icsea: format_icsea(school.icsea),
        school_size: format_school_size(school.enrolment).to_string(),
        selective: format_selective(school.selective),
        special_features: special_features(school),
    }
}

pub fn detail_view(school: &SchoolRecord, distance_km: Option<f64>) -> SchoolDetail {
    SchoolDetail {
        id: school.id,
        school_code: school.school_code.clone(),
        name: school.name.clone(),
        level: school.level.label().to_string(),
        sector: school.sector.label().to_string(),
        street: or_not_available(school.street.as_deref()),
        suburb: or_not_available(school.suburb.as_deref()),
        postcode: school.postcode.clone(),
        phone: school.phone.clone(),
        email: school.email.clone(),
        website: school.website.clone(),
        gender: format_gender(school.gender.as_deref()),
        school_size: format_school_size(school.enrolment).to_string(),
        enrolment: format_enrolment(school.enrolment),
        enrolment_raw: school.enrolment,
        community: format_lbote(school.lbote_pct.as_deref()),
        indigenous: format_percentage(school.indigenous_pct.as_deref()),
        icsea: format_icsea(school.icsea),
        selective: format_selective(school.selective),
        specialty_type: school.specialty_type.clone(),
        subtype: school.subtype.clone(),
        special_features: special_features(school),
        amenities: school.amenities,
        coordinates: school.coordinates,
        distance_km: distance_km.map(round_distance),
    }
}

pub fn search_response(outcome: &SearchOutcome<'_>) -> SearchResponse {
    let radius_km = u32::from(outcome.radius);

    SearchResponse {
        summary: summarize(outcome.result.total_matches, radius_km),
        total_matches: outcome.result.total_matches,
        radius_km,
        centroid: outcome.location.coordinates,
        centroid_source: outcome.location.source,
        schools: outcome.result.schools.iter().map(summary_view).collect(),
    }
}

pub fn comparison_response(compared: &[ComparedSchool<'_>]) -> CompareResponse {
    CompareResponse {
        schools: compared
            .iter()
            .map(|entry| detail_view(entry.school, entry.distance_km))
            .collect(),
    }
}

pub fn level_options(levels: &[SchoolLevel]) -> Vec<LevelOption> {
    levels
        .iter()
        .map(|level| LevelOption {
            value: *level,
            label: level.label().to_string(),
        })
        .collect()
}
