use serde::{Deserialize, Serialize};

use crate::models::domain::{AmenityFlags, CentroidSource, Coordinates, SchoolLevel};

/// One row of the search results list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSummary {
    pub id: u32,
    pub name: String,
    pub level: String,
    pub sector: String,
    pub suburb: String,
    pub postcode: Option<String>,
    pub distance_km: f64,
    pub icsea: String,
    pub school_size: String,
    pub selective: String,
    pub special_features: Vec<String>,
}

/// Full school view used by the detail and comparison pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolDetail {
    pub id: u32,
    pub school_code: Option<String>,
    pub name: String,
    pub level: String,
    pub sector: String,
    pub street: String,
    pub suburb: String,
    pub postcode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub gender: String,
    pub school_size: String,
    pub enrolment: String,
    pub enrolment_raw: Option<f64>,
    pub community: String,
    pub indigenous: String,
    pub icsea: String,
    pub selective: String,
    pub specialty_type: Option<String>,
    pub subtype: Option<String>,
    pub special_features: Vec<String>,
    pub amenities: AmenityFlags,
    pub coordinates: Option<Coordinates>,
    pub distance_km: Option<f64>,
}

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub summary: String,
    pub total_matches: usize,
    pub radius_km: u32,
    pub centroid: Coordinates,
    pub centroid_source: CentroidSource,
    pub schools: Vec<SchoolSummary>,
}

/// Response for the comparison endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    pub schools: Vec<SchoolDetail>,
}

/// A selectable level of schooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelOption {
    pub value: SchoolLevel,
    pub label: String,
}

/// Response for the levels endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelsResponse {
    pub levels: Vec<LevelOption>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub schools: usize,
    pub postcodes: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
