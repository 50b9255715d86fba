//! School Finder - find and compare NSW schools near a suburb or postcode
//!
//! This library provides the lookup pipeline behind the School Finder service:
//! location resolution, radius filtering over the static schools dataset,
//! ranking, and side-by-side comparison.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{SchoolFinder, LookupError, distance::{haversine_distance, calculate_bounding_box}};
pub use models::{SchoolRecord, PostcodeCentroid, SearchQuery, SearchRadius, SearchResult, FilterSet, SearchFilter};
pub use services::Dataset;
