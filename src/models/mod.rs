// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Amenity, AmenityFlags, BoundingBox, CentroidSource, ComparedSchool, Coordinates, FilterSet,
    PostcodeCentroid, ResolvedLocation, SchoolHit, SchoolLevel, SchoolRecord, SearchFilter,
    SearchQuery, SearchRadius, SearchResult, Sector, SelectiveStatus, NSW_BOUNDS,
};
pub use requests::{CompareParams, SearchRequest};
pub use responses::{
    CompareResponse, ErrorResponse, HealthResponse, LevelOption, LevelsResponse, SchoolDetail,
    SchoolSummary, SearchResponse,
};
