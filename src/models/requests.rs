use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::error::LookupError;
use crate::models::domain::{
    Amenity, FilterSet, SchoolLevel, SearchFilter, SearchQuery, SearchRadius, Sector,
};

/// Request to search for schools near a location
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[validate(length(max = 100))]
    #[serde(default)]
    pub suburb: Option<String>,
    #[validate(length(max = 10))]
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default, alias = "radius")]
    pub radius_km: Option<u32>,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub level: Option<String>,
    #[validate(length(max = 64))]
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub not_selective: bool,
}

impl SearchRequest {
    /// Convert the raw request into a typed search query
    ///
    /// Unknown level or sector labels and radii outside the offered choices
    /// are rejected rather than silently ignored.
    pub fn to_query(&self, default_radius: SearchRadius) -> Result<SearchQuery, LookupError> {
        let radius = match self.radius_km {
            Some(km) => SearchRadius::try_from(km).map_err(LookupError::InvalidQuery)?,
            None => default_radius,
        };

        let mut filters = FilterSet::new();

        if let Some(level) = non_blank(self.level.as_deref()) {
            let level = SchoolLevel::from_label(level).ok_or_else(|| {
                LookupError::InvalidQuery(format!("Unknown level of schooling: {}", level))
            })?;
            filters.insert(SearchFilter::Level(level));
        }

        if let Some(sector) = non_blank(self.sector.as_deref()) {
            let sector = Sector::from_label(sector)
                .ok_or_else(|| LookupError::InvalidQuery(format!("Unknown sector: {}", sector)))?;
            filters.insert(SearchFilter::Sector(sector));
        }

        for amenity in &self.amenities {
            filters.insert(SearchFilter::Amenity(*amenity));
        }

        if self.not_selective {
            filters.insert(SearchFilter::NotSelective);
        }

        Ok(SearchQuery {
            suburb: self.suburb.clone(),
            postcode: self.postcode.clone(),
            radius,
            filters,
        })
    }
}

/// Query parameters for the comparison endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CompareParams {
    #[validate(length(max = 100))]
    pub ids: Option<String>,
    #[validate(length(max = 100))]
    pub distances: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
