use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::Validate;

use crate::core::{
    assemble_comparison, display, parse_distance_list, parse_id_list, LookupError, SchoolFinder,
};
use crate::models::{CompareParams, HealthResponse, LevelsResponse, SearchRadius, SearchRequest};
use crate::services::Dataset;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub finder: SchoolFinder,
    pub default_radius: SearchRadius,
}

/// Configure all school-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search_schools))
        .route("/schools/{id}", web::get().to(school_detail))
        .route("/compare", web::get().to(compare_schools))
        .route("/levels", web::get().to(list_levels));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let status = if state.dataset.school_count() > 0 { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        schools: state.dataset.school_count(),
        postcodes: state.dataset.postcode_count(),
    })
}

/// Search endpoint
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "suburb": "Ryde",
///   "postcode": "2112",
///   "radiusKm": 5,
///   "level": "primary",
///   "sector": "government",
///   "amenities": ["preschool"],
///   "notSelective": true
/// }
/// ```
async fn search_schools(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> Result<HttpResponse, LookupError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return Err(LookupError::InvalidQuery(errors.to_string()));
    }

    let query = req.to_query(state.default_radius)?;

    tracing::info!(
        "Searching schools near suburb={:?} postcode={:?} within {}",
        query.suburb,
        query.postcode,
        query.radius
    );

    let outcome = state.finder.search(&state.dataset, &query)?;

    tracing::info!(
        "Returning {} schools (from {} matches)",
        outcome.result.schools.len(),
        outcome.result.total_matches
    );

    Ok(HttpResponse::Ok().json(display::search_response(&outcome)))
}

/// School detail endpoint
///
/// GET /api/v1/schools/{id}
async fn school_detail(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, LookupError> {
    let id = path.into_inner();
    let school = state.dataset.school(id).ok_or(LookupError::SchoolNotFound(id))?;

    Ok(HttpResponse::Ok().json(display::detail_view(school, None)))
}

/// Compare up to three schools
///
/// GET /api/v1/compare?ids=12,40,7&distances=0.8,1.4,2.9
///
/// Distances are optional and matched to the ids by position.
async fn compare_schools(
    state: web::Data<AppState>,
    query: web::Query<CompareParams>,
) -> Result<HttpResponse, LookupError> {
    if let Err(errors) = query.validate() {
        return Err(LookupError::InvalidQuery(errors.to_string()));
    }

    let ids = parse_id_list(query.ids.as_deref().unwrap_or_default())?;
    let distances = query
        .distances
        .as_deref()
        .map(parse_distance_list)
        .unwrap_or_default();

    let compared = assemble_comparison(&state.dataset, &ids, &distances)?;

    tracing::debug!("Comparing schools {:?}", ids);

    Ok(HttpResponse::Ok().json(display::comparison_response(&compared)))
}

/// Distinct levels of schooling, for filter choices
///
/// GET /api/v1/levels
async fn list_levels(state: web::Data<AppState>) -> HttpResponse {
    let levels = state.dataset.distinct_levels();

    HttpResponse::Ok().json(LevelsResponse {
        levels: display::level_options(&levels),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AmenityFlags, Coordinates, PostcodeCentroid, SchoolLevel, SchoolRecord, Sector,
    };
    use actix_web::{http::StatusCode, test, App};

    fn create_school(id: u32, name: &str, lat: f64, lon: f64) -> SchoolRecord {
        SchoolRecord {
            id,
            school_code: None,
            name: name.to_string(),
            level: SchoolLevel::Primary,
            sector: Sector::Government,
            coordinates: Some(Coordinates::new(lat, lon)),
            street: None,
            suburb: Some("Sydney".to_string()),
            postcode: Some("2000".to_string()),
            phone: None,
            email: None,
            website: None,
            enrolment: Some(350.0),
            icsea: Some(1120),
            lbote_pct: None,
            indigenous_pct: None,
            gender: Some("Coed".to_string()),
            specialty_type: None,
            subtype: None,
            selective: None,
            amenities: AmenityFlags::default(),
        }
    }

    fn create_state() -> AppState {
        let schools = vec![
            create_school(1, "Fort Street Public School", -33.8586, 151.2047),
            create_school(2, "Ultimo Public School", -33.8790, 151.1980),
            create_school(3, "Parramatta Public School", -33.8150, 151.0011),
        ];
        let postcodes = vec![PostcodeCentroid {
            postcode: "2000".to_string(),
            coordinates: Coordinates::new(-33.8688, 151.2093),
            suburb: Some("Sydney".to_string()),
        }];

        AppState {
            dataset: Arc::new(Dataset::new(schools, postcodes)),
            finder: SchoolFinder::default(),
            default_radius: SearchRadius::Km5,
        }
    }

    macro_rules! init_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(create_state()))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_search_endpoint() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(serde_json::json!({ "postcode": "2000" }))
            .to_request();

        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["totalMatches"], 2);
        assert_eq!(resp["radiusKm"], 5);
        assert_eq!(resp["summary"], "Found 2 schools within 5 km");
        assert_eq!(resp["schools"][0]["id"], 1);
    }

    #[actix_web::test]
    async fn test_search_requires_location() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(serde_json::json!({ "radiusKm": 5 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_suburb_is_not_found() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(serde_json::json!({ "suburb": "Nowhere" }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_school_detail() {
        let app = init_app!();

        let req = test::TestRequest::get().uri("/schools/2").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["name"], "Ultimo Public School");
        assert_eq!(resp["gender"], "Boys & Girls");
        assert_eq!(resp["street"], "Not available");

        let req = test::TestRequest::get().uri("/schools/99").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_compare_limit() {
        let app = init_app!();

        let req = test::TestRequest::get().uri("/compare?ids=1,2,3,1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/compare?ids=2,1&distances=1.234,0.5")
            .to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["schools"][0]["id"], 2);
        assert_eq!(resp["schools"][0]["distanceKm"], 1.23);
        assert_eq!(resp["schools"][1]["distanceKm"], 0.5);
    }

    #[actix_web::test]
    async fn test_levels_and_health() {
        let app = init_app!();

        let req = test::TestRequest::get().uri("/levels").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["levels"][0]["value"], "primary");
        assert_eq!(resp["levels"][0]["label"], "Primary School");

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(resp["status"], "healthy");
        assert_eq!(resp["schools"], 3);
    }
}
