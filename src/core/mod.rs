// Core pipeline exports
pub mod compare;
pub mod display;
pub mod distance;
pub mod error;
pub mod filters;
pub mod finder;
pub mod ranker;
pub mod resolver;
pub mod spatial;

pub use compare::{assemble_comparison, parse_distance_list, parse_id_list, MAX_COMPARE};
pub use distance::{calculate_bounding_box, distance_between, haversine_distance, is_within_bounding_box};
pub use error::LookupError;
pub use filters::matches_filters;
pub use finder::{SchoolFinder, SearchOutcome};
pub use ranker::{rank_results, summarize, DEFAULT_MAX_RESULTS};
pub use resolver::{median, resolve_location};
pub use spatial::filter_within_radius;
