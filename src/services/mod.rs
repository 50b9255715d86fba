// Reference data exports
pub mod dataset;
pub mod loader;

pub use dataset::{normalize_suburb, Dataset};
pub use loader::{load_dataset, load_postcodes_csv, load_schools_csv, read_postcodes, read_schools, DatasetError};
