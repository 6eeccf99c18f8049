pub mod dataset;
pub mod listing;
pub mod parameters;
pub mod review_date;

pub use dataset::{Dataset, DatasetSchema};
pub use listing::Listing;
pub use parameters::CleaningParameters;
pub use review_date::ReviewDate;
