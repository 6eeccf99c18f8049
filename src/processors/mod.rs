pub mod cleaner;
pub mod step;

pub use cleaner::{Cleaner, CleaningSummary, GeoBounds, PriceRange};
pub use step::{CleaningStep, StepOutcome};
