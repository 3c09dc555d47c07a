pub mod algorithm;
pub mod first_available;
pub mod nearest;
pub mod types;

pub use algorithm::MatchingAlgorithm;
pub use first_available::FirstAvailable;
pub use nearest::NearestDriver;
pub use types::DriverCandidate;
