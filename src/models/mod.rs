mod category;
mod feedback;
mod place;

pub use category::{Category, ReviewCategory};
pub use feedback::UserFeedbackRecord;
pub use place::{ClassifiedReview, Coordinates, Place, PlaceSummary, Review};
