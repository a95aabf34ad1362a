pub mod feedback;
pub mod sqlite;

pub use feedback::FeedbackStore;
pub use sqlite::create_pool;
