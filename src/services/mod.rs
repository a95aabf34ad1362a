pub mod aggregation;
pub mod providers;
pub mod ranking;
pub mod recommendations;
pub mod similarity;
