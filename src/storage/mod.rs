pub mod sqlite;

pub use sqlite::TourismStorage;
