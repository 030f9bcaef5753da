pub mod best_score;
pub mod json_store;
pub mod schema;
