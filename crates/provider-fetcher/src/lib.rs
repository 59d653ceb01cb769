pub mod agent;
pub mod errors;
pub mod identity;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod scrape;
pub mod tools;
