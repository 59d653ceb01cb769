//! The objects passed around by the agent: the local chat transcript, the
//! structured records produced by scraping, and the tool call/output pair
//! exchanged with the hosted assistant run.
pub mod message;
pub mod record;
pub mod tool;
