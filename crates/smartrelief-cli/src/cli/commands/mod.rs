pub mod assess;
pub mod batch;
pub mod config;
