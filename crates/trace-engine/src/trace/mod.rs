pub mod coverage;
pub mod engine;
pub mod tracker;
