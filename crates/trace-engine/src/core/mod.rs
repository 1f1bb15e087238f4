pub mod catalog;
pub mod geometry;
pub mod time;
