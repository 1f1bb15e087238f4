pub mod scene;
pub mod style;
#[cfg(feature = "vectors")]
pub mod vector;
