//! Data loading and validation for catalog, round settings and narration cues.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
