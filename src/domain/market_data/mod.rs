//! Market data aggregate: series entities, numeric normalization and the
//! source abstraction.

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use services::SeriesNormalizer;
pub use value_objects::*;
