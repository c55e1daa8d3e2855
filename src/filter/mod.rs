pub mod criteria;
pub mod error;
pub mod render;
pub mod types;

pub use criteria::FilterCriteria;
pub use error::FilterError;
pub use render::PredicateRenderer;
pub use types::*;
