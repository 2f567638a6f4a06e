pub mod flatten;
pub mod model;

pub use flatten::{flatten, nest};
pub use model::{DocumentRef, Draft, Internship, Section};
