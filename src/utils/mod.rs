pub mod objects;

pub use objects::{first_some, first_supplied_some};
