/// Aggregate binary output.
pub mod blob;
/// Input collection loading.
pub mod input;
mod paths;
/// Delimited-table output.
pub mod table;

pub use input::{LoadError, RawRecord};
pub use paths::{PathError, Paths};
