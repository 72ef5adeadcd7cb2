// Report model and runner
pub mod query;
pub mod runner;
pub mod suite;

pub use query::*;
pub use runner::*;
pub use suite::*;
