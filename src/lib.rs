pub mod cli;
pub mod client;
pub mod report;
pub mod utils;

pub use cli::*;
pub use client::*;
pub use report::*;
pub use utils::*;
