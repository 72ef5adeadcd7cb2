// Analytics client implementations
pub mod client_trait;
pub mod ga4_client;
pub mod mock_client;

pub use client_trait::*;
pub use ga4_client::*;
pub use mock_client::*;
