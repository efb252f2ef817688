pub mod api_client;
pub mod engine;
pub mod error;
pub mod protocol;
