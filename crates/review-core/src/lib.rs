pub mod error;
pub mod loader;
pub mod markup;
pub mod mcp_api;
pub mod model;
pub mod report;
pub mod review;
pub mod scanner;
pub mod suggestion;
