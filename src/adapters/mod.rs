pub mod analyzer;
pub mod http;
