// URL handling utilities
pub mod query_string;
pub mod urls;

// Parsing utilities
pub mod parse;

// Re-export all utilities for convenient access
pub use parse::{parse_optional_int, parse_positive_id};
pub use query_string::build_query_string;
pub use urls::{absolute_url, hostname_from_url};
