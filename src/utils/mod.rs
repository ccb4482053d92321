pub mod base64_bytes;
pub mod extractors;
pub mod jwt;
