pub mod credential_format;
pub mod error;
pub mod metadata;
pub mod offer;
pub mod proof;
pub mod request;
