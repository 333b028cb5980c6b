pub mod errors;
pub mod streaming;
