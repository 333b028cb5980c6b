pub mod files;
pub mod generate;
