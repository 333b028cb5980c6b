pub mod common;
pub mod config;
pub mod vfs;
pub mod web;
