// Library exports for testing
pub mod access;
pub mod api;
pub mod config;
pub mod error_page;
pub mod errors;
pub mod notify;
pub mod pages;
