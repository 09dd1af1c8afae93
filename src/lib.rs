pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod error;
pub mod report;
