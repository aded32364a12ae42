//! # Paperdock Common Library
//!
//! Shared code for the Paperdock CLI and web server including:
//! - The paper record model and list-column codec
//! - SQLite paper store with keyword search and pagination
//! - arXiv API client (metadata, PDF/source artifacts, BibTeX)
//! - Filesystem layout for downloaded papers
//! - Configuration and root folder resolution

pub mod arxiv;
pub mod config;
pub mod db;
pub mod error;
pub mod github;
pub mod layout;
pub mod models;
pub mod pagination;

pub use error::{Error, Result};
