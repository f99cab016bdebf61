// ABOUTME: Public library API for Notion-to-Markdown sync
// ABOUTME: Re-exports core modules for external use

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod layout;
pub mod model;
pub mod storage;
pub mod sync;

pub use error::{Error, Result};
pub use model::{Block, Page, RichText};
