//! Core library components.
//!
//! This module contains the store seam, the document model and the
//! copy/move/import pipelines built on them.

pub mod cipher;
pub mod config;
pub mod confirm;
pub mod constants;
pub mod delete;
pub mod document;
pub mod export;
pub mod import;
pub mod mount;
pub mod path;
pub mod plan;
pub mod scratch;
pub mod store;
pub mod transfer;
pub mod writer;
