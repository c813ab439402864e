//! Shared core for ytgate: configuration, errors, bearer auth, signed links,
//! the file access gateway, storage and wire models.

pub mod capability;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod storage;
pub mod token_auth;
