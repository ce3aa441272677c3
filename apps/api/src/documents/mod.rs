//! Upload, listing and retrieval of stored documents.

pub mod handlers;
