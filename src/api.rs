//! Thin wrappers around the Supabase services, shaped for what the pages need.

pub mod auth;
pub mod blobs;
pub mod orders;
pub mod projects;
