//! Minimal client for a Supabase project.
//!
//! Each service the app talks to is exposed as a trait so that callers can be
//! written against the seam instead of the HTTP client:
//! - [`AuthApi`] for GoTrue (sign up, password sign in, token refresh, logout)
//! - [`RowStore`] for PostgREST tables
//! - [`BlobStore`] for Storage buckets
//!
//! [`Client`] implements all three.

mod client;
pub use client::*;

pub mod auth;
pub use auth::AuthApi;

mod error;
pub use error::*;

pub mod rest;
pub use rest::{Query, RowStore};

mod response;
pub use response::*;

pub mod storage;
pub use storage::BlobStore;
