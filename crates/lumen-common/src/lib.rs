//! Common utilities for the lumen renderer.
//!
//! This crate provides shared infrastructure used by all pipeline stages:
//! - **Warning System** - deduplicated reports of unsupported input
//! - **URL Resolution** - turning `href`/`src`/`action` values into fetch targets
//! - **Fetching** - the [`net::Fetch`] contract the pipeline consumes, plus a
//!   blocking implementation for `http(s)`, `file` and `data` URLs

pub mod net;
pub mod url;
pub mod warning;

pub use net::{Fetch, FetchConfig, FetchError, HttpFetcher, Response};
pub use url::resolve_url;
