//! Wire types for the two backend endpoints the client talks to.
//!
//! - `POST /adapt`: JSON in, adapted chapter content out
//! - `POST /ingest`: multipart PDF upload, indexing confirmation out
//!
//! Both share the same error shape: a non-2xx status with an optional
//! `{"detail": ...}` body.

pub mod adapt;
pub mod error;
pub mod ingest;

pub use adapt::*;
pub use error::*;
pub use ingest::*;

/// Join a backend base URL (possibly empty for same-origin) with an endpoint
/// path.
pub fn endpoint_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    format!("{base}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_base_keeps_path() {
        assert_eq!(endpoint_url("", ADAPT_PATH), "/adapt");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(
            endpoint_url("http://localhost:8000/", INGEST_PATH),
            "http://localhost:8000/ingest"
        );
    }
}
