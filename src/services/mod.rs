//! Search services
//!
//! `SearchProvider` is the capability the rest of the program depends on;
//! `NaverSearchService` is the one provider wired in.

pub mod search_service;

pub use search_service::{decode_page, Credentials, NaverSearchService, SearchProvider};
