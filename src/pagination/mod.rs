//! Pagination module
//!
//! Supports: Link following, Marker, Single page
//!
//! # Overview
//!
//! A [`Pager`] walks a listing endpoint one page at a time. How records are
//! found in a page and where the next page lives is decided by a
//! [`PageStrategy`] bound once per listing call:
//! - [`LinkedPages`] follows a `rel="next"` link from the response body
//! - [`MarkerPages`] re-requests the listing with `marker=<last record key>`
//! - [`SinglePage`] stops after the first page

mod pager;
mod strategies;
mod types;

pub use pager::Pager;
pub use strategies::{LinkedPages, MarkerPages, SinglePage};
pub use types::{extract_records, AllPages, Page, PageResult, PageStrategy};
