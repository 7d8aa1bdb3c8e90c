//! Exposure modules
//!
//! Each exposure consumes a `SiteHost` and produces a Router.

pub mod http;

pub use http::HttpExposure;
