//! Deterministic content-analysis tools
//!
//! Everything here runs locally with no model calls: readability
//! scoring, on-page SEO analysis, structural content validation, and
//! brand voice matching.

pub mod readability;
pub mod seo;
pub mod validate;
pub mod voice;
