//! Files generated alongside the route documents.

pub mod sitemap;
