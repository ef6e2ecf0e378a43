//! Metric collectors.
//!
//! Four independent units, one per metric category. They share no state;
//! each returns a record the report renderer writes once into the
//! aggregate [`crate::metrics::MetricsReport`].

pub mod assets;
pub mod database;
pub mod endpoints;
pub mod server;

pub use assets::{total_size_kb, AssetCollector};
pub use database::DatabaseCollector;
pub use endpoints::EndpointCollector;
pub use server::ServerCollector;
