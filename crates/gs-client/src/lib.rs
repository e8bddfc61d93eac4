//! Async GeoServer client: layer metadata resolution and feature lookup.
//!
//! The client performs the WMS/WFS capability round trips and feature
//! queries; all request construction comes from `gs-protocol` and all
//! resulting metadata uses the `gs-common` model.

pub mod capabilities;
pub mod client;
pub mod features;
pub mod identify;

pub use client::{GsClient, GsConfig};
pub use features::{Feature, FeatureCollection};
pub use identify::{ClickQuery, MapLayer};
