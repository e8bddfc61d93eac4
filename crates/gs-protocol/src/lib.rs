//! Request and filter-expression construction for GeoServer WMS/WFS.
//!
//! Everything in this crate is pure string/parameter assembly; network
//! I/O lives in `gs-client`.

pub mod cql;
pub mod request;
pub mod viewparams;

pub use cql::{
    attribute_expression, combine_filters, format_value, spatial_query, Filter, FilterError,
};
pub use viewparams::{encode_params, parse_view_params};
