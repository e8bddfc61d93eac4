//! CQL filter expression construction.
//!
//! Turns user-entered (attribute, operator, value) triples into the
//! textual filter the server's `cql_filter` parameter accepts, always
//! conjoined with a bounding-box predicate so feature queries stay
//! bounded to the visible map region.

use chrono::NaiveDateTime;
use thiserror::Error;

use gs_common::{Attribute, BoundingBox, DataType, LayerInfo, Operator};

/// Format produced by a datetime-local input control.
const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format the server expects for temporal literals.
const CQL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One user-constructed filter predicate.
///
/// Transient: exists only for the duration of one query construction.
/// The operator is expected to come from
/// `attribute.data_type.possible_operators()`; the panels never offer
/// anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub attribute: Attribute,
    pub operator: Operator,
    pub value: String,
}

impl Filter {
    pub fn new(attribute: Attribute, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            attribute,
            operator,
            value: value.into(),
        }
    }
}

/// Errors raised while building a filter expression.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid temporal literal '{value}': expected yyyy-MM-ddTHH:mm")]
    InvalidTemporalLiteral { value: String },
}

/// Render a raw input value as a CQL literal for the given type.
///
/// String values are single-quoted, with `%` wildcards added for the
/// pattern-match operators. Date and date-time values are re-rendered
/// from the input-control format into the server's literal format; an
/// unparseable value fails the whole construction rather than emitting
/// a malformed query. All other types pass through unquoted.
pub fn format_value(
    data_type: DataType,
    operator: Operator,
    raw: &str,
) -> Result<String, FilterError> {
    match data_type {
        DataType::String => {
            if operator.is_pattern_match() {
                Ok(format!("'%{}%'", raw))
            } else {
                Ok(format!("'{}'", raw))
            }
        }
        DataType::Date | DataType::DateTime => {
            let parsed = NaiveDateTime::parse_from_str(raw, INPUT_DATETIME_FORMAT).map_err(
                |_| FilterError::InvalidTemporalLiteral {
                    value: raw.to_string(),
                },
            )?;
            Ok(format!("'{}'", parsed.format(CQL_DATETIME_FORMAT)))
        }
        _ => Ok(raw.to_string()),
    }
}

/// Render one filter as `<attribute> <operator> <literal>`.
pub fn attribute_expression(filter: &Filter) -> Result<String, FilterError> {
    let literal = format_value(filter.attribute.data_type, filter.operator, &filter.value)?;
    Ok(format!(
        "{} {} {}",
        filter.attribute.name,
        filter.operator.symbol(),
        literal
    ))
}

/// Join filter expressions with `" AND "`. Empty input yields empty text.
pub fn combine_filters(filters: &[Filter]) -> Result<String, FilterError> {
    let expressions: Vec<String> = filters
        .iter()
        .map(attribute_expression)
        .collect::<Result<_, _>>()?;
    Ok(expressions.join(" AND "))
}

/// Build the full `cql_filter` value for a feature query: a bbox
/// predicate over the layer's geometry column conjoined with the user
/// filters.
///
/// Returns `Ok(None)` when there are no filters, or when the layer has
/// no geometry attribute; the caller then falls back to a plain
/// bbox-only query.
pub fn spatial_query(
    layer: &LayerInfo,
    filters: &[Filter],
    extent: &BoundingBox,
) -> Result<Option<String>, FilterError> {
    if filters.is_empty() {
        return Ok(None);
    }

    let geometry = match layer.geometry_attribute() {
        Some(attr) => attr,
        None => return Ok(None),
    };

    Ok(Some(format!(
        "bbox({}, {}) AND {}",
        geometry.name,
        extent.to_query_string(),
        combine_filters(filters)?
    )))
}
