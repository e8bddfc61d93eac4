//! Attribute data types as reported by WFS DescribeFeatureType.

use serde::{Deserialize, Serialize};

use crate::Operator;

/// Closed set of attribute types a layer can expose.
///
/// Resolved once from the server's schema document and immutable after
/// that. Anything the server reports outside this set maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    String,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    Boolean,
    Date,
    DateTime,
    Time,
    Geometry,
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    FeatureCollection,
    CurveProperty,
    Unknown,
}

const STRING_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::Like,
    Operator::ILike,
];

const ORDERED_OPERATORS: &[Operator] = &[
    Operator::Equal,
    Operator::NotEqual,
    Operator::LessThan,
    Operator::GreaterThan,
    Operator::LessThanOrEqual,
    Operator::GreaterThanOrEqual,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::Equal, Operator::NotEqual];

impl DataType {
    /// Map a server-reported schema type to the closed enum.
    pub fn from_xsd(s: &str) -> Self {
        match s {
            "xsd:string" => DataType::String,
            "xsd:int" => DataType::Integer,
            "xsd:long" => DataType::Long,
            "xsd:float" => DataType::Float,
            "xsd:double" => DataType::Double,
            "xsd:decimal" => DataType::Decimal,
            "xsd:boolean" => DataType::Boolean,
            "xsd:date" => DataType::Date,
            "xsd:dateTime" => DataType::DateTime,
            "xsd:time" => DataType::Time,
            "gml:GeometryPropertyType" => DataType::Geometry,
            "gml:PointPropertyType" => DataType::Point,
            "gml:LineString" => DataType::LineString,
            "gml:Polygon" => DataType::Polygon,
            "gml:MultiPoint" => DataType::MultiPoint,
            "gml:MultiLineString" => DataType::MultiLineString,
            "gml:MultiPolygon" => DataType::MultiPolygon,
            "gml:FeatureCollection" => DataType::FeatureCollection,
            "gml:CurvePropertyType" => DataType::CurveProperty,
            _ => DataType::Unknown,
        }
    }

    /// True exactly for the geometry-family variants.
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            DataType::Geometry
                | DataType::Point
                | DataType::LineString
                | DataType::Polygon
                | DataType::MultiPoint
                | DataType::MultiLineString
                | DataType::MultiPolygon
                | DataType::FeatureCollection
                | DataType::CurveProperty
        )
    }

    /// True for scalar and temporal types that can appear in a filter
    /// predicate. Geometry variants and `Unknown` are never filterable.
    pub fn is_filterable(&self) -> bool {
        !self.is_geometry() && *self != DataType::Unknown
    }

    /// Whether the UI builds a free-form filter row for this type.
    ///
    /// Boolean attributes stay filterable through `possible_operators`,
    /// but the panel does not offer a text input for them.
    pub fn generates_filter_row(&self) -> bool {
        self.is_filterable() && *self != DataType::Boolean
    }

    /// The comparison operators the server accepts for this type.
    pub fn possible_operators(&self) -> &'static [Operator] {
        match self {
            DataType::String => STRING_OPERATORS,
            DataType::Integer
            | DataType::Long
            | DataType::Float
            | DataType::Double
            | DataType::Decimal => ORDERED_OPERATORS,
            DataType::Boolean => BOOLEAN_OPERATORS,
            DataType::Date | DataType::DateTime | DataType::Time => ORDERED_OPERATORS,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_xsd_known_types() {
        assert_eq!(DataType::from_xsd("xsd:string"), DataType::String);
        assert_eq!(DataType::from_xsd("xsd:dateTime"), DataType::DateTime);
        assert_eq!(
            DataType::from_xsd("gml:PointPropertyType"),
            DataType::Point
        );
    }

    #[test]
    fn test_from_xsd_unrecognized_maps_to_unknown() {
        assert_eq!(DataType::from_xsd("xsd:hexBinary"), DataType::Unknown);
        assert_eq!(DataType::from_xsd(""), DataType::Unknown);
    }

    #[test]
    fn test_operators_empty_iff_geometry_or_unknown() {
        let all = [
            DataType::String,
            DataType::Integer,
            DataType::Long,
            DataType::Float,
            DataType::Double,
            DataType::Decimal,
            DataType::Boolean,
            DataType::Date,
            DataType::DateTime,
            DataType::Time,
            DataType::Geometry,
            DataType::Point,
            DataType::LineString,
            DataType::Polygon,
            DataType::MultiPoint,
            DataType::MultiLineString,
            DataType::MultiPolygon,
            DataType::FeatureCollection,
            DataType::CurveProperty,
            DataType::Unknown,
        ];
        for dt in all {
            let empty = dt.possible_operators().is_empty();
            assert_eq!(
                empty,
                dt.is_geometry() || dt == DataType::Unknown,
                "operator set mismatch for {:?}",
                dt
            );
        }
    }

    #[test]
    fn test_string_operators() {
        assert_eq!(
            DataType::String.possible_operators(),
            &[
                Operator::Equal,
                Operator::NotEqual,
                Operator::Like,
                Operator::ILike
            ]
        );
    }

    #[test]
    fn test_boolean_has_no_filter_row_but_is_filterable() {
        assert!(DataType::Boolean.is_filterable());
        assert!(!DataType::Boolean.generates_filter_row());
    }
}
