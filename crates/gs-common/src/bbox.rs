//! Bounding box type used to bound feature queries to the visible extent.

use serde::{Deserialize, Serialize};

use crate::{GsError, GsResult};

/// A rectangular map extent in the configured projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// A small square extent centered on a click coordinate, used when
    /// identifying features at a point.
    pub fn around_point(x: f64, y: f64, radius: f64) -> Self {
        Self {
            min_x: x - radius,
            min_y: y - radius,
            max_x: x + radius,
            max_y: y + radius,
        }
    }

    /// Parse an extent string: "minx,miny,maxx,maxy"
    pub fn parse(s: &str) -> GsResult<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(GsError::InvalidBbox(format!(
                "expected 'minx,miny,maxx,maxy', got '{}'",
                s
            )));
        }

        let mut coords = [0.0f64; 4];
        for (i, part) in parts.iter().enumerate() {
            coords[i] = part
                .trim()
                .parse()
                .map_err(|_| GsError::InvalidBbox(format!("invalid number '{}'", part)))?;
        }

        Ok(Self {
            min_x: coords[0],
            min_y: coords[1],
            max_x: coords[2],
            max_y: coords[3],
        })
    }

    /// Serialize as the four comma-joined numbers expected inside a
    /// `bbox(...)` predicate or a `bbox=` query parameter.
    pub fn to_query_string(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extent() {
        let bbox = BoundingBox::parse("10,20,30,40").unwrap();
        assert_eq!(bbox.min_x, 10.0);
        assert_eq!(bbox.min_y, 20.0);
        assert_eq!(bbox.max_x, 30.0);
        assert_eq!(bbox.max_y, 40.0);
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!(BoundingBox::parse("10,20,30").is_err());
        assert!(BoundingBox::parse("10,20,30,40,50").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(BoundingBox::parse("a,b,c,d").is_err());
    }

    #[test]
    fn test_query_string_order() {
        let bbox = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bbox.to_query_string(), "10,20,30,40");
    }

    #[test]
    fn test_around_point() {
        let bbox = BoundingBox::around_point(100.0, 200.0, 5.0);
        assert_eq!(bbox.to_query_string(), "95,195,105,205");
        assert!(bbox.contains_point(100.0, 200.0));
        assert!(!bbox.contains_point(110.0, 200.0));
    }
}
