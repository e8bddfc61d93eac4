//! Minimal GeoJSON feature model.
//!
//! Only the attribute side of a feature is modeled; geometry decoding
//! is out of scope and left to the mapping layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One feature from a GetFeature or GetFeatureInfo response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Attribute values in document order; empty for features with a
    /// null/absent properties object.
    pub fn properties(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.properties.iter().flat_map(|map| map.iter())
    }
}

/// A GetFeature/GetFeatureInfo response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// The first feature, consuming the collection.
    pub fn into_first(self) -> Option<Feature> {
        self.features.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_collection() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "roads.1", "properties": {"name": "Main St", "lanes": 2}, "geometry": null}
            ],
            "totalFeatures": 1
        }"#;

        let collection: FeatureCollection = serde_json::from_str(body).unwrap();
        assert!(!collection.is_empty());
        let feature = collection.into_first().unwrap();
        assert_eq!(feature.id.as_deref(), Some("roads.1"));
        assert_eq!(feature.properties().count(), 2);
    }

    #[test]
    fn test_deserialize_empty_collection() {
        let collection: FeatureCollection =
            serde_json::from_str(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(collection.is_empty());
        assert!(collection.into_first().is_none());
    }

    #[test]
    fn test_null_properties_tolerated() {
        let feature: Feature =
            serde_json::from_str(r#"{"type": "Feature", "properties": null}"#).unwrap();
        assert_eq!(feature.properties().count(), 0);
    }
}
