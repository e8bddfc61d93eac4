//! Query-parameter assembly for outgoing GeoServer requests.
//!
//! Each function returns the key/value pairs for one request form; the
//! HTTP client appends them to the workspace-scoped `wms`/`wfs`
//! endpoint URL.

use gs_common::{BoundingBox, LayerInfo};

/// GeoJSON output, parseable by the feature model.
const JSON_OUTPUT_FORMAT: &str = "application/json";

pub fn wms_capabilities_params() -> Vec<(String, String)> {
    vec![
        ("service".into(), "WMS".into()),
        ("request".into(), "GetCapabilities".into()),
    ]
}

pub fn wfs_capabilities_params() -> Vec<(String, String)> {
    vec![
        ("service".into(), "WFS".into()),
        ("request".into(), "GetCapabilities".into()),
    ]
}

pub fn describe_feature_type_params(type_name: &str) -> Vec<(String, String)> {
    vec![
        ("service".into(), "WFS".into()),
        ("request".into(), "DescribeFeatureType".into()),
        ("typeName".into(), type_name.to_string()),
    ]
}

/// Parameters for a WMS GetMap source, tiled or single-image.
///
/// `VIEWPARAMS` is included only when the encoded string is non-empty;
/// GeoServer treats an empty parameter as a substitution error.
pub fn getmap_params(
    workspace: &str,
    layer: &LayerInfo,
    view_params: &str,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("LAYERS".into(), format!("{}:{}", workspace, layer.name)),
        ("TILED".into(), (!layer.prefers_single_image()).to_string()),
    ];
    if !view_params.is_empty() {
        params.push(("VIEWPARAMS".into(), view_params.to_string()));
    }
    params
}

/// Parameters for a WFS GetFeature request.
///
/// With a CQL expression the spatial bound lives inside `cql_filter`;
/// without one the query falls back to a plain `bbox` parameter. The
/// two are mutually exclusive — GeoServer rejects requests carrying
/// both.
pub fn getfeature_params(
    layer: &LayerInfo,
    extent: &BoundingBox,
    srs: &str,
    cql: Option<&str>,
    view_params: &str,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("service".into(), "WFS".into()),
        ("request".into(), "GetFeature".into()),
        ("typename".into(), layer.name.clone()),
        ("outputFormat".into(), JSON_OUTPUT_FORMAT.into()),
        ("srsname".into(), srs.to_string()),
    ];

    match cql {
        Some(expression) => params.push(("cql_filter".into(), expression.to_string())),
        None => params.push((
            "bbox".into(),
            format!("{},{}", extent.to_query_string(), srs),
        )),
    }

    if !view_params.is_empty() {
        params.push(("viewparams".into(), view_params.to_string()));
    }

    params
}

/// Parameters for a WMS 1.1.1 GetFeatureInfo request at a pixel.
pub fn getfeatureinfo_params(
    workspace: &str,
    layer: &LayerInfo,
    extent: &BoundingBox,
    srs: &str,
    width: u32,
    height: u32,
    x: u32,
    y: u32,
) -> Vec<(String, String)> {
    let qualified = format!("{}:{}", workspace, layer.name);
    vec![
        ("SERVICE".into(), "WMS".into()),
        ("VERSION".into(), "1.1.1".into()),
        ("REQUEST".into(), "GetFeatureInfo".into()),
        ("LAYERS".into(), qualified.clone()),
        ("QUERY_LAYERS".into(), qualified),
        ("STYLES".into(), String::new()),
        ("SRS".into(), srs.to_string()),
        ("BBOX".into(), extent.to_query_string()),
        ("WIDTH".into(), width.to_string()),
        ("HEIGHT".into(), height.to_string()),
        ("X".into(), x.to_string()),
        ("Y".into(), y.to_string()),
        ("INFO_FORMAT".into(), JSON_OUTPUT_FORMAT.into()),
        ("FEATURE_COUNT".into(), "1".into()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_common::{Attribute, DataType, ServiceKind};

    fn layer(keywords: Vec<String>) -> LayerInfo {
        LayerInfo {
            name: "traffic".into(),
            title: "Traffic".into(),
            service: ServiceKind::Wms,
            keywords,
            attributes: vec![Attribute::new("geom", DataType::Geometry)],
            view_params: vec![],
        }
    }

    fn value_of<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_getmap_qualifies_layer_name() {
        let params = getmap_params("osm", &layer(vec![]), "");
        assert_eq!(value_of(&params, "LAYERS"), Some("osm:traffic"));
        assert_eq!(value_of(&params, "TILED"), Some("true"));
    }

    #[test]
    fn test_getmap_single_image_disables_tiling() {
        let params = getmap_params("osm", &layer(vec!["layer:image".into()]), "");
        assert_eq!(value_of(&params, "TILED"), Some("false"));
    }

    #[test]
    fn test_getmap_omits_empty_viewparams() {
        let params = getmap_params("osm", &layer(vec![]), "");
        assert_eq!(value_of(&params, "VIEWPARAMS"), None);

        let params = getmap_params("osm", &layer(vec![]), "year:2023");
        assert_eq!(value_of(&params, "VIEWPARAMS"), Some("year:2023"));
    }

    #[test]
    fn test_getfeature_cql_excludes_bbox() {
        let extent = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let params = getfeature_params(
            &layer(vec![]),
            &extent,
            "EPSG:3857",
            Some("bbox(geom, 1,2,3,4) AND name = 'x'"),
            "",
        );
        assert!(value_of(&params, "cql_filter").is_some());
        assert_eq!(value_of(&params, "bbox"), None);
    }

    #[test]
    fn test_getfeature_bbox_fallback() {
        let extent = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        let params = getfeature_params(&layer(vec![]), &extent, "EPSG:3857", None, "");
        assert_eq!(value_of(&params, "cql_filter"), None);
        assert_eq!(value_of(&params, "bbox"), Some("1,2,3,4,EPSG:3857"));
    }

    #[test]
    fn test_getfeatureinfo_queries_same_layer() {
        let extent = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let params =
            getfeatureinfo_params("osm", &layer(vec![]), &extent, "EPSG:3857", 256, 256, 10, 20);
        assert_eq!(value_of(&params, "LAYERS"), value_of(&params, "QUERY_LAYERS"));
        assert_eq!(value_of(&params, "INFO_FORMAT"), Some("application/json"));
        assert_eq!(value_of(&params, "X"), Some("10"));
        assert_eq!(value_of(&params, "Y"), Some("20"));
    }
}
