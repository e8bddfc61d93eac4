//! Layer metadata resolved from server capability documents.

use serde::{Deserialize, Serialize};

use crate::DataType;

/// Keyword that suppresses a WMS layer from the legend.
pub const KEYWORD_HIDE_WMS: &str = "hide_wms";

/// Keyword that selects single-image rendering over tiled rendering.
pub const KEYWORD_SINGLE_IMAGE: &str = "layer:image";

/// Keyword prefix declaring a view parameter: `view_param;<name>;<type>`.
pub const KEYWORD_VIEW_PARAM: &str = "view_param";

/// Which OGC service a layer is served through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Wms,
    Wfs,
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceKind::Wms => write!(f, "WMS"),
            ServiceKind::Wfs => write!(f, "WFS"),
        }
    }
}

/// A named, typed attribute of a vector layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub data_type: DataType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Primitive type of a view parameter, as declared in layer keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamDataType {
    String,
    Integer,
}

impl ParamDataType {
    /// Parse the third field of a `view_param;<name>;<type>` keyword.
    pub fn from_keyword_token(s: &str) -> Option<Self> {
        match s {
            "String" => Some(ParamDataType::String),
            "Integer" => Some(ParamDataType::Integer),
            _ => None,
        }
    }
}

/// A server-recognized query knob declared through layer keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParam {
    pub name: String,
    pub data_type: ParamDataType,
}

/// Description of one server-advertised layer.
///
/// Built once by the metadata resolver and immutable afterwards. The
/// `attributes` list is empty for WMS (raster) layers and populated from
/// DescribeFeatureType for WFS (vector) layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub name: String,
    pub title: String,
    pub service: ServiceKind,
    pub keywords: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub view_params: Vec<ViewParam>,
}

impl LayerInfo {
    /// The attribute holding the layer's spatial column, if any.
    pub fn geometry_attribute(&self) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.data_type.is_geometry())
    }

    /// Attributes the UI offers as filter candidates.
    pub fn filterable_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.data_type.generates_filter_row())
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    /// WMS layers tagged `hide_wms` are not shown in the legend.
    pub fn hidden_from_legend(&self) -> bool {
        self.has_keyword(KEYWORD_HIDE_WMS)
    }

    /// Layers tagged `layer:image` render as one image per view instead
    /// of tiles.
    pub fn prefers_single_image(&self) -> bool {
        self.has_keyword(KEYWORD_SINGLE_IMAGE)
    }
}
