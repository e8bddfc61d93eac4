//! Canned server documents and layer builders for tests.

use gs_common::{Attribute, DataType, LayerInfo, ServiceKind};

/// A WFS GetCapabilities document advertising two feature types, one
/// of them carrying a `view_param` keyword.
pub const WFS_CAPABILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:WFS_Capabilities version="2.0.0"
    xmlns:wfs="http://www.opengis.net/wfs/2.0"
    xmlns:ows="http://www.opengis.net/ows/1.1">
  <FeatureTypeList>
    <FeatureType>
      <Name>osm:roads</Name>
      <Title>Roads</Title>
      <ows:Keywords>
        <ows:Keyword>features</ows:Keyword>
        <ows:Keyword>roads</ows:Keyword>
      </ows:Keywords>
    </FeatureType>
    <FeatureType>
      <Name>osm:traffic_counts</Name>
      <Title>Traffic counts</Title>
      <ows:Keywords>
        <ows:Keyword>features</ows:Keyword>
        <ows:Keyword>view_param;year;Integer</ows:Keyword>
      </ows:Keywords>
    </FeatureType>
  </FeatureTypeList>
</wfs:WFS_Capabilities>"#;

/// A DescribeFeatureType response for the `osm:roads` feature type.
pub const ROADS_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:gml="http://www.opengis.net/gml/3.2"
    xmlns:osm="http://example.com/osm">
  <xsd:complexType name="roadsType">
    <xsd:complexContent>
      <xsd:extension base="gml:AbstractFeatureType">
        <xsd:sequence>
          <xsd:element maxOccurs="1" minOccurs="0" name="name" nillable="true" type="xsd:string"/>
          <xsd:element maxOccurs="1" minOccurs="0" name="lanes" nillable="true" type="xsd:int"/>
          <xsd:element maxOccurs="1" minOccurs="0" name="oneway" nillable="true" type="xsd:boolean"/>
          <xsd:element maxOccurs="1" minOccurs="0" name="updated" nillable="true" type="xsd:dateTime"/>
          <xsd:element maxOccurs="1" minOccurs="0" name="osm_blob" nillable="true" type="xsd:hexBinary"/>
          <xsd:element maxOccurs="1" minOccurs="0" name="way" nillable="true" type="gml:GeometryPropertyType"/>
        </xsd:sequence>
      </xsd:extension>
    </xsd:complexContent>
  </xsd:complexType>
  <xsd:element name="roads" substitutionGroup="gml:AbstractFeature" type="osm:roadsType"/>
</xsd:schema>"#;

/// A WMS GetCapabilities document with a root container layer and two
/// child layers, one hidden from the legend.
pub const WMS_CAPABILITIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<WMS_Capabilities version="1.3.0" xmlns="http://www.opengis.net/wms">
  <Service>
    <Name>WMS</Name>
    <Title>Workspace WMS</Title>
  </Service>
  <Capability>
    <Layer>
      <Title>Workspace layers</Title>
      <Layer queryable="1">
        <Name>population_density</Name>
        <Title>Population density</Title>
        <KeywordList>
          <Keyword>raster</Keyword>
          <Keyword>view_param;year;Integer</Keyword>
        </KeywordList>
      </Layer>
      <Layer queryable="1">
        <Name>elevation_base</Name>
        <Title>Elevation base</Title>
        <KeywordList>
          <Keyword>hide_wms</Keyword>
          <Keyword>layer:image</Keyword>
        </KeywordList>
      </Layer>
    </Layer>
  </Capability>
</WMS_Capabilities>"#;

/// A vector layer with the attribute set from [`ROADS_SCHEMA`].
pub fn roads_layer() -> LayerInfo {
    LayerInfo {
        name: "osm:roads".into(),
        title: "Roads".into(),
        service: ServiceKind::Wfs,
        keywords: vec!["features".into(), "roads".into()],
        attributes: vec![
            Attribute::new("name", DataType::String),
            Attribute::new("lanes", DataType::Integer),
            Attribute::new("oneway", DataType::Boolean),
            Attribute::new("updated", DataType::DateTime),
            Attribute::new("osm_blob", DataType::Unknown),
            Attribute::new("way", DataType::Geometry),
        ],
        view_params: vec![],
    }
}

/// A raster layer with no attribute schema.
pub fn raster_layer(name: &str, keywords: Vec<String>) -> LayerInfo {
    LayerInfo {
        name: name.into(),
        title: name.into(),
        service: ServiceKind::Wms,
        keywords,
        attributes: vec![],
        view_params: vec![],
    }
}
