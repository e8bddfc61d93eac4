//! Parsers for WMS/WFS capability and schema documents.
//!
//! Event-driven parsing with `quick_xml`; tags are matched on their
//! local name so the server's namespace prefixes (`ows:`, `xsd:`,
//! `wfs:`) don't matter.

use quick_xml::events::Event;
use quick_xml::Reader;

use gs_common::{Attribute, DataType, GsError, GsResult};

/// One `FeatureType` entry from a WFS GetCapabilities document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTypeEntry {
    pub name: String,
    pub title: String,
    pub keywords: Vec<String>,
}

/// One second-level `Layer` entry from a WMS GetCapabilities document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WmsLayerEntry {
    pub name: String,
    pub title: String,
    pub keywords: Vec<String>,
}

/// Which text node is currently being captured.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Capture {
    None,
    Name,
    Title,
    Keyword,
}

fn parse_error(reader: &Reader<&[u8]>, err: quick_xml::Error) -> GsError {
    GsError::CapabilitiesParse(format!(
        "XML error at position {}: {}",
        reader.buffer_position(),
        err
    ))
}

/// Extract the `FeatureType` entries from a WFS GetCapabilities
/// response.
pub fn parse_wfs_capabilities(xml: &str) -> GsResult<Vec<FeatureTypeEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut current: Option<FeatureTypeEntry> = None;
    let mut capture = Capture::None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"FeatureType" => {
                    current = Some(FeatureTypeEntry::default());
                }
                b"Name" if current.is_some() => capture = Capture::Name,
                b"Title" if current.is_some() => capture = Capture::Title,
                b"Keyword" if current.is_some() => capture = Capture::Keyword,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(entry) = current.as_mut() {
                    let text = t.unescape().map_err(|e| parse_error(&reader, e))?;
                    match capture {
                        Capture::Name => entry.name.push_str(&text),
                        Capture::Title => entry.title.push_str(&text),
                        Capture::Keyword => {
                            if !text.is_empty() {
                                entry.keywords.push(text.into_owned());
                            }
                        }
                        Capture::None => {}
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"FeatureType" => {
                    if let Some(entry) = current.take() {
                        if !entry.name.is_empty() {
                            entries.push(entry);
                        }
                    }
                }
                b"Name" | b"Title" | b"Keyword" => capture = Capture::None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(&reader, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// Extract the second-level `Layer` entries from a WMS GetCapabilities
/// response. The first level is the root container layer; deeper
/// nesting is not advertised by the target server.
pub fn parse_wms_capabilities(xml: &str) -> GsResult<Vec<WmsLayerEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut current: Option<WmsLayerEntry> = None;
    let mut capture = Capture::None;
    let mut layer_depth: u32 = 0;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"Layer" => {
                    layer_depth += 1;
                    if layer_depth == 2 {
                        current = Some(WmsLayerEntry::default());
                    }
                }
                b"Name" if layer_depth == 2 && current.is_some() => capture = Capture::Name,
                b"Title" if layer_depth == 2 && current.is_some() => capture = Capture::Title,
                b"Keyword" if layer_depth == 2 && current.is_some() => capture = Capture::Keyword,
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(entry) = current.as_mut() {
                    let text = t.unescape().map_err(|e| parse_error(&reader, e))?;
                    match capture {
                        Capture::Name => entry.name.push_str(&text),
                        Capture::Title => entry.title.push_str(&text),
                        Capture::Keyword => {
                            if !text.is_empty() {
                                entry.keywords.push(text.into_owned());
                            }
                        }
                        Capture::None => {}
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"Layer" => {
                    if layer_depth == 2 {
                        if let Some(entry) = current.take() {
                            if !entry.name.is_empty() {
                                entries.push(entry);
                            }
                        }
                    }
                    layer_depth = layer_depth.saturating_sub(1);
                }
                b"Name" | b"Title" | b"Keyword" => capture = Capture::None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(&reader, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// Extract the attribute declarations from a DescribeFeatureType
/// response.
///
/// Only `element` declarations inside the type's `sequence` are
/// attributes; the top-level feature element declaration is not.
/// Unrecognized schema types are kept as `DataType::Unknown` so the
/// caller can still show the attribute, just not filter on it.
pub fn parse_feature_type_schema(xml: &str) -> GsResult<Vec<Attribute>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut attributes = Vec::new();
    let mut in_sequence = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match e.local_name().as_ref() {
                    b"sequence" => in_sequence = true,
                    b"element" if in_sequence => {
                        let mut name = None;
                        let mut type_name = None;
                        for attr in e.attributes().flatten() {
                            match attr.key.local_name().as_ref() {
                                b"name" => {
                                    name = Some(String::from_utf8_lossy(&attr.value).into_owned())
                                }
                                b"type" => {
                                    type_name =
                                        Some(String::from_utf8_lossy(&attr.value).into_owned())
                                }
                                _ => {}
                            }
                        }
                        if let (Some(name), Some(type_name)) = (name, type_name) {
                            if !name.is_empty() {
                                attributes
                                    .push(Attribute::new(name, DataType::from_xsd(&type_name)));
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"sequence" => {
                in_sequence = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(parse_error(&reader, e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_keeps_unknown_types() {
        let xml = r#"
<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <xsd:complexType name="roadsType">
    <xsd:sequence>
      <xsd:element name="name" type="xsd:string"/>
      <xsd:element name="mystery" type="xsd:hexBinary"/>
      <xsd:element name="way" type="gml:GeometryPropertyType"/>
    </xsd:sequence>
  </xsd:complexType>
  <xsd:element name="roads" type="gs:roadsType"/>
</xsd:schema>"#;

        let attrs = parse_feature_type_schema(xml).unwrap();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0], Attribute::new("name", DataType::String));
        assert_eq!(attrs[1], Attribute::new("mystery", DataType::Unknown));
        assert_eq!(attrs[2], Attribute::new("way", DataType::Geometry));
    }

    #[test]
    fn test_parse_schema_skips_top_level_element() {
        let xml = r#"
<xsd:schema xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <xsd:element name="roads" type="gs:roadsType"/>
</xsd:schema>"#;
        assert!(parse_feature_type_schema(xml).unwrap().is_empty());
    }

    #[test]
    fn test_parse_wfs_rejects_mismatched_tags() {
        assert!(parse_wfs_capabilities("<WFS_Capabilities><FeatureType></Wrong>").is_err());
    }
}
