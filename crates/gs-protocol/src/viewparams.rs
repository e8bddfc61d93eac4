//! View-parameter encoding and keyword parsing.
//!
//! GeoServer substitutes view parameters into parameterized layer
//! definitions at request time. The wire format is
//! `name1:value1;name2:value2` with no escaping, so values containing
//! `:` or `;` are not supported.

use tracing::warn;

use gs_common::layer::KEYWORD_VIEW_PARAM;
use gs_common::{ParamDataType, ViewParam};

/// Render name/value pairs as the `VIEWPARAMS` parameter value.
///
/// Entries with empty values are dropped. An empty result means the
/// caller should omit the parameter from the request entirely.
pub fn encode_params<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let rendered: Vec<String> = pairs
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{}:{}", name, value))
        .collect();

    rendered.join(";")
}

/// Extract view-parameter declarations from a layer's keyword list.
///
/// A declaring keyword has exactly three `;`-separated fields:
/// `view_param;<name>;<type>`. Malformed declarations are skipped with
/// a warning rather than failing the whole layer.
pub fn parse_view_params(keywords: &[String]) -> Vec<ViewParam> {
    keywords
        .iter()
        .filter(|kw| kw.starts_with(KEYWORD_VIEW_PARAM))
        .filter_map(|kw| {
            let fields: Vec<&str> = kw.split(';').collect();
            if fields.len() != 3 {
                warn!(keyword = %kw, "skipping malformed view_param keyword");
                return None;
            }

            let data_type = match ParamDataType::from_keyword_token(fields[2]) {
                Some(dt) => dt,
                None => {
                    warn!(keyword = %kw, "skipping view_param with unrecognized type");
                    return None;
                }
            };

            Some(ViewParam {
                name: fields[1].to_string(),
                data_type,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_drops_empty_values() {
        let encoded = encode_params([("year", "2023"), ("region", "")]);
        assert_eq!(encoded, "year:2023");
    }

    #[test]
    fn test_encode_joins_with_semicolon() {
        let encoded = encode_params([("year", "2023"), ("region", "west")]);
        assert_eq!(encoded, "year:2023;region:west");
    }

    #[test]
    fn test_encode_empty_input() {
        assert_eq!(encode_params([]), "");
        assert_eq!(encode_params([("year", "")]), "");
    }

    #[test]
    fn test_parse_view_params() {
        let keywords = vec![
            "view_param;year;Integer".to_string(),
            "other_keyword".to_string(),
        ];
        let params = parse_view_params(&keywords);
        assert_eq!(
            params,
            vec![ViewParam {
                name: "year".into(),
                data_type: ParamDataType::Integer
            }]
        );
    }

    #[test]
    fn test_parse_skips_malformed() {
        let keywords = vec![
            "view_param".to_string(),
            "view_param;incomplete".to_string(),
            "view_param;a;Integer;extra".to_string(),
            "view_param;region;String".to_string(),
        ];
        let params = parse_view_params(&keywords);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "region");
        assert_eq!(params[0].data_type, ParamDataType::String);
    }

    #[test]
    fn test_parse_skips_unknown_type() {
        let keywords = vec!["view_param;year;Whatever".to_string()];
        assert!(parse_view_params(&keywords).is_empty());
    }
}
