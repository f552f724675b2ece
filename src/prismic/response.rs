//! Raw API payloads

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One page of query results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiResponse {
    pub page: u32,
    pub results_per_page: u32,
    pub results_size: u32,
    pub total_results_size: u32,
    pub total_pages: u32,
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    pub results: Vec<Document>,
}

/// A raw document as returned by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    pub data: serde_json::Value,
}

impl Document {
    /// String field of `data`, empty when absent or not a string
    pub fn data_str(&self, field: &str) -> String {
        self.data
            .get(field)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// Decode a payload value, falling back to the default on a type mismatch
pub(crate) fn value_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
    serde_json::from_value(value).unwrap_or_default()
}

/// `deserialize_with` adaptor for [`value_or_default`]
///
/// `null` and mistyped fields decode to the default instead of failing the
/// whole document.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(value_or_default(Value::deserialize(deserializer)?))
}

/// Like [`lenient`], per element: a non-array is empty, a bad element is its default
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().map(value_or_default).collect(),
        _ => Vec::new(),
    })
}

/// API entry point (`GET {endpoint}`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiInfo {
    pub refs: Vec<ApiRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ApiRef {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "isMasterRef")]
    pub is_master_ref: bool,
}

impl ApiInfo {
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_page() {
        let json = r#"{
            "page": 1,
            "results_per_page": 1,
            "results_size": 1,
            "total_results_size": 2,
            "total_pages": 2,
            "next_page": "https://blog.cdn.prismic.io/api/v2/documents/search?page=2",
            "prev_page": null,
            "results": [{
                "id": "X1",
                "uid": "como-utilizar-hooks",
                "type": "posts",
                "first_publication_date": "2021-03-15T19:25:28+0000",
                "data": { "title": "Como utilizar Hooks" }
            }]
        }"#;
        let page: ApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 2);
        assert!(page.next_page.is_some());
        assert!(page.prev_page.is_none());
        assert_eq!(page.results[0].doc_type, "posts");
        assert_eq!(page.results[0].data_str("title"), "Como utilizar Hooks");
        assert_eq!(page.results[0].data_str("subtitle"), "");
    }

    #[test]
    fn test_lenient_values() {
        assert_eq!(value_or_default::<String>(json!(null)), "");
        assert_eq!(value_or_default::<String>(json!(42)), "");
        assert_eq!(value_or_default::<Option<String>>(json!(["a"])), None);
        assert_eq!(value_or_default::<String>(json!("kept")), "kept");
    }

    #[test]
    fn test_master_ref() {
        let json = r#"{"refs": [
            {"id": "preview", "ref": "p1", "isMasterRef": false},
            {"id": "master", "ref": "YFoo", "isMasterRef": true}
        ]}"#;
        let info: ApiInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.master_ref(), Some("YFoo"));
        assert!(ApiInfo::default().master_ref().is_none());
    }
}
