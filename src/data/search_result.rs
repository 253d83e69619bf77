use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One news result as the provider reports it. Values are passed through
/// untouched, including any markup the provider embeds in them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchResultItem {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "pubDate", deserialize_with = "null_as_default")]
    pub pub_date: String,
}

/// Decoded body of one search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchResultPage {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<SearchResultItem>,
    #[serde(rename = "lastBuildDate", deserialize_with = "null_as_default")]
    pub last_build_date: String,
}

impl SearchResultPage {
    /// Decode a response body. Only objects are accepted, both for the page
    /// and for each entry of `items`; serde alone would also take arrays.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Some(page) = value.as_object() else {
            return Err(serde_json::Error::custom("expected a JSON object"));
        };
        if let Some(items) = page.get("items").and_then(Value::as_array) {
            if items.iter().any(|item| !item.is_object()) {
                return Err(serde_json::Error::custom(
                    "every entry of `items` must be a JSON object",
                ));
            }
        }
        serde_json::from_value(value)
    }
}

/// `null` decodes like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
