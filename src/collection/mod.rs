mod url;


pub use url::resolve_url;

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::CollectionError;

/// One collection file: a named root over nested folders and requests.
///
/// Unknown fields (schema metadata, `event` scripts, auth blocks) are
/// tolerated and dropped at parse time.
#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    pub info: CollectionInfo,
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(default)]
    pub schema: Option<String>,
}

/// A node in the collection tree: a folder (non-empty `items`), a leaf
/// (carries a request), or an inert node with neither.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
    #[serde(default)]
    pub request: Option<Request>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default, rename = "header")]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub body: Option<Body>,
    #[serde(default, deserialize_with = "deserialize_url_field")]
    pub url: Option<UrlField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub options: Option<BodyOptions>,
}

impl Body {
    #[must_use]
    pub fn language_hint(&self) -> Option<&str> {
        let raw_options = self.options.as_ref()?.raw.as_ref()?;
        Some(raw_options.language.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BodyOptions {
    #[serde(default)]
    pub raw: Option<RawOptions>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOptions {
    #[serde(default)]
    pub language: String,
}

/// The schema's polymorphic `url` field, decided at parse time from the
/// JSON shape so use sites get an exhaustive match instead of runtime
/// type inspection.
#[derive(Debug, Clone)]
pub enum UrlField {
    Plain(String),
    Structured(UrlParts),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlParts {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub host: Vec<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub query: Vec<QueryPair>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryPair {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

fn deserialize_url_field<'de, D>(deserializer: D) -> Result<Option<UrlField>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(plain) => Ok(Some(UrlField::Plain(plain))),
        serde_json::Value::Object(ref fields) => {
            match serde_json::from_value::<UrlParts>(value.clone()) {
                Ok(parts) => Ok(Some(UrlField::Structured(parts))),
                // An object with off-shape inner fields never fails the
                // parse: it resolves through its raw string when one is
                // present and is dropped otherwise.
                Err(_) => match fields.get("raw") {
                    Some(serde_json::Value::String(raw)) => {
                        Ok(Some(UrlField::Plain(raw.clone())))
                    }
                    Some(_) | None => Ok(None),
                },
            }
        }
        serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::Number(_)
        | serde_json::Value::Array(_) => Ok(None),
    }
}

/// Loads and parses one collection file.
///
/// # Errors
///
/// Returns an error when the file cannot be read, the JSON is malformed,
/// or a required field (`info.name`, item `name`, request `method`) is
/// missing.
pub fn load_collection(path: &Path) -> Result<Collection, CollectionError> {
    let content = std::fs::read_to_string(path).map_err(|err| CollectionError::ReadFile {
        path: path.to_path_buf(),
        source: err,
    })?;
    serde_json::from_str(&content).map_err(|err| CollectionError::ParseJson {
        path: path.to_path_buf(),
        source: err,
    })
}
