use crate::error::UploadError;
use derivative::Derivative;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const MISSING_FILE_NOTICE: &str = "Please select a file to upload.";
pub const GENERIC_FAILURE: &str = "An error occurred while processing the file.";

#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(#[derivative(Debug = "ignore")] Vec<u8>),
}

/// A file chosen in the file input.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub size: Option<u64>,
    pub source: FileSource,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let size = std::fs::metadata(path).ok().map(|m| m.len());
        Self {
            name,
            size,
            source: FileSource::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: Some(bytes.len() as u64),
            source: FileSource::Bytes(bytes),
        }
    }

    pub async fn read(&self) -> Result<Vec<u8>, UploadError> {
        match &self.source {
            FileSource::Bytes(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| UploadError::ReadFile {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

/// The server's JSON verdict. Only `success`, `formatted` and `error` are
/// interpreted; anything else the server sends is kept but ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct UploadResponse(pub Value);

impl UploadResponse {
    /// Parses a response body. A `null` body has no fields to read and is
    /// rejected like a body that is not JSON at all.
    pub fn from_body(body: &[u8]) -> Result<Self, UploadError> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Err(UploadError::NullResponse),
            value => Ok(Self(value)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.field("success").map_or(false, is_truthy)
    }

    fn field(&self, key: &str) -> Option<&Value> {
        match &self.0 {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn render(&self) -> RenderedResult {
        if self.is_success() {
            RenderedResult::preformatted(display_field(self.field("formatted")))
        } else {
            RenderedResult::preformatted(format!(
                "Error: {}",
                display_field(self.field("error"))
            ))
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_field(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(value) => loose_string(value),
    }
}

/// String conversion as done by `+` concatenation in a browser script.
fn loose_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => loose_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => loose_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn loose_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Content of the result region: always one preformatted block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResult {
    pub text: String,
}

impl RenderedResult {
    pub fn preformatted(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn failure() -> Self {
        Self::preformatted(GENERIC_FAILURE)
    }
}
