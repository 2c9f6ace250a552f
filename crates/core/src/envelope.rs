//! Response envelope returned by every GoFile endpoint
//!
//! The service answers with `{"status": "...", "data": {...}}` and reports
//! its own errors in-band through `status` (`error-auth`, `error-wrongFolder`,
//! ...). The envelope keeps every field of the reply so that callers get back
//! exactly what the service sent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Status value the service uses for successful calls
pub const STATUS_OK: &str = "ok";

/// Status value the service uses for invalid or missing tokens
pub const STATUS_ERROR_AUTH: &str = "error-auth";

/// Uniform `{status, data}` reply of the GoFile API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// `"ok"` or an `error-*` code
    pub status: String,

    /// Endpoint specific payload, empty on most errors
    #[serde(default)]
    pub data: Map<String, Value>,

    /// Any other top-level field the service adds
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Create an envelope with the given status and payload
    pub fn new(status: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            status: status.into(),
            data,
            extra: Map::new(),
        }
    }

    /// Whether the service reported success
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Whether the service rejected the token
    pub fn is_auth_error(&self) -> bool {
        self.status == STATUS_ERROR_AUTH
    }

    /// String field of `data`, if present and a string
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Deserialize `data` into a typed view
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.data.clone()))?)
    }
}

/// `getServer` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub server: String,
}

/// `uploadFile` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Only present when the upload was made without a token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_token: Option<String>,
    pub download_page: String,
    pub code: String,
    pub parent_folder: String,
    pub file_id: String,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
}

/// `getAccountDetails` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub tier: String,
    pub root_folder: String,
    #[serde(default)]
    pub folders_count: u64,
    #[serde(default)]
    pub files_count: u64,
    #[serde(default)]
    pub total_size: u64,
    #[serde(default)]
    pub total_download_count: u64,
}

/// One entry of a `getContent` listing
///
/// The listing shape depends on the account tier, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_folder: Option<String>,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub download_count: Option<u64>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub contents: Option<Map<String, Value>>,
}

impl ContentInfo {
    /// Whether this entry is a folder
    pub fn is_folder(&self) -> bool {
        self.kind.as_deref() == Some("folder")
    }

    /// Typed children of a folder listing, in the order the service sent them
    pub fn children(&self) -> Vec<ContentInfo> {
        self.contents
            .iter()
            .flat_map(|contents| contents.values())
            .filter_map(|v| serde_json::from_value(v.clone()).ok())
            .collect()
    }
}
