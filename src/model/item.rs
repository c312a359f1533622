// Backend-facing item structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Handle assigned by the reporting backend to a launch or test item.
///
/// The value is opaque to the reporter: it is only stored, compared and
/// handed back to the client on later calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempId(String);

impl TempId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Item status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Passed,
    Failed,
    Skipped,
    Stopped,
    Interrupted,
    Cancelled,
    Info,
    Warn,
}

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Fatal,
}

/// Kind of item as the backend understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Suite,
    Test,
    Step,
    BeforeSuite,
    AfterSuite,
    BeforeMethod,
    AfterMethod,
    BeforeTest,
    AfterTest,
}

/// Key/value attribute attached to launches and items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub system: bool,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: value.into(),
            system: false,
        }
    }

    /// Attribute without a key (a plain tag)
    pub fn tag(value: impl Into<String>) -> Self {
        Self {
            key: None,
            value: value.into(),
            system: false,
        }
    }

    pub fn system(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            system: true,
            ..Self::new(key, value)
        }
    }
}

/// Issue classification attached to a finished item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub issue_type: String,
}

impl Issue {
    pub const NOT_ISSUE: &'static str = "NOT_ISSUE";

    pub fn not_issue() -> Self {
        Self {
            issue_type: Self::NOT_ISSUE.to_string(),
        }
    }
}

/// Launch mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LaunchMode {
    #[default]
    Default,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLaunchPayload {
    pub name: String,
    pub start_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub mode: LaunchMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishLaunchPayload {
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartItemPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub start_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishItemPayload {
    pub end_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogPayload {
    pub message: String,
    pub level: LogLevel,
    pub time: i64,
}

/// File attached to a log entry. The client is responsible for reading it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFile {
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}

impl LogFile {
    /// PNG screenshot named after its file name
    pub fn png(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            mime_type: "image/png".to_string(),
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ItemStatus::Failed).unwrap(), json!("failed"));
        assert_eq!(serde_json::to_value(LogLevel::Info).unwrap(), json!("info"));
    }

    #[test]
    fn test_item_type_serializes_screaming() {
        assert_eq!(
            serde_json::to_value(ItemType::BeforeMethod).unwrap(),
            json!("BEFORE_METHOD")
        );
    }

    #[test]
    fn test_finish_payload_skips_empty_fields() {
        let payload = FinishItemPayload {
            end_time: 10,
            ..Default::default()
        };

        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value, json!({"endTime": 10}));
    }

    #[test]
    fn test_attribute_system_flag() {
        let attr = Attribute::system("agent", "rp-reporter|0.1.0");
        assert!(attr.system);
        assert_eq!(attr.key.as_deref(), Some("agent"));

        let value = serde_json::to_value(Attribute::tag("smoke")).unwrap();
        assert_eq!(value, json!({"value": "smoke"}));
    }

    #[test]
    fn test_log_file_png_uses_file_name() {
        let file = LogFile::png("/tmp/shots/login (failed).png");
        assert_eq!(file.name, "login (failed).png");
        assert_eq!(file.mime_type, "image/png");
    }
}
