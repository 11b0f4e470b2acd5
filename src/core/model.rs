//! Postmark template records and the PUT payload derived from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whether a record is a regular template or a layout wrapping other
/// templates. The variant decides where the record lives in the mirror.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateType {
    #[default]
    Standard,
    Layout,
}

impl TemplateType {
    /// Upload order: templates first, then layouts.
    pub const ALL: [TemplateType; 2] = [TemplateType::Standard, TemplateType::Layout];

    /// Mirror root directory for this kind
    pub fn dir_name(self) -> &'static str {
        match self {
            TemplateType::Standard => "templates",
            TemplateType::Layout => "layouts",
        }
    }

    /// File stem shared by the `.json`, `.html` and `.txt` files of an entry
    pub fn file_stem(self) -> &'static str {
        match self {
            TemplateType::Standard => "template",
            TemplateType::Layout => "layout",
        }
    }
}

/// One entry of `GET /templates`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateSummary {
    pub template_id: u64,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub template_type: TemplateType,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub layout_template: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateList {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub templates: Vec<TemplateSummary>,
}

/// A PUT field that keeps an explicit JSON `null` apart from a missing key:
/// missing is `None`, `null` is `Some(None)`.
pub type Nullable<T> = Option<Option<T>>;

/// `serde(with)` adapter for [`Nullable`] fields. Pair it with `default` so a
/// missing key lands on `None`, and with `skip_serializing_if` so it stays missing.
mod nullable {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Full template detail as returned by `GET /templates/{id}` and as stored
/// in `template.json` / `layout.json`.
///
/// Every named field is optional so hand-edited metadata can still be read.
/// The fields sent back on upload remember whether they were `null` or
/// missing. Fields Postmark returns that are not named here are kept in
/// `extra` and written back to disk untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateRecord {
    pub template_id: Option<u64>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub name: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub subject: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub html_body: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub text_body: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub alias: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub template_type: Nullable<TemplateType>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub layout_template: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub associated_server_id: Nullable<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateRecord {
    pub fn kind(&self) -> TemplateType {
        self.template_type.flatten().unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|name| name.as_deref())
    }

    pub fn html_body(&self) -> Option<&str> {
        self.html_body.as_ref().and_then(|body| body.as_deref())
    }

    pub fn text_body(&self) -> Option<&str> {
        self.text_body.as_ref().and_then(|body| body.as_deref())
    }

    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("<unnamed>")
    }
}

/// Body of `PUT /templates/{id}`: the fixed field set. A `null` in the
/// metadata is sent as `null`, a missing key is left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TemplateUpdate {
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub name: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub subject: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub html_body: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub text_body: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub alias: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub template_type: Nullable<TemplateType>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub layout_template: Nullable<String>,
    #[serde(with = "nullable", skip_serializing_if = "Option::is_none")]
    pub associated_server_id: Nullable<u64>,
}

impl From<&TemplateRecord> for TemplateUpdate {
    fn from(record: &TemplateRecord) -> Self {
        TemplateUpdate {
            name: record.name.clone(),
            subject: record.subject.clone(),
            html_body: record.html_body.clone(),
            text_body: record.text_body.clone(),
            alias: record.alias.clone(),
            template_type: record.template_type,
            layout_template: record.layout_template.clone(),
            associated_server_id: record.associated_server_id,
        }
    }
}

/// Error body Postmark sends with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostmarkErrorBody {
    #[serde(default)]
    pub error_code: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_type_serializes_as_provider_strings() {
        assert_eq!(serde_json::to_value(TemplateType::Standard).unwrap(), json!("Standard"));
        assert_eq!(serde_json::to_value(TemplateType::Layout).unwrap(), json!("Layout"));
        let parsed: TemplateType = serde_json::from_value(json!("Layout")).unwrap();
        assert_eq!(parsed, TemplateType::Layout);
    }

    #[test]
    fn test_summary_defaults_to_standard() {
        let summary: TemplateSummary =
            serde_json::from_value(json!({"TemplateId": 7, "Name": "Welcome"})).unwrap();
        assert_eq!(summary.template_type, TemplateType::Standard);
        assert_eq!(summary.alias, None);
    }

    #[test]
    fn test_record_keeps_unknown_fields() {
        let detail = json!({
            "TemplateId": 1,
            "Name": "Welcome",
            "Subject": "Hi {{name}}",
            "HtmlBody": "<p>Hi</p>",
            "TextBody": null,
            "Alias": "welcome",
            "TemplateType": "Standard",
            "LayoutTemplate": null,
            "AssociatedServerId": 99,
            "Active": true
        });

        let record: TemplateRecord = serde_json::from_value(detail.clone()).unwrap();
        assert_eq!(record.template_id, Some(1));
        assert_eq!(record.kind(), TemplateType::Standard);
        assert_eq!(record.extra.get("Active"), Some(&json!(true)));

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written, detail);
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: TemplateRecord = serde_json::from_value(json!({"Subject": "only"})).unwrap();
        assert_eq!(record.template_id, None);
        assert_eq!(record.name, None);
        assert_eq!(record.kind(), TemplateType::Standard);
        assert_eq!(record.display_name(), "<unnamed>");
    }

    #[test]
    fn test_update_omits_absent_fields() {
        let record = TemplateRecord {
            template_id: Some(3),
            name: Some(Some("Receipt".to_string())),
            html_body: Some(Some("<b>x</b>".to_string())),
            template_type: Some(Some(TemplateType::Layout)),
            ..Default::default()
        };

        let body = serde_json::to_value(TemplateUpdate::from(&record)).unwrap();
        assert_eq!(
            body,
            json!({"Name": "Receipt", "HtmlBody": "<b>x</b>", "TemplateType": "Layout"})
        );
    }

    #[test]
    fn test_update_sends_explicit_nulls() {
        let record: TemplateRecord = serde_json::from_value(json!({
            "TemplateId": 1,
            "Name": "Welcome",
            "HtmlBody": "<p>x</p>",
            "LayoutTemplate": null,
            "TextBody": null
        }))
        .unwrap();

        assert_eq!(record.layout_template, Some(None));
        assert_eq!(record.subject, None);
        assert_eq!(record.text_body(), None);

        let body = serde_json::to_value(TemplateUpdate::from(&record)).unwrap();
        assert_eq!(
            body,
            json!({"Name": "Welcome", "HtmlBody": "<p>x</p>", "LayoutTemplate": null, "TextBody": null})
        );
    }
}
