//! Column schema shared by every report.

use serde::{Deserialize, Serialize};

/// Field type of a report column, serialized with its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Reference to another record type named by `options`.
    Link,
    /// Reference whose record type is held in the field named by `options`.
    #[serde(rename = "Dynamic Link")]
    DynamicLink,
    /// Plain text.
    Data,
    /// Short multi-line text.
    #[serde(rename = "Small Text")]
    SmallText,
    /// Integer.
    Int,
    /// Calendar date.
    Date,
    /// Money amount.
    Currency,
}

/// A column descriptor returned alongside report rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column header.
    pub label: String,
    /// Key of the value in each row.
    pub fieldname: String,
    /// Field type.
    pub fieldtype: FieldType,
    /// Link target for `Link` / `DynamicLink` columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
    /// Display width.
    pub width: u32,
}

impl Column {
    /// Creates a column without link target.
    #[must_use]
    pub fn new(label: &str, fieldname: &str, fieldtype: FieldType, width: u32) -> Self {
        Self {
            label: label.to_string(),
            fieldname: fieldname.to_string(),
            fieldtype,
            options: None,
            width,
        }
    }

    /// Creates a `Link` column pointing at `target`.
    #[must_use]
    pub fn link(label: &str, fieldname: &str, target: &str, width: u32) -> Self {
        Self::new(label, fieldname, FieldType::Link, width).with_options(target)
    }

    /// Creates a `Dynamic Link` column whose target type is read from `type_field`.
    #[must_use]
    pub fn dynamic_link(label: &str, fieldname: &str, type_field: &str, width: u32) -> Self {
        Self::new(label, fieldname, FieldType::DynamicLink, width).with_options(type_field)
    }

    /// Sets the link target.
    #[must_use]
    pub fn with_options(mut self, options: &str) -> Self {
        self.options = Some(options.to_string());
        self
    }
}

/// A generic report row: field key to value.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_display_names() {
        assert_eq!(json!(FieldType::DynamicLink), json!("Dynamic Link"));
        assert_eq!(json!(FieldType::SmallText), json!("Small Text"));
        assert_eq!(json!(FieldType::Currency), json!("Currency"));
    }

    #[test]
    fn test_link_column_serialization() {
        let column = Column::link("Employee", "employee", "Employee", 130);
        assert_eq!(
            serde_json::to_value(&column).unwrap(),
            json!({
                "label": "Employee",
                "fieldname": "employee",
                "fieldtype": "Link",
                "options": "Employee",
                "width": 130
            })
        );
    }

    #[test]
    fn test_plain_column_omits_options() {
        let value = serde_json::to_value(Column::new("P", "total_present", FieldType::Int, 55)).unwrap();
        assert!(value.get("options").is_none());
    }
}
