//! Profile Entity
//!
//! Whatever the backend returns for a user. The shape belongs to the backend,
//! so it is kept as a JSON object and relayed to the views untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(Map<String, Value>);

/// One label/value pair, flattened for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileField {
    pub label: String,
    pub value: String,
}

impl Profile {
    /// Flattened fields; strings are shown without quotes, nulls as blanks
    pub fn fields(&self) -> Vec<ProfileField> {
        self.0
            .iter()
            .map(|(label, value)| ProfileField {
                label: label.clone(),
                value: match value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                },
            })
            .collect()
    }
}

impl From<Map<String, Value>> for Profile {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_flatten_values() {
        let profile: Profile = serde_json::from_value(json!({
            "Nombre": "Ann",
            "Edad": 31,
            "Telefono": null
        }))
        .unwrap();

        let fields = profile.fields();
        assert!(fields.contains(&ProfileField {
            label: "Nombre".into(),
            value: "Ann".into()
        }));
        assert!(fields.contains(&ProfileField {
            label: "Edad".into(),
            value: "31".into()
        }));
        assert!(fields.contains(&ProfileField {
            label: "Telefono".into(),
            value: String::new()
        }));
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(serde_json::from_value::<Profile>(json!(["a", "b"])).is_err());
    }
}
