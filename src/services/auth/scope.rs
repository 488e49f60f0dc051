//! Office scope carried on user records and attached to decisions.
use serde::{Deserialize, Serialize};

/// Office assignment on a user record.
///
/// Historically this column held free-form JSON that was stringified blindly.
/// The variants below pin down the shapes we actually accept while keeping
/// the serialized scope token byte-compatible with what the downstream field
/// filter already understands:
/// - `One("NY")`          -> `"\"NY\""`
/// - `Many(["NY","SF"])`  -> `"[\"NY\",\"SF\"]"`
/// - `Other({..})`        -> the value's JSON text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OfficeId {
    One(String),
    Many(Vec<String>),
    Other(serde_json::Value),
}

impl OfficeId {
    /// Serialize to the scope token handed to the field-filtering layer.
    /// One rule per variant: each is exactly its JSON text.
    pub fn to_scope_token(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_serializes_to_quoted_string() {
        let office = OfficeId::One("NY".to_string());
        assert_eq!(office.to_scope_token().unwrap(), r#""NY""#);
    }

    #[test]
    fn list_serializes_to_json_array() {
        let office = OfficeId::Many(vec!["NY".to_string(), "SF".to_string()]);
        assert_eq!(office.to_scope_token().unwrap(), r#"["NY","SF"]"#);
    }

    #[test]
    fn structured_value_serializes_to_its_json_text() {
        let office = OfficeId::Other(json!({"region": "east", "codes": ["NY"]}));
        assert_eq!(
            office.to_scope_token().unwrap(),
            r#"{"codes":["NY"],"region":"east"}"#
        );
    }

    #[test]
    fn deserializes_each_stored_shape() {
        let one: OfficeId = serde_json::from_value(json!("NY")).unwrap();
        assert_eq!(one, OfficeId::One("NY".to_string()));

        let many: OfficeId = serde_json::from_value(json!(["NY", "SF"])).unwrap();
        assert_eq!(
            many,
            OfficeId::Many(vec!["NY".to_string(), "SF".to_string()])
        );

        let other: OfficeId = serde_json::from_value(json!({"region": "east"})).unwrap();
        assert_eq!(other, OfficeId::Other(json!({"region": "east"})));
    }

    #[test]
    fn round_trips_through_scope_token() {
        let office = OfficeId::Many(vec!["NY".to_string(), "SF".to_string()]);
        let token = office.to_scope_token().unwrap();
        let back: OfficeId = serde_json::from_str(&token).unwrap();
        assert_eq!(back, office);
    }
}
