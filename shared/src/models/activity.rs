//! Activity Model (actividades)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::decode_document;
use super::serde_helpers::{non_empty_string, number_or_zero};
use crate::error::AppResult;

/// Group used when an activity carries no `tipo`
pub const DEFAULT_ACTIVITY_GROUP: &str = "Otros";

/// Activity record, one per executed task line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Activity {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(
        rename = "tipo",
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,

    /// `YYYY-MM-DD`
    #[serde(rename = "fecha", default)]
    pub date: String,

    #[serde(
        rename = "ubicacion",
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    #[serde(rename = "costo", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub cost: f64,

    #[serde(rename = "valor", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub value: f64,

    /// Measured quantity (metrado)
    #[serde(rename = "metrado", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub quantity: f64,

    #[serde(rename = "horas", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub hours: f64,

    #[serde(rename = "productividad", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub productivity: f64,

    #[serde(rename = "meta", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub target: f64,
}

impl Activity {
    /// Decode a raw store document keyed by `id`
    pub fn from_document(id: &str, document: Value) -> AppResult<Self> {
        let mut activity: Activity = decode_document("activity", document)?;
        if activity.id.is_empty() {
            activity.id = id.to_string();
        }
        Ok(activity)
    }

    /// valor − costo
    pub fn profit(&self) -> f64 {
        self.value - self.cost
    }

    /// `tipo`, or [`DEFAULT_ACTIVITY_GROUP`]
    pub fn group(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_ACTIVITY_GROUP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_from_document_defaults() {
        let activity = Activity::from_document(
            "act-1",
            json!({"nombre": "Vaciado de losa", "tipo": "", "costo": 50, "valor": "100"}),
        )
        .unwrap();

        assert_eq!(activity.id, "act-1");
        assert_eq!(activity.group(), DEFAULT_ACTIVITY_GROUP);
        assert_eq!(activity.profit(), 50.0);
        assert_eq!(activity.hours, 0.0);
        assert!(activity.location.is_none());
    }

    #[test]
    fn test_from_document_rejects_negative_hours() {
        let err = Activity::from_document("act-2", json!({"horas": -1})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDocument);
    }
}
