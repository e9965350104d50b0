//! Worker Model (obreros)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::decode_document;
use super::filter::WorkerCategory;
use super::serde_helpers::{non_empty_string, number_or_zero, optional_number};
use crate::error::AppResult;

/// Worker record with the productivity figures of its last reporting window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Worker {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "nombre", default)]
    pub name: String,

    #[serde(rename = "categoria")]
    pub category: WorkerCategory,

    #[serde(
        rename = "ubicacion",
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    #[serde(rename = "horas", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub hours: f64,

    #[serde(rename = "productividad", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub productivity: f64,

    /// Individual productivity target; falls back to the category baseline
    #[serde(
        rename = "meta",
        default,
        deserialize_with = "optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 0.0))]
    pub target: Option<f64>,

    #[serde(rename = "costo", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub cost: f64,

    #[serde(rename = "valor", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub value: f64,

    /// Efficiency as stored by the batch job, if any
    #[serde(
        rename = "eficiencia",
        default,
        deserialize_with = "optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub stored_efficiency: Option<f64>,
}

impl Worker {
    /// Decode a raw store document keyed by `id`
    pub fn from_document(id: &str, document: Value) -> AppResult<Self> {
        let mut worker: Worker = decode_document("worker", document)?;
        if worker.id.is_empty() {
            worker.id = id.to_string();
        }
        Ok(worker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_from_document() {
        let worker = Worker::from_document(
            "w-7",
            json!({
                "nombre": "Juan Quispe",
                "categoria": "OFICIAL",
                "ubicacion": "Bloque A",
                "horas": 48,
                "productividad": 1.2,
                "meta": null
            }),
        )
        .unwrap();

        assert_eq!(worker.id, "w-7");
        assert_eq!(worker.category, WorkerCategory::Oficial);
        assert_eq!(worker.target, None);
        assert_eq!(worker.location.as_deref(), Some("Bloque A"));
    }

    #[test]
    fn test_from_document_unknown_category() {
        let err = Worker::from_document("w-8", json!({"categoria": "CAPATAZ"})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDocument);
    }
}
