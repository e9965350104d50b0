//! Daily Report Model (reportes)
//!
//! Field report submitted by a site supervisor; the batch job rolls these up
//! into period summaries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::decode_document;
use super::serde_helpers::{count_or_zero, non_empty_string, number_or_zero};
use crate::error::AppResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Report {
    #[serde(default)]
    pub id: String,

    /// `YYYY-MM-DD`
    #[serde(rename = "fecha", default)]
    pub date: String,

    #[serde(
        rename = "responsable",
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub supervisor: Option<String>,

    #[serde(
        rename = "ubicacion",
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,

    #[serde(rename = "actividades", default, deserialize_with = "count_or_zero")]
    pub activities: u64,

    #[serde(rename = "trabajadores", default, deserialize_with = "count_or_zero")]
    pub workers: u64,

    #[serde(rename = "horas", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub hours: f64,

    #[serde(rename = "costo", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub cost: f64,

    #[serde(rename = "valor", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub value: f64,

    /// Workflow status as written by the field app (e.g. `pendiente`, `aprobado`)
    #[serde(
        rename = "estado",
        default,
        deserialize_with = "non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
}

impl Report {
    /// Decode a raw store document keyed by `id`
    pub fn from_document(id: &str, document: Value) -> AppResult<Self> {
        let mut report: Report = decode_document("report", document)?;
        if report.id.is_empty() {
            report.id = id.to_string();
        }
        Ok(report)
    }

    pub fn profit(&self) -> f64 {
        self.value - self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_document() {
        let report = Report::from_document(
            "r-1",
            json!({
                "fecha": "2023-11-15",
                "responsable": "Ing. Rojas",
                "actividades": 4,
                "trabajadores": "12",
                "costo": 820.5,
                "valor": 1000
            }),
        )
        .unwrap();

        assert_eq!(report.id, "r-1");
        assert_eq!(report.workers, 12);
        assert_eq!(report.hours, 0.0);
        assert!(report.status.is_none());
        assert!((report.profit() - 179.5).abs() < 1e-9);
    }
}
