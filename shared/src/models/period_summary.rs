//! Period Summary Model (周期汇总)
//!
//! Precomputed aggregate written by the external batch job, one document per
//! (periodo, fecha). Read-only from the dashboard's point of view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use validator::Validate;

use super::serde_helpers::{count_or_zero, null_as_default, number_or_zero};
use crate::error::{AppError, AppResult, ErrorCode};

/// Date format used by every stored `fecha`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Summary granularity (`periodo`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Diario,
    Semanal,
    Mensual,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diario => "diario",
            Self::Semanal => "semanal",
            Self::Mensual => "mensual",
        }
    }
}

/// `metricas` block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SummaryMetrics {
    #[serde(rename = "costoTotal", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub total_cost: f64,

    #[serde(rename = "valorTotal", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub total_value: f64,

    #[serde(rename = "totalHoras", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub total_hours: f64,

    #[serde(
        rename = "productividadPromedio",
        default,
        deserialize_with = "number_or_zero"
    )]
    #[validate(range(min = 0.0))]
    pub avg_productivity: f64,

    #[serde(
        rename = "reportesProcesados",
        default,
        deserialize_with = "count_or_zero"
    )]
    pub processed_reports: u64,
}

/// One `porCategoria` entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CategoryBreakdown {
    #[serde(rename = "cantidad", default, deserialize_with = "count_or_zero")]
    pub headcount: u64,

    #[serde(rename = "horas", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub hours: f64,

    #[serde(rename = "costo", default, deserialize_with = "number_or_zero")]
    #[validate(range(min = 0.0))]
    pub cost: f64,
}

/// Period summary document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(rename = "periodo")]
    pub period: PeriodKind,

    /// Week number, only present on `semanal` documents
    #[serde(rename = "semana", default, skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,

    #[serde(rename = "metricas", default, deserialize_with = "null_as_default")]
    pub metrics: SummaryMetrics,

    #[serde(rename = "porCategoria", default, deserialize_with = "null_as_default")]
    pub by_category: BTreeMap<String, CategoryBreakdown>,
}

impl PeriodSummary {
    /// Decode a raw store document, filling defaults and validating once
    ///
    /// This is the only place where the loose document shape is accepted;
    /// everything downstream works with fully populated values.
    pub fn from_document(document: Value) -> AppResult<Self> {
        let summary: PeriodSummary = serde_json::from_value(document).map_err(|e| {
            AppError::with_message(
                ErrorCode::InvalidDocument,
                format!("Malformed period summary: {}", e),
            )
        })?;
        summary.validate_schema()?;
        Ok(summary)
    }

    /// Reject negative figures and malformed dates
    pub fn validate_schema(&self) -> AppResult<()> {
        if NaiveDate::parse_from_str(&self.date, DATE_FORMAT).is_err() {
            return Err(AppError::with_message(
                ErrorCode::InvalidDocument,
                format!("Invalid fecha in period summary: {}", self.date),
            )
            .with_detail("fecha", self.date.clone()));
        }

        self.metrics.validate().map_err(|e| {
            AppError::with_message(
                ErrorCode::InvalidDocument,
                format!("Invalid metricas in period summary {}: {}", self.date, e),
            )
        })?;

        for (name, breakdown) in &self.by_category {
            breakdown.validate().map_err(|e| {
                AppError::with_message(
                    ErrorCode::InvalidDocument,
                    format!("Invalid porCategoria.{} in {}: {}", name, self.date, e),
                )
            })?;
        }
        Ok(())
    }

    /// Workers on site for this period (Σ porCategoria[*].cantidad)
    pub fn worker_count(&self) -> u64 {
        self.by_category.values().map(|c| c.headcount).sum()
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}
