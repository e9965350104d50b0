//! Dashboard Filter Model (报表筛选)
//!
//! Field names follow the dashboard's document conventions (`tipoFiltro`,
//! `semana`, `mes`, `rango`, `categoria`, `ubicacion`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, ErrorCode};

/// Literal used by the UI for "no category / location restriction"
pub const ALL_LITERAL: &str = "TODAS";

/// Reporting window kind (`tipoFiltro`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterKind {
    #[default]
    #[serde(rename = "dia", alias = "day")]
    Day,
    #[serde(rename = "semana", alias = "week")]
    Week,
    #[serde(rename = "mes", alias = "month")]
    Month,
    #[serde(rename = "rango", alias = "range")]
    Range,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "dia",
            Self::Week => "semana",
            Self::Month => "mes",
            Self::Range => "rango",
        }
    }
}

impl FromStr for FilterKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dia" | "día" | "day" => Ok(Self::Day),
            "semana" | "week" => Ok(Self::Week),
            "mes" | "month" => Ok(Self::Month),
            "rango" | "range" => Ok(Self::Range),
            _ => Err(AppError::invalid_filter_kind(s)),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worker category (categoría de obrero)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WorkerCategory {
    Operario,
    Oficial,
    Peon,
}

impl WorkerCategory {
    pub const ALL: [WorkerCategory; 3] = [Self::Operario, Self::Oficial, Self::Peon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operario => "OPERARIO",
            Self::Oficial => "OFICIAL",
            Self::Peon => "PEON",
        }
    }
}

impl FromStr for WorkerCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPERARIO" => Ok(Self::Operario),
            "OFICIAL" => Ok(Self::Oficial),
            "PEON" | "PEÓN" => Ok(Self::Peon),
            _ => Err(AppError::with_message(
                ErrorCode::InvalidCategory,
                format!("Unrecognized worker category: {}", s),
            )),
        }
    }
}

impl fmt::Display for WorkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `categoria` filter: TODAS or one worker category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(WorkerCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: WorkerCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => *c == category,
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_LITERAL) {
            return Ok(Self::All);
        }
        trimmed.parse().map(Self::Only)
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => ALL_LITERAL.to_string(),
            CategoryFilter::Only(c) => c.as_str().to_string(),
        }
    }
}

/// `ubicacion` filter: TODAS or one site block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationFilter {
    #[default]
    All,
    Only(String),
}

impl LocationFilter {
    pub fn matches(&self, location: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => location.is_some_and(|l| l == wanted),
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(l) => Some(l.as_str()),
        }
    }
}

impl From<String> for LocationFilter {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_LITERAL) {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }
}

impl From<LocationFilter> for String {
    fn from(value: LocationFilter) -> Self {
        match value {
            LocationFilter::All => ALL_LITERAL.to_string(),
            LocationFilter::Only(l) => l,
        }
    }
}

/// Raw `rango` as entered in the UI; ends are `YYYY-MM-DD` strings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fin: Option<String>,
}

/// User intent for a reporting window
///
/// Only one of `week` / `month` / `range` is authoritative for a given
/// `kind`; the others are carried but ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    #[serde(rename = "tipoFiltro", default)]
    pub kind: FilterKind,
    /// `YYYY-Www`
    #[serde(rename = "semana", default, skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
    /// `YYYY-MM`
    #[serde(rename = "mes", default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(rename = "rango", default)]
    pub range: RangeInput,
    #[serde(rename = "categoria", default)]
    pub category: CategoryFilter,
    #[serde(rename = "ubicacion", default)]
    pub location: LocationFilter,
}

impl Filters {
    /// Single day ending at `fin`
    pub fn day(fin: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Day,
            range: RangeInput {
                inicio: None,
                fin: Some(fin.into()),
            },
            ..Default::default()
        }
    }

    pub fn week(semana: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Week,
            week: Some(semana.into()),
            ..Default::default()
        }
    }

    pub fn month(mes: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Month,
            month: Some(mes.into()),
            ..Default::default()
        }
    }

    pub fn range(inicio: impl Into<String>, fin: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Range,
            range: RangeInput {
                inicio: Some(inicio.into()),
                fin: Some(fin.into()),
            },
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_location(mut self, location: LocationFilter) -> Self {
        self.location = location;
        self
    }
}
