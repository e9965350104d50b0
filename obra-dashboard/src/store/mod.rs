//! Document Store
//!
//! Opaque document-database collaborator. The dashboard only reads; writes
//! exist for seeding and tests.
//!
//! # Adapters
//!
//! - [`SurrealStore`] - embedded SurrealDB (RocksDB on disk, or in-memory)
//! - [`MemoryStore`] - in-process map, backs the mock data source

pub mod demo;
pub mod memory;
pub mod surreal;

pub use memory::MemoryStore;
pub use surreal::SurrealStore;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store unavailable")]
    Unavailable,

    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("Invalid field name: {0}")]
    InvalidField(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Query failed: {0}")]
    Backend(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => AppError::store_unavailable(),
            StoreError::NotFound { collection, id } => AppError::with_message(
                ErrorCode::DocumentNotFound,
                format!("Document not found: {}/{}", collection, id),
            )
            .with_detail("collection", collection)
            .with_detail("id", id),
            StoreError::InvalidField(field) => AppError::with_message(
                ErrorCode::InvalidQuery,
                format!("Invalid field name: {}", field),
            ),
            StoreError::InvalidDocument(msg) => {
                AppError::with_message(ErrorCode::InvalidDocument, msg)
            }
            StoreError::Backend(msg) => AppError::query_failure(msg),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Query model
// =============================================================================

/// Comparison applied by a [`Predicate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Gte,
    Lte,
}

impl Comparison {
    pub fn as_operator(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }
}

/// `field <op> value`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub op: Comparison,
    pub value: Value,
}

impl Predicate {
    /// Evaluate against one document's fields
    ///
    /// Strings compare lexicographically, numbers numerically. A missing
    /// field or a type mismatch never matches.
    pub fn matches(&self, fields: &Value) -> bool {
        let Some(actual) = fields.get(&self.field) else {
            return false;
        };
        match (self.op, compare_values(actual, &self.value)) {
            (Comparison::Eq, Some(ord)) => ord == Ordering::Equal,
            (Comparison::Eq, None) => actual == &self.value,
            (Comparison::Gte, Some(ord)) => ord != Ordering::Less,
            (Comparison::Lte, Some(ord)) => ord != Ordering::Greater,
            (_, None) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub order: SortOrder,
}

/// Generic collection query: AND-ed predicates, optional ordering and cap
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentQuery {
    pub predicates: Vec<Predicate>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, field: impl Into<String>, op: Comparison, value: impl Into<Value>) -> Self {
        self.predicates.push(Predicate {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Comparison::Eq, value)
    }

    pub fn gte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Comparison::Gte, value)
    }

    pub fn lte(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, Comparison::Lte, value)
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            order,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Reject field names that are not plain identifiers
    pub fn validate(&self) -> StoreResult<()> {
        for predicate in &self.predicates {
            validate_identifier(&predicate.field)?;
        }
        if let Some(order_by) = &self.order_by {
            validate_identifier(&order_by.field)?;
        }
        Ok(())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn validate_identifier(name: &str) -> StoreResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidField(name.to_string()))
    }
}

/// Ordering between two scalar JSON values of the same kind
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// A document as returned by the store: key plus field map
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Value,
}

// =============================================================================
// Store trait
// =============================================================================

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run `query` against `collection`; an unknown collection yields no rows
    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> StoreResult<Vec<StoredDocument>>;

    async fn get_document(&self, collection: &str, id: &str) -> StoreResult<StoredDocument>;

    /// Insert or replace a document
    async fn put_document(&self, collection: &str, id: &str, fields: Value) -> StoreResult<()>;
}

/// Shared, opaque store capability
pub type StoreHandle = Arc<dyn DocumentStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("fecha").is_ok());
        assert!(validate_identifier("_periodo2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fecha").is_err());
        assert!(validate_identifier("fecha; DELETE").is_err());
        assert!(validate_identifier("metricas.costoTotal").is_err());
    }

    #[test]
    fn test_predicate_string_bounds() {
        let doc = json!({"fecha": "2024-02-15", "periodo": "diario"});
        let gte = Predicate {
            field: "fecha".into(),
            op: Comparison::Gte,
            value: json!("2024-02-01"),
        };
        let lte = Predicate {
            field: "fecha".into(),
            op: Comparison::Lte,
            value: json!("2024-02-31"),
        };
        assert!(gte.matches(&doc));
        assert!(lte.matches(&doc));
    }

    #[test]
    fn test_predicate_numbers_and_mismatch() {
        let doc = json!({"semana": 2});
        let eq = Predicate {
            field: "semana".into(),
            op: Comparison::Eq,
            value: json!(2.0),
        };
        assert!(eq.matches(&doc));

        let wrong_type = Predicate {
            field: "semana".into(),
            op: Comparison::Gte,
            value: json!("1"),
        };
        assert!(!wrong_type.matches(&doc));

        let missing = Predicate {
            field: "mes".into(),
            op: Comparison::Eq,
            value: json!(1),
        };
        assert!(!missing.matches(&doc));
    }

    #[test]
    fn test_query_validate() {
        let ok = DocumentQuery::new()
            .eq("periodo", "diario")
            .order_by("fecha", SortOrder::Asc);
        assert!(ok.validate().is_ok());

        let bad = DocumentQuery::new().order_by("fecha DESC", SortOrder::Asc);
        assert!(matches!(bad.validate(), Err(StoreError::InvalidField(_))));
    }

    #[test]
    fn test_store_error_mapping() {
        let err: AppError = StoreError::Unavailable.into();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);

        let err: AppError = StoreError::Backend("connection reset".into()).into();
        assert_eq!(err.code, ErrorCode::QueryFailure);
        assert_eq!(err.message, "connection reset");

        let err: AppError = StoreError::NotFound {
            collection: "reportes".into(),
            id: "r-9".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::DocumentNotFound);
    }
}
