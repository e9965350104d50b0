//! Period query builder
//!
//! Normalized period → summary query. Dates are compared as zero-padded
//! `YYYY-MM-DD` strings on every path.

use serde::Serialize;
use shared::models::{FilterKind, PeriodKind};

use super::range::{DateRange, ResolvedPeriod, WeekKey};
use crate::store::{DocumentQuery, SortOrder};
use crate::utils::AppResult;
use crate::utils::time::format_date;

/// Hard cap on daily summaries returned for a custom range
pub const RANGE_QUERY_LIMIT: usize = 31;

/// Document field names on period summaries
pub mod fields {
    pub const PERIOD: &str = "periodo";
    pub const DATE: &str = "fecha";
    pub const WEEK: &str = "semana";
}

/// How `fecha` is constrained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBounds {
    Exact(String),
    Between { from: String, to: String },
}

/// Summary query derived from a filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    pub period: PeriodKind,
    pub date: DateBounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<u32>,
    /// Ordering on `fecha`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    pub limit: usize,
}

impl QuerySpec {
    /// Daily summaries across `range`, ascending, capped at [`RANGE_QUERY_LIMIT`]
    pub fn daily_series(range: &DateRange) -> Self {
        Self {
            period: PeriodKind::Diario,
            date: DateBounds::Between {
                from: range.inicio_str(),
                to: range.fin_str(),
            },
            week: None,
            order: Some(SortOrder::Asc),
            limit: RANGE_QUERY_LIMIT,
        }
    }

    /// Lower to the generic store query
    pub fn to_document_query(&self) -> DocumentQuery {
        let mut query = DocumentQuery::new().eq(fields::PERIOD, self.period.as_str());

        query = match &self.date {
            DateBounds::Exact(date) => query.eq(fields::DATE, date.as_str()),
            DateBounds::Between { from, to } => query
                .gte(fields::DATE, from.as_str())
                .lte(fields::DATE, to.as_str()),
        };

        if let Some(week) = self.week {
            query = query.eq(fields::WEEK, week);
        }

        if let Some(order) = self.order {
            query = query.order_by(fields::DATE, order);
        }

        query.limit(self.limit)
    }
}

/// Build the summary query for `kind` over `range`
///
/// For weeks, `week` supplies the year/number; when absent it is derived
/// from `range.inicio`.
pub fn build_query(kind: FilterKind, range: &DateRange, week: Option<WeekKey>) -> QuerySpec {
    match kind {
        FilterKind::Day => QuerySpec {
            period: PeriodKind::Diario,
            date: DateBounds::Exact(range.fin_str()),
            week: None,
            order: None,
            limit: 1,
        },
        FilterKind::Week => {
            let key = week.unwrap_or_else(|| WeekKey::containing(range.inicio));
            QuerySpec {
                period: PeriodKind::Semanal,
                date: DateBounds::Between {
                    from: format!("{:04}-01-01", key.year),
                    to: format!("{:04}-12-31", key.year),
                },
                week: Some(key.week),
                order: None,
                limit: 1,
            }
        }
        FilterKind::Month => {
            let prefix = format_date(range.inicio);
            // "YYYY-MM"
            let month = &prefix[..7];
            QuerySpec {
                period: PeriodKind::Mensual,
                date: DateBounds::Between {
                    from: format!("{}-01", month),
                    to: format!("{}-31", month),
                },
                week: None,
                order: None,
                limit: 1,
            }
        }
        FilterKind::Range => QuerySpec::daily_series(range),
    }
}

/// Build from a resolver result
pub fn build_query_for(period: &ResolvedPeriod) -> QuerySpec {
    build_query(period.kind, &period.range, period.week)
}

/// Build from a raw `tipoFiltro`; unknown kinds fail with `InvalidFilterKind`
pub fn build_query_raw(kind: &str, range: &DateRange, week: Option<WeekKey>) -> AppResult<QuerySpec> {
    let kind: FilterKind = kind.parse()?;
    Ok(build_query(kind, range, week))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Comparison, Predicate};
    use chrono::NaiveDate;
    use serde_json::json;
    use shared::ErrorCode;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_day_query() {
        let spec = build_query(FilterKind::Day, &DateRange::single(d("2023-11-15")), None);
        assert_eq!(spec.period, PeriodKind::Diario);
        assert_eq!(spec.date, DateBounds::Exact("2023-11-15".into()));
        assert_eq!(spec.limit, 1);

        let query = spec.to_document_query();
        assert_eq!(
            query.predicates,
            vec![
                Predicate {
                    field: "periodo".into(),
                    op: Comparison::Eq,
                    value: json!("diario"),
                },
                Predicate {
                    field: "fecha".into(),
                    op: Comparison::Eq,
                    value: json!("2023-11-15"),
                },
            ]
        );
        assert_eq!(query.limit, Some(1));
        assert!(query.order_by.is_none());
    }

    #[test]
    fn test_week_query_uses_key_year() {
        let key = WeekKey { year: 2024, week: 1 };
        let range = key.range().unwrap();
        let spec = build_query(FilterKind::Week, &range, Some(key));
        assert_eq!(spec.period, PeriodKind::Semanal);
        assert_eq!(
            spec.date,
            DateBounds::Between {
                from: "2024-01-01".into(),
                to: "2024-12-31".into()
            }
        );
        assert_eq!(spec.week, Some(1));
        assert_eq!(spec.limit, 1);

        let query = spec.to_document_query();
        assert!(query.predicates.contains(&Predicate {
            field: "semana".into(),
            op: Comparison::Eq,
            value: json!(1),
        }));
    }

    #[test]
    fn test_week_query_derives_key_from_inicio() {
        let range = DateRange::new(d("2023-11-13"), d("2023-11-19"));
        let spec = build_query(FilterKind::Week, &range, None);
        assert_eq!(spec.week, Some(46));
        assert_eq!(
            spec.date,
            DateBounds::Between {
                from: "2023-01-01".into(),
                to: "2023-12-31".into()
            }
        );
    }

    #[test]
    fn test_month_query_lenient_upper_bound() {
        let range = DateRange::new(d("2024-02-01"), d("2024-02-29"));
        let spec = build_query(FilterKind::Month, &range, None);
        assert_eq!(spec.period, PeriodKind::Mensual);
        assert_eq!(
            spec.date,
            DateBounds::Between {
                from: "2024-02-01".into(),
                to: "2024-02-31".into()
            }
        );
        assert_eq!(spec.limit, 1);
    }

    #[test]
    fn test_range_query_capped_at_31() {
        let range = DateRange::new(d("2024-01-01"), d("2024-12-31"));
        let spec = build_query(FilterKind::Range, &range, None);
        assert_eq!(spec.period, PeriodKind::Diario);
        assert_eq!(spec.limit, RANGE_QUERY_LIMIT);
        assert_eq!(spec.limit, 31);
        assert_eq!(spec.order, Some(SortOrder::Asc));

        let query = spec.to_document_query();
        assert_eq!(query.limit, Some(31));
        let order_by = query.order_by.unwrap();
        assert_eq!(order_by.field, "fecha");
        assert_eq!(order_by.order, SortOrder::Asc);
    }

    #[test]
    fn test_build_query_raw_propagates_invalid_kind() {
        let range = DateRange::single(d("2023-11-15"));
        let err = build_query_raw("anual", &range, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFilterKind);

        let spec = build_query_raw("range", &range, None).unwrap();
        assert_eq!(spec.limit, 31);
    }
}
