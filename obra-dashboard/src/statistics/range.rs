//! Date-range resolver
//!
//! Turns a [`Filters`] selection into a normalized `{inicio, fin}` pair.
//! Malformed `semana` / `mes` / date strings are logged and treated as absent.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::models::{FilterKind, Filters};
use std::fmt;
use std::str::FromStr;

use crate::utils::time::{
    first_monday_of_year, format_date, last_day_of_month, monday_of, parse_date,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Days covered by a `rango` filter without an explicit `inicio`
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Inclusive date window, serialized as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub inicio: NaiveDate,
    pub fin: NaiveDate,
}

impl DateRange {
    pub fn new(inicio: NaiveDate, fin: NaiveDate) -> Self {
        Self { inicio, fin }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn inicio_str(&self) -> String {
        format_date(self.inicio)
    }

    pub fn fin_str(&self) -> String {
        format_date(self.fin)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.inicio <= date && date <= self.fin
    }

    /// Calendar days covered, 0 for an inverted range
    pub fn days(&self) -> i64 {
        ((self.fin - self.inicio).num_days() + 1).max(0)
    }
}

// =============================================================================
// Week key (YYYY-Www)
// =============================================================================

/// Week `week` of `year`, counted from the first Monday on/after Jan 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub const MAX_WEEK: u32 = 53;

    pub fn new(year: i32, week: u32) -> AppResult<Self> {
        if !(1..=Self::MAX_WEEK).contains(&week) {
            return Err(AppError::with_message(
                ErrorCode::InvalidWeekFormat,
                format!("Week number out of range: {}", week),
            ));
        }
        Ok(Self { year, week })
    }

    /// Monday that starts this week
    pub fn monday(&self) -> Option<NaiveDate> {
        let first = first_monday_of_year(self.year)?;
        first.checked_add_signed(Duration::days((self.week as i64 - 1) * 7))
    }

    /// Monday .. Sunday
    pub fn range(&self) -> Option<DateRange> {
        let monday = self.monday()?;
        Some(DateRange::new(monday, monday + Duration::days(6)))
    }

    /// Week containing `date`
    ///
    /// Days before the year's first Monday belong to the previous year's
    /// last week.
    pub fn containing(date: NaiveDate) -> Self {
        let mut year = date.year();
        let first = match first_monday_of_year(year) {
            Some(first) if first <= date => first,
            _ => {
                year -= 1;
                first_monday_of_year(year).unwrap_or(date)
            }
        };
        let week = ((date - first).num_days() / 7) as u32 + 1;
        Self { year, week }
    }
}

impl FromStr for WeekKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            AppError::with_message(
                ErrorCode::InvalidWeekFormat,
                format!("Invalid week format (expected YYYY-Www): {}", s),
            )
            .with_detail("value", s)
        };

        let (year, week) = s.trim().split_once("-W").ok_or_else(invalid)?;
        if year.len() != 4 || week.is_empty() || week.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u32 = week.parse().map_err(|_| invalid())?;
        Self::new(year, week)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

// =============================================================================
// Month key (YYYY-MM)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        last_day_of_month(self.year, self.month)
    }

    pub fn range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.first_day()?, self.last_day()?))
    }
}

impl FromStr for MonthKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            AppError::with_message(
                ErrorCode::InvalidMonthFormat,
                format!("Invalid month format (expected YYYY-MM): {}", s),
            )
            .with_detail("value", s)
        };

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Output of the resolver: the window plus the key it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    pub kind: FilterKind,
    pub range: DateRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week: Option<WeekKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthKey>,
}

/// Parse an optional field, logging and discarding malformed input
fn parse_optional<T>(field: &str, value: Option<&str>, parse: impl Fn(&str) -> AppResult<T>) -> Option<T> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty())?;
    match parse(raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(field = %field, value = %raw, error = %e, "Ignoring malformed filter value");
            None
        }
    }
}

/// Resolve `filters` for an already-typed `kind`
///
/// `today` is the business-local calendar date.
pub fn resolve_range(kind: FilterKind, filters: &Filters, today: NaiveDate) -> ResolvedPeriod {
    match kind {
        FilterKind::Day => {
            let day = parse_optional("rango.fin", filters.range.fin.as_deref(), parse_date)
                .unwrap_or(today);
            ResolvedPeriod {
                kind,
                range: DateRange::single(day),
                week: None,
                month: None,
            }
        }
        FilterKind::Week => {
            let key = parse_optional("semana", filters.week.as_deref(), |s| s.parse::<WeekKey>())
                .unwrap_or_else(|| WeekKey::containing(monday_of(today)));
            let range = key.range().unwrap_or_else(|| {
                tracing::warn!(week = %key, "Week outside calendar range, using current week");
                let monday = monday_of(today);
                DateRange::new(monday, monday + Duration::days(6))
            });
            ResolvedPeriod {
                kind,
                range,
                week: Some(key),
                month: None,
            }
        }
        FilterKind::Month => {
            let key = parse_optional("mes", filters.month.as_deref(), |s| s.parse::<MonthKey>())
                .unwrap_or_else(|| MonthKey::containing(today));
            let range = key.range().unwrap_or_else(|| DateRange::single(today));
            ResolvedPeriod {
                kind,
                range,
                week: None,
                month: Some(key),
            }
        }
        FilterKind::Range => {
            let inicio = parse_optional("rango.inicio", filters.range.inicio.as_deref(), parse_date)
                .unwrap_or(today - Duration::days(DEFAULT_RANGE_DAYS));
            let fin = parse_optional("rango.fin", filters.range.fin.as_deref(), parse_date)
                .unwrap_or(today);
            if inicio > fin {
                tracing::warn!(%inicio, %fin, "Range start is after range end");
            }
            ResolvedPeriod {
                kind,
                range: DateRange::new(inicio, fin),
                week: None,
                month: None,
            }
        }
    }
}

/// Strict resolver for a raw `tipoFiltro`; unknown kinds fail with `InvalidFilterKind`
pub fn resolve_range_strict(kind: &str, filters: &Filters, today: NaiveDate) -> AppResult<ResolvedPeriod> {
    let kind: FilterKind = kind.parse()?;
    Ok(resolve_range(kind, filters, today))
}

/// Lenient resolver for a raw `tipoFiltro`; unknown kinds fall back to today
pub fn resolve_range_lenient(kind: &str, filters: &Filters, today: NaiveDate) -> ResolvedPeriod {
    resolve_range_strict(kind, filters, today).unwrap_or_else(|e| {
        tracing::warn!(kind = %kind, error = %e, "Unrecognized filter kind, falling back to today");
        ResolvedPeriod {
            kind: FilterKind::Day,
            range: DateRange::single(today),
            week: None,
            month: None,
        }
    })
}

#[cfg(test)]
mod tests;
