//! Demo dataset
//!
//! Deterministic construction-site data around a given `today`, used when
//! `DATA_SOURCE=mock`. Weekly and monthly summaries are rolled up from the
//! generated daily ones so every view stays consistent.

use chrono::{Datelike, Duration, NaiveDate};
use serde_json::{Value, json};
use std::collections::BTreeMap;

use super::{DocumentStore, StoreResult};
use crate::core::config::CollectionNames;
use crate::statistics::range::WeekKey;
use crate::statistics::tariff::hourly_rate;
use crate::utils::money::{sum_money, to_decimal, to_f64};
use crate::utils::time::format_date;
use shared::models::WorkerCategory;

/// Days of daily summaries generated, ending at `today`
pub const DEMO_DAYS: i64 = 35;

const LOCATIONS: [&str; 3] = ["Bloque A", "Bloque B", "Bloque C"];

const SUPERVISORS: [&str; 3] = ["Ing. Rosa Quispe", "Ing. Carlos Mendoza", "Ing. Lucía Paredes"];

/// (nombre, tipo, ubicacion)
const ACTIVITY_TEMPLATES: [(&str, &str, &str); 8] = [
    ("Vaciado de concreto losa", "Concreto", "Bloque A"),
    ("Encofrado de columnas", "Encofrado", "Bloque A"),
    ("Habilitación de acero", "Acero", "Bloque B"),
    ("Asentado de ladrillo", "Albañilería", "Bloque B"),
    ("Tarrajeo de muros", "Acabados", "Bloque C"),
    ("Excavación de zanjas", "Movimiento de tierras", "Bloque C"),
    ("Instalaciones sanitarias", "Instalaciones", "Bloque A"),
    ("Limpieza de obra", "Otros", "Bloque B"),
];

/// (nombre, categoria, ubicacion, meta)
const WORKERS: [(&str, WorkerCategory, &str, Option<f64>); 12] = [
    ("Juan Pérez", WorkerCategory::Operario, "Bloque A", Some(1.2)),
    ("Pedro Huamán", WorkerCategory::Operario, "Bloque B", None),
    ("Luis Torres", WorkerCategory::Operario, "Bloque C", Some(1.3)),
    ("Miguel Flores", WorkerCategory::Operario, "Bloque A", None),
    ("José Ramírez", WorkerCategory::Oficial, "Bloque A", Some(1.0)),
    ("Carlos Vargas", WorkerCategory::Oficial, "Bloque B", None),
    ("Andrés Rojas", WorkerCategory::Oficial, "Bloque C", Some(0.9)),
    ("Raúl Castillo", WorkerCategory::Oficial, "Bloque B", None),
    ("Mario Chávez", WorkerCategory::Peon, "Bloque A", None),
    ("Víctor Díaz", WorkerCategory::Peon, "Bloque B", Some(0.8)),
    ("Jorge Salazar", WorkerCategory::Peon, "Bloque C", None),
    ("Hugo Mamani", WorkerCategory::Peon, "Bloque C", Some(0.7)),
];

fn round2(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Daily figures before they are written as documents
#[derive(Debug, Clone)]
struct DayFigures {
    date: NaiveDate,
    cost: f64,
    value: f64,
    hours: f64,
    productivity: f64,
    reports: u64,
    /// category → (cantidad, horas, costo)
    by_category: BTreeMap<WorkerCategory, (u64, f64, f64)>,
}

fn day_figures(date: NaiveDate, seed: i64) -> DayFigures {
    let s = seed.rem_euclid(97);
    let headcount = [
        (WorkerCategory::Operario, 8 + (s % 3) as u64),
        (WorkerCategory::Oficial, 10 + (s % 2) as u64),
        (WorkerCategory::Peon, 6 + (s % 4) as u64),
    ];

    let mut by_category = BTreeMap::new();
    for (category, count) in headcount {
        let hours = (count * 8) as f64 + (s % 5) as f64;
        let cost = round2(hours * hourly_rate(category));
        by_category.insert(category, (count, hours, cost));
    }

    let hours = by_category.values().map(|(_, h, _)| *h).sum::<f64>();
    let labour = sum_money(by_category.values().map(|(_, _, c)| *c));
    let cost = round2(labour + 1_500.0 + (s * 37 % 900) as f64);
    let value = round2(cost * (1.25 + (s % 6) as f64 * 0.05));

    DayFigures {
        date,
        cost,
        value,
        hours,
        productivity: round2(1.4 + (s % 7) as f64 * 0.1),
        reports: 8 + (s % 6) as u64,
        by_category,
    }
}

fn summary_document(
    periodo: &str,
    fecha: NaiveDate,
    semana: Option<u32>,
    days: &[DayFigures],
) -> Value {
    let hours = sum_money(days.iter().map(|d| d.hours));
    let weighted: f64 = days.iter().map(|d| d.productivity * d.hours).sum();
    let productivity = if hours > 0.0 { round2(weighted / hours) } else { 0.0 };

    // Headcount is the peak day; hours and cost accumulate
    let mut by_category: BTreeMap<&str, Value> = BTreeMap::new();
    for category in WorkerCategory::ALL {
        let rows: Vec<(u64, f64, f64)> = days
            .iter()
            .filter_map(|d| d.by_category.get(&category).copied())
            .collect();
        by_category.insert(
            category.as_str(),
            json!({
                "cantidad": rows.iter().map(|r| r.0).max().unwrap_or(0),
                "horas": sum_money(rows.iter().map(|r| r.1)),
                "costo": sum_money(rows.iter().map(|r| r.2)),
            }),
        );
    }

    let mut doc = json!({
        "fecha": format_date(fecha),
        "periodo": periodo,
        "metricas": {
            "costoTotal": sum_money(days.iter().map(|d| d.cost)),
            "valorTotal": sum_money(days.iter().map(|d| d.value)),
            "totalHoras": hours,
            "productividadPromedio": productivity,
            "reportesProcesados": days.iter().map(|d| d.reports).sum::<u64>(),
        },
        "porCategoria": by_category,
    });
    if let (Some(week), Some(obj)) = (semana, doc.as_object_mut()) {
        obj.insert("semana".into(), json!(week));
    }
    doc
}

/// Build the full demo dataset as `(collection, id, fields)` triples
pub fn demo_documents(names: &CollectionNames, today: NaiveDate) -> Vec<(String, String, Value)> {
    let mut docs = Vec::new();
    let first = today - Duration::days(DEMO_DAYS - 1);

    let days: Vec<DayFigures> = (0..DEMO_DAYS)
        .map(|offset| {
            let date = first + Duration::days(offset);
            day_figures(date, date.num_days_from_ce() as i64)
        })
        .collect();

    // Daily summaries
    for day in &days {
        docs.push((
            names.summaries.clone(),
            format!("diario_{}", format_date(day.date)),
            summary_document("diario", day.date, None, std::slice::from_ref(day)),
        ));
    }

    // Weekly summaries, dated on the week's Monday
    let mut weeks: BTreeMap<WeekKey, Vec<DayFigures>> = BTreeMap::new();
    for day in &days {
        weeks.entry(WeekKey::containing(day.date)).or_default().push(day.clone());
    }
    for (key, week_days) in &weeks {
        let fecha = key.monday().unwrap_or(week_days[0].date);
        docs.push((
            names.summaries.clone(),
            format!("semanal_{}", key),
            summary_document("semanal", fecha, Some(key.week), week_days),
        ));
    }

    // Monthly summaries, dated on the 1st
    let mut months: BTreeMap<(i32, u32), Vec<DayFigures>> = BTreeMap::new();
    for day in &days {
        months
            .entry((day.date.year(), day.date.month()))
            .or_default()
            .push(day.clone());
    }
    for ((year, month), month_days) in &months {
        let fecha = NaiveDate::from_ymd_opt(*year, *month, 1).unwrap_or(month_days[0].date);
        docs.push((
            names.summaries.clone(),
            format!("mensual_{:04}-{:02}", year, month),
            summary_document("mensual", fecha, None, month_days),
        ));
    }

    // Activities: two per day
    for (i, day) in days.iter().enumerate() {
        for slot in [i, i + 3] {
            let (nombre, tipo, ubicacion) = ACTIVITY_TEMPLATES[slot % ACTIVITY_TEMPLATES.len()];
            let s = (day.date.num_days_from_ce() as usize + slot) % 11;
            let hours = 16.0 + (s * 2) as f64;
            let cost = round2(hours * 24.0 + 300.0 + (s * 45) as f64);
            let value = round2(cost * (0.9 + s as f64 * 0.06));
            docs.push((
                names.activities.clone(),
                format!("act_{}_{}", format_date(day.date), slot),
                json!({
                    "nombre": nombre,
                    "tipo": tipo,
                    "fecha": format_date(day.date),
                    "ubicacion": ubicacion,
                    "costo": cost,
                    "valor": value,
                    "metrado": round2(10.0 + s as f64 * 3.5),
                    "horas": hours,
                    "productividad": round2(0.8 + s as f64 * 0.12),
                    "meta": 1.2,
                }),
            ));
        }
    }

    // Workers
    for (i, (nombre, categoria, ubicacion, meta)) in WORKERS.iter().enumerate() {
        let hours = 160.0 + (i * 6) as f64;
        let cost = round2(hours * hourly_rate(*categoria));
        let mut fields = json!({
            "nombre": nombre,
            "categoria": categoria.as_str(),
            "ubicacion": ubicacion,
            "horas": hours,
            "productividad": round2(0.6 + ((i * 5) % 9) as f64 * 0.1),
            "costo": cost,
            "valor": round2(cost * 1.35),
        });
        if let (Some(meta), Some(obj)) = (meta, fields.as_object_mut()) {
            obj.insert("meta".into(), json!(meta));
        }
        docs.push((names.workers.clone(), format!("trab_{:02}", i + 1), fields));
    }

    // Reports: one per day
    for (i, day) in days.iter().enumerate() {
        docs.push((
            names.reports.clone(),
            format!("rep_{}", format_date(day.date)),
            json!({
                "fecha": format_date(day.date),
                "responsable": SUPERVISORS[i % SUPERVISORS.len()],
                "ubicacion": LOCATIONS[i % LOCATIONS.len()],
                "actividades": 2,
                "trabajadores": day.by_category.values().map(|(n, _, _)| n).sum::<u64>(),
                "horas": day.hours,
                "costo": day.cost,
                "valor": day.value,
                "estado": if i + 1 == days.len() { "pendiente" } else { "aprobado" },
            }),
        ));
    }

    tracing::debug!(documents = docs.len(), today = %today, "Generated demo dataset");
    docs
}

/// Write `documents` through any store
pub async fn seed(store: &dyn DocumentStore, documents: Vec<(String, String, Value)>) -> StoreResult<usize> {
    let count = documents.len();
    for (collection, id, fields) in documents {
        store.put_document(&collection, &id, fields).await?;
    }
    tracing::info!(documents = count, "Seeded demo dataset");
    Ok(count)
}
