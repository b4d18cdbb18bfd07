// Statistics aggregation over canonicalized sensor readings
use crate::domain::columns::{ColumnMap, Field, RawRow};
use crate::domain::error::IngestError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A reading row after projection and numeric coercion. The three numeric
/// fields are always finite; rows that fail coercion never become one of
/// these.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRow {
    pub equipment: String,
    pub type_label: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

/// Aggregate statistics over every surviving row of an upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub total_records: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
    pub type_distribution: BTreeMap<String, u64>,
}

/// Count and averages within one type group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStats {
    pub count: u64,
    pub avg_flowrate: f64,
    pub avg_pressure: f64,
    pub avg_temperature: f64,
}

/// Per-type statistics keyed by the exact (case-sensitive) type label.
/// Shares its key set with `OverallStats::type_distribution`.
pub type PerTypeStats = BTreeMap<String, TypeStats>;

#[derive(Debug, Default)]
struct Accumulator {
    count: u64,
    flowrate: f64,
    pressure: f64,
    temperature: f64,
}

impl Accumulator {
    fn push(&mut self, row: &CanonicalRow) {
        self.count += 1;
        self.flowrate += row.flowrate;
        self.pressure += row.pressure;
        self.temperature += row.temperature;
    }

    fn avg_flowrate(&self) -> f64 {
        self.flowrate / self.count as f64
    }

    fn avg_pressure(&self) -> f64 {
        self.pressure / self.count as f64
    }

    fn avg_temperature(&self) -> f64 {
        self.temperature / self.count as f64
    }
}

/// Compute overall and per-type statistics for an upload.
///
/// Rows are projected through the column map, numeric fields are coerced,
/// and any row failing coercion on flowrate, pressure or temperature is
/// dropped entirely. Equipment and type are opaque labels; a row with an
/// empty type cell participates as the empty-string group.
///
/// Returns `EmptyResult` when no row survives coercion, so averages are
/// never computed over zero rows.
pub fn aggregate(
    rows: &[RawRow],
    columns: &ColumnMap,
) -> Result<(OverallStats, PerTypeStats), IngestError> {
    let mut overall = Accumulator::default();
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();

    for row in rows {
        let Some(canonical) = canonicalize(row, columns) else {
            continue;
        };
        overall.push(&canonical);
        groups
            .entry(canonical.type_label.clone())
            .or_default()
            .push(&canonical);
    }

    if overall.count == 0 {
        return Err(IngestError::EmptyResult);
    }

    let type_distribution = groups
        .iter()
        .map(|(label, acc)| (label.clone(), acc.count))
        .collect();

    let per_type = groups
        .into_iter()
        .map(|(label, acc)| {
            let stats = TypeStats {
                count: acc.count,
                avg_flowrate: acc.avg_flowrate(),
                avg_pressure: acc.avg_pressure(),
                avg_temperature: acc.avg_temperature(),
            };
            (label, stats)
        })
        .collect();

    let overall_stats = OverallStats {
        total_records: overall.count,
        avg_flowrate: overall.avg_flowrate(),
        avg_pressure: overall.avg_pressure(),
        avg_temperature: overall.avg_temperature(),
        type_distribution,
    };

    Ok((overall_stats, per_type))
}

/// Project one raw row through the column map and coerce the numeric
/// fields. `None` means the row is dropped.
fn canonicalize(row: &RawRow, columns: &ColumnMap) -> Option<CanonicalRow> {
    let cell = |field: Field| row.get(columns.header_for(field)).map(String::as_str);

    let flowrate = parse_reading(cell(Field::Flowrate))?;
    let pressure = parse_reading(cell(Field::Pressure))?;
    let temperature = parse_reading(cell(Field::Temperature))?;

    Some(CanonicalRow {
        equipment: cell(Field::Equipment).unwrap_or_default().to_string(),
        type_label: cell(Field::Type).unwrap_or_default().to_string(),
        flowrate,
        pressure,
        temperature,
    })
}

/// Coerce a raw cell to a finite number. Missing cells, empty strings and
/// non-finite spellings all count as coercion failures.
fn parse_reading(cell: Option<&str>) -> Option<f64> {
    let value: f64 = cell?.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
