// Column resolution - maps loose CSV headers onto canonical sensor fields
use crate::domain::error::IngestError;
use std::collections::HashMap;

/// One raw CSV data line: header string -> cell string. Cells missing from
/// a short row are simply absent.
pub type RawRow = HashMap<String, String>;

/// A parsed CSV file before any column resolution or coercion.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// The five semantic columns every reading file must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Equipment,
    Type,
    Flowrate,
    Pressure,
    Temperature,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Equipment => "equipment",
            Field::Type => "type",
            Field::Flowrate => "flowrate",
            Field::Pressure => "pressure",
            Field::Temperature => "temperature",
        }
    }

    /// Accepted spellings, compared against normalized headers.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Equipment => &["equipment", "equipmentname", "equipment_name"],
            Field::Type => &["type"],
            Field::Flowrate => &["flowrate", "flow_rate"],
            Field::Pressure => &["pressure"],
            Field::Temperature => &["temperature", "temp"],
        }
    }
}

/// The original header spelling that satisfied each canonical field.
/// Always complete; partial resolution fails outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub equipment: String,
    pub type_label: String,
    pub flowrate: String,
    pub pressure: String,
    pub temperature: String,
}

impl ColumnMap {
    /// Resolve a header row into a complete column map.
    ///
    /// Headers are normalized (trimmed, internal spaces removed,
    /// lowercased) before alias comparison; the first matching header in
    /// source order wins for each field. Fields are checked equipment,
    /// type, flowrate, pressure, temperature, and a failure names the
    /// first field in that order with no matching header.
    pub fn resolve(headers: &[String]) -> Result<ColumnMap, IngestError> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let find = |field: Field| -> Result<String, IngestError> {
            normalized
                .iter()
                .position(|h| field.aliases().contains(&h.as_str()))
                .map(|i| headers[i].clone())
                .ok_or(IngestError::MissingColumn(field.name()))
        };

        Ok(ColumnMap {
            equipment: find(Field::Equipment)?,
            type_label: find(Field::Type)?,
            flowrate: find(Field::Flowrate)?,
            pressure: find(Field::Pressure)?,
            temperature: find(Field::Temperature)?,
        })
    }

    /// Original header spelling backing a canonical field.
    pub fn header_for(&self, field: Field) -> &str {
        match field {
            Field::Equipment => &self.equipment,
            Field::Type => &self.type_label,
            Field::Flowrate => &self.flowrate,
            Field::Pressure => &self.pressure,
            Field::Temperature => &self.temperature,
        }
    }
}

fn normalize_header(header: &str) -> String {
    header.trim().replace(' ', "").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_resolves_exact_headers() {
        let map = ColumnMap::resolve(&headers(&[
            "equipment",
            "type",
            "flowrate",
            "pressure",
            "temperature",
        ]))
        .unwrap();
        assert_eq!(map.equipment, "equipment");
        assert_eq!(map.temperature, "temperature");
    }

    #[test]
    fn test_resolves_loose_casing_and_spacing() {
        let map = ColumnMap::resolve(&headers(&[
            "Equipment Name",
            "Type",
            "Flow Rate",
            "Pressure",
            "Temp",
        ]))
        .unwrap();
        assert_eq!(map.equipment, "Equipment Name");
        assert_eq!(map.type_label, "Type");
        assert_eq!(map.flowrate, "Flow Rate");
        assert_eq!(map.pressure, "Pressure");
        assert_eq!(map.temperature, "Temp");
    }

    #[test]
    fn test_resolves_in_any_header_order() {
        let map = ColumnMap::resolve(&headers(&[
            "temp",
            "PRESSURE",
            "flow_rate",
            "equipment_name",
            "type",
        ]))
        .unwrap();
        assert_eq!(map.temperature, "temp");
        assert_eq!(map.equipment, "equipment_name");
    }

    #[test]
    fn test_first_matching_header_wins() {
        let map = ColumnMap::resolve(&headers(&[
            "equipment",
            "Equipment Name",
            "type",
            "flowrate",
            "pressure",
            "temp",
            "temperature",
        ]))
        .unwrap();
        assert_eq!(map.equipment, "equipment");
        assert_eq!(map.temperature, "temp");
    }

    #[test]
    fn test_missing_pressure_fails_naming_pressure() {
        let err = ColumnMap::resolve(&headers(&["equipment", "type", "flowrate", "temperature"]))
            .unwrap_err();
        assert_eq!(err, IngestError::MissingColumn("pressure"));
    }

    #[test]
    fn test_missing_fields_reported_in_fixed_order() {
        // Both equipment and flowrate are absent; equipment is checked first.
        let err = ColumnMap::resolve(&headers(&["type", "pressure", "temperature"])).unwrap_err();
        assert_eq!(err, IngestError::MissingColumn("equipment"));
    }

    #[test]
    fn test_empty_header_row_fails() {
        let err = ColumnMap::resolve(&[]).unwrap_err();
        assert_eq!(err, IngestError::MissingColumn("equipment"));
    }

    #[test]
    fn test_unrelated_headers_do_not_match() {
        let err = ColumnMap::resolve(&headers(&[
            "equipments",
            "type",
            "flowrate",
            "pressure",
            "temperature",
        ]))
        .unwrap_err();
        assert_eq!(err, IngestError::MissingColumn("equipment"));
    }
}
