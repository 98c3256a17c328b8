//! Dataset DTOs and their conversion into domain types.
//!
//! Two JSON documents are understood:
//!
//! - the line dataset, an array of lines each carrying its ordered stops;
//! - the stop directory, an array of `{ nom, lat, lon }` entries with
//!   string-encoded coordinates, used to correct stop positions by name.

use serde::Deserialize;

use crate::domain::{Coordinate, Line, LineId, LineKind, Stop};

use super::error::LoadError;

/// One line of the dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: LineKind,
    pub name: String,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub stops: Vec<StopDto>,
}

/// One stop of a dataset line.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDto {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub time_from_start: Option<f64>,
}

/// One entry of the stop directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntryDto {
    pub nom: String,
    #[serde(default)]
    pub lat: Option<LooseNumber>,
    #[serde(default)]
    pub lon: Option<LooseNumber>,
}

impl DirectoryEntryDto {
    /// The entry's coordinate, if both components parse to finite numbers.
    pub fn coord(&self) -> Option<Coordinate> {
        let lat = self.lat.as_ref()?.value()?;
        let lng = self.lon.as_ref()?.value()?;
        Some(Coordinate::new(lat, lng))
    }
}

/// A number that may arrive as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// Returns the finite value, or `None` if it doesn't parse.
    pub fn value(&self) -> Option<f64> {
        let v = match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

impl StopDto {
    fn into_stop(self) -> Stop {
        let stop = Stop::new(self.name, Coordinate::new(self.lat, self.lng));
        match self.time_from_start {
            Some(t) => stop.with_time_from_start(t),
            None => stop,
        }
    }
}

impl LineDto {
    /// Convert into a domain line, filling in a derived color when the
    /// dataset has none.
    pub fn into_line(self) -> Result<Line, LoadError> {
        let id = LineId::parse(&self.id)?;
        let color = match self.color {
            Some(c) if !c.trim().is_empty() => c,
            _ => line_color_from_name(&self.name),
        };
        let stops = self.stops.into_iter().map(StopDto::into_stop).collect();

        Ok(Line::new(
            id,
            self.name,
            self.long_name.unwrap_or_default(),
            color,
            self.kind,
            stops,
        ))
    }
}

/// Derive a stable `#RRGGBB` color from a line name.
///
/// Same string, same color, on every platform: the hash runs over UTF-16
/// code units with 32-bit wrapping arithmetic.
pub fn line_color_from_name(name: &str) -> String {
    let hash = name.encode_utf16().fold(0u32, |hash, unit| {
        u32::from(unit)
            .wrapping_add(hash << 5)
            .wrapping_sub(hash)
    });
    format!("#{:06X}", hash & 0x00FF_FFFF)
}

/// Normalize a stop name for directory matching: lowercase, trimmed, and
/// with internal whitespace runs collapsed to one space.
pub fn normalize_stop_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_line() {
        let json = r##"{
            "id": "metro-1", "type": "metro", "name": "1",
            "longName": "Place des Martyrs <-> Hai El Badr", "color": "#007aff",
            "stops": [
                { "name": "Place des Martyrs", "lat": 36.7856, "lng": 3.0603, "timeFromStart": 0 },
                { "name": "Ali Boumendjel", "lat": 36.7811, "lng": 3.0586, "timeFromStart": 2 }
            ]
        }"##;
        let dto: LineDto = serde_json::from_str(json).unwrap();
        let line = dto.into_line().unwrap();

        assert_eq!(line.id.as_str(), "metro-1");
        assert_eq!(line.kind, LineKind::Metro);
        assert_eq!(line.long_name, "Place des Martyrs <-> Hai El Badr");
        assert_eq!(line.color, "#007aff");
        assert_eq!(line.len(), 2);
        assert_eq!(line.stops()[1].time_from_start, Some(2.0));
        assert_eq!(line.stops()[0].coord, Coordinate::new(36.7856, 3.0603));
    }

    #[test]
    fn optional_fields_default() {
        let json = r#"{ "id": "bus-12", "name": "12",
            "stops": [{ "name": "A", "lat": 1.0, "lng": 2.0 }] }"#;
        let line = serde_json::from_str::<LineDto>(json)
            .unwrap()
            .into_line()
            .unwrap();

        assert_eq!(line.kind, LineKind::Bus);
        assert_eq!(line.long_name, "");
        assert_eq!(line.color, line_color_from_name("12"));
        assert_eq!(line.stops()[0].time_from_start, None);
    }

    #[test]
    fn blank_color_is_derived() {
        let json = r#"{ "id": "x", "name": "L1", "color": "  " }"#;
        let line = serde_json::from_str::<LineDto>(json)
            .unwrap()
            .into_line()
            .unwrap();
        assert_eq!(line.color, "#000965");
    }

    #[test]
    fn empty_id_rejected() {
        let json = r#"{ "id": " ", "name": "1" }"#;
        let dto: LineDto = serde_json::from_str(json).unwrap();
        assert!(matches!(dto.into_line(), Err(LoadError::Network(_))));
    }

    #[test]
    fn color_from_name_known_values() {
        // 'A' = 65 = 0x41
        assert_eq!(line_color_from_name("A"), "#000041");
        // 49 + (76 << 5) - 76 = 2405 = 0x965
        assert_eq!(line_color_from_name("L1"), "#000965");
        assert_eq!(line_color_from_name(""), "#000000");
    }

    #[test]
    fn color_from_name_is_well_formed() {
        for name in ["L34", "Bab Ezzouar - Place des Martyrs", "Haï El Badr", "تيليفيريك"] {
            let color = line_color_from_name(name);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
            assert!(!color[1..].chars().any(|c| c.is_ascii_lowercase()));
            assert_eq!(color, line_color_from_name(name));
        }
    }

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize_stop_name("  Place   des\tMartyrs "), "place des martyrs");
        assert_eq!(normalize_stop_name("HAÏ EL BADR"), "haï el badr");
        assert_eq!(normalize_stop_name(""), "");
    }

    #[test]
    fn directory_entry_coordinates() {
        let entries: Vec<DirectoryEntryDto> = serde_json::from_str(
            r#"[
                { "nom": "A", "lat": "36.75", "lon": " 3.04 " },
                { "nom": "B", "lat": 36.5, "lon": 3.5 },
                { "nom": "C", "lat": "n/a", "lon": "3.0" },
                { "nom": "D" }
            ]"#,
        )
        .unwrap();

        assert_eq!(entries[0].coord(), Some(Coordinate::new(36.75, 3.04)));
        assert_eq!(entries[1].coord(), Some(Coordinate::new(36.5, 3.5)));
        assert_eq!(entries[2].coord(), None);
        assert_eq!(entries[3].coord(), None);
    }

    #[test]
    fn loose_number_rejects_non_finite() {
        assert_eq!(LooseNumber::Text("NaN".into()).value(), None);
        assert_eq!(LooseNumber::Text("inf".into()).value(), None);
        assert_eq!(LooseNumber::Text("-1.5".into()).value(), Some(-1.5));
    }
}
