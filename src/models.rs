//! Records persisted by the analysis engine.
//!
//! [`Reading`] and [`Report`] are write-once: they are built by
//! [`crate::AnalysisService`] and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{NormalRange, SensorType};
use crate::classifier::Status;

// ---

/// Where a reading was taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Ingestion input as submitted by the app.
///
/// `sensor_type` is kept as text so that validation against the catalog
/// happens in one place.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReading {
    pub user_id: String,
    pub sensor_type: String,
    pub value: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

/// A raw sensor reading, owned by the user who recorded it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    // ---
    pub id: Uuid,
    pub user_id: String,
    pub sensor_type: SensorType,
    pub value: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Diagnosis derived from a single reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    // ---
    pub status: Status,
    pub value: f64,
    pub normal_range: NormalRange,
    pub deviation_percent: f64,
    pub interpretation: String,
    pub possible_causes: Vec<String>,
    pub recommendations: Vec<String>,

    /// Deviation summary for out-of-range readings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// A reading bundled with its analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub user_id: String,
    pub reading: Reading,
    pub analysis: Analysis,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    fn create_test_reading(notes: Option<&str>) -> Reading {
        // ---
        Reading {
            id: Uuid::new_v4(),
            user_id: "farmer-001".to_string(),
            sensor_type: SensorType::SoilPh,
            value: 6.2,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 26, 18, 45, 0).unwrap(),
            notes: notes.map(String::from),
            location: None,
        }
    }

    #[test]
    fn test_reading_wire_format() {
        // ---
        let reading = create_test_reading(None);
        let json = serde_json::to_value(&reading).unwrap();

        assert_eq!(json["sensor_type"], "soil_ph");
        assert_eq!(json["user_id"], "farmer-001");
        assert_eq!(json["timestamp"], "2025-03-26T18:45:00Z");

        // Absent optionals are omitted rather than written as null
        assert!(json.get("notes").is_none());
        assert!(json.get("location").is_none());
    }

    #[test]
    fn test_new_reading_optional_fields_default() {
        // ---
        let input: NewReading = serde_json::from_str(
            r#"{"user_id": "u1", "sensor_type": "soil_moisture", "value": 42}"#,
        )
        .unwrap();

        assert_eq!(input.value, 42.0);
        assert!(input.notes.is_none());
        assert!(input.location.is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        // ---
        assert_eq!(serde_json::to_string(&Status::Critical).unwrap(), "\"critical\"");
        let status: Status = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(status, Status::Warning);
    }
}
