//! Human-readable interpretation of a classified reading.
//!
//! Sensor types with agronomic copy have a [`Narrative`] entry in
//! [`narrative_for`]; everything else falls back to a generic template keyed
//! by status. Adding copy for a sensor type means adding a table entry.

use crate::catalog::{SensorType, SensorTypeInfo};
use crate::classifier::{Band, Classification, Status};

// ---

/// Text produced for one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub interpretation: String,
    pub possible_causes: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Copy for one side of the range. `{reading}` in `summary` is replaced with
/// the formatted value and unit.
struct Template {
    summary: &'static str,
    causes: &'static [&'static str],
    recommendations: &'static [&'static str],
}

/// Bespoke copy for a sensor type: one template per band.
struct Narrative {
    optimal: Template,
    below: Template,
    above: Template,
}

impl Narrative {
    fn template(&self, band: Band) -> &Template {
        match band {
            Band::Below => &self.below,
            Band::Within => &self.optimal,
            Band::Above => &self.above,
        }
    }
}

static SOIL_MOISTURE: Narrative = Narrative {
    optimal: Template {
        summary: "Soil moisture is within optimal range ({reading}), providing good growing conditions for plants.",
        causes: &[],
        recommendations: &[
            "Maintain current irrigation practices",
            "Monitor regularly for any changes",
        ],
    },
    below: Template {
        summary: "Soil moisture is too low ({reading}), indicating potential drought stress for plants.",
        causes: &[
            "Insufficient irrigation",
            "High temperatures causing rapid evaporation",
            "Poor soil water retention capacity",
            "Inadequate mulching",
        ],
        recommendations: &[
            "Increase irrigation frequency and amount",
            "Apply organic mulch to reduce evaporation",
            "Consider adding organic matter to improve soil water retention",
            "Irrigate during cooler parts of the day to reduce evaporation",
        ],
    },
    above: Template {
        summary: "Soil moisture is too high ({reading}), indicating potential waterlogging issues.",
        causes: &[
            "Excessive irrigation",
            "Poor drainage",
            "Heavy rainfall",
            "High water table",
        ],
        recommendations: &[
            "Reduce irrigation frequency and amount",
            "Improve field drainage",
            "Consider raised beds for better drainage",
            "Avoid irrigation if heavy rainfall is expected",
        ],
    },
};

static SOIL_PH: Narrative = Narrative {
    optimal: Template {
        summary: "Soil pH is within optimal range ({reading}), providing good nutrient availability for most crops.",
        causes: &[],
        recommendations: &[
            "Maintain current soil management practices",
            "Continue regular soil testing to monitor pH",
        ],
    },
    below: Template {
        summary: "Soil pH is too acidic ({reading}), which can limit nutrient availability for plants.",
        causes: &[
            "Acid rain",
            "Excessive application of ammonium-based fertilizers",
            "Naturally acidic soil parent material",
            "Leaching of base cations in high rainfall areas",
        ],
        recommendations: &[
            "Apply agricultural lime to raise pH",
            "Use less acidifying fertilizers",
            "Consider dolomitic lime if magnesium is also low",
            "Retest soil after treatment to monitor changes",
        ],
    },
    above: Template {
        summary: "Soil pH is too alkaline ({reading}), which can reduce availability of micronutrients.",
        causes: &[
            "Naturally calcareous soils",
            "Excessive liming",
            "Irrigation with alkaline water",
            "Poor drainage in arid regions",
        ],
        recommendations: &[
            "Apply elemental sulfur or acidifying amendments",
            "Use acidifying fertilizers like ammonium sulfate",
            "Add organic matter to buffer pH",
            "Consider gypsum for sodic soils",
        ],
    },
};

/// Bespoke copy table. `None` selects the generic fallback.
fn narrative_for(sensor_type: SensorType) -> Option<&'static Narrative> {
    // ---
    match sensor_type {
        SensorType::SoilMoisture => Some(&SOIL_MOISTURE),
        SensorType::SoilPh => Some(&SOIL_PH),
        _ => None,
    }
}

const URGENT_ACTION: &str = "Act promptly: this reading is far outside the normal range";

const GENERIC_CAUSES: &[&str] = &[
    "Recent change in weather conditions",
    "Change in field or irrigation management",
    "Sensor placement or calibration drift",
];

/// Explain a classified reading of `info.sensor_type`.
///
/// The interpretation is never empty, and causes and recommendations are
/// always present for non-good readings.
pub fn explain(info: &SensorTypeInfo, value: f64, classification: &Classification) -> Interpretation {
    // ---
    let reading = format_reading(value, info.unit);

    match narrative_for(info.sensor_type) {
        Some(narrative) => {
            let template = narrative.template(classification.band);
            let mut recommendations = to_strings(template.recommendations);
            if classification.status == Status::Critical {
                recommendations.insert(0, URGENT_ACTION.to_string());
            }

            Interpretation {
                interpretation: template.summary.replace("{reading}", &reading),
                possible_causes: to_strings(template.causes),
                recommendations,
            }
        }
        None => generic(info, &reading, classification.status),
    }
}

fn generic(info: &SensorTypeInfo, reading: &str, status: Status) -> Interpretation {
    // ---
    let name = info.display_name;
    let (interpretation, possible_causes, recommendations) = match status {
        Status::Good => (
            format!("{name} is within optimal range ({reading})."),
            Vec::new(),
            vec!["Continue monitoring regularly"],
        ),
        Status::Warning => (
            format!(
                "{name} is outside optimal range ({reading}), which may affect crop performance."
            ),
            to_strings(GENERIC_CAUSES),
            vec!["Monitor more frequently", "Consider adjusting management practices"],
        ),
        Status::Critical => (
            format!(
                "{name} is significantly outside optimal range ({reading}), requiring immediate attention."
            ),
            to_strings(GENERIC_CAUSES),
            vec!["Take immediate corrective action", "Consult with an agricultural expert"],
        ),
    };

    Interpretation {
        interpretation,
        possible_causes,
        recommendations: to_strings(&recommendations),
    }
}

/// `42%` but `6.2 pH`, `18 °C`.
fn format_reading(value: f64, unit: &str) -> String {
    // ---
    if unit == "%" {
        format!("{value}{unit}")
    } else {
        format!("{value} {unit}")
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::catalog::{self, lookup};
    use crate::classifier::classify;

    fn explain_value(sensor_type: SensorType, value: f64) -> (Classification, Interpretation) {
        let info = lookup(sensor_type);
        let c = classify(value, info.normal_range);
        (c, explain(info, value, &c))
    }

    #[test]
    fn test_every_type_and_tier_has_copy() {
        // ---
        for info in catalog::all() {
            let r = info.normal_range;
            let width = r.max - r.min;
            let samples = [
                r.min + width / 2.0,
                r.max * 1.1,
                r.max * 2.0 + 1.0,
                r.min - width.min(r.min.abs()) * 0.1 - 0.01,
                r.min - width - 1.0,
            ];

            for value in samples {
                let c = classify(value, r);
                let text = explain(info, value, &c);
                assert!(!text.interpretation.is_empty());
                if c.status != Status::Good {
                    assert!(!text.possible_causes.is_empty(), "{} at {value}", info.sensor_type);
                    assert!(!text.recommendations.is_empty(), "{} at {value}", info.sensor_type);
                }
            }
        }
    }

    #[test]
    fn test_soil_moisture_too_low_recommends_irrigation() {
        // ---
        let (c, text) = explain_value(SensorType::SoilMoisture, 10.0);
        assert_eq!(c.status, Status::Critical);
        assert!(text.interpretation.contains("too low"));
        assert!(text.interpretation.contains("10%"));
        assert_eq!(text.recommendations[0], URGENT_ACTION);
        assert!(text.recommendations.iter().any(|r| r.contains("irrigation")));
        assert!(text.possible_causes.contains(&"Insufficient irrigation".to_string()));
    }

    #[test]
    fn test_soil_moisture_warning_has_no_urgent_action() {
        // ---
        let (c, text) = explain_value(SensorType::SoilMoisture, 65.0);
        assert_eq!(c.status, Status::Warning);
        assert!(text.interpretation.contains("too high"));
        assert!(!text.recommendations.iter().any(|r| r == URGENT_ACTION));
    }

    #[test]
    fn test_soil_ph_good_has_no_causes() {
        // ---
        let (c, text) = explain_value(SensorType::SoilPh, 6.2);
        assert_eq!(c.status, Status::Good);
        assert!(text.possible_causes.is_empty());
        assert!(text.interpretation.contains("6.2 pH"));
        assert!(!text.recommendations.is_empty());
    }

    #[test]
    fn test_soil_ph_alkaline() {
        // ---
        let (c, text) = explain_value(SensorType::SoilPh, 8.0);
        assert_eq!(c.status, Status::Warning);
        assert!(text.interpretation.contains("too alkaline"));
        assert!(text.recommendations.iter().any(|r| r.contains("sulfur")));
    }

    #[test]
    fn test_generic_fallback_interpolates_name_and_unit() {
        // ---
        let (c, text) = explain_value(SensorType::AirTemperature, 50.0);
        assert_eq!(c.status, Status::Critical);
        assert_eq!(
            text.interpretation,
            "Air Temperature is significantly outside optimal range (50 °C), requiring immediate attention."
        );
        assert_eq!(text.possible_causes.len(), GENERIC_CAUSES.len());

        let (_, text) = explain_value(SensorType::WaterLevel, 50.0);
        assert_eq!(text.interpretation, "Water Level is within optimal range (50 cm).");
        assert!(text.possible_causes.is_empty());
        assert_eq!(text.recommendations, vec!["Continue monitoring regularly".to_string()]);
    }
}
