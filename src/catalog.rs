//! Static reference table of supported sensor types.
//!
//! Every sensor the app can log has exactly one [`SensorTypeInfo`] entry here:
//! its unit, the agronomically acceptable range, and display metadata for the
//! sensor picker. The set is closed; there is no runtime registration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ---

/// One of the measurable farm conditions the app knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    SoilMoisture,
    SoilTemperature,
    SoilPh,
    SoilNpk,
    AirTemperature,
    AirHumidity,
    LightIntensity,
    Rainfall,
    WaterLevel,
    WaterPh,
    WaterEc,
}

impl SensorType {
    /// Every supported sensor type, in catalog order.
    pub const ALL: [SensorType; 11] = [
        SensorType::SoilMoisture,
        SensorType::SoilTemperature,
        SensorType::SoilPh,
        SensorType::SoilNpk,
        SensorType::AirTemperature,
        SensorType::AirHumidity,
        SensorType::LightIntensity,
        SensorType::Rainfall,
        SensorType::WaterLevel,
        SensorType::WaterPh,
        SensorType::WaterEc,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::SoilMoisture => "soil_moisture",
            SensorType::SoilTemperature => "soil_temperature",
            SensorType::SoilPh => "soil_ph",
            SensorType::SoilNpk => "soil_npk",
            SensorType::AirTemperature => "air_temperature",
            SensorType::AirHumidity => "air_humidity",
            SensorType::LightIntensity => "light_intensity",
            SensorType::Rainfall => "rainfall",
            SensorType::WaterLevel => "water_level",
            SensorType::WaterPh => "water_ph",
            SensorType::WaterEc => "water_ec",
        }
    }

    /// Catalog entry for this sensor type.
    pub fn info(&self) -> &'static SensorTypeInfo {
        lookup(*self)
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // ---
        SensorType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownSensorType(s.to_string()))
    }
}

/// Closed interval `[min, max]` considered normal for a sensor type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
}

impl NormalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Reference data for a single sensor type.
#[derive(Debug, Clone, Serialize)]
pub struct SensorTypeInfo {
    // ---
    pub sensor_type: SensorType,
    pub unit: &'static str,
    pub normal_range: NormalRange,
    pub display_name: &'static str,
    pub description: &'static str,

    /// Medium, icon and accent colour used by the app's sensor picker.
    pub metadata_tags: &'static [&'static str],
}

static CATALOG: [SensorTypeInfo; 11] = [
    SensorTypeInfo {
        sensor_type: SensorType::SoilMoisture,
        unit: "%",
        normal_range: NormalRange::new(20.0, 60.0),
        display_name: "Soil Moisture",
        description: "Measures the water content in soil, helping farmers optimize irrigation and prevent water stress or waterlogging in crops.",
        metadata_tags: &["soil", "icon:water-outline", "color:#3498db"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::SoilTemperature,
        unit: "°C",
        normal_range: NormalRange::new(15.0, 35.0),
        display_name: "Soil Temperature",
        description: "Monitors soil temperature which affects seed germination, root growth, and microbial activity in the soil.",
        metadata_tags: &["soil", "icon:thermometer-outline", "color:#e74c3c"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::SoilPh,
        unit: "pH",
        normal_range: NormalRange::new(5.5, 7.5),
        display_name: "Soil pH",
        description: "Measures soil acidity or alkalinity, which affects nutrient availability to plants and overall soil health.",
        metadata_tags: &["soil", "icon:flask-outline", "color:#9b59b6"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::SoilNpk,
        unit: "ppm",
        normal_range: NormalRange::new(100.0, 300.0),
        display_name: "Soil NPK",
        description: "Measures levels of essential nutrients (Nitrogen, Phosphorus, Potassium) in soil, helping optimize fertilizer application.",
        metadata_tags: &["soil", "icon:leaf-outline", "color:#2ecc71"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::AirTemperature,
        unit: "°C",
        normal_range: NormalRange::new(15.0, 35.0),
        display_name: "Air Temperature",
        description: "Monitors ambient temperature which affects plant growth, development, and stress responses.",
        metadata_tags: &["air", "icon:thermometer-outline", "color:#f39c12"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::AirHumidity,
        unit: "%",
        normal_range: NormalRange::new(40.0, 80.0),
        display_name: "Air Humidity",
        description: "Measures atmospheric moisture which affects plant transpiration, disease pressure, and overall crop health.",
        metadata_tags: &["air", "icon:water-outline", "color:#3498db"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::LightIntensity,
        unit: "lux",
        normal_range: NormalRange::new(10_000.0, 50_000.0),
        display_name: "Light Intensity",
        description: "Measures sunlight levels which affect photosynthesis, flowering, and overall plant growth.",
        metadata_tags: &["air", "icon:sunny-outline", "color:#f1c40f"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::Rainfall,
        unit: "mm",
        normal_range: NormalRange::new(0.0, 50.0),
        display_name: "Rainfall",
        description: "Measures precipitation which affects irrigation needs, soil moisture, and potential for erosion or flooding.",
        metadata_tags: &["air", "icon:rainy-outline", "color:#3498db"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::WaterLevel,
        unit: "cm",
        normal_range: NormalRange::new(10.0, 100.0),
        display_name: "Water Level",
        description: "Monitors water levels in tanks, reservoirs, or fields, helping manage irrigation resources efficiently.",
        metadata_tags: &["water", "icon:water-outline", "color:#3498db"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::WaterPh,
        unit: "pH",
        normal_range: NormalRange::new(6.0, 7.5),
        display_name: "Water pH",
        description: "Measures acidity or alkalinity of irrigation water, which affects nutrient availability and plant health.",
        metadata_tags: &["water", "icon:flask-outline", "color:#9b59b6"],
    },
    SensorTypeInfo {
        sensor_type: SensorType::WaterEc,
        unit: "mS/cm",
        normal_range: NormalRange::new(0.5, 3.0),
        display_name: "Water EC",
        description: "Measures electrical conductivity of water, indicating dissolved salt content which affects plant water uptake.",
        metadata_tags: &["water", "icon:flash-outline", "color:#e67e22"],
    },
];

/// Catalog entry for `sensor_type`.
///
/// Total over [`SensorType`]; the table is ordered like [`SensorType::ALL`].
pub fn lookup(sensor_type: SensorType) -> &'static SensorTypeInfo {
    // ---
    &CATALOG[sensor_type as usize]
}

/// The full catalog, for rendering the sensor picker.
pub fn all() -> &'static [SensorTypeInfo] {
    &CATALOG
}
