use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::domain::types::TruckClass;

/// Input document for one simulation: the fleet on hand and the farms
/// it serves. Loaded once, kept as the snapshot `reset` restores from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub trucks: Vec<TruckSpec>,
    pub farms: Vec<FarmSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckSpec {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,
    pub capacity_tons: f64,
    #[serde(rename = "type")]
    pub class: TruckClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmSpec {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub inventory: u32,
    pub avg_weight: f64,
}

// Scenario files written by hand use integer truck ids, storage-backed
// ones use strings; accept both.
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Str(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => n.to_string(),
        Raw::Str(s) => s,
    })
}

impl Scenario {
    pub fn from_json(raw: &str) -> Result<Self, Box<dyn Error>> {
        let scenario: Scenario = serde_json::from_str(raw)?;
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("cannot read scenario file {}: {}", path.display(), e))?;
        let scenario = Self::from_json(&raw)
            .map_err(|e| format!("malformed scenario file {}: {}", path.display(), e))?;
        info!(
            "Scenario loaded: {} farms, {} trucks",
            scenario.farms.len(),
            scenario.trucks.len()
        );
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_and_string_truck_ids() {
        let raw = r#"{
            "trucks": [
                {"id": 1, "capacity_tons": 10, "type": "small"},
                {"id": "t-large", "capacity_tons": 20, "type": "large", "cost_per_km": 1.4}
            ],
            "farms": [
                {"id": "F1", "lat": 41.94, "lon": 2.26, "inventory": 500, "avg_weight": 98.5}
            ]
        }"#;

        let scenario = Scenario::from_json(raw).unwrap();
        assert_eq!(scenario.trucks[0].id, "1");
        assert_eq!(scenario.trucks[0].class, TruckClass::Small);
        assert_eq!(scenario.trucks[0].cost_per_km, None);
        assert_eq!(scenario.trucks[1].id, "t-large");
        assert_eq!(scenario.trucks[1].cost_per_km, Some(1.4));
        assert_eq!(scenario.farms[0].inventory, 500);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(Scenario::from_json("{\"trucks\": []}").is_err());
        assert!(Scenario::from_json("not json").is_err());
    }
}
