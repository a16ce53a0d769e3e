use crate::Result;
use ohno::IntoAppError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Record keys that only the voyage-analytics schema carries. Presence of any
/// of them classifies an untagged record as [`ShipRecord::Voyage`].
const VOYAGE_KEYS: &[&str] = &[
    "flag_color",
    "flag_reason",
    "residual_kg",
    "residual_pct",
    "ais_distance_nm_total",
    "ais_time_hours_total",
    "y_mrv_co2_per_nm_kg",
    "y_pred_co2_per_nm_kg",
];

/// A resolved ship record, tagged with its source schema.
///
/// The discriminant is decided exactly once, when the raw record is resolved
/// ([`ShipRecord::classify`]); downstream consumers dispatch on the variant
/// and never re-inspect field presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum ShipRecord {
    /// Legacy ship-registry schema: particulars plus annual fuel consumption.
    Registry(RegistryRecord),

    /// Voyage-analytics schema: AIS-derived metrics plus an externally
    /// computed compliance flag and residuals.
    Voyage(VoyageRecord),
}

impl ShipRecord {
    /// Classify a raw record into its schema variant.
    ///
    /// An explicit `"schema"` tag wins. Otherwise the variant is inferred
    /// from field presence: any voyage-analytics key selects `Voyage`, and
    /// everything else is treated as a registry record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not an object or a field has a type
    /// the schema cannot represent.
    pub fn classify(raw: &Value) -> Result<Self> {
        if raw.get("schema").is_some() {
            return serde_json::from_value(raw.clone()).into_app_err("parsing tagged ship record");
        }

        let is_voyage = raw
            .as_object()
            .is_some_and(|map| VOYAGE_KEYS.iter().any(|key| map.contains_key(*key)));

        if is_voyage {
            let record = serde_json::from_value(raw.clone()).into_app_err("parsing voyage-analytics ship record")?;
            Ok(Self::Voyage(record))
        } else {
            let record = serde_json::from_value(raw.clone()).into_app_err("parsing registry ship record")?;
            Ok(Self::Registry(record))
        }
    }

    /// Display name of the ship, if the record carries one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Registry(registry) => registry.name.as_deref(),
            Self::Voyage(voyage) => voyage.ship_name.as_deref(),
        }
    }
}

/// Legacy registry record. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryRecord {
    pub name: Option<String>,

    pub flag: Option<String>,

    #[serde(rename = "type")]
    pub ship_type: Option<String>,

    #[serde(rename = "grossTonnage")]
    pub gross_tonnage: Option<f64>,

    #[serde(rename = "fuelType")]
    pub fuel_type: Option<String>,

    #[serde(rename = "enginePowerKW")]
    pub engine_power_kw: Option<f64>,

    #[serde(rename = "annualFuelConsumptionMT")]
    pub annual_fuel_consumption_mt: Option<f64>,
}

/// Voyage-analytics record. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoyageRecord {
    pub ship_name: Option<String>,

    /// Some sources store the IMO as a number rather than a string.
    #[serde(alias = "IMO", default, deserialize_with = "flexible_string")]
    pub imo: Option<String>,

    pub mrv_ship_type: Option<String>,

    #[serde(alias = "VesselType")]
    pub vessel_type: Option<String>,

    pub report_year: Option<i32>,

    #[serde(alias = "Length")]
    pub length: Option<f64>,

    #[serde(alias = "Width")]
    pub width: Option<f64>,

    pub draft_m_median: Option<f64>,

    pub ais_distance_nm_total: Option<f64>,

    pub ais_time_hours_total: Option<f64>,

    pub y_mrv_co2_per_nm_kg: Option<f64>,

    pub y_pred_co2_per_nm_kg: Option<f64>,

    pub flag_color: Option<String>,

    pub flag_reason: Option<String>,

    pub residual_kg: Option<f64>,

    pub residual_pct: Option<f64>,
}

/// Accept a string, integer, or float where a string field is expected.
fn flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_registry_by_default() {
        let raw = json!({
            "name": "MS Atlantic Explorer",
            "flag": "Germany",
            "type": "Container",
            "grossTonnage": 45230,
            "fuelType": "HFO",
            "annualFuelConsumptionMT": 1200
        });

        let ShipRecord::Registry(record) = ShipRecord::classify(&raw).unwrap() else {
            panic!("expected registry variant");
        };
        assert_eq!(record.name.as_deref(), Some("MS Atlantic Explorer"));
        assert_eq!(record.ship_type.as_deref(), Some("Container"));
        assert_eq!(record.fuel_type.as_deref(), Some("HFO"));
        assert_eq!(record.annual_fuel_consumption_mt, Some(1200.0));
    }

    #[test]
    fn test_classify_voyage_by_capability() {
        let raw = json!({
            "ship_name": "MV Coral Meridian",
            "IMO": 1014618,
            "flag_color": "RED",
            "residual_pct": 0.42
        });

        let ShipRecord::Voyage(record) = ShipRecord::classify(&raw).unwrap() else {
            panic!("expected voyage variant");
        };
        assert_eq!(record.ship_name.as_deref(), Some("MV Coral Meridian"));
        assert_eq!(record.imo.as_deref(), Some("1014618"));
        assert_eq!(record.flag_color.as_deref(), Some("RED"));
    }

    #[test]
    fn test_classify_honors_explicit_tag() {
        let raw = json!({
            "schema": "voyage",
            "ship_name": "MS Baltic Crown"
        });

        assert!(matches!(ShipRecord::classify(&raw).unwrap(), ShipRecord::Voyage(_)));
    }

    #[test]
    fn test_classify_empty_object_is_registry() {
        let record = ShipRecord::classify(&json!({})).unwrap();
        assert_eq!(record, ShipRecord::Registry(RegistryRecord::default()));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw = json!({
            "flag_color": "GREEN",
            "sog_mean_kn": 11.7,
            "moving_share": 0.82
        });

        assert!(ShipRecord::classify(&raw).is_ok());
    }

    #[test]
    fn test_record_name_accessor() {
        let registry = ShipRecord::Registry(RegistryRecord {
            name: Some("A".to_owned()),
            ..RegistryRecord::default()
        });
        let voyage = ShipRecord::Voyage(VoyageRecord {
            ship_name: Some("B".to_owned()),
            ..VoyageRecord::default()
        });

        assert_eq!(registry.name(), Some("A"));
        assert_eq!(voyage.name(), Some("B"));
    }
}
