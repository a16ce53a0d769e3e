//! The metrics engine: derives a [`MetricsResult`] from a resolved ship record.
//!
//! Two assessment strategies exist, one per record schema. Registry records
//! carry fuel consumption and are assessed against an intensity threshold;
//! voyage-analytics records carry an externally computed compliance flag and
//! residuals. The strategy is chosen by the record's variant, which was
//! decided once at the resolution boundary — the engine never re-infers the
//! schema.
//!
//! The engine has no error path. Every missing field degrades to a documented
//! default, so partial records always produce a result. The cost of this
//! policy is that bad data can silently yield a zero-valued or "compliant"
//! result; the property tests pin the fallback behavior down.

use crate::config::Config;
use crate::fleet::{RegistryRecord, ShipRecord, VoyageRecord};
use crate::metrics::normalize::round_to;
use serde::Serialize;

/// The single flag color treated as compliant. Any other value, including an
/// absent flag, is non-compliant; there is no explicit "unknown" state.
pub const COMPLIANT_FLAG: &str = "GREEN";

/// Sentinel `flag_reason` value meaning no remark needs to be surfaced.
pub const NO_REMARK_SENTINEL: &str = "ok";

/// Derived compliance metrics for one ship. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    /// Total CO2 emissions in metric tons, rounded to 1 decimal.
    pub co2_emissions_total: f64,

    /// GHG intensity, rounded to 2 decimals. For registry records this is the
    /// placeholder formula value (gCO2eq/MJ); for voyage records it is the
    /// observed MRV intensity (kg/nm).
    pub intensity_value: f64,

    pub is_compliant: bool,

    /// Estimated penalty in EUR, rounded to 2 decimals. Strictly 0 when the
    /// ship is compliant.
    pub penalty_estimate: f64,

    /// Absolute residual between observed and predicted emissions, in kg.
    /// Only present for voyage-analytics records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual_amount: Option<f64>,

    /// Relative residual as a display percentage. The stored record value is
    /// a fraction; the conversion happens here and nowhere else.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual_percent: Option<f64>,

    /// Raw flag reason code, surfaced only when it signals an anomaly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_reason: Option<String>,
}

/// Assess a resolved ship record, producing compliance metrics.
///
/// Infallible by design: absent fields fall back to defaults rather than
/// failing, per the record-degradation policy documented on this module.
#[must_use]
pub fn assess(record: &ShipRecord, config: &Config) -> MetricsResult {
    match record {
        ShipRecord::Registry(registry) => assess_registry(registry, config),
        ShipRecord::Voyage(voyage) => assess_voyage(voyage),
    }
}

/// Threshold-based assessment for legacy registry records.
fn assess_registry(record: &RegistryRecord, config: &Config) -> MetricsResult {
    log::debug!("assessing registry record with threshold strategy");

    let fuel_type = record.fuel_type.as_deref();
    let factor = fuel_type
        .and_then(|fuel| config.emission_factors.get(fuel).copied())
        .unwrap_or(config.default_emission_factor);
    let consumption = record.annual_fuel_consumption_mt.unwrap_or(0.0);
    let co2_total = consumption * factor;

    // Placeholder intensity formula: a fixed baseline plus a per-fuel
    // surcharge. The shape (base + conditional fuel penalty) is the contract.
    let surcharge = fuel_type
        .and_then(|fuel| config.intensity_surcharges.get(fuel).copied())
        .unwrap_or(0.0);
    let intensity = config.base_intensity + surcharge;

    let is_compliant = intensity <= config.target_intensity;
    let penalty = if is_compliant {
        0.0
    } else {
        (intensity - config.target_intensity) * config.penalty_rate
    };

    MetricsResult {
        co2_emissions_total: round_to(co2_total, 1),
        intensity_value: round_to(intensity, 2),
        is_compliant,
        penalty_estimate: round_to(penalty, 2),
        residual_amount: None,
        residual_percent: None,
        flag_reason: None,
    }
}

/// Flag-based assessment for voyage-analytics records. Compliance was scored
/// upstream; this strategy surfaces the flag and residuals. No penalty tariff
/// exists for flag-based assessment, so the estimate is always 0.
fn assess_voyage(record: &VoyageRecord) -> MetricsResult {
    log::debug!("assessing voyage record with flag strategy");

    let is_compliant = record.flag_color.as_deref() == Some(COMPLIANT_FLAG);

    let intensity = record.y_mrv_co2_per_nm_kg.unwrap_or(0.0);
    let distance = record.ais_distance_nm_total.unwrap_or(0.0);
    // kg/nm times nm gives kg; totals are reported in metric tons
    let co2_total = intensity * distance / 1000.0;

    // Stored residual_pct is a fraction; displayed value is a percentage
    let residual_percent = record.residual_pct.unwrap_or(0.0) * 100.0;

    let flag_reason = record
        .flag_reason
        .as_deref()
        .filter(|reason| *reason != NO_REMARK_SENTINEL)
        .map(str::to_owned);

    MetricsResult {
        co2_emissions_total: round_to(co2_total, 1),
        intensity_value: round_to(intensity, 2),
        is_compliant,
        penalty_estimate: 0.0,
        residual_amount: Some(round_to(record.residual_kg.unwrap_or(0.0), 2)),
        residual_percent: Some(round_to(residual_percent, 2)),
        flag_reason,
    }
}
