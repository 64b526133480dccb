//! Derived feature computation

use serde::{Deserialize, Serialize};

use super::record::InputRecord;
use crate::domain::DomainError;

/// The six ratios the model expects next to the raw measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub planet_to_star_ratio: f64,
    pub duration_to_period: f64,
    pub depth_to_radius: f64,
    pub insolation_eff_ratio: f64,
    pub eqt_to_insol: f64,
    pub tran_snr_proxy: f64,
}

impl DerivedFeatures {
    pub const NAMES: [&'static str; 6] = [
        "planet_to_star_ratio",
        "duration_to_period",
        "depth_to_radius",
        "insolation_eff_ratio",
        "eqt_to_insol",
        "tran_snr_proxy",
    ];

    /// Compute every ratio from a record.
    ///
    /// Fails on the first ratio whose operands are missing, whose divisor
    /// is zero, or whose result is not finite.
    pub fn derive(record: &InputRecord) -> Result<Self, DomainError> {
        let pl_rade = required(record.pl_rade, "pl_rade")?;
        let pl_trandep = required(record.pl_trandep, "pl_trandep")?;
        let pl_insol = required(record.pl_insol, "pl_insol")?;

        Ok(Self {
            planet_to_star_ratio: ratio(
                "planet_to_star_ratio",
                pl_rade,
                required(record.st_rad, "st_rad")?,
                "st_rad",
            )?,
            duration_to_period: ratio(
                "duration_to_period",
                required(record.pl_trandurh, "pl_trandurh")?,
                required(record.pl_orbper, "pl_orbper")?,
                "pl_orbper",
            )?,
            depth_to_radius: ratio("depth_to_radius", pl_trandep, pl_rade, "pl_rade")?,
            insolation_eff_ratio: ratio(
                "insolation_eff_ratio",
                pl_insol,
                required(record.st_teff, "st_teff")? * 4.0,
                "st_teff",
            )?,
            eqt_to_insol: ratio(
                "eqt_to_insol",
                required(record.pl_eqt, "pl_eqt")?,
                pl_insol * 0.25,
                "pl_insol",
            )?,
            tran_snr_proxy: ratio(
                "tran_snr_proxy",
                pl_trandep,
                required(record.pl_trandeperr1, "pl_trandeperr1")?,
                "pl_trandeperr1",
            )?,
        })
    }

    /// Look up a ratio by its feature name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "planet_to_star_ratio" => Some(self.planet_to_star_ratio),
            "duration_to_period" => Some(self.duration_to_period),
            "depth_to_radius" => Some(self.depth_to_radius),
            "insolation_eff_ratio" => Some(self.insolation_eff_ratio),
            "eqt_to_insol" => Some(self.eqt_to_insol),
            "tran_snr_proxy" => Some(self.tran_snr_proxy),
            _ => None,
        }
    }
}

fn required(value: Option<f64>, field: &str) -> Result<f64, DomainError> {
    value.ok_or_else(|| DomainError::missing_or_invalid(field, "value is required"))
}

fn ratio(name: &str, numerator: f64, divisor: f64, divisor_field: &str) -> Result<f64, DomainError> {
    if divisor == 0.0 {
        return Err(DomainError::missing_or_invalid(
            divisor_field,
            format!("cannot compute {}: divisor is zero", name),
        ));
    }

    let value = numerator / divisor;

    if !value.is_finite() {
        return Err(DomainError::missing_or_invalid(
            divisor_field,
            format!("cannot compute {}: result is not finite", name),
        ));
    }

    Ok(value)
}

/// Raw fields merged with derived features, in model feature order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<(&'static str, Option<f64>)>,
}

impl FeatureRow {
    /// Merge a record with its derived features.
    ///
    /// Derived names overwrite whatever the caller sent for them, keeping
    /// their position in the feature order.
    pub fn merge(record: &InputRecord, derived: &DerivedFeatures) -> Self {
        let values = InputRecord::FIELD_NAMES
            .iter()
            .map(|name| {
                let value = derived.get(name).or_else(|| record.get(name));
                (*name, value)
            })
            .collect();

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
