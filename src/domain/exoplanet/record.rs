//! Input record schema for exoplanet candidates

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// What to do with keys that are not part of the record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFieldPolicy {
    /// Silently drop unknown keys
    #[default]
    Ignore,
    /// Fail validation on the first unknown key
    Reject,
}

macro_rules! input_record {
    ($($field:ident),+ $(,)?) => {
        /// Raw measurements for one exoplanet candidate and its host star.
        ///
        /// Every field is optional. Field declaration order is the model's
        /// feature order and must not change.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct InputRecord {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<f64>,
            )+
        }

        impl InputRecord {
            /// Every field name, in feature order
            pub const FIELD_NAMES: &'static [&'static str] = &[$(stringify!($field)),+];

            /// Look up a field by name
            pub fn get(&self, name: &str) -> Option<f64> {
                match name {
                    $(stringify!($field) => self.$field,)+
                    _ => None,
                }
            }

            fn slot_mut(&mut self, name: &str) -> Option<&mut Option<f64>> {
                match name {
                    $(stringify!($field) => Some(&mut self.$field),)+
                    _ => None,
                }
            }
        }
    };
}

input_record!(
    pl_eqt,
    st_tmag,
    st_dist,
    pl_rade,
    pl_trandurherr1,
    pl_orbper,
    pl_trandurh,
    pl_radeerr1,
    st_loggerr1,
    pl_trandeperr1,
    pl_orbpererr1,
    st_teff,
    pl_insol,
    planet_to_star_ratio,
    duration_to_period,
    depth_to_radius,
    insolation_eff_ratio,
    eqt_to_insol,
    tran_snr_proxy,
    st_raderr1,
    st_disterr1,
    st_pmdecerr1,
    st_pmraerr1,
    st_pmdec,
    st_pmra,
    st_logg,
    ra,
    dec,
    st_rad,
    pl_trandep,
);

impl InputRecord {
    /// True if `name` is part of the schema
    pub fn is_known_field(name: &str) -> bool {
        Self::FIELD_NAMES.contains(&name)
    }

    /// Build a record from loosely typed key/value pairs.
    ///
    /// Numbers and numeric strings are coerced to `f64`. `null`, empty
    /// strings and the usual missing-value markers (`NA`, `NaN`, `null`)
    /// leave the field absent.
    pub fn from_fields(
        fields: &Map<String, Value>,
        policy: UnknownFieldPolicy,
    ) -> Result<Self, DomainError> {
        let mut record = Self::default();

        for (key, value) in fields {
            let name = key.trim();

            let Some(slot) = record.slot_mut(name) else {
                if policy == UnknownFieldPolicy::Reject {
                    return Err(DomainError::validation(format!("Unknown field '{}'", name)));
                }
                continue;
            };

            *slot = coerce_value(name, value)?;
        }

        Ok(record)
    }

    /// Fields that carry a value, in feature order
    pub fn present_fields(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Self::FIELD_NAMES
            .iter()
            .filter_map(|name| self.get(name).map(|v| (*name, v)))
    }
}

fn coerce_value(field: &str, value: &Value) -> Result<Option<f64>, DomainError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let v = n
                .as_f64()
                .ok_or_else(|| DomainError::missing_or_invalid(field, "not a valid number"))?;
            ensure_finite(field, v).map(Some)
        }
        Value::String(s) => {
            let s = s.trim();

            if is_missing_marker(s) {
                return Ok(None);
            }

            let v = s.parse::<f64>().map_err(|_| {
                DomainError::missing_or_invalid(field, format!("'{}' is not a number", s))
            })?;
            ensure_finite(field, v).map(Some)
        }
        _ => Err(DomainError::missing_or_invalid(field, "expected a number")),
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::missing_or_invalid(field, "value must be finite"))
    }
}

/// Cell texts that spreadsheet and dataframe exports use for "no value"
const MISSING_MARKERS: [&str; 6] = ["na", "n/a", "#n/a", "nan", "null", "none"];

fn is_missing_marker(s: &str) -> bool {
    s.is_empty() || MISSING_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m))
}
