use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse Wi-Fi link quality derived from a signal strength in dBm.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalQuality {
    #[default]
    Disconnected,
    Weak,
    Fair,
    Good,
    Excellent,
}

impl SignalQuality {
    pub fn from_strength(strength: Option<&str>) -> Self {
        let Some(dbm) = strength.and_then(|text| text.trim().parse::<f64>().ok()) else {
            return SignalQuality::Disconnected;
        };

        match dbm {
            dbm if dbm > -50.0 => SignalQuality::Excellent,
            dbm if dbm > -60.0 => SignalQuality::Good,
            dbm if dbm > -70.0 => SignalQuality::Fair,
            _ => SignalQuality::Weak,
        }
    }
}

impl fmt::Display for SignalQuality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SignalQuality::Disconnected => write!(f, "disconnected"),
            SignalQuality::Weak => write!(f, "weak"),
            SignalQuality::Fair => write!(f, "fair"),
            SignalQuality::Good => write!(f, "good"),
            SignalQuality::Excellent => write!(f, "excellent"),
        }
    }
}
