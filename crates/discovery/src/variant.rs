//! Recognized HMD hardware variants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recognized HMD hardware model, or a fallback class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HmdVariant {
    /// Development Kit 1.
    Dk1,
    /// HD prototype panels.
    DkHdPrototype,
    /// Development Kit 2 and its prototypes.
    Dk2,
    /// An Oculus EDID without a known model code. Uses DK1 optics.
    FutureOculus,
    /// Early prototypes built on third-party display controllers.
    UnidentifiedPrototype,
}

impl HmdVariant {
    /// Every variant, in declaration order.
    pub fn all() -> &'static [HmdVariant] {
        &[
            HmdVariant::Dk1,
            HmdVariant::DkHdPrototype,
            HmdVariant::Dk2,
            HmdVariant::FutureOculus,
            HmdVariant::UnidentifiedPrototype,
        ]
    }

    /// Stable short name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            HmdVariant::Dk1 => "dk1",
            HmdVariant::DkHdPrototype => "dk_hd_prototype",
            HmdVariant::Dk2 => "dk2",
            HmdVariant::FutureOculus => "future_oculus",
            HmdVariant::UnidentifiedPrototype => "unidentified_prototype",
        }
    }
}

impl fmt::Display for HmdVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matches_serialized_form() {
        for variant in HmdVariant::all() {
            let json = serde_json::to_string(variant).unwrap();
            assert_eq!(json, format!("\"{}\"", variant.name()));
        }
    }
}
