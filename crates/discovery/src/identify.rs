//! HMD identification from hardware identifier strings.
//!
//! Monitor device ids carry the EDID vendor/product code, e.g.
//! `MONITOR\OVR0003\{4d36e96e-e325-11ce-bfc1-08002be10318}\0001`. A device
//! is an HMD when its id contains one of the patterns below; when several
//! patterns match, the rule with the lowest priority value wins.

use crate::variant::HmdVariant;

/// One entry of the identification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierRule {
    /// Substring searched for in the device id. Case sensitive.
    pub pattern: &'static str,
    pub variant: HmdVariant,
    /// Lower values win over higher ones.
    pub priority: u8,
}

/// Oculus EDID vendor prefix shared by every Oculus model code.
pub const OCULUS_VENDOR_PREFIX: &str = "OVR00";

/// Identification table in priority order.
pub const IDENTIFIER_RULES: [IdentifierRule; 7] = [
    IdentifierRule {
        pattern: "OVR0003",
        variant: HmdVariant::Dk2,
        priority: 0,
    },
    IdentifierRule {
        pattern: "OVR0002",
        variant: HmdVariant::DkHdPrototype,
        priority: 1,
    },
    IdentifierRule {
        pattern: "OVR0001",
        variant: HmdVariant::Dk1,
        priority: 2,
    },
    IdentifierRule {
        pattern: OCULUS_VENDOR_PREFIX,
        variant: HmdVariant::FutureOculus,
        priority: 3,
    },
    // Display controllers used by pre-EDID prototypes.
    IdentifierRule {
        pattern: "RTD2205",
        variant: HmdVariant::UnidentifiedPrototype,
        priority: 4,
    },
    IdentifierRule {
        pattern: "CVT0003",
        variant: HmdVariant::UnidentifiedPrototype,
        priority: 4,
    },
    IdentifierRule {
        pattern: "MST0030",
        variant: HmdVariant::UnidentifiedPrototype,
        priority: 4,
    },
];

/// Highest priority rule whose pattern occurs in `device_id`.
///
/// Ties keep table order.
pub fn matching_rule(device_id: &str) -> Option<&'static IdentifierRule> {
    IDENTIFIER_RULES
        .iter()
        .filter(|rule| device_id.contains(rule.pattern))
        .min_by_key(|rule| rule.priority)
}

/// Classify a monitor device id. `None` means the device is not an HMD.
pub fn identify(device_id: &str) -> Option<HmdVariant> {
    matching_rule(device_id).map(|rule| rule.variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn model_codes_resolve_to_their_variant() {
        assert_eq!(identify(r"MONITOR\OVR0003\{guid}\0001"), Some(HmdVariant::Dk2));
        assert_eq!(identify(r"MONITOR\OVR0002\{guid}"), Some(HmdVariant::DkHdPrototype));
        assert_eq!(identify("OVR0001ABC"), Some(HmdVariant::Dk1));
    }

    #[test]
    fn vendor_prefix_alone_is_future_device() {
        assert_eq!(identify("OVR0042"), Some(HmdVariant::FutureOculus));
        assert_eq!(identify(r"MONITOR\OVR00"), Some(HmdVariant::FutureOculus));
    }

    #[test]
    fn controller_codes_are_prototypes() {
        assert_eq!(identify("RTD2205"), Some(HmdVariant::UnidentifiedPrototype));
        assert_eq!(identify(r"MONITOR\CVT0003\x"), Some(HmdVariant::UnidentifiedPrototype));
        assert_eq!(identify("MST0030"), Some(HmdVariant::UnidentifiedPrototype));
    }

    #[test]
    fn vendor_prefix_outranks_controller_codes() {
        assert_eq!(identify("RTD2205-OVR0077"), Some(HmdVariant::FutureOculus));
        assert_eq!(identify("RTD2205-OVR0003"), Some(HmdVariant::Dk2));
    }

    #[test]
    fn ordinary_monitors_are_not_hmds() {
        assert_eq!(identify(r"MONITOR\DEL4082\{guid}\0002"), None);
        assert_eq!(identify(""), None);
        assert_eq!(identify("ovr0003"), None);
    }

    #[test]
    fn every_model_code_contains_the_vendor_prefix() {
        for rule in IDENTIFIER_RULES.iter().filter(|r| r.priority < 3) {
            assert!(rule.pattern.starts_with(OCULUS_VENDOR_PREFIX));
        }
    }

    #[test]
    fn table_is_sorted_by_priority() {
        assert!(IDENTIFIER_RULES
            .windows(2)
            .all(|pair| pair[0].priority <= pair[1].priority));
    }

    fn model_rule() -> impl Strategy<Value = IdentifierRule> {
        prop::sample::select(
            IDENTIFIER_RULES
                .iter()
                .copied()
                .filter(|r| r.pattern != OCULUS_VENDOR_PREFIX && r.pattern.starts_with("OVR"))
                .collect::<Vec<_>>(),
        )
    }

    proptest! {
        #[test]
        fn model_code_wins_over_generic_prefix(
            rule in model_rule(),
            head in "[A-Z\\\\{}-]{0,12}",
            tail in "[A-Z\\\\{}-]{0,12}",
            extra_prefix in any::<bool>(),
        ) {
            let suffix = if extra_prefix { format!("{tail}OVR0099") } else { tail };
            let id = format!("{head}{}{suffix}", rule.pattern);
            prop_assert_eq!(identify(&id), Some(rule.variant));
        }

        #[test]
        fn prefix_without_model_code_is_future(
            digits in "[4-9][0-9]",
            head in "[A-Z\\\\]{0,8}",
        ) {
            let id = format!("{head}OVR00{digits}");
            prop_assert_eq!(identify(&id), Some(HmdVariant::FutureOculus));
        }

        #[test]
        fn ids_without_known_patterns_do_not_match(id in "[a-z0-9\\\\{}-]{0,40}") {
            prop_assert_eq!(identify(&id), None);
        }
    }
}
