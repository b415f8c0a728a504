//! Fixed optical and geometric defaults per HMD variant.

use serde::{Deserialize, Serialize};

use crate::variant::HmdVariant;

/// Panel resolution used when a variant has no native resolution of its
/// own, and for displays that do not correlate with any monitor.
pub const DEFAULT_RESOLUTION: (u32, u32) = (1280, 800);

/// Lens-to-screen distance shared by every known variant, in meters.
pub const DEFAULT_LENS_DISTANCE_M: f32 = 0.0635;

/// Screen geometry and lens layout of an HMD variant.
///
/// Lengths are in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalParameters {
    pub width_px: u32,
    pub height_px: u32,
    pub screen_width_m: f32,
    pub screen_height_m: f32,
    pub lens_separation_m: f32,
    pub lens_distance_m: f32,
}

/// Look up the optical constants for `variant`.
pub fn resolve_parameters(variant: HmdVariant) -> OpticalParameters {
    let (default_width, default_height) = DEFAULT_RESOLUTION;
    match variant {
        HmdVariant::Dk2 => OpticalParameters {
            width_px: 1920,
            height_px: 1080,
            screen_width_m: 0.12576,
            screen_height_m: 0.07074,
            lens_separation_m: 0.06288,
            lens_distance_m: DEFAULT_LENS_DISTANCE_M,
        },
        HmdVariant::DkHdPrototype => OpticalParameters {
            width_px: 1920,
            height_px: 1080,
            screen_width_m: 0.12096,
            screen_height_m: 0.06804,
            lens_separation_m: 0.03402,
            lens_distance_m: DEFAULT_LENS_DISTANCE_M,
        },
        HmdVariant::Dk1 | HmdVariant::FutureOculus => OpticalParameters {
            width_px: default_width,
            height_px: default_height,
            screen_width_m: 0.14976,
            screen_height_m: 0.0936,
            lens_separation_m: 0.0468,
            lens_distance_m: DEFAULT_LENS_DISTANCE_M,
        },
        HmdVariant::UnidentifiedPrototype => OpticalParameters {
            width_px: default_width,
            height_px: default_height,
            screen_width_m: 0.12096,
            screen_height_m: 0.0756,
            lens_separation_m: 0.0378,
            lens_distance_m: DEFAULT_LENS_DISTANCE_M,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn dk2_uses_full_hd_panel() {
        let p = resolve_parameters(HmdVariant::Dk2);
        assert_eq!((p.width_px, p.height_px), (1920, 1080));
        assert!(close(p.screen_width_m, 0.12576));
        assert!(close(p.screen_height_m, 0.07074));
        assert!(close(p.lens_separation_m, 0.06288));
        assert!(close(p.lens_distance_m, 0.0635));
    }

    #[test]
    fn hd_prototype_separation_is_half_screen_height() {
        let p = resolve_parameters(HmdVariant::DkHdPrototype);
        assert_eq!((p.width_px, p.height_px), (1920, 1080));
        assert!(close(p.lens_separation_m, p.screen_height_m * 0.5));
    }

    #[test]
    fn future_devices_share_dk1_optics() {
        assert_eq!(
            resolve_parameters(HmdVariant::FutureOculus),
            resolve_parameters(HmdVariant::Dk1)
        );
        let p = resolve_parameters(HmdVariant::Dk1);
        assert_eq!((p.width_px, p.height_px), DEFAULT_RESOLUTION);
        assert!(close(p.lens_separation_m, 0.0468));
    }

    #[test]
    fn prototype_uses_default_resolution() {
        let p = resolve_parameters(HmdVariant::UnidentifiedPrototype);
        assert_eq!((p.width_px, p.height_px), (1280, 800));
        assert!(close(p.screen_width_m, 0.12096));
        assert!(close(p.screen_height_m, 0.0756));
        assert!(close(p.lens_separation_m, 0.0378));
    }
}
