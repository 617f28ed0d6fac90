//! Fixed perceptually-ordered color lookup table.
//!
//! Uses the Turbo colormap via its published fifth-order polynomial
//! approximation, sampled once into a 256-entry RGB table. Turbo is
//! perceptually ordered (dark blue through green to dark red), which keeps
//! weak and strong regions of the overlay distinguishable at a glance.

use std::sync::OnceLock;

/// The 256-entry RGB lookup table mapping an 8-bit intensity to a color.
pub fn turbo_lut() -> &'static [[u8; 3]; 256] {
    static LUT: OnceLock<[[u8; 3]; 256]> = OnceLock::new();
    LUT.get_or_init(|| {
        let mut lut = [[0u8; 3]; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = turbo(i as f64 / 255.0);
        }
        lut
    })
}

/// Evaluate the Turbo polynomial at `t` in `[0, 1]`.
fn turbo(t: f64) -> [u8; 3] {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let r = 0.135_721_38 + 4.615_392_60 * t - 42.660_322_58 * t2 + 132.131_082_34 * t3
        - 152.942_393_96 * t4
        + 59.286_379_43 * t5;
    let g = 0.091_402_61 + 2.194_188_39 * t + 4.842_966_58 * t2 - 14.185_033_33 * t3
        + 4.277_298_57 * t4
        + 2.829_566_04 * t5;
    let b = 0.106_673_30 + 12.641_946_08 * t - 60.582_048_36 * t2 + 110.362_767_71 * t3
        - 89.903_109_12 * t4
        + 27.348_249_73 * t5;

    [quantize(r), quantize(g), quantize(b)]
}

fn quantize(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lut_has_256_entries_and_is_stable() {
        let lut = turbo_lut();
        assert_eq!(lut.len(), 256);
        assert_eq!(turbo_lut(), lut);
    }

    #[test]
    fn endpoints_are_dark_and_distinct() {
        let lut = turbo_lut();
        let low = lut[0];
        let high = lut[255];
        assert_ne!(low, high);
        // Both ends of Turbo are dark; the midpoint is bright.
        for c in low.iter().chain(high.iter()) {
            assert!(*c < 160, "endpoint channel {c} unexpectedly bright");
        }
    }

    #[test]
    fn midpoint_is_brighter_than_endpoints() {
        let lut = turbo_lut();
        let sum = |c: [u8; 3]| c.iter().map(|&v| u32::from(v)).sum::<u32>();
        assert!(sum(lut[128]) > sum(lut[0]));
        assert!(sum(lut[128]) > sum(lut[255]));
    }

    #[test]
    fn high_end_is_red_dominant_low_end_is_not() {
        let lut = turbo_lut();
        assert!(lut[255][0] > lut[255][2], "high end should be red over blue");
        assert!(lut[64][2] > lut[64][0], "low quarter should be blue over red");
    }
}
