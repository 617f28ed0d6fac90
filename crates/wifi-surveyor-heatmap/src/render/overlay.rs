//! Pure overlay composition: samples in, blended image out.
//!
//! The stages mirror the write path of the renderer one-for-one and are
//! split out so tests can assert on exact pixels without any filesystem:
//!
//! 1. accumulate normalized sample intensities as filled disks on a
//!    floating-point canvas (overlapping disks reinforce),
//! 2. clip and quantize to 8 bits,
//! 3. Gaussian-blur the disks into a smooth gradient field,
//! 4. map intensities through the color lookup table,
//! 5. alpha-blend the color field over the base floor plan.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;

use wifi_surveyor_core::types::{Category, Sample};

use super::colormap::turbo_lut;

// ---------------------------------------------------------------------------
// Value ranges
// ---------------------------------------------------------------------------

/// Saturation bounds normalizing a series' values to `[0, 1]`.
///
/// The bounds are empirically chosen per category, not derived from data:
/// anything at or below `min` renders as the coolest color, anything at or
/// above `max` as the hottest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Value mapped to intensity 0.
    pub min: f64,
    /// Value mapped to intensity 255.
    pub max: f64,
}

/// Signal series bounds: -90 dBm (unusable) to -30 dBm (excellent).
pub const SIGNAL_RANGE: ValueRange = ValueRange {
    min: -90.0,
    max: -30.0,
};

/// Congestion series bounds: 0 to 20 access points on a channel.
pub const CHANNEL_RANGE: ValueRange = ValueRange { min: 0.0, max: 20.0 };

impl ValueRange {
    /// The default saturation bounds for a category.
    #[must_use]
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Signal => SIGNAL_RANGE,
            Category::Channel => CHANNEL_RANGE,
        }
    }

    /// Normalize a value into `[0, 1]`, clamping outside the bounds.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Composition parameters
// ---------------------------------------------------------------------------

/// Fixed rendering parameters.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Radius in pixels of the disk stamped per sample.
    pub radius: i32,
    /// Standard deviation of the Gaussian blur pass.
    pub sigma: f32,
    /// Heatmap weight in the final blend; the base image gets the rest.
    pub heat_alpha: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            radius: 30,
            sigma: 30.0,
            heat_alpha: 0.6,
        }
    }
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Accumulate samples as filled disks on a single-channel canvas.
///
/// Each sample contributes a disk of fixed radius centered at its
/// coordinate, with intensity proportional to its normalized value; disks
/// from nearby samples add up rather than overwrite. Pixels outside the
/// canvas are clipped silently, so out-of-bounds samples draw their
/// visible part and nothing else. The accumulated canvas is clipped to
/// `[0, 255]` and quantized.
#[must_use]
pub fn accumulate_field(
    samples: &[Sample],
    width: u32,
    height: u32,
    range: ValueRange,
    radius: i32,
) -> GrayImage {
    let (w, h) = (width as i64, height as i64);
    let mut canvas = vec![0.0f32; (w * h) as usize];

    for sample in samples {
        // Scale to an 8-bit intensity before accumulating.
        let intensity = (range.normalize(sample.value) * 255.0).floor() as f32;
        let (cx, cy) = (i64::from(sample.x), i64::from(sample.y));
        let r = i64::from(radius);

        for dy in -r..=r {
            let py = cy + dy;
            if py < 0 || py >= h {
                continue;
            }
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let px = cx + dx;
                if px < 0 || px >= w {
                    continue;
                }
                canvas[(py * w + px) as usize] += intensity;
            }
        }
    }

    GrayImage::from_raw(
        width,
        height,
        canvas
            .into_iter()
            .map(|v| v.clamp(0.0, 255.0).round() as u8)
            .collect(),
    )
    .expect("canvas buffer matches dimensions")
}

/// Compose the full overlay for one series over a base image.
///
/// An empty sample list is rendered like any other: an all-zero intensity
/// field, i.e. the base image blended with the coolest color at the
/// configured opacity. Keeping that path uniform means callers always get
/// an overlay back, never a special case.
#[must_use]
pub fn render_overlay(
    samples: &[Sample],
    base: &RgbImage,
    range: ValueRange,
    config: &RenderConfig,
) -> RgbImage {
    let (width, height) = base.dimensions();

    let field = accumulate_field(samples, width, height, range, config.radius);
    let blurred = gaussian_blur_f32(&field, config.sigma);
    let lut = turbo_lut();

    let alpha = config.heat_alpha;
    RgbImage::from_fn(width, height, |x, y| {
        let heat = lut[blurred.get_pixel(x, y)[0] as usize];
        let under = base.get_pixel(x, y);
        Rgb([
            blend_channel(heat[0], under[0], alpha),
            blend_channel(heat[1], under[1], alpha),
            blend_channel(heat[2], under[2], alpha),
        ])
    })
}

fn blend_channel(heat: u8, base: u8, alpha: f32) -> u8 {
    (alpha * f32::from(heat) + (1.0 - alpha) * f32::from(base))
        .round()
        .clamp(0.0, 255.0) as u8
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: i32, y: i32, value: f64) -> Sample {
        Sample { x, y, value }
    }

    // -- value ranges ---------------------------------------------------------

    #[test]
    fn normalize_clamps_to_unit_interval() {
        let range = SIGNAL_RANGE;
        assert!((range.normalize(-90.0) - 0.0).abs() < f64::EPSILON);
        assert!((range.normalize(-30.0) - 1.0).abs() < f64::EPSILON);
        assert!((range.normalize(-60.0) - 0.5).abs() < f64::EPSILON);
        assert!((range.normalize(-120.0) - 0.0).abs() < f64::EPSILON);
        assert!((range.normalize(0.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn category_ranges() {
        assert_eq!(ValueRange::for_category(Category::Signal), SIGNAL_RANGE);
        assert_eq!(ValueRange::for_category(Category::Channel), CHANNEL_RANGE);
    }

    // -- accumulation ---------------------------------------------------------

    #[test]
    fn max_value_sample_saturates_disk_center() {
        let field = accumulate_field(&[sample(50, 50, -30.0)], 100, 100, SIGNAL_RANGE, 30);
        assert_eq!(field.get_pixel(50, 50)[0], 255);
        // Inside the disk.
        assert_eq!(field.get_pixel(50 + 29, 50)[0], 255);
        // Outside the disk.
        assert_eq!(field.get_pixel(50, 95)[0], 0);
    }

    #[test]
    fn min_value_sample_leaves_field_dark() {
        let field = accumulate_field(&[sample(50, 50, -90.0)], 100, 100, SIGNAL_RANGE, 30);
        assert_eq!(field.get_pixel(50, 50)[0], 0);
    }

    #[test]
    fn overlapping_disks_reinforce_and_clip_at_255() {
        let samples = [sample(50, 50, -60.0), sample(50, 50, -60.0)];
        let field = accumulate_field(&samples, 100, 100, SIGNAL_RANGE, 30);
        // Two half-intensity disks add to 254, not overwrite at 127.
        assert_eq!(field.get_pixel(50, 50)[0], 254);

        let saturated = [sample(50, 50, -30.0), sample(50, 50, -60.0)];
        let field = accumulate_field(&saturated, 100, 100, SIGNAL_RANGE, 30);
        assert_eq!(field.get_pixel(50, 50)[0], 255);
    }

    #[test]
    fn out_of_bounds_samples_clip_silently() {
        // Fully outside.
        let field = accumulate_field(&[sample(500, 500, -30.0)], 100, 100, SIGNAL_RANGE, 30);
        assert!(field.pixels().all(|p| p[0] == 0));

        // Partially outside: the visible sliver is drawn.
        let field = accumulate_field(&[sample(-10, 50, -30.0)], 100, 100, SIGNAL_RANGE, 30);
        assert_eq!(field.get_pixel(0, 50)[0], 255);
        assert_eq!(field.get_pixel(25, 50)[0], 0);

        // Negative far coordinates must not panic.
        let field = accumulate_field(&[sample(-500, -500, -30.0)], 100, 100, SIGNAL_RANGE, 30);
        assert!(field.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn empty_sample_list_yields_zero_field() {
        let field = accumulate_field(&[], 64, 64, SIGNAL_RANGE, 30);
        assert!(field.pixels().all(|p| p[0] == 0));
    }

    // -- composition ----------------------------------------------------------

    #[test]
    fn empty_series_blends_coolest_color_uniformly() {
        let base = RgbImage::from_pixel(64, 64, Rgb([200, 200, 200]));
        let overlay = render_overlay(&[], &base, SIGNAL_RANGE, &RenderConfig::default());

        let cold = turbo_lut()[0];
        let expected = Rgb([
            blend_channel(cold[0], 200, 0.6),
            blend_channel(cold[1], 200, 0.6),
            blend_channel(cold[2], 200, 0.6),
        ]);
        assert!(overlay.pixels().all(|p| *p == expected));
    }

    #[test]
    fn composition_is_deterministic() {
        let base = RgbImage::from_pixel(120, 120, Rgb([255, 255, 255]));
        let samples = [sample(40, 40, -45.0), sample(80, 80, -75.0)];
        let a = render_overlay(&samples, &base, SIGNAL_RANGE, &RenderConfig::default());
        let b = render_overlay(&samples, &base, SIGNAL_RANGE, &RenderConfig::default());
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn hot_and_cold_regions_diverge_after_blur() {
        // One strong corner and one weak corner on a large floor plan.
        let base = RgbImage::from_pixel(600, 600, Rgb([255, 255, 255]));
        let samples = [sample(100, 100, -30.0), sample(500, 500, -90.0)];
        let overlay = render_overlay(&samples, &base, SIGNAL_RANGE, &RenderConfig::default());

        let hot = overlay.get_pixel(100, 100);
        let cold = overlay.get_pixel(500, 500);

        // The cold spot stays at the bottom of the color table.
        let lut0 = turbo_lut()[0];
        let expected_cold = Rgb([
            blend_channel(lut0[0], 255, 0.6),
            blend_channel(lut0[1], 255, 0.6),
            blend_channel(lut0[2], 255, 0.6),
        ]);
        assert_eq!(*cold, expected_cold);

        // The hot spot climbs well up the table: Turbo's green channel
        // rises steeply with intensity.
        assert!(
            hot[1] > cold[1] + 50,
            "hot {hot:?} should be clearly greener than cold {cold:?}"
        );

        // The midpoint between the two shows a value between the extremes.
        let mid = overlay.get_pixel(300, 300);
        assert!(mid[1] <= hot[1]);
        assert!(mid[1] >= cold[1]);
    }
}
