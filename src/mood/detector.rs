//! Frame-based mood heuristic.
//!
//! This is a placeholder classifier, not a facial-recognition model: it scans
//! the frame for a skin-tone face region, derives three coarse geometry
//! ratios from luminance bands inside that region, and buckets them against
//! hand-tuned thresholds in a fixed priority order. Frames without a
//! detectable face yield `None`, which the UI turns into a "pick manually"
//! notice. The contract that matters is the signature and None-on-failure;
//! any plausible local classifier could replace the internals.

use crate::models::Mood;
use image::RgbaImage;
use rand::seq::IndexedRandom;

// Minimum share of skin-tone pixels for a frame to count as containing a face.
const MIN_FACE_COVERAGE: f32 = 0.02;

// Classification thresholds over the [0, 1] metrics below. Tuning constants
// with no stated derivation; treated as placeholder policy.
const MOUTH_OPEN_THRESHOLD: f32 = 0.30;
const EYE_OPEN_THRESHOLD: f32 = 0.25;
const BROW_RAISE_THRESHOLD: f32 = 0.35;
const EYE_DROOP_THRESHOLD: f32 = 0.10;
const MOUTH_DOWN_THRESHOLD: f32 = 0.12;
const STILLNESS_THRESHOLD: f32 = 0.15;

/// Coarse facial-geometry ratios measured against a face-relative baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    pub eye_openness: f32,
    pub mouth_openness: f32,
    pub brow_raise: f32,
}

struct FaceRegion {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

/// Classify one frame. `None` when no face region is found.
pub fn detect_mood(frame: &RgbaImage) -> Option<Mood> {
    let region = locate_face(frame)?;
    let metrics = measure(frame, &region);
    log::debug!(
        "[Detector] Face {}x{} metrics: eyes {:.2} mouth {:.2} brow {:.2}",
        region.width,
        region.height,
        metrics.eye_openness,
        metrics.mouth_openness,
        metrics.brow_raise
    );
    Some(classify(&metrics))
}

/// The stubbed variant: a uniform pick from the detectable set.
pub fn random_mood() -> Mood {
    *Mood::DETECTABLE
        .choose(&mut rand::rng())
        .unwrap_or(&Mood::Relaxed)
}

/// Bucket metrics against fixed thresholds. Buckets are checked in priority
/// order; the first match wins and `Relaxed` is the catch-all.
pub fn classify(metrics: &FaceMetrics) -> Mood {
    if metrics.mouth_openness > MOUTH_OPEN_THRESHOLD && metrics.eye_openness > EYE_OPEN_THRESHOLD {
        Mood::Happy
    } else if metrics.brow_raise > BROW_RAISE_THRESHOLD {
        Mood::Energetic
    } else if metrics.eye_openness < EYE_DROOP_THRESHOLD
        && metrics.mouth_openness < MOUTH_DOWN_THRESHOLD
    {
        Mood::Sad
    } else if metrics.eye_openness > EYE_OPEN_THRESHOLD
        && metrics.mouth_openness < MOUTH_DOWN_THRESHOLD
    {
        Mood::Focused
    } else if metrics.mouth_openness < STILLNESS_THRESHOLD
        && metrics.brow_raise < STILLNESS_THRESHOLD
    {
        Mood::Chill
    } else {
        Mood::Relaxed
    }
}

// Bounding box of skin-tone pixels, if enough of the frame is covered.
fn locate_face(frame: &RgbaImage) -> Option<FaceRegion> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut skin_pixels = 0u32;

    for (x, y, pixel) in frame.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        if is_skin_tone(r, g, b) {
            skin_pixels += 1;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    let coverage = skin_pixels as f32 / (width * height) as f32;
    if coverage < MIN_FACE_COVERAGE || max_x <= min_x || max_y <= min_y {
        return None;
    }

    Some(FaceRegion {
        left: min_x,
        top: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

// Classic RGB skin-tone rule; good enough for a region-of-interest scan.
fn is_skin_tone(r: u8, g: u8, b: u8) -> bool {
    r > 95 && g > 40 && b > 20 && r > g && r > b && r.saturating_sub(g) > 15
}

fn measure(frame: &RgbaImage, region: &FaceRegion) -> FaceMetrics {
    // Horizontal bands within the face box: forehead, brows, eyes, mouth.
    let forehead = band_luminance(frame, region, 0.00, 0.15);
    let brows = band_luminance(frame, region, 0.15, 0.30);
    let eye_dark = band_dark_ratio(frame, region, 0.30, 0.50);
    let mouth_dark = band_dark_ratio(frame, region, 0.65, 0.90);

    FaceMetrics {
        eye_openness: eye_dark,
        mouth_openness: mouth_dark,
        brow_raise: (forehead - brows).max(0.0),
    }
}

// Mean luminance of a horizontal band, normalized to [0, 1].
fn band_luminance(frame: &RgbaImage, region: &FaceRegion, from: f32, to: f32) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0u32;
    for_band(region, from, to, |x, y| {
        sum += luminance(frame, x, y);
        count += 1;
    });
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

// Share of clearly dark pixels in a band; proxies for open eyes (pupils,
// lashes) and an open mouth against surrounding skin.
fn band_dark_ratio(frame: &RgbaImage, region: &FaceRegion, from: f32, to: f32) -> f32 {
    let mut dark = 0u32;
    let mut count = 0u32;
    for_band(region, from, to, |x, y| {
        if luminance(frame, x, y) < 0.25 {
            dark += 1;
        }
        count += 1;
    });
    if count == 0 {
        0.0
    } else {
        dark as f32 / count as f32
    }
}

fn for_band<F: FnMut(u32, u32)>(region: &FaceRegion, from: f32, to: f32, mut f: F) {
    let y_start = region.top + (region.height as f32 * from) as u32;
    let y_end = region.top + (region.height as f32 * to) as u32;
    for y in y_start..y_end.max(y_start + 1) {
        for x in region.left..region.left + region.width {
            f(x, y);
        }
    }
}

fn luminance(frame: &RgbaImage, x: u32, y: u32) -> f32 {
    let (w, h) = frame.dimensions();
    if x >= w || y >= h {
        return 0.0;
    }
    let [r, g, b, _] = frame.get_pixel(x, y).0;
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn metrics(eyes: f32, mouth: f32, brow: f32) -> FaceMetrics {
        FaceMetrics {
            eye_openness: eyes,
            mouth_openness: mouth,
            brow_raise: brow,
        }
    }

    #[test]
    fn test_classify_buckets() {
        assert_eq!(classify(&metrics(0.4, 0.5, 0.0)), Mood::Happy);
        assert_eq!(classify(&metrics(0.2, 0.2, 0.5)), Mood::Energetic);
        assert_eq!(classify(&metrics(0.05, 0.05, 0.0)), Mood::Sad);
        assert_eq!(classify(&metrics(0.4, 0.05, 0.0)), Mood::Focused);
        assert_eq!(classify(&metrics(0.15, 0.12, 0.05)), Mood::Chill);
        // Catch-all
        assert_eq!(classify(&metrics(0.2, 0.2, 0.2)), Mood::Relaxed);
    }

    #[test]
    fn test_classify_priority_order() {
        // Both the happy and energetic buckets match; happy wins
        assert_eq!(classify(&metrics(0.5, 0.5, 0.9)), Mood::Happy);
    }

    #[test]
    fn test_detect_mood_returns_none_without_face() {
        let black = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        assert_eq!(detect_mood(&black), None);

        let blue = RgbaImage::from_pixel(64, 64, Rgba([10, 20, 200, 255]));
        assert_eq!(detect_mood(&blue), None);
    }

    #[test]
    fn test_detect_mood_finds_skin_tone_region() {
        // Uniform skin-tone frame: a face region is found and some mood is
        // produced (uniform bands have no dark pixels, so the buckets bottom
        // out at sad)
        let skin = RgbaImage::from_pixel(64, 64, Rgba([200, 150, 120, 255]));
        assert_eq!(detect_mood(&skin), Some(Mood::Sad));
    }

    #[test]
    fn test_random_mood_is_detectable() {
        for _ in 0..50 {
            assert!(Mood::DETECTABLE.contains(&random_mood()));
        }
    }
}
