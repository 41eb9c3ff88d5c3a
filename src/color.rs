use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used for per-category bar colors.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging ramp (choropleth)
// ---------------------------------------------------------------------------

// Red → pale yellow → blue anchors, sRGB.
const LOW: (f32, f32, f32) = (0.843, 0.188, 0.153);
const MID: (f32, f32, f32) = (1.0, 1.0, 0.749);
const HIGH: (f32, f32, f32) = (0.271, 0.459, 0.706);

fn lerp(a: (f32, f32, f32), b: (f32, f32, f32), t: f32) -> Color32 {
    let a: LinSrgb = Srgb::new(a.0, a.1, a.2).into_linear();
    let b: LinSrgb = Srgb::new(b.0, b.1, b.2).into_linear();
    let mixed: Srgb = Srgb::from_linear(a.mix(b, t));
    Color32::from_rgb(
        (mixed.red * 255.0) as u8,
        (mixed.green * 255.0) as u8,
        (mixed.blue * 255.0) as u8,
    )
}

/// Map a normalized value in `[0, 1]` onto the diverging low→high ramp.
pub fn diverging(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    if t < 0.5 {
        lerp(LOW, MID, t * 2.0)
    } else {
        lerp(MID, HIGH, (t - 0.5) * 2.0)
    }
}
