use crate::model::{GradientSpec, Rgb, Segment};

/// Starting the sweep at 20 degrees instead of 0 keeps the low end a
/// warm red rather than a pure one.
const HUE_OFFSET: f64 = 20.0;
/// Hue span covered by a fully healthy meter, before the offset.
const HUE_RANGE: f64 = 120.0;

/// Expands a health value into the meter's paint instructions: one
/// segment per `interval` step, hues interpolated from the offset up
/// toward `health * 120` degrees at the right edge.
pub fn render(health: f64, spec: &GradientSpec) -> Vec<Segment> {
    let health = health.clamp(0.0, 1.0);
    let target = (health * HUE_RANGE).floor();

    let mut segments = Vec::new();
    let mut x = 0u32;
    while x < spec.width {
        let hue = f64::from(x) / f64::from(spec.width) * target + HUE_OFFSET;
        segments.push(Segment {
            x,
            width: spec.interval,
            height: spec.height,
            color: hsv_to_rgb(hue, 1.0, 1.0),
        });
        x += spec.interval;
    }
    segments
}

/// Sector-based HSV to RGB. Channels are truncated, not rounded, when
/// scaled to 0-255.
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());

    let (r, g, b) = if (0.0..1.0).contains(&hp) {
        (c, x, 0.0)
    } else if (1.0..2.0).contains(&hp) {
        (x, c, 0.0)
    } else if (2.0..3.0).contains(&hp) {
        (0.0, c, x)
    } else if (3.0..4.0).contains(&hp) {
        (0.0, x, c)
    } else if (4.0..5.0).contains(&hp) {
        (x, 0.0, c)
    } else if (5.0..6.0).contains(&hp) {
        (c, 0.0, x)
    } else {
        (0.0, 0.0, 0.0)
    };

    let m = c - v;
    Rgb {
        r: ((r + m) * 255.0) as u8,
        g: ((g + m) * 255.0) as u8,
        b: ((b + m) * 255.0) as u8,
    }
}
