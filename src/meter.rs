use crate::gradient;
use crate::model::{GradientSpec, MeterOutput, Rgb, Segment, SCHEMA_VERSION};
use chrono::Utc;
use crossterm::style::{Color, Stylize};

pub fn exec(
    health: f64,
    width: u32,
    height: u32,
    json: bool,
    ndjson: bool,
) -> anyhow::Result<()> {
    let spec = GradientSpec::new(width, height);
    let segments = gradient::render(health, &spec);

    if json {
        let output = MeterOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            health,
            width: spec.width,
            height: spec.height,
            segments,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if ndjson {
        for segment in &segments {
            println!("{}", serde_json::to_string(segment)?);
        }
    } else {
        println!("{}", paint_bar(&segments));
        println!("health: {:.3}", health.clamp(0.0, 1.0));
    }

    Ok(())
}

/// One background-colored terminal cell per segment.
pub fn paint_bar(segments: &[Segment]) -> String {
    let mut bar = String::new();
    for segment in segments {
        let Rgb { r, g, b } = segment.color;
        bar.push_str(&" ".on(Color::Rgb { r, g, b }).to_string());
    }
    bar
}
