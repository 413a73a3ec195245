use std::path::PathBuf;

use anyhow::{Context, bail};
use bead_pattern_rs::bead_pipeline::{ImageToPatternPipeline, Palette, PatternConfig};
use bead_pattern_rs::logger;

use tracing::{error, info};

const USAGE: &str = "usage: bead_pattern <input-image> <palette.csv> <thumbnail.png> [plate-width] [plate-dimension]";

fn main() -> anyhow::Result<()> {
    logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!(USAGE);
    }
    let input = PathBuf::from(&args[0]);
    let palette_path = PathBuf::from(&args[1]);
    let output = PathBuf::from(&args[2]);
    let plate_width: u32 = match args.get(3) {
        Some(s) => s.parse().with_context(|| format!("invalid plate width {s:?}"))?,
        None => 1,
    };
    let plate_dimension: u32 = match args.get(4) {
        Some(s) => s.parse().with_context(|| format!("invalid plate dimension {s:?}"))?,
        None => 29,
    };

    let listing = std::fs::read_to_string(&palette_path)
        .with_context(|| format!("reading palette {}", palette_path.display()))?;
    let palette = Palette::parse_listing(&listing)?;

    let config = PatternConfig::builder()
        .plate_width(plate_width)
        .plate_dimension(plate_dimension)
        .auto_plate_height(true)
        .build();
    let pipeline = ImageToPatternPipeline::new(config);

    info!("Palette: {} colors", palette.len());
    info!(
        "Plates: {} across, {} beads per side",
        pipeline.config().plate_width,
        pipeline.config().plate_dimension
    );

    match pipeline.convert_file(&input, &output, None, &palette) {
        Ok(pattern) => {
            info!(
                "Pattern {}x{} beads on {}x{} plates, {} beads total",
                pattern.width_beads(),
                pattern.height_beads(),
                pattern.plates.plate_width(),
                pattern.plates.plate_height(),
                pattern.total_beads()
            );
            for (id, count) in pattern.color_stats().ranked() {
                let label = palette
                    .get(&id)
                    .map(|c| format!("{} {}", c.code, c.name))
                    .unwrap_or_else(|| id.to_string());
                info!("{:>6}  {}", count, label);
            }
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
