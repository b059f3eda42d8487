//! Reads GeoJSON files, resolves them and prints them back as compact JSON.
//!
//! ```shell
//! cargo run -p geotree-cli -- geotree/test-data/point.geojson geotree/test-data/sample.geojson
//! ```
//!
//! Every file given as an argument is processed even if some of them fail. The tool exits with
//! an error if any of the files could not be read.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use geotree::HasBoundingBox;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return Err(anyhow!(
            "Run this tool with one or more arguments - names of the .geojson files to read"
        ));
    }

    let mut failed = 0;
    for path in &paths {
        if let Err(err) = process(Path::new(path)) {
            log::error!("{err:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        return Err(anyhow!("failed to process {failed} of {} files", paths.len()));
    }

    Ok(())
}

fn process(path: &Path) -> Result<()> {
    let geojson = geotree::parse_file(path)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let bbox = geojson.force_bbox();
    log::info!(
        "{}: {} with bounding box [{}]",
        path.display(),
        geojson.geojson_type(),
        bbox
    );
    if bbox.crosses_antimeridian() {
        log::info!("{}: bounding box crosses the antimeridian", path.display());
    }

    println!("{}", serde_json::to_string(&geojson)?);
    Ok(())
}
