#![cfg(feature = "png_source")]

use gameui::AtlasHandle;
use std::{env, error::Error, path::PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    let output = parse_output_arg()?;
    export_theme(&output)?;
    Ok(())
}

fn parse_output_arg() -> Result<PathBuf, Box<dyn Error>> {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--output" {
            if let Some(path) = args.next() {
                return Ok(PathBuf::from(path));
            } else {
                return Err("--output requires a path".into());
            }
        }
    }
    Err("missing --output <path>".into())
}

fn export_theme(path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let atlas = AtlasHandle::default_theme();
    let bytes = atlas.png_image_bytes()?;
    std::fs::write(path, bytes)?;
    println!("wrote {}x{} theme atlas to {}", atlas.width(), atlas.height(), path.display());
    Ok(())
}
