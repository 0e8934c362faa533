//! Build script for the podcast cycle player.
//!
//! Copies the configuration templates (`.env.example` and
//! `credentials.example.json`) into the platform-specific local data
//! directory so users find them next to the `.env` file the binary loads:
//! - Linux: `~/.local/share/podcycle/`
//! - macOS: `~/Library/Application Support/podcycle/`
//! - Windows: `%LOCALAPPDATA%/podcycle/`
//!
//! A missing template only produces a cargo warning. Failing to create the
//! directory or to write a file fails the build.

use std::{env, fs, path::PathBuf};

const TEMPLATES: [&str; 2] = [".env.example", "credentials.example.json"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for template in TEMPLATES {
        println!("cargo:rerun-if-changed={}", template);
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("podcycle");
    fs::create_dir_all(&out_dir)?;

    for template in TEMPLATES {
        let source = manifest_dir.join(template);
        if source.is_file() {
            let contents = fs::read_to_string(&source)?;
            fs::write(out_dir.join(template), contents)?;
        } else {
            println!("cargo:warning={} not found at {}", template, source.display());
        }
    }

    Ok(())
}
