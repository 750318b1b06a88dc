use anyhow::*;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    // This tells Cargo to rerun this script if something in /assets/ changes.
    println!("cargo:rerun-if-changed=assets/");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets_src = manifest_dir.join("assets");

    // Shaders and textures are read at runtime, so ship a snapshot next to the build
    // and fall back to the source tree when there is nothing to copy.
    let bundled = if assets_src.exists() {
        let mut copy_options = CopyOptions::new();
        copy_options.overwrite = true;
        copy_items(&[&assets_src], &out_dir, &copy_options)?;
        out_dir.join("assets")
    } else {
        assets_src
    };
    println!(
        "cargo:rustc-env=SPACECRAFT_BUNDLED_ASSETS={}",
        bundled.display()
    );

    Ok(())
}
