//! Build script for the site crate.
//!
//! Fingerprints the stylesheet so it can be served with a content-based
//! file name.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Hex characters of the SHA-256 kept in the file name.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    let hash = fingerprint(&static_dir.join("css/main.css"), &static_dir.join("css/derived"));
    println!("cargo:rustc-env=CSS_HASH={}", hash.unwrap_or_default());
}

/// Copy `source` into `derived_dir` as `<stem>.<hash>.<ext>`.
///
/// Returns `None` (and the stylesheet is served unhashed) when the source
/// cannot be read.
fn fingerprint(source: &Path, derived_dir: &Path) -> Option<String> {
    println!("cargo:rerun-if-changed={}", source.display());

    let content = match fs::read(source) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", source.display());
            return None;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let hash = digest.get(..HASH_LEN)?.to_string();

    let stem = source.file_stem()?.to_string_lossy();
    let ext = source.extension()?.to_string_lossy();

    fs::create_dir_all(derived_dir).expect("Failed to create derived asset directory");
    fs::copy(source, derived_dir.join(format!("{stem}.{hash}.{ext}")))
        .expect("Failed to copy asset to derived directory");

    Some(hash)
}
