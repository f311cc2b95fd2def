//! Shared fixtures for unit tests

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a minimal `<name>-<version>.wrap` archive (a gzipped tarball
/// containing a single `manifest.txt`) into `dir` and returns its path.
pub fn write_wrap_archive(dir: &Path, name: &str, version: &str) -> PathBuf {
    let path = dir.join(format!("{}-{}.wrap", name, version));
    let file = fs::File::create(&path).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let manifest = format!("{} {}\n", name, version);
    let mut header = tar::Header::new_gnu();
    header.set_size(manifest.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "manifest.txt", manifest.as_bytes())
        .unwrap();
    builder.into_inner().unwrap().finish().unwrap();
    path
}
