//! Shared JSON curve fixtures for workspace tests, resolved through the
//! manifest at `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    curves: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

pub mod curves {
    use super::*;

    /// Raw JSON for a named curve fixture.
    pub fn json(name: &str) -> Result<String> {
        let rel = MANIFEST
            .curves
            .get(name)
            .ok_or_else(|| anyhow!("unknown curve fixture '{name}'"))?;
        let path = fixtures_root().join(rel);
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    /// All fixture names registered in the manifest.
    pub fn names() -> Vec<String> {
        MANIFEST.curves.keys().cloned().collect()
    }
}
