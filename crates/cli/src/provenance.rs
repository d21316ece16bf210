//! Provenance sidecars: `<artifact>.provenance.json` next to every CLI output.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run parameters and source files of one CLI invocation.
#[derive(Debug, Serialize)]
pub struct Payload {
    pub params: Value,
    pub inputs: Vec<String>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.inputs.push(input.into());
        self
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    mbed_version: &'static str,
    #[serde(flatten)]
    payload: &'a Payload,
    outputs: [String; 1],
}

/// Record how `artifact` was produced; returns the sidecar path.
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let sidecar = sidecar_path(artifact);
    let doc = Sidecar {
        code_rev: current_git_rev(),
        mbed_version: mbed::VERSION,
        payload: &payload,
        outputs: [artifact.display().to_string()],
    };
    fs::write(&sidecar, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(sidecar)
}

/// `out/refined.json` -> `out/refined.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit of the build: `GIT_COMMIT` at compile time, then at run time, then `git rev-parse`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()))
        .or_else(|| {
            let output = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            if !output.status.success() {
                return None;
            }
            String::from_utf8(output.stdout).ok().map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
