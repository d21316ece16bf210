//! Option bundle forwarded to the meshing kernel.
//!
//! Every field defaults to "off": no debug output and no saved artifacts.
//! File names for geometry/mesh artifacts are relative to `save_embedding` and
//! are dropped when no `save_embedding` directory is given.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::EmbedError;

/// User-facing options, as read from a config file or the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedOptions {
    /// Verbose kernel output.
    pub debug: bool,
    /// Directory receiving all saved artifacts.
    pub save_embedding: Option<PathBuf>,
    /// Geometry script file name under `save_embedding`.
    pub save_geo: Option<PathBuf>,
    /// Mesh file name under `save_embedding`.
    pub save_msh: Option<PathBuf>,
    /// Keep point-insertion monitor output in `save_embedding/monitor`.
    pub monitor: bool,
}

/// Options with paths joined and directories created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub debug: bool,
    pub save_embedding: Option<PathBuf>,
    pub save_geo: Option<PathBuf>,
    pub save_msh: Option<PathBuf>,
    pub monitor: Option<PathBuf>,
}

impl EmbedOptions {
    /// Join artifact names onto `save_embedding` and create the output
    /// directories (`save_embedding`, and `monitor/` when requested).
    pub fn resolve(&self) -> Result<ResolvedOptions, EmbedError> {
        let Some(dir) = self.save_embedding.as_deref().filter(|d| !d.as_os_str().is_empty())
        else {
            return Ok(ResolvedOptions {
                debug: self.debug,
                ..ResolvedOptions::default()
            });
        };
        create_dir(dir)?;

        let monitor = if self.monitor {
            let path = dir.join("monitor");
            create_dir(&path)?;
            Some(path)
        } else {
            None
        };
        Ok(ResolvedOptions {
            debug: self.debug,
            save_embedding: Some(dir.to_path_buf()),
            save_geo: self.save_geo.as_ref().map(|f| dir.join(f)),
            save_msh: self.save_msh.as_ref().map(|f| dir.join(f)),
            monitor,
        })
    }
}

fn create_dir(path: &Path) -> Result<(), EmbedError> {
    std::fs::create_dir_all(path).map_err(|source| EmbedError::Io {
        path: path.to_path_buf(),
        source,
    })
}
