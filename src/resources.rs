//! # Town Resources Module
//!
//! Loads the hospital and duty-doctor contacts for the town from a JSON file.
//! Any failure falls back to the built-in Liepāja record so a render never fails.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default location of the resource file, relative to the working directory
pub const DEFAULT_RESOURCES_PATH: &str = "data/liepaja.json";

/// Emergency number used when the resource file does not override it
pub const DEFAULT_EMERGENCY_PHONE: &str = "113";

/// Hospital contact block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// On-call, non-emergency doctor contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyDoctor {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Contacts for one town
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownResources {
    pub hospital: Hospital,
    #[serde(default)]
    pub duty_doctor: Option<DutyDoctor>,
    #[serde(default = "default_emergency_phone")]
    pub emergency_phone: Option<String>,
}

fn default_emergency_phone() -> Option<String> {
    Some(DEFAULT_EMERGENCY_PHONE.to_string())
}

/// Fallback when the resource file is unusable: only the hospital entry.
///
/// The emergency number is not resource data. It is the national number
/// (`113` unless the file overrides it), so the fallback keeps it too.
impl Default for TownResources {
    fn default() -> Self {
        Self {
            hospital: Hospital {
                name: "Liepājas reģionālā slimnīca".to_string(),
                address: "Slimnīcas iela 25, Liepāja".to_string(),
                phone: Some("+37163403222".to_string()),
            },
            duty_doctor: None,
            emergency_phone: default_emergency_phone(),
        }
    }
}

/// A phone number counts as configured only when it is not blank
pub fn configured_phone(phone: Option<&String>) -> Option<&str> {
    phone.map(|p| p.trim()).filter(|p| !p.is_empty())
}

impl TownResources {
    pub fn hospital_phone(&self) -> Option<&str> {
        configured_phone(self.hospital.phone.as_ref())
    }

    pub fn duty_phone(&self) -> Option<&str> {
        self.duty_doctor
            .as_ref()
            .and_then(|doctor| configured_phone(doctor.phone.as_ref()))
    }

    pub fn emergency_phone(&self) -> Option<&str> {
        configured_phone(self.emergency_phone.as_ref())
    }
}

/// Errors raised while reading the resource file
#[derive(Debug)]
pub enum ResourceError {
    /// The file could not be read
    Read { path: PathBuf, source: std::io::Error },
    /// The file is not a valid resource document
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read resources '{}': {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse resources '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Read and parse the resource file without any fallback
pub fn try_load_resources(path: impl AsRef<Path>) -> Result<TownResources, ResourceError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ResourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ResourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the resource file, falling back to [`TownResources::default`]
///
/// Called on every render, so edits to the file apply without a restart.
pub fn load_resources(path: impl AsRef<Path>) -> TownResources {
    match try_load_resources(path.as_ref()) {
        Ok(resources) => {
            debug!(path = %path.as_ref().display(), "Loaded town resources");
            resources
        }
        Err(e) => {
            warn!(error = %e, "Using built-in town resources");
            TownResources::default()
        }
    }
}
