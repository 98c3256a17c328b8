//! Network dataset loading.
//!
//! Reads a line dataset from a file or URL, optionally corrects stop
//! coordinates from a stop directory, and validates the result into a
//! [`Network`].

mod client;
mod dto;
mod error;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::{Coordinate, Network};

pub use client::{DatasetClient, DatasetClientConfig};
pub use dto::{DirectoryEntryDto, LineDto, LooseNumber, StopDto, line_color_from_name, normalize_stop_name};
pub use error::LoadError;

/// Environment variable naming a local dataset file.
pub const ENV_NETWORK_PATH: &str = "NETWORK_PATH";
/// Environment variable naming a dataset URL.
pub const ENV_NETWORK_URL: &str = "NETWORK_URL";
/// Environment variable naming a local stop directory file.
pub const ENV_STOP_DIRECTORY_PATH: &str = "STOP_DIRECTORY_PATH";

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A parsed, not yet validated, line dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    lines: Vec<LineDto>,
}

impl Dataset {
    /// Parse a dataset from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let lines: Vec<LineDto> = serde_json::from_str(json)?;
        Ok(Self { lines })
    }

    /// Read and parse a dataset file.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        Self::from_json(&read_file(path)?)
    }

    /// The dataset's lines, in file order.
    pub fn lines(&self) -> &[LineDto] {
        &self.lines
    }

    /// Replace the name and coordinate of every stop found in `directory`.
    ///
    /// Returns the number of stops updated.
    pub fn hydrate(&mut self, directory: &StopDirectory) -> usize {
        let mut updated = 0;
        for stop in self.lines.iter_mut().flat_map(|l| l.stops.iter_mut()) {
            if let Some(entry) = directory.lookup(&stop.name) {
                stop.name = entry.name.clone();
                stop.lat = entry.coord.lat;
                stop.lng = entry.coord.lng;
                updated += 1;
            }
        }
        updated
    }

    /// Validate into a network. Line order is preserved.
    pub fn into_network(self) -> Result<Network, LoadError> {
        let lines = self
            .lines
            .into_iter()
            .map(LineDto::into_line)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Network::new(lines)?)
    }
}

/// A stop known to the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryStop {
    /// Name as spelled in the directory.
    pub name: String,
    pub coord: Coordinate,
}

/// Reference stop positions, looked up by normalized stop name.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    by_name: HashMap<String, DirectoryStop>,
}

impl StopDirectory {
    /// Build a directory from entries.
    ///
    /// Entries without parseable coordinates are skipped. When two entries
    /// normalize to the same name the first one wins.
    pub fn from_entries(entries: impl IntoIterator<Item = DirectoryEntryDto>) -> Self {
        let mut by_name = HashMap::new();
        for entry in entries {
            let Some(coord) = entry.coord() else {
                continue;
            };
            by_name
                .entry(normalize_stop_name(&entry.nom))
                .or_insert(DirectoryStop {
                    name: entry.nom,
                    coord,
                });
        }
        Self { by_name }
    }

    /// Parse a directory from JSON text.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let entries: Vec<DirectoryEntryDto> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// Read and parse a directory file.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        Self::from_json(&read_file(path)?)
    }

    /// Look up a stop by name, ignoring case and extra whitespace.
    pub fn lookup(&self, name: &str) -> Option<&DirectoryStop> {
        self.by_name.get(&normalize_stop_name(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Where to load the line dataset from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkSource {
    Path(PathBuf),
    Url(String),
}

impl NetworkSource {
    /// Read the source from `NETWORK_PATH` or, failing that, `NETWORK_URL`.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`NetworkSource::from_env`], reading keys through `lookup`.
    /// A path takes precedence over a URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v: &String| !v.trim().is_empty());

        if let Some(path) = non_empty(ENV_NETWORK_PATH) {
            return Ok(NetworkSource::Path(PathBuf::from(path)));
        }
        if let Some(url) = non_empty(ENV_NETWORK_URL) {
            return Ok(NetworkSource::Url(url));
        }
        Err(LoadError::NoSource)
    }
}

/// Load, optionally hydrate, and validate a network.
pub async fn load_network(
    source: &NetworkSource,
    directory: Option<&Path>,
) -> Result<Network, LoadError> {
    let mut dataset = match source {
        NetworkSource::Path(path) => Dataset::from_path(path)?,
        NetworkSource::Url(url) => {
            DatasetClient::new(DatasetClientConfig::new(url.clone()))?
                .fetch()
                .await?
        }
    };
    debug!(lines = dataset.lines().len(), source = ?source, "Parsed dataset");

    if let Some(path) = directory {
        let directory = StopDirectory::from_path(path)?;
        let updated = dataset.hydrate(&directory);
        info!(
            directory_stops = directory.len(),
            updated, "Hydrated stop coordinates"
        );
    }

    let network = dataset.into_network()?;
    info!(
        lines = network.len(),
        stops = network.stop_count(),
        "Loaded network"
    );
    Ok(network)
}
