/*
 * This file is part of aigraph, a concurrent engine for exploring
 * And-Inverter Graphs.
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! Layered configuration: built-in defaults, an optional YAML file, then
//! CLI overrides — each layer applied in full before the next, so a caller
//! never has to ask "did this field come from the file or the flag".

use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_QUEUE_DEPTH: usize = 256;
const DEFAULT_CUT_SIZE_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub workers: usize,
    pub queue_depth: usize,
    pub cut_size_limit: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            workers: default_worker_count(),
            queue_depth: DEFAULT_QUEUE_DEPTH,
            cut_size_limit: DEFAULT_CUT_SIZE_LIMIT,
        }
    }
}

fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// The subset of `Configuration` that may be present in a YAML file or
/// supplied as CLI flags; every field is optional so a layer only needs to
/// mention what it wants to override.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ConfigOverrides {
    pub workers: Option<usize>,
    pub queue_depth: Option<usize>,
    pub cut_size_limit: Option<usize>,
}

impl Configuration {
    fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(workers) = overrides.workers {
            self.workers = workers;
        }
        if let Some(queue_depth) = overrides.queue_depth {
            self.queue_depth = queue_depth;
        }
        if let Some(cut_size_limit) = overrides.cut_size_limit {
            self.cut_size_limit = cut_size_limit;
        }
        self
    }

    fn validate(self) -> ConfigResult<Self> {
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.queue_depth == 0 {
            return Err(ConfigError::ZeroQueueDepth);
        }
        if self.cut_size_limit == 0 {
            return Err(ConfigError::ZeroCutSizeLimit);
        }
        Ok(self)
    }

    /// Loads defaults, then an optional YAML file, then CLI overrides, in
    /// that order — each stage overriding only the fields it sets.
    pub fn load(
        config_path: Option<&Path>,
        cli_overrides: ConfigOverrides,
    ) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
            let file_overrides: ConfigOverrides =
                serde_yaml::from_str(&text).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
            config = config.apply(file_overrides);
            debug!("loaded config overrides from {}", path.display());
        }

        config = config.apply(cli_overrides);
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Configuration::default().validate().is_ok());
    }

    #[test]
    fn cli_overrides_beat_defaults() {
        let overrides = ConfigOverrides {
            workers: Some(2),
            queue_depth: None,
            cut_size_limit: None,
        };
        let config = Configuration::load(None, overrides).unwrap();
        assert_eq!(config.workers, 2);
        assert_eq!(config.queue_depth, DEFAULT_QUEUE_DEPTH);
    }

    #[test]
    fn file_overrides_then_cli_overrides_both_apply_in_order() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("aigraph-config-test-{}.yaml", std::process::id()));
        std::fs::write(&path, "workers: 3\nqueue_depth: 64\n").unwrap();

        let cli = ConfigOverrides {
            workers: Some(9),
            queue_depth: None,
            cut_size_limit: None,
        };
        let config = Configuration::load(Some(&path), cli).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.workers, 9, "cli overrides the file");
        assert_eq!(config.queue_depth, 64, "file overrides the default");
        assert_eq!(config.cut_size_limit, DEFAULT_CUT_SIZE_LIMIT);
    }

    #[test]
    fn zero_values_are_rejected() {
        let overrides = ConfigOverrides {
            workers: Some(0),
            queue_depth: None,
            cut_size_limit: None,
        };
        let err = Configuration::load(None, overrides).unwrap_err();
        assert_eq!(err, ConfigError::ZeroWorkers);
    }
}
