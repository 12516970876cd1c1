// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE: &str = "birdcards.toml";

pub const DEFAULT_PORT: u16 = 8000;

/// Optional per-deck configuration. A missing file is the default
/// configuration; a malformed one is an error, since it is something the
/// user wrote and expects to take effect.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub port: Option<u16>,
    pub autoplay: Option<bool>,
}

impl Config {
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_missing_file_is_the_default() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = Config::load(&dir)?;
        assert_eq!(config.port(), DEFAULT_PORT);
        assert!(config.autoplay());
        Ok(())
    }

    #[test]
    fn test_load() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(CONFIG_FILE), "port = 9111\nautoplay = false\n")?;
        let config = Config::load(&dir)?;
        assert_eq!(config.port(), 9111);
        assert!(!config.autoplay());
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(CONFIG_FILE), "port = \"many\"")?;
        assert!(Config::load(&dir).is_err());
        Ok(())
    }

    #[test]
    fn test_unknown_keys_are_rejected() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(CONFIG_FILE), "prot = 9111\n")?;
        assert!(Config::load(&dir).is_err());
        Ok(())
    }
}
