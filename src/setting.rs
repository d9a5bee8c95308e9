//! The baseline configuration setting in TOML.

use errors::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use toml;

/// The designated baseline configuration: the frequency pair every relative
/// metric (speedup, normalized energy) is computed against.
///
/// The defaults are the device defaults of the measured GPU, 1312 MHz core
/// and 877 MHz memory.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    /// Baseline core frequency, MHz.
    pub core_freq: u32,

    /// Baseline memory frequency, MHz.
    pub memory_freq: u32,
}

impl Default for Setting {
    fn default() -> Setting {
        Setting {
            core_freq: 1312,
            memory_freq: 877,
        }
    }
}

impl Setting {
    /// Resolves the effective baseline: the defaults, overridden by a
    /// setting file when one is given, overridden by explicit frequencies
    /// when given.
    pub fn resolve(
        path: Option<&Path>,
        core_freq: Option<u32>,
        memory_freq: Option<u32>,
    ) -> Result<Setting> {
        let mut setting = match path {
            Some(path) => Setting::from_path(path)?,
            None => Setting::default(),
        };
        if let Some(core) = core_freq {
            setting.core_freq = core;
        }
        if let Some(memory) = memory_freq {
            setting.memory_freq = memory;
        }
        Ok(setting)
    }

    /// Reads a setting from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Setting> {
        let mut contents = String::new();
        File::open(path.as_ref())
            .chain_err(|| format!("failed to open setting file {}", path.as_ref().display()))?
            .read_to_string(&mut contents)?;
        toml::from_str(&contents)
            .chain_err(|| format!("malformed setting file {}", path.as_ref().display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_toml_setting() {
        let setting: Setting = ::toml::from_str("core_freq = 1140\nmemory_freq = 877").unwrap();
        assert_eq!(setting.core_freq, 1140);
        assert_eq!(setting.memory_freq, 877);
    }

    #[test]
    fn defaults_to_the_device_default_pair() {
        assert_eq!(Setting::default(), Setting { core_freq: 1312, memory_freq: 877 });
    }

    #[test]
    fn explicit_frequencies_override_the_defaults() {
        let setting = Setting::resolve(None, Some(800), None).unwrap();
        assert_eq!(setting, Setting { core_freq: 800, memory_freq: 877 });
    }
}
