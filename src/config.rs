/////////////////////
/// Optional settings from `clock25.ini`, section `[clock25]`:
///   sound    = on | off
///   volume   = 0.0 .. 1.0
///   loglevel = error | warn | info | debug | trace
///
/// Anything missing or invalid falls back to its default with a warning.
///
use std::collections::HashMap;
use std::str::FromStr;

use simplelog::LevelFilter;

use crate::alarm::DEFAULT_VOLUME;

pub const CONF_FILE_NAME: &str = "clock25.ini";
const CONF_SECTION: &str = "clock25";

const MIN_VOLUME: f32 = 0.0;
const MAX_VOLUME: f32 = 1.0;

pub type IniMap = HashMap<String, HashMap<String, Option<String>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub sound: bool,
  pub volume: f32,
  pub log_level: LevelFilter,
}

impl Default for Config {
  fn default() -> Self {
    Self { sound: true, volume: DEFAULT_VOLUME, log_level: LevelFilter::Info }
  }
}

impl Config {
  /// Read the config file, or defaults if it can't be loaded.
  pub fn load(path: &str) -> Self {
    info!("Reading config from {}", path);
    match ini!(safe path) {
      Ok(map) => Self::from_ini(&map),
      Err(error) => {
        info!("Couldn't load config file '{}' ({}), using defaults", path, error);
        Self::default()
      }
    }
  }

  pub fn from_ini(inimap: &IniMap) -> Self {
    let mut config = Self::default();
    let Some(section) = inimap.get(CONF_SECTION) else {
      return config;
    };
    for (key, value) in section {
      info!("{} / {:?}", key, value);
    }
    let get = |key: &str| section.get(key).and_then(|v| v.as_deref());

    if let Some(val) = get("sound") {
      config.sound = parse_switch(val, "sound", config.sound);
    }
    if let Some(val) = get("volume") {
      config.volume = parse_volume(val, "volume", config.volume);
    }
    if let Some(val) = get("loglevel") {
      config.log_level = parse_level(val, "loglevel", config.log_level);
    }
    config
  }
}

fn parse_switch(value: &str, config_name: &str, default: bool) -> bool {
  match value.trim().to_ascii_lowercase().as_str() {
    "on" | "true" | "yes" | "1" => true,
    "off" | "false" | "no" | "0" => false,
    _ => {
      warn!("Config value '{}' = '{}' is not on/off, using default {}", config_name, value, default);
      default
    }
  }
}

fn parse_volume(value: &str, config_name: &str, default: f32) -> f32 {
  match value.trim().parse::<f32>() {
    Ok(volume) if (MIN_VOLUME..=MAX_VOLUME).contains(&volume) => volume,
    Ok(volume) => {
      warn!("Config value '{}' = {} is out of valid range [{}, {}], using default {}",
            config_name, volume, MIN_VOLUME, MAX_VOLUME, default);
      default
    }
    Err(e) => {
      warn!("Failed to parse config value '{}' = '{}': {}, using default {}",
            config_name, value, e, default);
      default
    }
  }
}

fn parse_level(value: &str, config_name: &str, default: LevelFilter) -> LevelFilter {
  LevelFilter::from_str(value.trim()).unwrap_or_else(|_| {
    warn!("Config value '{}' = '{}' is not a log level, using default {}", config_name, value, default);
    default
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn inimap(pairs: &[(&str, &str)]) -> IniMap {
    let section = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), Some(v.to_string())))
      .collect();
    HashMap::from([(CONF_SECTION.to_string(), section)])
  }

  #[test]
  fn test_defaults_without_section() {
    assert_eq!(Config::from_ini(&IniMap::new()), Config::default());
  }

  #[test]
  fn test_missing_file_gives_defaults() {
    assert_eq!(Config::load("/nonexistent/clock25.ini"), Config::default());
  }

  #[test]
  fn test_all_keys() {
    let config = Config::from_ini(&inimap(&[("sound", "off"), ("volume", "0.25"), ("loglevel", "debug")]));
    assert!(!config.sound);
    assert_eq!(config.volume, 0.25);
    assert_eq!(config.log_level, LevelFilter::Debug);
  }

  #[test]
  fn test_invalid_values_fall_back() {
    let config = Config::from_ini(&inimap(&[("sound", "maybe"), ("volume", "loud"), ("loglevel", "chatty")]));
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_parse_volume_bounds() {
    assert_eq!(parse_volume("0.0", "test", 0.5), 0.0);
    assert_eq!(parse_volume("1.0", "test", 0.5), 1.0);
    assert_eq!(parse_volume("1.5", "test", 0.5), 0.5);
    assert_eq!(parse_volume("-0.1", "test", 0.5), 0.5);
  }

  #[test]
  fn test_parse_switch() {
    assert!(parse_switch("ON", "test", false));
    assert!(parse_switch(" yes ", "test", false));
    assert!(!parse_switch("0", "test", true));
  }

  #[test]
  fn test_parse_level_case_insensitive() {
    assert_eq!(parse_level("WARN", "test", LevelFilter::Info), LevelFilter::Warn);
    assert_eq!(parse_level("off", "test", LevelFilter::Info), LevelFilter::Off);
  }
}
