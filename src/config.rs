use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::curve::DEFAULT_PRESET;
use crate::scoring::{InputPolicy, InputRange, OutputPolicy, ScoreSettings, WeightSide, SCORE_MAX};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendSection {
    pub weight_side: String,
    pub invert: bool,
    pub output: String,
    pub input: String,
    pub input_min: i32,
    pub input_max: i32,
    pub preset: String,
    pub views: i32,
    pub earnings: i32,
}

impl Default for BlendSection {
    fn default() -> Self {
        Self {
            weight_side: "earnings".to_string(),
            invert: true,
            output: "pass-through".to_string(),
            input: "clamp".to_string(),
            input_min: 0,
            input_max: SCORE_MAX,
            preset: DEFAULT_PRESET.to_string(),
            views: SCORE_MAX,
            earnings: SCORE_MAX,
        }
    }
}

impl BlendSection {
    pub fn to_settings(&self) -> Result<ScoreSettings, String> {
        let weight_side = WeightSide::from_str(&self.weight_side)
            .ok_or_else(|| format!("invalid weight side: {}", self.weight_side))?;
        let output = OutputPolicy::from_str(&self.output)
            .ok_or_else(|| format!("invalid output policy: {}", self.output))?;
        let input = InputPolicy::from_str(&self.input)
            .ok_or_else(|| format!("invalid input policy: {}", self.input))?;
        if self.input_min > self.input_max {
            return Err(format!(
                "invalid input range: {} > {}",
                self.input_min, self.input_max
            ));
        }

        Ok(ScoreSettings::new(weight_side, self.invert)
            .with_output(output)
            .with_input(input)
            .with_range(InputRange {
                min: self.input_min,
                max: self.input_max,
            }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub web_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            web_root: "web/dist".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    pub blend: BlendSection,
    pub server: ServerConfig,
}

impl BlendConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                Self::parse(&contents)?
            } else {
                BlendConfig::default()
            }
        } else {
            BlendConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("failed to parse config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(side) = env::var("BLEND_WEIGHT_SIDE") {
            if !side.trim().is_empty() {
                self.blend.weight_side = side;
            }
        }
        if let Ok(invert) = env::var("BLEND_INVERT") {
            if let Ok(value) = invert.trim().parse::<bool>() {
                self.blend.invert = value;
            }
        }
        if let Ok(output) = env::var("BLEND_OUTPUT") {
            if !output.trim().is_empty() {
                self.blend.output = output;
            }
        }
        if let Ok(preset) = env::var("BLEND_PRESET") {
            if !preset.trim().is_empty() {
                self.blend.preset = preset;
            }
        }
        if let Ok(host) = env::var("BLEND_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = env::var("BLEND_PORT") {
            if let Ok(value) = port.trim().parse::<u16>() {
                self.server.port = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("BLEND_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/blend.toml")))
}
