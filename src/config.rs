use crate::error::{Result, WeatherPushError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub forecast: ForecastTarget,
    pub line: Option<LineConfig>,
    pub yahoo: Option<YahooConfig>,
}

/// Which JMA office to fetch and which area names to read from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ForecastTarget {
    /// Office code used in the feed URL, e.g. `130000` for Tokyo
    pub area_code: String,
    /// Sub-region carrying weather and precipitation probability
    pub region_name: String,
    /// Observation point carrying temperatures
    pub point_name: String,
}

impl Default for ForecastTarget {
    fn default() -> Self {
        Self {
            area_code: "130000".into(),
            region_name: "東京地方".into(),
            point_name: "東京".into(),
        }
    }
}

impl ForecastTarget {
    /// `JMA_AREA_CODE`, `JMA_REGION_NAME` and `JMA_POINT_NAME` win over
    /// whatever the target already holds.
    fn with_env_overrides<F>(self, get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            area_code: get("JMA_AREA_CODE").unwrap_or(self.area_code),
            region_name: get("JMA_REGION_NAME").unwrap_or(self.region_name),
            point_name: get("JMA_POINT_NAME").unwrap_or(self.point_name),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct LineConfig {
    pub channel_access_token: String,
    pub user_id: String,
}

impl std::fmt::Debug for LineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineConfig")
            .field("channel_access_token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct YahooConfig {
    pub app_id: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(default = "default_place_name")]
    pub place_name: String,
}

fn default_place_name() -> String {
    "指定地点".into()
}

impl std::fmt::Debug for YahooConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooConfig")
            .field("app_id", &"[REDACTED]")
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("place_name", &self.place_name)
            .finish()
    }
}

impl Config {
    /// Load from an explicit YAML file, a YAML file in a standard location,
    /// or the environment, in that order.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) if !p.exists() => {
                return Err(WeatherPushError::Config(format!(
                    "Config file not found at {:?}",
                    p
                )));
            }
            Some(p) => Some(p),
            None => Self::find_config_path(),
        };

        match config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::from_yaml_file(&path)
            }
            None => {
                tracing::debug!("no config file found, reading environment");
                Self::from_env()
            }
        }
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("weatherpush").join("config.yaml"))
            .filter(|p| p.exists())
    }

    fn from_yaml_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&config_str, |name| std::env::var(name).ok())
    }

    fn from_yaml_str<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let content = substitute_env_vars(content, &lookup)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| WeatherPushError::Config(format!("Failed to parse config: {}", e)))?;

        let forecast = config
            .forecast
            .with_env_overrides(|name| lookup(name).filter(|v| !v.is_empty()));

        Ok(Self {
            forecast,
            line: validate_line(config.line)?,
            yahoo: validate_yahoo(config.yahoo)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from variable lookups. Empty values count as unset.
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let require = |name: &str| {
            get(name)
                .ok_or_else(|| WeatherPushError::Config(format!("missing required env: {}", name)))
        };

        let forecast = ForecastTarget::default().with_env_overrides(&get);

        let line = match (get("LINE_CHANNEL_ACCESS_TOKEN"), get("LINE_USER_ID")) {
            (None, None) => None,
            _ => Some(LineConfig {
                channel_access_token: require("LINE_CHANNEL_ACCESS_TOKEN")?,
                user_id: require("LINE_USER_ID")?,
            }),
        };

        let yahoo = match get("YAHOO_CLIENT_ID") {
            None => None,
            Some(app_id) => Some(YahooConfig {
                app_id,
                latitude: require("LAT")?,
                longitude: require("LON")?,
                place_name: get("PLACE_NAME").unwrap_or_else(default_place_name),
            }),
        };

        Ok(Self {
            forecast,
            line,
            yahoo,
        })
    }

    /// LINE credentials, required for anything but a dry run.
    pub fn require_line(&self) -> Result<&LineConfig> {
        self.line.as_ref().ok_or_else(|| {
            WeatherPushError::Config(
                "missing required env: LINE_CHANNEL_ACCESS_TOKEN, LINE_USER_ID".into(),
            )
        })
    }

    pub fn require_yahoo(&self) -> Result<&YahooConfig> {
        self.yahoo.as_ref().ok_or_else(|| {
            WeatherPushError::Config("missing required env: YAHOO_CLIENT_ID, LAT, LON".into())
        })
    }
}

/// A file-provided LINE section counts as absent when neither value resolved;
/// one resolved value without the other is an error naming the missing one.
fn validate_line(line: Option<LineConfig>) -> Result<Option<LineConfig>> {
    let Some(line) = line else {
        return Ok(None);
    };
    let token = missing_value(&line.channel_access_token, "line.channel_access_token")?;
    let user = missing_value(&line.user_id, "line.user_id")?;

    match (token, user) {
        (Some(_), Some(_)) => Ok(None),
        (Some(reason), None) | (None, Some(reason)) => Err(WeatherPushError::Config(reason)),
        (None, None) => Ok(Some(line)),
    }
}

/// Without an app id the Yahoo section is absent; with one, coordinates are
/// required.
fn validate_yahoo(yahoo: Option<YahooConfig>) -> Result<Option<YahooConfig>> {
    let Some(mut yahoo) = yahoo else {
        return Ok(None);
    };
    if missing_value(&yahoo.app_id, "yahoo.app_id")?.is_some() {
        return Ok(None);
    }
    for (value, field) in [
        (&yahoo.latitude, "yahoo.latitude"),
        (&yahoo.longitude, "yahoo.longitude"),
    ] {
        if let Some(reason) = missing_value(value, field)? {
            return Err(WeatherPushError::Config(reason));
        }
    }
    if missing_value(&yahoo.place_name, "yahoo.place_name")?.is_some() {
        yahoo.place_name = default_place_name();
    }
    Ok(Some(yahoo))
}

/// Why a configured value is unusable: empty, or still holding a `${VAR}`
/// placeholder whose variable was not set.
fn missing_value(value: &str, field: &str) -> Result<Option<String>> {
    if let Some(cap) = placeholder_pattern()?.captures(value) {
        return Ok(Some(format!("missing required env: {}", &cap[1])));
    }
    if value.trim().is_empty() {
        return Ok(Some(format!("missing required value: {}", field)));
    }
    Ok(None)
}

fn placeholder_pattern() -> Result<regex_lite::Regex> {
    regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| WeatherPushError::Config(format!("Invalid placeholder pattern: {}", e)))
}

/// Replace `${VAR_NAME}` placeholders; unknown variables are left as written.
fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = placeholder_pattern()?;

    let mut result = content.to_string();
    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let placeholder = &cap[0];
        if let Some(value) = lookup(var_name) {
            result = result.replace(placeholder, &value);
        }
    }

    Ok(result)
}
