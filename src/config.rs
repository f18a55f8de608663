use crate::models::{QueryRules, RankingConfig, RankingWeights};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub query: QuerySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

fn default_catalog_path() -> PathBuf { PathBuf::from("data/travel_spots.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_budget_tolerance")]
    pub budget_tolerance: f64,
    #[serde(default = "default_budget_floor")]
    pub budget_floor: f64,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_neutral_score")]
    pub neutral_score: f64,
    #[serde(default = "default_max_duration_diff")]
    pub max_duration_diff: u32,
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    #[serde(default = "default_max_top_k")]
    pub max_top_k: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            budget_tolerance: default_budget_tolerance(),
            budget_floor: default_budget_floor(),
            min_score: default_min_score(),
            neutral_score: default_neutral_score(),
            max_duration_diff: default_max_duration_diff(),
            default_top_k: default_top_k(),
            max_top_k: default_max_top_k(),
        }
    }
}

impl RankingSettings {
    pub fn to_ranking_config(&self) -> RankingConfig {
        RankingConfig {
            weights: self.weights.into(),
            budget_tolerance: self.budget_tolerance,
            budget_floor: self.budget_floor,
            min_score: self.min_score,
            neutral_score: self.neutral_score,
            max_duration_diff: self.max_duration_diff,
            default_top_k: self.default_top_k,
        }
    }
}

fn default_budget_tolerance() -> f64 { 0.15 }
fn default_budget_floor() -> f64 { 0.25 }
fn default_min_score() -> f64 { 0.4 }
fn default_neutral_score() -> f64 { 0.5 }
fn default_max_duration_diff() -> u32 { 5 }
fn default_top_k() -> usize { 5 }
fn default_max_top_k() -> usize { 50 }

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_keyword_weight")]
    pub keyword: f64,
    #[serde(default = "default_mood_weight")]
    pub mood: f64,
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_duration_weight")]
    pub duration: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_season_weight")]
    pub season: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword_weight(),
            mood: default_mood_weight(),
            budget: default_budget_weight(),
            duration: default_duration_weight(),
            distance: default_distance_weight(),
            season: default_season_weight(),
        }
    }
}

impl From<WeightsConfig> for RankingWeights {
    fn from(w: WeightsConfig) -> Self {
        RankingWeights {
            keyword: w.keyword,
            mood: w.mood,
            budget: w.budget,
            duration: w.duration,
            distance: w.distance,
            season: w.season,
        }
    }
}

fn default_keyword_weight() -> f64 { 0.20 }
fn default_mood_weight() -> f64 { 0.40 }
fn default_budget_weight() -> f64 { 0.20 }
fn default_duration_weight() -> f64 { 0.12 }
fn default_distance_weight() -> f64 { 0.08 }
fn default_season_weight() -> f64 { 0.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    #[serde(default = "default_cheap_budget")]
    pub cheap_budget: u32,
    #[serde(default = "default_near_me_km")]
    pub near_me_km: f64,
    #[serde(default = "default_weekend_days")]
    pub weekend_days: u32,
    #[serde(default = "default_week_days")]
    pub week_days: u32,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            cheap_budget: default_cheap_budget(),
            near_me_km: default_near_me_km(),
            weekend_days: default_weekend_days(),
            week_days: default_week_days(),
        }
    }
}

impl QuerySettings {
    pub fn to_query_rules(&self) -> QueryRules {
        QueryRules {
            cheap_budget: self.cheap_budget,
            near_me_km: self.near_me_km,
            weekend_days: self.weekend_days,
            week_days: self.week_days,
        }
    }
}

fn default_cheap_budget() -> u32 { 3500 }
fn default_near_me_km() -> f64 { 1000.0 }
fn default_weekend_days() -> u32 { 2 }
fn default_week_days() -> u32 { 7 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TRAILHEAD_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRAILHEAD__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TRAILHEAD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
