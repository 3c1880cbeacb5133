//! Application configuration.
//!
//! Loaded once at startup from a JSON file. A missing or malformed file is
//! fatal: the predictor cannot run without station and line identifiers and
//! the commute constants. Optional sections fall back to defaults.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::{ClockTime, parse_weekday};
use crate::leave_by::{CommuteConstraints, SelectionMode};
use crate::schedule::ScheduleWindow;
use crate::tfl::MAX_JOURNEY_MINUTES;

/// Used when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Environment variable overriding `tfl.api_key`.
pub const API_KEY_ENV: &str = "TFL_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The config file as written on disk.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    tfl: TflSection,
    commute: CommuteSection,
    #[serde(default)]
    schedule: ScheduleSection,
    #[serde(default)]
    telegram: Option<TelegramSection>,
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    agent: AgentSection,
}

/// The fixed route being watched.
#[derive(Debug, Clone, Deserialize)]
pub struct TflSection {
    /// Stop point id of the home platform, e.g. "940GZZLUHWY".
    pub home_station: String,
    /// Stop point id of the station nearest work.
    pub work_station: String,
    /// Line name, e.g. "piccadilly".
    pub line: String,
    /// Direction substring, e.g. "inbound".
    pub direction: String,
    /// TfL application key. Overridden by `TFL_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Journey time used when the journey planner has no answer.
    #[serde(default = "TflSection::default_journey_time_minutes")]
    pub journey_time_minutes: i64,
    /// How long a journey planner estimate stays fresh.
    #[serde(default = "TflSection::default_journey_cache_secs")]
    pub journey_cache_secs: u64,
}

impl TflSection {
    fn default_journey_time_minutes() -> i64 {
        18
    }
    fn default_journey_cache_secs() -> u64 {
        600
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeName {
    Deadline,
    Target,
}

#[derive(Debug, Clone, Deserialize)]
struct CommuteSection {
    walking_minutes: i64,
    #[serde(default = "CommuteSection::default_buffer_minutes")]
    buffer_minutes: i64,
    #[serde(default = "CommuteSection::default_buffer_minutes")]
    platform_buffer_minutes: i64,
    work_start_time: Option<ClockTime>,
    arrival_target: Option<ClockTime>,
    mode: Option<ModeName>,
}

impl CommuteSection {
    fn default_buffer_minutes() -> i64 {
        2
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ScheduleSection {
    #[serde(default = "ScheduleSection::default_active_days")]
    active_days: Vec<String>,
    #[serde(default = "ScheduleSection::default_window_start")]
    active_window_start: ClockTime,
    #[serde(default = "ScheduleSection::default_window_end")]
    active_window_end: ClockTime,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            active_days: Self::default_active_days(),
            active_window_start: Self::default_window_start(),
            active_window_end: Self::default_window_end(),
        }
    }
}

impl ScheduleSection {
    fn default_active_days() -> Vec<String> {
        ["monday", "tuesday", "wednesday", "thursday", "friday"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    fn default_window_start() -> ClockTime {
        ScheduleWindow::weekday_mornings().start()
    }
    fn default_window_end() -> ClockTime {
        ScheduleWindow::weekday_mornings().end()
    }
}

/// Telegram chat id: numeric for users and groups, "@name" for channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Name(String),
}

/// Optional Telegram notification target.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramSection {
    pub bot_token: String,
    pub chat_id: ChatId,
}

#[derive(Debug, Clone, Deserialize)]
struct ServerSection {
    #[serde(default = "ServerSection::default_bind")]
    bind: SocketAddr,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
        }
    }
}

impl ServerSection {
    fn default_bind() -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], 5000))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct AgentSection {
    #[serde(default = "AgentSection::default_poll_interval_secs")]
    poll_interval_secs: u64,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            poll_interval_secs: Self::default_poll_interval_secs(),
        }
    }
}

impl AgentSection {
    fn default_poll_interval_secs() -> u64 {
        30
    }
}

/// Commute constants with the selection mode resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommuteSettings {
    pub walking_minutes: i64,
    /// Platform buffer for the resolved mode.
    pub buffer_minutes: i64,
    pub mode: SelectionMode,
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub tfl: TflSection,
    pub commute: CommuteSettings,
    pub schedule: ScheduleWindow,
    pub telegram: Option<TelegramSection>,
    pub bind: SocketAddr,
    pub poll_interval: Duration,
}

impl Config {
    /// Load from a JSON file, applying the `TFL_API_KEY` override.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_json(&content)?;
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    /// Parse and validate a JSON document.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::validate(file)
    }

    /// Replace the API key when an override is present and non-empty.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            self.tfl.api_key = key;
        }
        self
    }

    /// Engine constraints for a given journey time.
    pub fn constraints(&self, journey_minutes: i64) -> CommuteConstraints {
        CommuteConstraints::new(
            self.commute.walking_minutes,
            self.commute.buffer_minutes,
            journey_minutes,
            self.commute.mode,
        )
    }

    fn validate(file: ConfigFile) -> Result<Self, ConfigError> {
        let ConfigFile {
            tfl,
            commute,
            schedule,
            telegram,
            server,
            agent,
        } = file;

        for (name, value) in [
            ("tfl.home_station", &tfl.home_station),
            ("tfl.work_station", &tfl.work_station),
            ("tfl.line", &tfl.line),
            ("tfl.direction", &tfl.direction),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }

        let minutes = [
            ("tfl.journey_time_minutes", tfl.journey_time_minutes),
            ("commute.walking_minutes", commute.walking_minutes),
            ("commute.buffer_minutes", commute.buffer_minutes),
            ("commute.platform_buffer_minutes", commute.platform_buffer_minutes),
        ];
        for (name, value) in minutes {
            if !(0..=MAX_JOURNEY_MINUTES).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between 0 and {MAX_JOURNEY_MINUTES}"
                )));
            }
        }

        let commute = resolve_commute(&commute)?;

        let days = schedule
            .active_days
            .iter()
            .map(|d| {
                parse_weekday(d)
                    .ok_or_else(|| ConfigError::Invalid(format!("unknown weekday: {d}")))
            })
            .collect::<Result<Vec<Weekday>, _>>()?;

        let schedule = ScheduleWindow::new(
            days,
            schedule.active_window_start,
            schedule.active_window_end,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if agent.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "agent.poll_interval_secs must be positive".into(),
            ));
        }

        Ok(Self {
            tfl,
            commute,
            schedule,
            telegram,
            bind: server.bind,
            poll_interval: Duration::from_secs(agent.poll_interval_secs),
        })
    }
}

/// Pick the selection mode and the buffer that goes with it.
///
/// Without an explicit `mode`, a `work_start_time` means deadline mode and
/// otherwise an `arrival_target` means target mode.
fn resolve_commute(commute: &CommuteSection) -> Result<CommuteSettings, ConfigError> {
    let mode = match (commute.mode, commute.work_start_time, commute.arrival_target) {
        (Some(ModeName::Deadline) | None, Some(work_start), _) => {
            SelectionMode::Deadline(work_start)
        }
        (Some(ModeName::Target) | None, _, Some(target)) => SelectionMode::Target(target),
        (Some(ModeName::Deadline), None, _) => {
            return Err(ConfigError::Invalid(
                "deadline mode requires commute.work_start_time".into(),
            ));
        }
        (Some(ModeName::Target), _, None) => {
            return Err(ConfigError::Invalid(
                "target mode requires commute.arrival_target".into(),
            ));
        }
        (None, None, None) => {
            return Err(ConfigError::Invalid(
                "one of commute.work_start_time or commute.arrival_target is required".into(),
            ));
        }
    };

    let buffer_minutes = match mode {
        SelectionMode::Deadline(_) => commute.buffer_minutes,
        SelectionMode::Target(_) => commute.platform_buffer_minutes,
    };

    Ok(CommuteSettings {
        walking_minutes: commute.walking_minutes,
        buffer_minutes,
        mode,
    })
}
