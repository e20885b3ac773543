use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite database.
    pub database: String,
    /// E-mail that is always promoted to master admin when present.
    #[serde(default)]
    pub master_email: String,
    #[serde(default = "default_daily_hours")]
    pub default_daily_hours: f64,
    /// Weekday ids, 0=Sunday .. 6=Saturday.
    #[serde(default = "default_work_days")]
    pub default_work_days: String,
    /// Bank level (minutes) at which the one-shot overwork notice fires.
    #[serde(default = "default_overwork_minutes")]
    pub overwork_notice_minutes: i64,
    /// Window used when synthesizing a justified absence, "HH:MM-HH:MM".
    #[serde(default = "default_justify_window")]
    pub justify_window: String,
}

fn default_daily_hours() -> f64 {
    8.0
}
fn default_work_days() -> String {
    "1,2,3,4,5".to_string()
}
fn default_overwork_minutes() -> i64 {
    360
}
fn default_justify_window() -> String {
    "12:00-18:00".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            master_email: String::new(),
            default_daily_hours: default_daily_hours(),
            default_work_days: default_work_days(),
            overwork_notice_minutes: default_overwork_minutes(),
            justify_window: default_justify_window(),
        }
    }
}

impl Config {
    /// Standard configuration directory for the current platform.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rponto")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rponto.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rponto.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> Self {
        let path = Self::config_file();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Parse the justify window into start/end times.
    pub fn justify_bounds(&self) -> AppResult<(chrono::NaiveTime, chrono::NaiveTime)> {
        let (s, e) = self
            .justify_window
            .split_once('-')
            .ok_or_else(|| AppError::Config(format!("bad justify_window: {}", self.justify_window)))?;
        let start = crate::utils::time::parse_time_required(s.trim())?;
        let end = crate::utils::time::parse_time_required(e.trim())?;
        if end <= start {
            return Err(AppError::Config(format!(
                "justify_window must end after it starts: {}",
                self.justify_window
            )));
        }
        Ok((start, end))
    }

    /// Create the config directory, the config file (unless running under
    /// `--test`) and an empty database file.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config).map_err(|_| AppError::ConfigSave)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
