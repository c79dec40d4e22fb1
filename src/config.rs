use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::Grouping;
use crate::metrics::{BUDGET_WARNING_PERCENT, RENEWAL_WINDOW_DAYS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix printed before every amount.
    pub currency_symbol: String,
    pub grouping: Grouping,

    /// Active subscriptions renewing within this many days are listed as upcoming.
    pub renewal_window_days: i64,

    /// Budgets spent above this percentage are shown as a warning.
    pub budget_warning_percent: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            grouping: Grouping::Indian,
            renewal_window_days: RENEWAL_WINDOW_DAYS,
            budget_warning_percent: BUDGET_WARNING_PERCENT,
        }
    }
}

impl AppConfig {
    pub const KEYS: [&'static str; 4] = [
        "currency_symbol",
        "grouping",
        "renewal_window_days",
        "budget_warning_percent",
    ];

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "currency_symbol" => {
                if value.is_empty() {
                    return Err(anyhow!("currency_symbol must not be empty"));
                }
                self.currency_symbol = value.to_string();
            }
            "grouping" => {
                self.grouping = value.parse().map_err(|e: String| anyhow!(e))?;
            }
            "renewal_window_days" => {
                let days: i64 = value
                    .parse()
                    .with_context(|| format!("Invalid number for renewal_window_days: {value}"))?;
                if days < 0 {
                    return Err(anyhow!("renewal_window_days must be >= 0"));
                }
                self.renewal_window_days = days;
            }
            "budget_warning_percent" => {
                let pct: u32 = value.parse().with_context(|| {
                    format!("Invalid number for budget_warning_percent: {value}")
                })?;
                if pct > 100 {
                    return Err(anyhow!("budget_warning_percent must be between 0 and 100"));
                }
                self.budget_warning_percent = pct;
            }
            other => {
                return Err(anyhow!(
                    "Unknown config key '{other}'. Known keys: {}",
                    Self::KEYS.join(", ")
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
}

pub fn app_paths(override_home: Option<PathBuf>) -> Result<AppPaths> {
    if let Some(home) = override_home {
        return Ok(AppPaths {
            config_dir: home.join("config"),
        });
    }

    let proj = ProjectDirs::from("com", "finboard", "finboard")
        .context("Failed to resolve platform directories")?;

    Ok(AppPaths {
        config_dir: proj.config_dir().to_path_buf(),
    })
}

pub fn load_or_init_config(paths: &AppPaths) -> Result<(AppConfig, PathBuf)> {
    fs::create_dir_all(&paths.config_dir)
        .with_context(|| format!("Failed to create config dir {}", paths.config_dir.display()))?;

    let cfg_path = paths.config_dir.join("config.json");
    if !cfg_path.exists() {
        log::debug!("writing default config to {}", cfg_path.display());
        let cfg = AppConfig::default();
        write_config(&cfg_path, &cfg)?;
        return Ok((cfg, cfg_path));
    }

    let raw = fs::read_to_string(&cfg_path)
        .with_context(|| format!("Failed to read {}", cfg_path.display()))?;
    let cfg: AppConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", cfg_path.display()))?;
    log::debug!("loaded config from {}", cfg_path.display());

    Ok((cfg, cfg_path))
}

pub fn write_config(path: &Path, cfg: &AppConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn today_or(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        None => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {s}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: AppConfig = serde_json::from_str(r#"{ "currency_symbol": "$" }"#).unwrap();
        assert_eq!(cfg.currency_symbol, "$");
        assert_eq!(cfg.grouping, Grouping::Indian);
        assert_eq!(cfg.renewal_window_days, 7);
        assert_eq!(cfg.budget_warning_percent, 80);
    }

    #[test]
    fn set_validates_values() {
        let mut cfg = AppConfig::default();
        cfg.set("grouping", "western").unwrap();
        assert_eq!(cfg.grouping, Grouping::Western);

        cfg.set("renewal_window_days", "14").unwrap();
        assert_eq!(cfg.renewal_window_days, 14);

        assert!(cfg.set("renewal_window_days", "-1").is_err());
        assert!(cfg.set("budget_warning_percent", "120").is_err());
        assert!(cfg.set("currency_symbol", "  ").is_err());
        assert!(cfg.set("colour", "blue").is_err());
    }

    #[test]
    fn init_then_reload_round_trips() {
        let home = tempfile::tempdir().expect("tempdir");
        let paths = app_paths(Some(home.path().to_path_buf())).unwrap();

        let (mut cfg, path) = load_or_init_config(&paths).unwrap();
        assert!(path.exists());
        assert_eq!(cfg, AppConfig::default());

        cfg.set("currency_symbol", "Rs.").unwrap();
        write_config(&path, &cfg).unwrap();

        let (reloaded, _) = load_or_init_config(&paths).unwrap();
        assert_eq!(reloaded.currency_symbol, "Rs.");
    }

    #[test]
    fn today_override_parses() {
        assert_eq!(
            today_or(Some("2024-12-23")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 23).unwrap()
        );
        assert!(today_or(Some("23/12/2024")).is_err());
    }
}
