use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubError};
use crate::theme::{Palette, palette};

pub const MIN_SCALE: f64 = 0.75;
pub const MAX_SCALE: f64 = 3.0;
pub const SCALE_STEP: f64 = 0.25;
pub const DEFAULT_HUE: f64 = 200.0;
pub const DEFAULT_NOTIFICATION_TEXT: &str = "Your subscription is due soon!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[serde(alias = "Light")]
    Light,
    #[default]
    #[serde(alias = "Dark")]
    Dark,
}

impl FromStr for AppearanceMode {
    type Err = SubError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(AppearanceMode::Light),
            "dark" => Ok(AppearanceMode::Dark),
            other => Err(SubError::Invalid(format!(
                "unknown appearance mode '{other}' (expected light or dark)"
            ))),
        }
    }
}

impl fmt::Display for AppearanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppearanceMode::Light => "light",
            AppearanceMode::Dark => "dark",
        })
    }
}

/// How long before a renewal a reminder becomes visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadTime {
    #[serde(rename = "1 day")]
    OneDay,
    #[default]
    #[serde(rename = "3 days")]
    ThreeDays,
    #[serde(rename = "1 week")]
    OneWeek,
    #[serde(rename = "2 weeks")]
    TwoWeeks,
}

impl LeadTime {
    pub const ALL: [LeadTime; 4] = [
        LeadTime::OneDay,
        LeadTime::ThreeDays,
        LeadTime::OneWeek,
        LeadTime::TwoWeeks,
    ];

    pub fn days(self) -> i64 {
        match self {
            LeadTime::OneDay => 1,
            LeadTime::ThreeDays => 3,
            LeadTime::OneWeek => 7,
            LeadTime::TwoWeeks => 14,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadTime::OneDay => "1 day",
            LeadTime::ThreeDays => "3 days",
            LeadTime::OneWeek => "1 week",
            LeadTime::TwoWeeks => "2 weeks",
        }
    }
}

impl FromStr for LeadTime {
    type Err = SubError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        LeadTime::ALL
            .into_iter()
            .find(|lt| lt.label() == wanted)
            .ok_or_else(|| {
                SubError::Invalid(format!(
                    "unknown lead time '{}' (expected 1 day, 3 days, 1 week or 2 weeks)",
                    s.trim()
                ))
            })
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Process-wide preferences persisted to settings.json. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scaling_factor: f64,
    pub appearance_mode: AppearanceMode,
    pub hue: f64,
    pub notifications_enabled: bool,
    pub notification_when: LeadTime,
    pub notification_push: bool,
    pub notification_custom_text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scaling_factor: 1.0,
            appearance_mode: AppearanceMode::Dark,
            hue: DEFAULT_HUE,
            notifications_enabled: false,
            notification_when: LeadTime::ThreeDays,
            notification_push: false,
            notification_custom_text: DEFAULT_NOTIFICATION_TEXT.to_string(),
        }
    }
}

impl Settings {
    pub fn set_scaling(&mut self, factor: f64) -> Result<()> {
        validate_scale(factor)?;
        self.scaling_factor = factor;
        Ok(())
    }

    pub fn set_hue(&mut self, hue: f64) -> Result<()> {
        if !hue.is_finite() || !(0.0..=360.0).contains(&hue) {
            return Err(SubError::Invalid(format!(
                "hue must be between 0 and 360, got {hue}"
            )));
        }
        self.hue = hue;
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        palette(self.hue)
    }
}

pub fn scale_options() -> Vec<f64> {
    (3..=12).map(|quarters| quarters as f64 * SCALE_STEP).collect()
}

pub fn scale_label(factor: f64) -> String {
    format!("{}%", (factor * 100.0).round() as i64)
}

/// Accepts either a percentage label ("125%") or a plain factor ("1.25").
pub fn parse_scale(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let factor = match trimmed.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().map(|p| p / 100.0),
        None => trimmed.parse::<f64>(),
    }
    .map_err(|_| SubError::Invalid(format!("'{trimmed}' is not a scaling factor")))?;
    validate_scale(factor)?;
    Ok(factor)
}

fn validate_scale(factor: f64) -> Result<()> {
    let steps = factor / SCALE_STEP;
    let on_grid = (steps - steps.round()).abs() < 1e-9;
    if !factor.is_finite() || !(MIN_SCALE..=MAX_SCALE).contains(&factor) || !on_grid {
        let choices: Vec<String> = scale_options().into_iter().map(scale_label).collect();
        return Err(SubError::Invalid(format!(
            "scaling must be one of {}, got {factor}",
            choices.join(", ")
        )));
    }
    Ok(())
}
