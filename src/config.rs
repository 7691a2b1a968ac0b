use serde::{Deserialize, Serialize};

use crate::decimal::CURRENCY_SCALE;
use crate::errors::{ProjectionError, Result};

/// tunables for projections and savings previews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// months ahead the expander looks
    pub horizon_months: u32,
    /// horizons for savings growth previews
    pub savings_preview_months: Vec<u32>,
    /// fixed divisor window for trailing monthly averages
    pub average_window_months: u32,
    /// decimal places used by the json views
    pub display_scale: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_months: 12,
            savings_preview_months: vec![6, 12, 24],
            average_window_months: 3,
            display_scale: CURRENCY_SCALE,
        }
    }
}

impl ProjectionConfig {
    /// short-range dashboard: next quarter only
    pub fn quarterly() -> Self {
        Self {
            horizon_months: 3,
            savings_preview_months: vec![3, 6],
            ..Self::default()
        }
    }

    /// long-range planning: five years out
    pub fn long_range() -> Self {
        Self {
            horizon_months: 60,
            savings_preview_months: vec![12, 24, 36, 60],
            average_window_months: 12,
            ..Self::default()
        }
    }

    /// parse from json; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ProjectionConfig =
            serde_json::from_str(json).map_err(|e| ProjectionError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ProjectionError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.horizon_months < 1 {
            return Err(ProjectionError::InvalidConfiguration {
                message: "horizon_months must be at least 1".to_string(),
            });
        }
        if self.savings_preview_months.iter().any(|&m| m < 1) {
            return Err(ProjectionError::InvalidConfiguration {
                message: "savings preview horizons must be at least 1 month".to_string(),
            });
        }
        if self.average_window_months < 1 {
            return Err(ProjectionError::InvalidConfiguration {
                message: "average_window_months must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
