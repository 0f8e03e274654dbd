//! Dashboard State Entity
//!
//! Per-session view settings: selected ticker, chart options and theme.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::ticker::Ticker;

/// Chart history period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1wk")]
    OneWeek,
    #[default]
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "3y")]
    ThreeYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "max")]
    Max,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Candlestick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Auto,
}

/// Dashboard view settings of one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub selected_ticker: Option<Ticker>,
    pub period: Period,
    pub chart_type: ChartType,
    pub show_moving_averages: bool,
    pub theme: Theme,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatePatch {
    /// `Some(None)` clears the selection
    #[serde(default, with = "double_option")]
    pub selected_ticker: Option<Option<Ticker>>,
    pub period: Option<Period>,
    pub chart_type: Option<ChartType>,
    pub show_moving_averages: Option<bool>,
    pub theme: Option<Theme>,
}

impl DashboardState {
    pub fn apply(&mut self, patch: DashboardStatePatch) {
        if let Some(selected) = patch.selected_ticker {
            self.selected_ticker = selected;
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
        if let Some(chart_type) = patch.chart_type {
            self.chart_type = chart_type;
        }
        if let Some(show) = patch.show_moving_averages {
            self.show_moving_averages = show;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
    }
}

// Distinguishes a missing field from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
