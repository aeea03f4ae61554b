use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{ProcessingError, Result};
use crate::models::Variable;

/// Geographic level a series can be partitioned by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupBy {
    Province,
    Region,
    Station,
}

impl GroupBy {
    pub const ALL: [GroupBy; 3] = [GroupBy::Province, GroupBy::Region, GroupBy::Station];

    pub fn label(self) -> &'static str {
        match self {
            GroupBy::Province => "Province",
            GroupBy::Region => "Region",
            GroupBy::Station => "Station",
        }
    }

    pub fn column_name(self) -> &'static str {
        match self {
            GroupBy::Province => "province_name",
            GroupBy::Region => "region_name",
            GroupBy::Station => "station_name",
        }
    }
}

impl FromStr for GroupBy {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(s) || g.column_name() == s)
            .ok_or_else(|| ProcessingError::unknown_column(s))
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Calendar period observations are resampled into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annually,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Daily,
        Period::Weekly,
        Period::Monthly,
        Period::Quarterly,
        Period::Annually,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Quarterly => "Quarterly",
            Period::Annually => "Annually",
        }
    }

    /// One-letter resample code (D, W, M, Q, A)
    pub fn code(self) -> char {
        match self {
            Period::Daily => 'D',
            Period::Weekly => 'W',
            Period::Monthly => 'M',
            Period::Quarterly => 'Q',
            Period::Annually => 'A',
        }
    }
}

impl FromStr for Period {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s) || (s.len() == 1 && s.starts_with(p.code())))
            .ok_or_else(|| ProcessingError::unknown_column(s))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlotMode {
    #[default]
    Lines,
    Markers,
}

impl FromStr for PlotMode {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lines" => Ok(PlotMode::Lines),
            "markers" => Ok(PlotMode::Markers),
            _ => Err(ProcessingError::unknown_column(s)),
        }
    }
}

/// Dashboard page; both run the same aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisMode {
    #[default]
    Explore,
    Model,
}

impl FromStr for AnalysisMode {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explore" | "explore timeseries" => Ok(AnalysisMode::Explore),
            "model" | "model timeseries" => Ok(AnalysisMode::Model),
            _ => Err(ProcessingError::unknown_column(s)),
        }
    }
}

/// One timeseries view as selected in the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesRequest {
    pub variable: Variable,
    pub period: Option<Period>,
    pub group_by: Option<GroupBy>,
    pub plot_mode: PlotMode,
    pub analysis_mode: AnalysisMode,
}

impl TimeseriesRequest {
    pub fn new(variable: Variable) -> Self {
        Self {
            variable,
            period: None,
            group_by: None,
            plot_mode: PlotMode::default(),
            analysis_mode: AnalysisMode::default(),
        }
    }

    /// Build a request from the dashboard's string selections
    pub fn parse(variable: &str, period: Option<&str>, group_by: Option<&str>) -> Result<Self> {
        Ok(Self {
            variable: variable.parse()?,
            period: period.map(str::parse).transpose()?,
            group_by: group_by.map(str::parse).transpose()?,
            plot_mode: PlotMode::default(),
            analysis_mode: AnalysisMode::default(),
        })
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn with_plot_mode(mut self, plot_mode: PlotMode) -> Self {
        self.plot_mode = plot_mode;
        self
    }

    pub fn with_analysis_mode(mut self, analysis_mode: AnalysisMode) -> Self {
        self.analysis_mode = analysis_mode;
        self
    }
}
