use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Choropleth,
    Scatter,
}

/// A coordinate on either axis. Line charts carry ISO dates as text on the
/// x axis; scatter charts carry numbers on both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: Coord,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Renderer-independent description of one chart: the series plus enough
/// metadata for a client to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    pub fn empty(
        kind: ChartKind,
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The three per-country time-series charts pushed back to the page whenever
/// the dropdown selection changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCharts {
    pub country: String,
    pub cases: ChartSpec,
    pub deaths: ChartSpec,
    pub stringency: ChartSpec,
}

/// Static description of the dashboard page: dropdown contents, the three
/// country-chart slots (empty until the first update cycle), and the two
/// precomputed global-comparison charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title: String,
    pub countries: Vec<String>,
    pub selected_country: String,
    pub country_charts: CountryCharts,
    pub choropleth: ChartSpec,
    pub scatter: ChartSpec,
}
