use dataset::Dataset;
use shared::{
    domain::Observation,
    protocol::{ChartKind, ChartPoint, ChartSpec, Coord, CountryCharts, DashboardView},
};
use tracing::{debug, warn};

pub const DASHBOARD_TITLE: &str = "COVID-19 Public Health Trends Dashboard";
pub const DEFAULT_COUNTRY: &str = "United States";

const DATE_LABEL: &str = "Date";

/// Builds the static page description: dropdown options, the pre-selected
/// country, empty country-chart slots, and the two global-comparison charts
/// computed once from the latest snapshot.
///
/// Falls back to the first country in the sorted list when `default_country`
/// is absent from the dataset.
pub fn dashboard_view(data: &Dataset, default_country: &str) -> DashboardView {
    let countries = data.locations().to_vec();
    let selected_country = if data.contains_location(default_country) {
        default_country.to_string()
    } else {
        // locations is non-empty by Dataset construction
        let fallback = countries[0].clone();
        warn!(
            default_country,
            %fallback,
            "default country absent from dataset, selecting first option"
        );
        fallback
    };

    DashboardView {
        title: DASHBOARD_TITLE.to_string(),
        countries,
        country_charts: placeholder_charts(&selected_country),
        selected_country,
        choropleth: cases_per_million_choropleth(data),
        scatter: stringency_scatter(data),
    }
}

/// The reactive update: filters the dataset to `country` and rebuilds the
/// three time-series charts. Pure and deterministic; a selection that is not
/// in the dataset degrades to empty placeholder charts rather than an error.
pub fn country_charts(data: &Dataset, country: &str) -> CountryCharts {
    let mut charts = placeholder_charts(country);
    if !data.contains_location(country) {
        debug!(country, "selection not in dataset, returning placeholder charts");
        return charts;
    }

    let rows: Vec<&Observation> = data.for_location(country).collect();
    charts.cases.points = date_series(&rows, |obs| obs.total_cases);
    charts.deaths.points = date_series(&rows, |obs| obs.total_deaths);
    charts.stringency.points = date_series(&rows, |obs| obs.stringency_index);
    charts
}

/// The three country-chart slots with titles but no data. The page renders
/// these until the first update cycle fires.
pub fn placeholder_charts(country: &str) -> CountryCharts {
    CountryCharts {
        country: country.to_string(),
        cases: ChartSpec::empty(
            ChartKind::Line,
            format!("Total Cases Over Time - {country}"),
            DATE_LABEL,
            "Total Cases",
        ),
        deaths: ChartSpec::empty(
            ChartKind::Line,
            format!("Total Deaths Over Time - {country}"),
            DATE_LABEL,
            "Total Deaths",
        ),
        stringency: ChartSpec::empty(
            ChartKind::Line,
            format!("Stringency Index Over Time - {country}"),
            DATE_LABEL,
            "Stringency Index",
        ),
    }
}

/// World map over the latest snapshot, colored by total cases per million.
pub fn cases_per_million_choropleth(data: &Dataset) -> ChartSpec {
    let points = data
        .latest()
        .values()
        .filter_map(|obs| {
            obs.total_cases_per_million.map(|y| ChartPoint {
                x: Coord::Text(obs.location.clone()),
                y,
                label: None,
            })
        })
        .collect();
    ChartSpec {
        kind: ChartKind::Choropleth,
        title: "Total Cases per Million (Latest)".to_string(),
        x_label: "Country".to_string(),
        y_label: "Total Cases per Million".to_string(),
        points,
    }
}

/// Stringency index against new cases per million over the latest snapshot,
/// one labelled point per country.
pub fn stringency_scatter(data: &Dataset) -> ChartSpec {
    let points = data
        .latest()
        .values()
        .filter_map(|obs| match (obs.stringency_index, obs.new_cases_per_million) {
            (Some(x), Some(y)) => Some(ChartPoint {
                x: Coord::Number(x),
                y,
                label: Some(obs.location.clone()),
            }),
            _ => None,
        })
        .collect();
    ChartSpec {
        kind: ChartKind::Scatter,
        title: "Stringency Index vs New Cases per Million (Latest)".to_string(),
        x_label: "Stringency Index".to_string(),
        y_label: "New Cases per Million".to_string(),
        points,
    }
}

fn date_series(
    rows: &[&Observation],
    metric: impl Fn(&Observation) -> Option<f64>,
) -> Vec<ChartPoint> {
    rows.iter()
        .filter_map(|obs| {
            metric(obs).map(|y| ChartPoint {
                x: Coord::Text(obs.date.to_string()),
                y,
                label: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn obs(location: &str, date: &str) -> Observation {
        Observation {
            location: location.to_string(),
            continent: "Asia".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date"),
            total_cases: None,
            total_deaths: None,
            total_cases_per_million: None,
            new_cases_per_million: None,
            stringency_index: None,
        }
    }

    fn sample_dataset() -> Dataset {
        let mut first = obs("Testland", "2021-01-01");
        first.total_cases = Some(10.0);
        first.total_deaths = Some(1.0);
        first.stringency_index = Some(70.0);
        first.total_cases_per_million = Some(5.0);
        first.new_cases_per_million = Some(0.5);

        let mut second = obs("Testland", "2021-01-02");
        second.total_cases = Some(20.0);
        second.total_deaths = Some(2.0);
        second.stringency_index = Some(75.0);
        second.total_cases_per_million = Some(10.0);
        second.new_cases_per_million = Some(1.0);

        let mut other = obs("Otherland", "2021-01-01");
        other.total_cases = Some(100.0);

        Dataset::from_observations(vec![second, first, other]).expect("dataset")
    }

    #[test]
    fn country_charts_series_is_date_ordered() {
        let data = sample_dataset();
        let charts = country_charts(&data, "Testland");
        assert_eq!(
            charts.cases.points,
            vec![
                ChartPoint {
                    x: Coord::Text("2021-01-01".to_string()),
                    y: 10.0,
                    label: None,
                },
                ChartPoint {
                    x: Coord::Text("2021-01-02".to_string()),
                    y: 20.0,
                    label: None,
                },
            ]
        );
    }

    #[test]
    fn country_charts_is_deterministic() {
        let data = sample_dataset();
        assert_eq!(
            country_charts(&data, "Testland"),
            country_charts(&data, "Testland")
        );
    }

    #[test]
    fn unknown_selection_returns_empty_charts() {
        let data = sample_dataset();
        let charts = country_charts(&data, "NoSuchCountry");
        assert!(charts.cases.is_empty());
        assert!(charts.deaths.is_empty());
        assert!(charts.stringency.is_empty());
    }

    #[test]
    fn series_skips_rows_with_missing_metric_values() {
        let data = sample_dataset();
        let charts = country_charts(&data, "Otherland");
        assert_eq!(charts.cases.points.len(), 1);
        assert!(charts.deaths.is_empty());
    }

    #[test]
    fn chart_titles_name_the_metric_and_country() {
        let data = sample_dataset();
        let charts = country_charts(&data, "Testland");
        assert_eq!(charts.cases.title, "Total Cases Over Time - Testland");
        assert_eq!(charts.deaths.title, "Total Deaths Over Time - Testland");
        assert_eq!(
            charts.stringency.title,
            "Stringency Index Over Time - Testland"
        );
    }

    #[test]
    fn dropdown_options_match_the_dataset_locations_exactly() {
        let data = sample_dataset();
        let view = dashboard_view(&data, DEFAULT_COUNTRY);
        assert_eq!(view.countries, data.locations());
        assert_eq!(view.countries, ["Otherland", "Testland"]);
    }

    #[test]
    fn default_country_falls_back_to_first_option_when_absent() {
        let data = sample_dataset();
        let view = dashboard_view(&data, "United States");
        assert_eq!(view.selected_country, "Otherland");
    }

    #[test]
    fn default_country_is_kept_when_present() {
        let data = sample_dataset();
        let view = dashboard_view(&data, "Testland");
        assert_eq!(view.selected_country, "Testland");
    }

    #[test]
    fn view_chart_slots_start_empty() {
        let data = sample_dataset();
        let view = dashboard_view(&data, "Testland");
        assert!(view.country_charts.cases.is_empty());
        assert!(view.country_charts.deaths.is_empty());
        assert!(view.country_charts.stringency.is_empty());
    }

    #[test]
    fn choropleth_uses_the_latest_snapshot() {
        let data = sample_dataset();
        let chart = cases_per_million_choropleth(&data);
        // Otherland has no per-million figure and is skipped; Testland's
        // latest row (2021-01-02) wins over the earlier one.
        assert_eq!(
            chart.points,
            vec![ChartPoint {
                x: Coord::Text("Testland".to_string()),
                y: 10.0,
                label: None,
            }]
        );
    }

    #[test]
    fn scatter_labels_points_with_the_location() {
        let data = sample_dataset();
        let chart = stringency_scatter(&data);
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].label.as_deref(), Some("Testland"));
        assert_eq!(chart.points[0].x, Coord::Number(75.0));
        assert_eq!(chart.points[0].y, 1.0);
    }
}
