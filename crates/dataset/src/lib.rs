use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use shared::domain::Observation;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset has no usable rows after filtering")]
    Empty,
}

/// One CSV row as it appears in the source file. Only the columns the
/// dashboard uses are named; everything else in the file is ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    location: String,
    #[serde(default)]
    continent: Option<String>,
    date: String,
    #[serde(default)]
    total_cases: Option<f64>,
    #[serde(default)]
    total_deaths: Option<f64>,
    #[serde(default)]
    total_cases_per_million: Option<f64>,
    #[serde(default)]
    new_cases_per_million: Option<f64>,
    #[serde(default)]
    stringency_index: Option<f64>,
}

impl RawRecord {
    /// Rows without a continent classification are aggregates (World,
    /// income groups) and are filtered out; rows with an unparseable date
    /// are malformed and dropped.
    fn into_observation(self) -> Result<Observation, RowSkip> {
        let continent = match self.continent {
            Some(c) if !c.trim().is_empty() => c,
            _ => return Err(RowSkip::NoContinent),
        };
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| RowSkip::BadDate)?;
        Ok(Observation {
            location: self.location,
            continent,
            date,
            total_cases: self.total_cases,
            total_deaths: self.total_deaths,
            total_cases_per_million: self.total_cases_per_million,
            new_cases_per_million: self.new_cases_per_million,
            stringency_index: self.stringency_index,
        })
    }
}

enum RowSkip {
    NoContinent,
    BadDate,
}

/// The process-wide read-only dataset: built once at startup, shared by
/// reference afterwards, never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    observations: Vec<Observation>,
    latest: BTreeMap<String, Observation>,
    locations: Vec<String>,
}

impl Dataset {
    /// Reads the CSV at `path`, drops aggregate and malformed rows, and
    /// builds the sorted observation sequence plus the latest-snapshot
    /// projection.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        let mut filtered = 0usize;
        let mut malformed = 0usize;
        for record in reader.deserialize::<RawRecord>() {
            let raw = match record {
                Ok(raw) => raw,
                Err(err) => {
                    debug!(%err, "dropping undecodable row");
                    malformed += 1;
                    continue;
                }
            };
            match raw.into_observation() {
                Ok(obs) => rows.push(obs),
                Err(RowSkip::NoContinent) => filtered += 1,
                Err(RowSkip::BadDate) => {
                    debug!("dropping row with unparseable date");
                    malformed += 1;
                }
            }
        }

        let dataset = Self::from_observations(rows)?;
        info!(
            path = %path.display(),
            rows = dataset.observations.len(),
            locations = dataset.locations.len(),
            filtered,
            malformed,
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Builds a dataset from rows already in memory. Applies the same
    /// continent filter and ordering guarantee as [`Dataset::load`].
    pub fn from_observations(mut rows: Vec<Observation>) -> Result<Self, DatasetError> {
        rows.retain(|obs| !obs.continent.trim().is_empty());
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        // Stable sort: equal (location, date) rows keep their input order,
        // which makes the last-wins tie-break below reproducible.
        rows.sort_by(|a, b| a.location.cmp(&b.location).then(a.date.cmp(&b.date)));

        let latest = latest_by_location(&rows);
        let locations = latest.keys().cloned().collect();
        Ok(Self {
            observations: rows,
            latest,
            locations,
        })
    }

    /// All observations, sorted by (location, date) ascending.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The most recent observation per location.
    pub fn latest(&self) -> &BTreeMap<String, Observation> {
        &self.latest
    }

    /// Distinct locations, lexicographically ascending.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn contains_location(&self, location: &str) -> bool {
        self.latest.contains_key(location)
    }

    /// Observations for one location, in date-ascending order.
    pub fn for_location<'a>(
        &'a self,
        location: &'a str,
    ) -> impl Iterator<Item = &'a Observation> {
        self.observations
            .iter()
            .filter(move |obs| obs.location == location)
    }
}

/// Folds the (location, date)-sorted rows into one row per location. Later
/// rows overwrite earlier ones, so each location keeps its maximum date and
/// ties resolve to the row encountered last in the sort.
pub fn latest_by_location(rows: &[Observation]) -> BTreeMap<String, Observation> {
    let mut latest = BTreeMap::new();
    for obs in rows {
        latest.insert(obs.location.clone(), obs.clone());
    }
    latest
}
