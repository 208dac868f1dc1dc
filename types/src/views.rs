//! Pure derivations over a [`Dataset`]. Nothing here caches; every view is
//! recomputed from the records each time it is asked for.

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::Serialize;

use crate::format::{format_fixed, format_millions, millions};
use crate::record::{Dataset, PandemicRecord};
use crate::selection::EraFilter;

// ── Era filters ──────────────────────────────────────────────────────────

/// `All` followed by each distinct era, in order of first appearance.
pub fn era_filters(dataset: &Dataset) -> Vec<EraFilter> {
    let mut seen = HashSet::new();
    let mut filters = vec![EraFilter::All];
    for r in dataset {
        if seen.insert(r.era.as_str()) {
            filters.push(EraFilter::Era(r.era.clone()));
        }
    }
    filters
}

/// Records visible under `filter`, in dataset order.
pub fn filtered<'a>(dataset: &'a Dataset, filter: &EraFilter) -> Vec<&'a PandemicRecord> {
    dataset.iter().filter(|r| filter.matches(r)).collect()
}

// ── Aggregate statistics ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub record_count: usize,
    pub total_deaths: u64,
    pub unique_regions: usize,
}

impl Stats {
    pub fn compute(dataset: &Dataset) -> Self {
        Self {
            record_count: dataset.len(),
            total_deaths: total_deaths(dataset),
            unique_regions: unique_region_count(dataset),
        }
    }
}

pub fn total_deaths(dataset: &Dataset) -> u64 {
    dataset.iter().map(|r| r.deaths).sum()
}

/// Size of the set of region names across all records. Exact string match.
pub fn unique_region_count(dataset: &Dataset) -> usize {
    dataset
        .iter()
        .flat_map(|r| r.regions.iter().map(String::as_str))
        .collect::<HashSet<_>>()
        .len()
}

// ── Timeline ─────────────────────────────────────────────────────────────

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub year: i32,
    pub deaths_millions: f64,
    pub name: String,
}

impl TimelinePoint {
    /// Tooltip lines: name, year, deaths in millions with one decimal.
    pub fn tooltip(&self) -> [String; 3] {
        [
            self.name.clone(),
            format!("Год: {}", self.year),
            format!("Жертвы: ~{}M", format_fixed(self.deaths_millions, 1)),
        ]
    }
}

/// Every record projected to a chart point, ascending by year. Equal years
/// keep dataset order. Ignores the active era filter.
pub fn timeline(dataset: &Dataset) -> Vec<TimelinePoint> {
    let mut points: Vec<TimelinePoint> = dataset
        .iter()
        .map(|r| TimelinePoint {
            year: r.year,
            deaths_millions: millions(r.deaths),
            name: r.name.clone(),
        })
        .collect();
    // sort_by_key is stable
    points.sort_by_key(|p| p.year);
    points
}

// ── Ranking ──────────────────────────────────────────────────────────────

/// All records by death toll, largest first; ties keep dataset order.
/// Sorts a vector of references so the dataset itself keeps its order.
pub fn ranking(dataset: &Dataset) -> Vec<&PandemicRecord> {
    let mut ranked: Vec<&PandemicRecord> = dataset.iter().collect();
    ranked.sort_by_key(|r| Reverse(r.deaths));
    ranked
}

/// `deaths / max`, clamped to `[0, 1]`. A zero maximum yields a zero-width bar.
pub fn bar_fraction(deaths: u64, max_deaths: u64) -> f64 {
    if max_deaths == 0 {
        return 0.0;
    }
    (deaths as f64 / max_deaths as f64).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry<'a> {
    pub record: &'a PandemicRecord,
    /// Bar length as a fraction of full width.
    pub bar: f64,
}

impl RankedEntry<'_> {
    pub fn bar_percent(&self) -> f64 {
        self.bar * 100.0
    }

    pub fn deaths_label(&self) -> String {
        format!("~{}M", format_millions(self.record.deaths, 1))
    }
}

/// Ranking with bar widths normalized against the unfiltered maximum.
pub fn ranking_with_bars(dataset: &Dataset) -> Vec<RankedEntry<'_>> {
    let max_deaths = dataset.iter().map(|r| r.deaths).max().unwrap_or(0);
    ranking(dataset)
        .into_iter()
        .map(|record| RankedEntry {
            record,
            bar: bar_fraction(record.deaths, max_deaths),
        })
        .collect()
}
