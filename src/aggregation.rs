// Launch Aggregation - the two chart data functions
// Site success breakdown (pie) and payload/outcome filter (scatter)

use crate::dataset::{Dataset, LaunchRecord, OutcomeClass};
use crate::error::AggregationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Dropdown value meaning "every site"
pub const ALL_SITES: &str = "ALL";

// ============================================================================
// SITE SELECTOR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Parse a dropdown value. `"ALL"` and the empty string select every site.
    /// Site names are kept verbatim, surrounding whitespace included.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == ALL_SITES {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SiteSelector::All => ALL_SITES,
            SiteSelector::Site(name) => name,
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(name) => name == site,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SITE SUCCESS AGGREGATOR (pie chart)
// ============================================================================

/// One labelled value of a proportional chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliceCount {
    pub label: String,
    pub value: usize,
}

impl SliceCount {
    fn new(label: &str, value: usize) -> Self {
        SliceCount {
            label: label.to_string(),
            value,
        }
    }
}

/// Aggregated counts ready for a pie chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteBreakdown {
    pub title: String,
    pub slices: Vec<SliceCount>,
}

impl SiteBreakdown {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Counts launches per (site, outcome class)
#[derive(Debug, Clone)]
pub struct SiteSuccessAggregator {
    dataset: Dataset,
}

impl SiteSuccessAggregator {
    pub fn new(dataset: Dataset) -> Self {
        SiteSuccessAggregator { dataset }
    }

    /// Launch count for every (site, class) group present in the data
    pub fn group_counts(&self) -> HashMap<(String, OutcomeClass), usize> {
        let mut groups: HashMap<(String, OutcomeClass), usize> = HashMap::new();
        for record in self.dataset.records() {
            *groups
                .entry((record.launch_site.clone(), record.class))
                .or_insert(0) += 1;
        }
        groups
    }

    /// Build the pie data for a dropdown selection.
    ///
    /// * `All` - successful launches per site, one slice per site of the
    ///   dataset in first-appearance order (sites without a success get 0).
    /// * `Site` - success and failure counts for that site. A class with no
    ///   rows counts as 0; a site absent from the data is `UnknownSite`.
    pub fn aggregate(&self, selector: &SiteSelector) -> Result<SiteBreakdown, AggregationError> {
        let groups = self.group_counts();
        let count = |site: &str, class: OutcomeClass| -> usize {
            groups.get(&(site.to_string(), class)).copied().unwrap_or(0)
        };

        match selector {
            SiteSelector::All => {
                let slices = self
                    .dataset
                    .site_names()
                    .iter()
                    .map(|site| SliceCount::new(site, count(site, OutcomeClass::Success)))
                    .collect();

                Ok(SiteBreakdown {
                    title: "Total success launches by site".to_string(),
                    slices,
                })
            }
            SiteSelector::Site(site) => {
                if !self.dataset.has_site(site) {
                    return Err(AggregationError::UnknownSite(site.clone()));
                }

                let slices = [OutcomeClass::Success, OutcomeClass::Failure]
                    .iter()
                    .map(|class| SliceCount::new(class.label(), count(site, *class)))
                    .collect();

                Ok(SiteBreakdown {
                    title: format!("Total success launches for site {}", site),
                    slices,
                })
            }
        }
    }
}

// ============================================================================
// PAYLOAD RANGE
// ============================================================================

/// Whether the range ends are part of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeBounds {
    /// low <= mass <= high, so slider ends are included
    #[default]
    Inclusive,
    /// low < mass < high
    Exclusive,
}

/// Validated payload window in kilograms (low <= high)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self, AggregationError> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(AggregationError::InvalidRange { low, high });
        }
        Ok(PayloadRange { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, mass: f64, bounds: RangeBounds) -> bool {
        match bounds {
            RangeBounds::Inclusive => self.low <= mass && mass <= self.high,
            RangeBounds::Exclusive => self.low < mass && mass < self.high,
        }
    }
}

// ============================================================================
// PAYLOAD SCATTER FILTER (scatter chart)
// ============================================================================

/// One plotted launch: x = payload, y = class, colour = booster category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub class: OutcomeClass,
    pub booster_version_category: String,
    pub launch_site: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
}

impl From<&LaunchRecord> for ScatterPoint {
    fn from(record: &LaunchRecord) -> Self {
        ScatterPoint {
            payload_mass_kg: record.payload_mass_kg,
            class: record.class,
            booster_version_category: record.booster_version_category.clone(),
            launch_site: record.launch_site.clone(),
            flight_number: record.flight_number,
            booster_version: record.booster_version.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSelection {
    pub title: String,
    pub points: Vec<ScatterPoint>,
    /// Distinct booster categories among `points`, first-appearance order
    pub categories: Vec<String>,
}

/// Filters launches by payload window, then by site
#[derive(Debug, Clone)]
pub struct PayloadScatterFilter {
    dataset: Dataset,
    bounds: RangeBounds,
}

impl PayloadScatterFilter {
    pub fn new(dataset: Dataset, bounds: RangeBounds) -> Self {
        PayloadScatterFilter { dataset, bounds }
    }

    pub fn bounds(&self) -> RangeBounds {
        self.bounds
    }

    /// Records whose payload lies in `range`
    pub fn in_range<'a>(&'a self, range: &PayloadRange) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
        let range = *range;
        let bounds = self.bounds;
        self.dataset
            .records()
            .iter()
            .filter(move |record| range.contains(record.payload_mass_kg, bounds))
    }

    /// Range filter first, then the site filter on the range-filtered set
    pub fn filter(
        &self,
        selector: &SiteSelector,
        range: &PayloadRange,
    ) -> Result<ScatterSelection, AggregationError> {
        if let SiteSelector::Site(site) = selector {
            if !self.dataset.has_site(site) {
                return Err(AggregationError::UnknownSite(site.clone()));
            }
        }

        let points: Vec<ScatterPoint> = self
            .in_range(range)
            .filter(|record| selector.matches(&record.launch_site))
            .map(ScatterPoint::from)
            .collect();

        let mut categories: Vec<String> = Vec::new();
        for point in &points {
            if !categories.contains(&point.booster_version_category) {
                categories.push(point.booster_version_category.clone());
            }
        }

        let title = match selector {
            SiteSelector::All => "Correlation between payload and success for all sites".to_string(),
            SiteSelector::Site(site) => format!("Correlation between payload and success for site {}", site),
        };

        Ok(ScatterSelection {
            title,
            points,
            categories,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
