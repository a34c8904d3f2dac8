// Dashboard Layout - widget description served to the page
// The page builds its dropdown and slider from this instead of hard-coding sites

use crate::aggregation::ALL_SITES;
use crate::config::SliderConfig;
use crate::dataset::Dataset;
use serde::Serialize;

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: String,
    pub site_dropdown: SiteDropdown,
    pub payload_slider: PayloadSlider,
    /// Smallest and largest payload present in the data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_payload: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteDropdown {
    pub placeholder: String,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
    /// Initial selection, the full range
    pub value: [f64; 2],
}

impl PayloadSlider {
    /// Marks at the ends and quarter points
    pub fn from_config(config: &SliderConfig) -> Self {
        let span = config.max - config.min;
        let marks = (0..=4)
            .map(|i| config.min + span * i as f64 / 4.0)
            .collect();

        PayloadSlider {
            min: config.min,
            max: config.max,
            step: config.step,
            marks,
            value: [config.min, config.max],
        }
    }
}

/// Describe the dashboard widgets for this dataset
pub fn build_layout(dataset: &Dataset, slider: &SliderConfig) -> DashboardLayout {
    let mut options = vec![DropdownOption {
        label: "All Sites".to_string(),
        value: ALL_SITES.to_string(),
    }];
    options.extend(dataset.site_names().iter().map(|site| DropdownOption {
        label: site.clone(),
        value: site.clone(),
    }));

    let observed_payload = match (dataset.min_payload(), dataset.max_payload()) {
        (Some(lo), Some(hi)) => Some([lo, hi]),
        _ => None,
    };

    DashboardLayout {
        title: DASHBOARD_TITLE.to_string(),
        site_dropdown: SiteDropdown {
            placeholder: "Select a Launch Site here".to_string(),
            options,
            value: ALL_SITES.to_string(),
            searchable: true,
        },
        payload_slider: PayloadSlider::from_config(slider),
        observed_payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{LaunchRecord, OutcomeClass};

    #[test]
    fn test_dropdown_lists_all_then_each_site() {
        let dataset = Dataset::from_records(
            vec![
                LaunchRecord::new("CCAFS LC-40", 0.0, "v1.0", OutcomeClass::Failure),
                LaunchRecord::new("VAFB SLC-4E", 500.0, "v1.1", OutcomeClass::Success),
                LaunchRecord::new("CCAFS LC-40", 677.0, "v1.0", OutcomeClass::Success),
            ],
            "fixture",
        );
        let layout = build_layout(&dataset, &SliderConfig::default());

        let values: Vec<&str> = layout
            .site_dropdown
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["ALL", "CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(layout.site_dropdown.options[0].label, "All Sites");
        assert_eq!(layout.site_dropdown.value, "ALL");
        assert_eq!(layout.observed_payload, Some([0.0, 677.0]));
        assert_eq!(layout.title, DASHBOARD_TITLE);
    }

    #[test]
    fn test_default_slider() {
        let slider = PayloadSlider::from_config(&SliderConfig::default());

        assert_eq!(slider.min, 0.0);
        assert_eq!(slider.max, 10000.0);
        assert_eq!(slider.step, 1000.0);
        assert_eq!(slider.marks, vec![0.0, 2500.0, 5000.0, 7500.0, 10000.0]);
        assert_eq!(slider.value, [0.0, 10000.0]);
    }

    #[test]
    fn test_empty_dataset_has_no_observed_payload() {
        let layout = build_layout(&Dataset::from_records(vec![], "empty"), &SliderConfig::default());

        assert_eq!(layout.site_dropdown.options.len(), 1);
        assert_eq!(layout.observed_payload, None);
    }
}
