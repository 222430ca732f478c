use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::data::Sample;

/// Mean value of one unit for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint {
    pub unit_id: String,
    pub value: f64,
}

impl AggregatedPoint {
    #[must_use]
    pub fn new(unit_id: impl Into<String>, value: f64) -> Self {
        Self {
            unit_id: unit_id.into(),
            value,
        }
    }
}

/// One value per distinct unit, ordered by unit id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub parameter: String,
    /// First unit of measure seen for the parameter in input order.
    pub unit_of_measure: Option<String>,
    pub points: Vec<AggregatedPoint>,
}

impl AggregatedSeries {
    #[must_use]
    pub fn empty(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            unit_of_measure: None,
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Expands the series back into one sample per unit.
    #[must_use]
    pub fn to_samples(&self) -> Vec<Sample> {
        self.points
            .iter()
            .map(|point| Sample {
                unit_id: point.unit_id.clone(),
                parameter: self.parameter.clone(),
                value: point.value,
                unit_of_measure: self.unit_of_measure.clone(),
            })
            .collect()
    }
}

/// Collapses repeated (unit, parameter) observations into their mean.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesAggregator;

impl SeriesAggregator {
    /// Aggregates the samples of `parameter`; samples of other parameters are ignored.
    ///
    /// Each group's values are sorted before summation, so any permutation of
    /// the same input yields a bit-identical series.
    #[must_use]
    pub fn aggregate<'a>(
        &self,
        parameter: &str,
        samples: impl IntoIterator<Item = &'a Sample>,
    ) -> AggregatedSeries {
        let mut unit_of_measure = None;
        let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for sample in samples {
            if sample.parameter != parameter {
                continue;
            }
            if unit_of_measure.is_none() {
                unit_of_measure.clone_from(&sample.unit_of_measure);
            }
            groups.entry(sample.unit_id.as_str()).or_default().push(sample.value);
        }

        let points = groups
            .into_iter()
            .map(|(unit_id, mut values)| {
                values.sort_by(f64::total_cmp);
                AggregatedPoint::new(unit_id, finite_mean(&values))
            })
            .collect::<Vec<_>>();
        trace!(parameter, units = points.len(), "aggregated series");

        AggregatedSeries {
            parameter: parameter.to_owned(),
            unit_of_measure,
            points,
        }
    }

    /// Aggregates every parameter present, keyed in first-seen order.
    #[must_use]
    pub fn aggregate_by_parameter(&self, samples: &[Sample]) -> IndexMap<String, AggregatedSeries> {
        let mut parameters: IndexMap<&str, Vec<&Sample>> = IndexMap::new();
        for sample in samples {
            parameters.entry(sample.parameter.as_str()).or_default().push(sample);
        }

        parameters
            .into_iter()
            .map(|(parameter, group)| (parameter.to_owned(), self.aggregate(parameter, group)))
            .collect()
    }
}

/// Mean of finite values that stays finite when the plain sum would overflow.
fn finite_mean(values: &[f64]) -> f64 {
    let count = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return sum / count;
    }
    values.iter().map(|value| value / count).sum()
}

#[cfg(test)]
mod tests {
    use super::{AggregatedPoint, SeriesAggregator};
    use crate::data::Sample;

    #[test]
    fn duplicates_collapse_to_their_mean() {
        let samples = vec![
            Sample::new("P2", "A", 4.0),
            Sample::new("P1", "A", 10.0),
            Sample::new("P1", "A", 12.0),
            Sample::new("P1", "B", 99.0),
        ];
        let series = SeriesAggregator.aggregate("A", &samples);
        assert_eq!(
            series.points,
            vec![AggregatedPoint::new("P1", 11.0), AggregatedPoint::new("P2", 4.0)]
        );
    }

    #[test]
    fn mean_of_huge_readings_stays_finite() {
        let samples = vec![
            Sample::new("U1", "A", 1e308),
            Sample::new("U1", "A", 1e308),
            Sample::new("U2", "A", -f64::MAX),
            Sample::new("U2", "A", -f64::MAX),
        ];
        let series = SeriesAggregator.aggregate("A", &samples);
        assert_eq!(
            series.points,
            vec![AggregatedPoint::new("U1", 1e308), AggregatedPoint::new("U2", -f64::MAX)]
        );
        assert!(series.points.iter().all(|point| point.value.is_finite()));
    }

    #[test]
    fn first_seen_unit_of_measure_wins() {
        let samples = vec![
            Sample::new("P1", "A", 1.0),
            Sample::new("P1", "A", 2.0).with_unit_of_measure("bar"),
            Sample::new("P2", "A", 3.0).with_unit_of_measure("psi"),
        ];
        let series = SeriesAggregator.aggregate("A", &samples);
        assert_eq!(series.unit_of_measure.as_deref(), Some("bar"));
    }

    #[test]
    fn no_samples_yield_an_empty_series() {
        let series = SeriesAggregator.aggregate("A", &Vec::<Sample>::new());
        assert!(series.is_empty());
        assert_eq!(series.parameter, "A");
    }
}
