use serde::{Deserialize, Serialize};

use crate::data::{AggregatedSeries, ParameterLimits};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecStatus {
    InSpec,
    OutOfSpec,
    /// The parameter has no limits; nothing can be said about the sample.
    Unconstrained,
}

impl SpecStatus {
    #[must_use]
    pub fn for_value(value: f64, limits: Option<&ParameterLimits>) -> Self {
        match limits {
            None => Self::Unconstrained,
            Some(limits) if limits.contains(value) => Self::InSpec,
            Some(_) => Self::OutOfSpec,
        }
    }

    #[must_use]
    pub fn is_out_of_spec(self) -> bool {
        self == Self::OutOfSpec
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSample {
    pub unit_id: String,
    pub value: f64,
    pub status: SpecStatus,
}

/// Aggregated series of one parameter joined against its limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedSeries {
    pub parameter: String,
    pub unit_of_measure: Option<String>,
    pub limits: Option<ParameterLimits>,
    pub samples: Vec<ClassifiedSample>,
}

impl ClassifiedSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn out_of_spec_units(&self) -> impl Iterator<Item = &str> {
        self.samples
            .iter()
            .filter(|sample| sample.status.is_out_of_spec())
            .map(|sample| sample.unit_id.as_str())
    }

    #[must_use]
    pub fn out_of_spec_count(&self) -> usize {
        self.out_of_spec_units().count()
    }
}

/// Classifies every point against the closed interval `[lower, upper]`.
///
/// Missing limits never fail; every sample is then `Unconstrained`.
#[must_use]
pub fn classify(series: &AggregatedSeries, limits: Option<&ParameterLimits>) -> ClassifiedSeries {
    let samples = series
        .points
        .iter()
        .map(|point| ClassifiedSample {
            unit_id: point.unit_id.clone(),
            value: point.value,
            status: SpecStatus::for_value(point.value, limits),
        })
        .collect();

    ClassifiedSeries {
        parameter: series.parameter.clone(),
        unit_of_measure: series.unit_of_measure.clone(),
        limits: limits.cloned(),
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::{SpecStatus, classify};
    use crate::data::{AggregatedPoint, AggregatedSeries, ParameterLimits};

    fn series(values: &[(&str, f64)]) -> AggregatedSeries {
        AggregatedSeries {
            parameter: "A".to_owned(),
            unit_of_measure: None,
            points: values
                .iter()
                .map(|(unit, value)| AggregatedPoint::new(*unit, *value))
                .collect(),
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let limits = ParameterLimits::new("A", 8.0, 11.0).expect("limits");
        let classified = classify(
            &series(&[("P1", 8.0), ("P2", 11.0), ("P3", 7.0), ("P4", 12.0)]),
            Some(&limits),
        );
        let statuses: Vec<SpecStatus> = classified.samples.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            [
                SpecStatus::InSpec,
                SpecStatus::InSpec,
                SpecStatus::OutOfSpec,
                SpecStatus::OutOfSpec
            ]
        );
        assert_eq!(classified.out_of_spec_units().collect::<Vec<_>>(), ["P3", "P4"]);
    }

    #[test]
    fn missing_limits_classify_as_unconstrained() {
        let classified = classify(&series(&[("P1", 1.0e9)]), None);
        assert_eq!(classified.samples[0].status, SpecStatus::Unconstrained);
        assert_eq!(classified.out_of_spec_count(), 0);
        assert!(classified.limits.is_none());
    }
}
