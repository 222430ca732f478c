use procchart::data::{
    AggregatedPoint, LimitRow, LimitTable, Sample, SeriesAggregator, SpecStatus, classify,
};

#[test]
fn aggregation_is_independent_of_row_order() {
    let forward = vec![
        Sample::new("U2", "Flow", 0.1),
        Sample::new("U1", "Flow", 0.2),
        Sample::new("U2", "Flow", 0.3),
        Sample::new("U2", "Flow", 1e16),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    let a = SeriesAggregator.aggregate("Flow", &forward);
    let b = SeriesAggregator.aggregate("Flow", &backward);
    assert_eq!(a, b);
    assert_eq!(
        a.points.iter().map(|p| p.unit_id.as_str()).collect::<Vec<_>>(),
        vec!["U1", "U2"]
    );
    assert_eq!(a.points[0].value.to_bits(), b.points[0].value.to_bits());
    assert_eq!(a.points[1].value.to_bits(), b.points[1].value.to_bits());
}

#[test]
fn units_sort_lexicographically_as_text() {
    let samples = vec![
        Sample::new("10", "A", 1.0),
        Sample::new("9", "A", 1.0),
        Sample::new("100", "A", 1.0),
    ];
    let series = SeriesAggregator.aggregate("A", &samples);
    assert_eq!(
        series
            .points
            .iter()
            .map(|p| p.unit_id.as_str())
            .collect::<Vec<_>>(),
        vec!["10", "100", "9"]
    );
}

#[test]
fn aggregating_an_aggregated_series_is_a_no_op() {
    let samples = vec![
        Sample::new("P1", "A", 10.0).with_unit_of_measure("mm"),
        Sample::new("P1", "A", 12.0).with_unit_of_measure("cm"),
        Sample::new("P3", "A", 7.5),
    ];
    let once = SeriesAggregator.aggregate("A", &samples);
    let twice = SeriesAggregator.aggregate("A", &once.to_samples());
    assert_eq!(once, twice);
    assert_eq!(once.unit_of_measure.as_deref(), Some("mm"));
    assert_eq!(once.points[0], AggregatedPoint::new("P1", 11.0));
}

#[test]
fn missing_parameter_yields_empty_series() {
    let series = SeriesAggregator.aggregate("Ghost", &[Sample::new("P1", "A", 1.0)]);
    assert!(series.is_empty());
    assert_eq!(series.parameter, "Ghost");
}

#[test]
fn classification_bounds_are_inclusive() {
    let limits = LimitTable::from_rows([LimitRow::new(0, "A", 8.0, 11.0)]);
    let samples = vec![
        Sample::new("U1", "A", 8.0),
        Sample::new("U2", "A", 11.0),
        Sample::new("U3", "A", 7.0),
        Sample::new("U4", "A", 12.0),
        Sample::new("U5", "A", 9.5),
    ];
    let series = SeriesAggregator.aggregate("A", &samples);
    let classified = classify(&series, limits.lookup("A"));

    let statuses: Vec<SpecStatus> = classified.samples.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![
            SpecStatus::InSpec,
            SpecStatus::InSpec,
            SpecStatus::OutOfSpec,
            SpecStatus::OutOfSpec,
            SpecStatus::InSpec,
        ]
    );
    assert_eq!(
        classified.out_of_spec_units().collect::<Vec<_>>(),
        vec!["U3", "U4"]
    );
    assert_eq!(classified.out_of_spec_count(), 2);
}

#[test]
fn unconstrained_series_never_reports_out_of_spec() {
    let series = SeriesAggregator.aggregate("B", &[Sample::new("U1", "B", -1e9)]);
    let classified = classify(&series, None);
    assert_eq!(classified.samples[0].status, SpecStatus::Unconstrained);
    assert_eq!(classified.out_of_spec_count(), 0);
    assert!(classified.limits.is_none());
}
