use procchart::data::{LimitRow, LimitTable, Sample, SeriesAggregator};
use procchart::layout::{LaneLayout, LaneOrderSource, resolve_parameter_order};

fn fixture() -> (LimitTable, Vec<Sample>) {
    let limits = LimitTable::from_rows([
        LimitRow::new(0, "Voltage", 1.0, 2.0),
        LimitRow::new(1, "Pressure", 8.0, 11.0),
        LimitRow::new(2, "Temp", 20.0, 30.0),
    ]);
    let samples = vec![
        Sample::new("P2", "Pressure", 9.0),
        Sample::new("P1", "Flow", 3.0),
        Sample::new("P3", "Voltage", 1.5),
        Sample::new("P1", "Voltage", 2.5),
    ];
    (limits, samples)
}

#[test]
fn order_sources_resolve_as_documented() {
    let (limits, samples) = fixture();
    let series = SeriesAggregator.aggregate_by_parameter(&samples);

    assert_eq!(
        resolve_parameter_order(&LaneOrderSource::LimitTable, &limits, &series),
        vec!["Voltage", "Pressure", "Temp"]
    );
    assert_eq!(
        resolve_parameter_order(&LaneOrderSource::LimitTableThenData, &limits, &series),
        vec!["Voltage", "Pressure", "Temp", "Flow"]
    );
    assert_eq!(
        resolve_parameter_order(
            &LaneOrderSource::Explicit(vec![
                "Flow".to_owned(),
                " ".to_owned(),
                "Voltage".to_owned(),
                "Flow".to_owned(),
            ]),
            &limits,
            &series,
        ),
        vec!["Flow", "Voltage"]
    );
}

#[test]
fn every_listed_parameter_gets_a_lane_with_or_without_data() {
    let (limits, samples) = fixture();
    let series = SeriesAggregator.aggregate_by_parameter(&samples);
    let order = resolve_parameter_order(&LaneOrderSource::LimitTableThenData, &limits, &series);
    let layout = LaneLayout::new(order.clone(), &series);
    let lanes = layout.build_lanes(&series, &limits);

    assert_eq!(lanes.len(), order.len());
    assert_eq!(layout.lane_count(), order.len());
    for (index, lane) in lanes.iter().enumerate() {
        assert_eq!(lane.index, index);
        assert_eq!(lane.parameter, order[index]);
    }

    let temp = &lanes[2];
    assert!(!temp.has_data());
    assert!(temp.is_constrained());

    let flow = &lanes[3];
    assert!(flow.has_data());
    assert!(!flow.is_constrained());
}

#[test]
fn unit_axis_is_the_sorted_union_across_lanes() {
    let (_, samples) = fixture();
    let series = SeriesAggregator.aggregate_by_parameter(&samples);
    let layout = LaneLayout::new(vec!["Pressure".to_owned()], &series);

    assert_eq!(layout.units().units(), ["P1", "P2", "P3"]);
    assert_eq!(layout.units().position("P3"), Some(2));
    assert_eq!(layout.lane_index("Pressure"), Some(0));
    assert_eq!(layout.lane_index("Voltage"), None);
}
