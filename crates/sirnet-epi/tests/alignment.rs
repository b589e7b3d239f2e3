use sirnet_core::{SirError, Status};
use sirnet_epi::{align, CompartmentSnapshot, OutputSeries, TimeColumn};

// Infected counts [1, 1, 3, 5, 2] at times [0, 1, 2, 3, 4] on ten nodes.
fn reference_series() -> OutputSeries {
    OutputSeries::from_snapshots(vec![
        CompartmentSnapshot::new(0.0, 9, 1, 0),
        CompartmentSnapshot::new(1.0, 9, 1, 0),
        CompartmentSnapshot::new(2.0, 7, 3, 0),
        CompartmentSnapshot::new(3.0, 5, 5, 0),
        CompartmentSnapshot::new(4.0, 5, 2, 3),
    ])
    .unwrap()
}

#[test]
fn threshold_zeroes_the_clock() {
    let aligned = align(&reference_series(), 3, Status::Infected, TimeColumn::Time).unwrap();
    assert_eq!(aligned.offset(), 2.0);
    assert_eq!(aligned.adjusted_times(), &[-2.0, -1.0, 0.0, 1.0, 2.0]);
    assert_eq!(aligned.series(), &reference_series());
    assert_eq!(aligned.len(), 5);
}

#[test]
fn zero_threshold_keeps_raw_times() {
    let aligned = align(&reference_series(), 0, Status::Infected, TimeColumn::Time).unwrap();
    assert_eq!(aligned.offset(), 0.0);
    assert_eq!(aligned.adjusted_times(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn other_compartments_can_drive_alignment() {
    let aligned = align(&reference_series(), 1, Status::Recovered, TimeColumn::Time).unwrap();
    assert_eq!(aligned.offset(), 4.0);
    let aligned = align(&reference_series(), 5, Status::Susceptible, TimeColumn::Time).unwrap();
    assert_eq!(aligned.offset(), 0.0);
}

#[test]
fn unreachable_threshold_fails() {
    let err = align(&reference_series(), 6, Status::Infected, TimeColumn::Time).unwrap_err();
    match err {
        SirError::ThresholdNeverReached(info) => {
            assert_eq!(info.context.get("max_observed"), Some(&"5".to_string()));
            assert_eq!(info.context.get("threshold"), Some(&"6".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn aligned_series_can_be_realigned_on_adjusted_time() {
    let first = align(&reference_series(), 3, Status::Infected, TimeColumn::Time).unwrap();
    let second = align(&first, 5, Status::Infected, TimeColumn::Adjusted).unwrap();
    assert_eq!(second.offset(), 1.0);
    assert_eq!(second.adjusted_times(), &[-3.0, -2.0, -1.0, 0.0, 1.0]);

    let from_raw = align(&first, 5, Status::Infected, TimeColumn::Time).unwrap();
    assert_eq!(from_raw.adjusted_times(), &[-3.0, -2.0, -1.0, 0.0, 1.0]);
    assert_eq!(from_raw.offset(), 3.0);
}

#[test]
fn plain_series_has_no_adjusted_column() {
    let err = align(&reference_series(), 1, Status::Infected, TimeColumn::Adjusted).unwrap_err();
    assert!(matches!(err, SirError::InvalidConfiguration(_)));
    assert_eq!(err.info().code, "missing-time-column");
}

#[test]
fn rows_pair_snapshots_with_adjusted_time() {
    let aligned = align(&reference_series(), 5, Status::Infected, TimeColumn::Time).unwrap();
    let rows: Vec<_> = aligned
        .rows()
        .map(|(row, adjusted)| (row.infected, adjusted))
        .collect();
    assert_eq!(rows, vec![(1, -3.0), (1, -2.0), (3, -1.0), (5, 0.0), (2, 1.0)]);
    assert_eq!(aligned.into_series().len(), 5);
}

#[test]
fn malformed_series_is_rejected() {
    let late_start = OutputSeries::from_snapshots(vec![CompartmentSnapshot::new(1.0, 1, 1, 0)]);
    assert_eq!(late_start.unwrap_err().info().code, "series-start");

    let leaky = OutputSeries::from_snapshots(vec![
        CompartmentSnapshot::new(0.0, 1, 1, 0),
        CompartmentSnapshot::new(1.0, 1, 0, 0),
    ]);
    assert_eq!(leaky.unwrap_err().info().code, "series-conservation");

    let backwards = OutputSeries::from_snapshots(vec![
        CompartmentSnapshot::new(0.0, 1, 1, 0),
        CompartmentSnapshot::new(2.0, 0, 2, 0),
        CompartmentSnapshot::new(1.0, 0, 1, 1),
    ]);
    assert_eq!(backwards.unwrap_err().info().code, "series-order");

    assert_eq!(
        OutputSeries::from_snapshots(Vec::new()).unwrap_err().info().code,
        "empty-series"
    );
}
