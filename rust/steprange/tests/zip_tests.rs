use steprange::{Container, DerivationLimits, NumberRange, Point, Range, Row, Value};

fn int(v: i64) -> Option<Value> {
    Some(Value::Int(v))
}

#[test]
fn test_zip_four_ranges_and_four_scalars() {
    let mut container = Container::new();
    container
        .add_number_range(-10, -1)
        .add_number_range(1, 10)
        .add_number_range(11, 20)
        .add_number_range(21, 30)
        .add_sources([
            Value::from(3612),
            Value::from(4323),
            Value::from("874342"),
            Value::from("test"),
        ]);
    container.zip();

    let expected = serde_json::json!([
        [-10, 1, 11, 21, 3612, 4323, "874342", "test"],
        [-9, 2, 12, 22, null, null, null, null],
        [-8, 3, 13, 23, null, null, null, null],
        [-7, 4, 14, 24, null, null, null, null],
        [-6, 5, 15, 25, null, null, null, null],
        [-5, 6, 16, 26, null, null, null, null],
        [-4, 7, 17, 27, null, null, null, null],
        [-3, 8, 18, 28, null, null, null, null],
        [-2, 9, 19, 29, null, null, null, null],
    ]);
    assert_eq!(container.to_json().unwrap(), expected);
}

#[test]
fn test_zip_row_invariants() {
    fastrand::seed(7);
    for _ in 0..50 {
        let mut container = Container::new();
        let mut lens = Vec::new();
        for _ in 0..fastrand::usize(1..8) {
            match fastrand::u8(0..3) {
                0 => {
                    let start = fastrand::i64(-20..20);
                    let end = fastrand::i64(-20..20);
                    lens.push(start.abs_diff(end) as usize);
                    container.add_number_range(start, end);
                }
                1 => {
                    let n = fastrand::usize(0..12);
                    lens.push(n);
                    container.add_iter((0..n as i64).map(|i| Some(Value::Int(i))));
                }
                _ => {
                    lens.push(1);
                    container.add_source(fastrand::i64(..));
                }
            }
        }
        let width = container.len();
        let rows: Vec<Row> = container.zip().value().unwrap().to_vec();
        assert_eq!(rows.len(), lens.iter().copied().max().unwrap_or(0));
        for (row_idx, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width);
            for (col, cell) in row.iter().enumerate() {
                if row_idx >= lens[col] {
                    assert!(cell.is_none());
                } else {
                    assert!(cell.is_some());
                }
            }
        }
    }
}

#[test]
fn test_zip_mixed_source_shapes() {
    let mut chain = Range::new();
    chain.append_stop("head").append_step(0).append_step(2);

    let mut container = Container::new();
    container
        .add_source(chain)
        .add_source(Point::stop(2).with_source(NumberRange::new(10, 0)))
        .add_source(vec![vec![1, 2], vec![3]])
        .add_iter(std::iter::repeat_n(None, 2));

    let rows = container.zip().value().unwrap();
    assert_eq!(
        rows,
        &[
            vec![
                Some(Value::from("head")),
                int(8),
                Some(Value::from(vec![1, 2])),
                None
            ],
            vec![int(0), None, Some(Value::from(vec![3])), None],
            vec![int(1), None, None, None],
        ]
    );
}

#[test]
fn test_try_zip_then_zip() {
    let mut container = Container::new().with_limits(DerivationLimits {
        max_run_len: 4,
        max_sequence_len: 4,
    });
    container.add_number_range(0, 10).add_source("x");
    assert!(container.try_zip().is_err());
    assert!(container.value().is_none());

    // The unchecked path ignores the limits.
    let rows = container.zip().value().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0], vec![int(0), Some(Value::from("x"))]);
}

#[test]
fn test_into_value() {
    let mut container = Container::new();
    container.add_sources([NumberRange::new(0, 2), NumberRange::new(2, 0)]);
    container.zip();
    let rows = container.into_value().unwrap();
    assert_eq!(rows, vec![vec![int(0), int(2)], vec![int(1), int(1)]]);
}
