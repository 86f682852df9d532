//! Property tests for the missing-value flagger.

use iris_pipeline::dataset::{is_missing, Table};
use iris_pipeline::preprocessing::{
    FittedTransformer, MissingFlagger, PreprocessingError, StatelessTransformer, Transformer,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn cell() -> impl Strategy<Value = f64> {
    prop_oneof![1 => Just(f64::NAN), 3 => -100.0f64..100.0]
}

fn table() -> impl Strategy<Value = Table> {
    (2usize..=4, 0usize..20).prop_flat_map(|(n_cols, n_rows)| {
        prop::collection::vec(prop::collection::vec(cell(), n_cols), n_rows).prop_map(
            move |rows| {
                let names: Vec<String> = (0..n_cols).map(|i| format!("c{}", i)).collect();
                Table::from_rows(&names, &rows).unwrap()
            },
        )
    })
}

fn same_values(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x == y || (is_missing(*x) && is_missing(*y)))
}

fn same_table(a: &Table, b: &Table) -> bool {
    a.column_names() == b.column_names()
        && a
            .columns()
            .iter()
            .zip(b.columns())
            .all(|(x, y)| same_values(x.values(), y.values()))
}

fn flag(data: &Table, column: &str) -> Table {
    MissingFlagger::new(column).fit_transform(data).unwrap()
}

proptest! {
    #[test]
    fn adds_one_column_and_keeps_rows(data in table(), pick in any::<Index>()) {
        let column = format!("c{}", pick.index(data.n_columns()));
        let flagged = flag(&data, &column);

        prop_assert_eq!(flagged.n_rows(), data.n_rows());
        prop_assert_eq!(flagged.n_columns(), data.n_columns() + 1);
    }

    #[test]
    fn indicator_marks_exactly_the_missing_cells(data in table(), pick in any::<Index>()) {
        let column = format!("c{}", pick.index(data.n_columns()));
        let flagged = flag(&data, &column);

        let source = data.column(&column).unwrap();
        let indicator = flagged.column(&format!("{}_missing", column)).unwrap();
        for (value, marker) in source.iter().zip(indicator) {
            let expected = if value.is_nan() { 1.0 } else { 0.0 };
            prop_assert_eq!(*marker, expected);
        }
    }

    #[test]
    fn original_columns_pass_through(data in table(), pick in any::<Index>()) {
        let column = format!("c{}", pick.index(data.n_columns()));
        let flagged = flag(&data, &column);

        for col in data.columns() {
            prop_assert!(same_values(col.values(), flagged.column(col.name()).unwrap()));
        }
    }

    #[test]
    fn input_is_not_mutated(data in table(), pick in any::<Index>()) {
        let before = data.clone();
        let column = format!("c{}", pick.index(data.n_columns()));

        let fitted = MissingFlagger::new(column.as_str()).fit(&data).unwrap();
        let _ = fitted.transform(&data).unwrap();
        let _ = MissingFlagger::new(column.as_str()).transform_direct(&data).unwrap();

        prop_assert!(same_table(&before, &data));
    }

    #[test]
    fn flaggers_commute(data in table(), first in any::<Index>(), offset in any::<Index>()) {
        let n = data.n_columns();
        let a = first.index(n);
        let b = (a + 1 + offset.index(n - 1)) % n;
        let (a, b) = (format!("c{}", a), format!("c{}", b));

        let ab = flag(&flag(&data, &a), &b);
        let ba = flag(&flag(&data, &b), &a);

        let mut names_ab = ab.column_names();
        let mut names_ba = ba.column_names();
        names_ab.sort();
        names_ba.sort();
        prop_assert_eq!(&names_ab, &names_ba);

        for name in &names_ab {
            prop_assert!(same_values(ab.column(name).unwrap(), ba.column(name).unwrap()));
        }
    }

    #[test]
    fn unknown_column_is_rejected(data in table()) {
        let flagger = MissingFlagger::new("not_a_column");
        let is_not_found = |r: Result<Table, PreprocessingError>| {
            matches!(r, Err(PreprocessingError::ColumnNotFound { ref column }) if column == "not_a_column")
        };

        prop_assert!(matches!(
            flagger.fit(&data),
            Err(PreprocessingError::ColumnNotFound { .. })
        ), "fit on an unknown column should return ColumnNotFound");
        prop_assert!(is_not_found(flagger.transform_direct(&data)));
    }
}

#[test]
fn flags_sepal_length_in_two_row_table() {
    let data = Table::from_rows(
        &["sl", "sw"],
        &[vec![f64::NAN, f64::NAN], vec![4.9, 3.0]],
    )
    .unwrap();

    let flagged = flag(&data, "sl");

    assert_eq!(flagged.column_names(), vec!["sl", "sw", "sl_missing"]);
    let first = flagged.row(0).unwrap();
    assert!(first[0].is_nan() && first[1].is_nan());
    assert_eq!(first[2], 1.0);
    assert_eq!(flagged.row(1).unwrap(), vec![4.9, 3.0, 0.0]);
}

#[test]
fn flagging_twice_reports_duplicate_indicator() {
    let data = Table::from_rows(&["sl"], &[vec![1.0]]).unwrap();
    let once = flag(&data, "sl");
    let result = MissingFlagger::new("sl").fit_transform(&once);
    assert!(matches!(
        result,
        Err(PreprocessingError::DuplicateColumn { ref column }) if column == "sl_missing"
    ));
}
