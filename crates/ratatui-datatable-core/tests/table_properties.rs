use ratatui_datatable_core::column::Column;
use ratatui_datatable_core::error::TableError;
use ratatui_datatable_core::filter::FilterEngine;
use ratatui_datatable_core::record::Row;
use ratatui_datatable_core::sort::NullsPlacement;
use ratatui_datatable_core::sort::SortDirection;
use ratatui_datatable_core::sort::SortEngine;
use ratatui_datatable_core::sort::SortSpec;
use ratatui_datatable_core::table::DataTable;
use ratatui_datatable_core::table::RenderedTable;
use ratatui_datatable_core::table::SortIndicator;
use ratatui_datatable_core::table::TableOptions;
use ratatui_datatable_core::value::Value;
use std::collections::BTreeMap;

fn people() -> Vec<Row> {
    vec![
        Row::new().with("id", 1).with("name", "Bob"),
        Row::new().with("id", 2).with("name", "Amy"),
        Row::new().with("id", 3).with("name", "Amy"),
    ]
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID"),
        Column::new("name", "Name"),
        Column::new("status", "Status").sortable(false),
    ]
}

fn table() -> DataTable {
    DataTable::new(columns(), TableOptions::default()).expect("valid columns")
}

fn ids(out: &RenderedTable) -> Vec<String> {
    out.body.iter().map(|r| r.cells[0].display.clone()).collect()
}

/// Rows with many duplicate keys; `seq` records the input position.
fn duplicate_heavy(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let group: Value = match i % 4 {
                0 => Value::Null,
                1 => "b".into(),
                2 => "a".into(),
                _ => Value::Int((i % 3) as i64),
            };
            Row::new().with("seq", i as i64).with("group", group)
        })
        .collect()
}

fn seq_of(row: &Row) -> i64 {
    match row.get("seq") {
        Some(Value::Int(i)) => *i,
        other => panic!("unexpected seq {other:?}"),
    }
}

#[test]
fn scenario_sort_ascending_is_stable() {
    let mut t = table();
    assert!(t.on_header_activate("name"));
    let out = t.render(&people());
    assert_eq!(ids(&out), vec!["2", "3", "1"]);
    assert_eq!(out.header[1].sort_indicator, SortIndicator::Asc);
}

#[test]
fn scenario_three_clicks_restore_insertion_order() {
    let mut t = table();
    for _ in 0..3 {
        t.on_header_activate("name");
    }
    assert_eq!(t.sort_state(), None);
    let out = t.render(&people());
    let names: Vec<&str> = out.body.iter().map(|r| r.cells[1].display.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Amy", "Amy"]);
}

#[test]
fn scenario_filter_is_case_insensitive_substring() {
    let mut t = table();
    t.on_filter_input("am");
    let out = t.render(&people());
    assert_eq!(out.row_count(), 2);
    assert!(!out.is_empty);

    t.on_filter_input("AM");
    assert_eq!(t.render(&people()).row_count(), 2);
    assert_eq!(t.filter_text(), "AM");
}

#[test]
fn scenario_no_match_sets_empty_flag() {
    let mut t = table();
    t.on_filter_input("xyz");
    let out = t.render(&people());
    assert_eq!(out.row_count(), 0);
    assert!(out.is_empty);
    assert_eq!(out.empty_text, "No data available");
}

#[test]
fn scenario_unsortable_column_is_a_no_op() {
    let mut t = table();
    t.on_header_activate("name");
    let before = t.sort_state().cloned();
    assert!(!t.on_header_activate("status"));
    assert_eq!(t.sort_state().cloned(), before);
}

#[test]
fn scenario_missing_field_sorts_last() {
    let mut rows = people();
    rows.push(Row::new().with("id", 4));
    let mut t = table();
    t.on_header_activate("name");
    assert_eq!(ids(&t.render(&rows)), vec!["2", "3", "1", "4"]);
    t.on_header_activate("name");
    assert_eq!(ids(&t.render(&rows)), vec!["1", "2", "3", "4"]);
}

#[test]
fn nulls_first_holds_in_both_directions() {
    let mut rows = people();
    rows.push(Row::new().with("id", 4).with("name", Value::Null));
    let mut t = DataTable::new(
        columns(),
        TableOptions {
            nulls: NullsPlacement::First,
            ..Default::default()
        },
    )
    .expect("valid columns");
    t.on_header_activate("name");
    assert_eq!(ids(&t.render(&rows)), vec!["4", "2", "3", "1"]);
    t.on_header_activate("name");
    assert_eq!(ids(&t.render(&rows)), vec!["4", "1", "2", "3"]);
}

#[test]
fn sort_is_stable_in_both_directions() {
    let rows = duplicate_heavy(64);
    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let mut engine = SortEngine::new();
        engine.set_sort(Some(SortSpec {
            key: "group".into(),
            direction,
        }));
        let sorted = engine.sorted_view(&rows);
        assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.get("group") == b.get("group") {
                assert!(
                    seq_of(a) < seq_of(b),
                    "{direction:?}: equal keys out of input order"
                );
            }
        }
    }
}

#[test]
fn three_requests_cycle_back_on_one_key() {
    let col = Column::new("name", "Name");
    let starts = [
        None,
        Some(SortSpec::asc("name")),
        Some(SortSpec::desc("name")),
        Some(SortSpec::desc("other")),
    ];
    for start in starts {
        let mut engine = SortEngine::new();
        engine.set_sort(start.clone());
        let mut seen = Vec::new();
        for _ in 0..3 {
            engine.request_sort(&col);
            seen.push(engine.state().cloned());
        }
        // Period three on one key; from any other state the third request lands on unsorted.
        let expected = match &start {
            Some(s) if s.key == "name" => start.clone(),
            _ => None,
        };
        assert_eq!(seen[2], expected, "start {start:?}");
        assert!(seen.contains(&None));
    }
}

#[test]
fn switching_columns_starts_ascending() {
    let a = Column::new("a", "A");
    let b = Column::new("b", "B");
    for prior_clicks in 1..=2 {
        let mut engine = SortEngine::new();
        for _ in 0..prior_clicks {
            engine.request_sort(&a);
        }
        engine.request_sort(&b);
        assert_eq!(engine.state(), Some(&SortSpec::asc("b")));
    }
}

#[test]
fn longer_filter_yields_subset() {
    let rows = duplicate_heavy(40);
    let base = {
        let mut f = FilterEngine::new();
        f.set_filter_text("1");
        f.filtered_view(&rows)
    };
    assert!(base.len() <= rows.len());
    for suffix in ["0", "1", "9", "x"] {
        let mut f = FilterEngine::new();
        f.set_filter_text(format!("1{suffix}"));
        let narrow = f.filtered_view(&rows);
        assert!(narrow.len() <= base.len());
        for r in narrow {
            assert!(base.iter().any(|b| std::ptr::eq(*b, r)));
        }
    }
}

#[test]
fn render_is_pure_over_state() {
    let mut t = table();
    t.on_header_activate("name");
    t.on_filter_input("a");
    let rows = people();
    let first = t.render(&rows);
    let _ = t.sort_state();
    let _ = t.header();
    let _ = t.visible_indices(&rows);
    assert_eq!(t.render(&rows), first);
}

#[test]
fn filter_applies_after_sort() {
    let mut t = table();
    t.on_filter_input("amy");
    t.on_header_activate("id");
    t.on_header_activate("id");
    let out = t.render(&people());
    assert_eq!(ids(&out), vec!["3", "2"]);
    let sources: Vec<usize> = out.body.iter().map(|r| r.source_index).collect();
    assert_eq!(sources, vec![2, 1]);
}

#[test]
fn custom_renderer_shapes_display_only() {
    let cols = vec![
        Column::new("name", "Name"),
        Column::new("score", "Score").render(|v| match v.as_f64() {
            Some(f) => format!("{f:.2} pts"),
            None => "n/a".to_string(),
        }),
    ];
    let mut t = DataTable::new(cols, TableOptions::default()).expect("valid");
    let rows = vec![
        Row::new().with("name", "a").with("score", 2.5),
        Row::new().with("name", "b").with("score", 10),
        Row::new().with("name", "c"),
    ];
    t.on_header_activate("score");
    let out = t.render(&rows);
    let shown: Vec<&str> = out.body.iter().map(|r| r.cells[1].display.as_str()).collect();
    assert_eq!(shown, vec!["2.50 pts", "10.00 pts", "n/a"]);

    // Filtering looks at raw values, not rendered text.
    t.on_filter_input("pts");
    assert!(t.render(&rows).is_empty);
}

#[test]
fn works_over_plain_maps() {
    let rows: Vec<BTreeMap<String, Value>> = vec![
        BTreeMap::from([("n".to_string(), Value::from(3))]),
        BTreeMap::from([("n".to_string(), Value::from(1.5))]),
        BTreeMap::new(),
    ];
    let mut t = DataTable::new(vec![Column::new("n", "N")], TableOptions::default())
        .expect("valid");
    t.on_header_activate("n");
    let out = t.render(&rows);
    let shown: Vec<&str> = out.body.iter().map(|r| r.cells[0].display.as_str()).collect();
    assert_eq!(shown, vec!["1.5", "3", ""]);
}

#[test]
fn invalid_columns_fail_construction() {
    assert_eq!(
        DataTable::new(Vec::new(), TableOptions::default()).unwrap_err(),
        TableError::NoColumns
    );
    let dup = vec![Column::new("a", "A"), Column::new("a", "Again")];
    assert_eq!(
        DataTable::new(dup, TableOptions::default()).unwrap_err(),
        TableError::DuplicateKey { key: "a".into() }
    );
    let blank = vec![Column::new("", "Blank")];
    assert_eq!(
        DataTable::new(blank, TableOptions::default()).unwrap_err(),
        TableError::MissingKey { index: 0 }
    );
}

/// Scores from a fixed LCG: roughly a quarter NaN, the rest a mix of floats and ints.
fn scores_with_nan(n: usize) -> Vec<Row> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..n)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let r = state >> 33;
            let score = match r % 8 {
                0 | 1 => Value::Float(f64::NAN),
                2 => Value::Int((r % 1000) as i64 - 500),
                3 => Value::Int((1i64 << 53) + (r % 3) as i64),
                _ => Value::Float((r % 100_000) as f64 / 7.0 - 5000.0),
            };
            Row::new().with("seq", i as i64).with("score", score)
        })
        .collect()
}

#[test]
fn nan_scores_do_not_disturb_numeric_order() {
    let rows = scores_with_nan(800);
    let nan_count = rows
        .iter()
        .filter(|r| r.get("score").is_some_and(Value::is_nan))
        .count();
    assert!(nan_count > 100);

    for nulls in [NullsPlacement::Last, NullsPlacement::First] {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let mut engine = SortEngine::with_nulls(nulls);
            engine.set_sort(Some(SortSpec {
                key: "score".into(),
                direction,
            }));
            let sorted = engine.sorted_view(&rows);
            let scores: Vec<&Value> = sorted
                .iter()
                .map(|r| r.get("score").expect("score"))
                .collect();

            let (numbers, nans) = match nulls {
                NullsPlacement::Last => scores.split_at(scores.len() - nan_count),
                NullsPlacement::First => {
                    let (nans, numbers) = scores.split_at(nan_count);
                    (numbers, nans)
                }
            };
            assert!(nans.iter().all(|v| v.is_nan()), "{nulls:?} {direction:?}");
            for pair in numbers.windows(2) {
                let ord = pair[0].sort_cmp(pair[1]);
                let in_order = match direction {
                    SortDirection::Asc => ord.is_le(),
                    SortDirection::Desc => ord.is_ge(),
                };
                assert!(
                    in_order,
                    "{nulls:?} {direction:?}: {:?} before {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn large_ints_order_exactly_next_to_floats() {
    let big = 1i64 << 53;
    let rows = vec![
        Row::new().with("seq", 0).with("score", big + 1),
        Row::new().with("seq", 1).with("score", big as f64),
        Row::new().with("seq", 2).with("score", big - 1),
    ];
    let mut engine = SortEngine::new();
    engine.set_sort(Some(SortSpec::asc("score")));
    let order: Vec<i64> = engine.sorted_view(&rows).into_iter().map(seq_of).collect();
    assert_eq!(order, vec![2, 1, 0]);
}
