use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_datatable_core::column::Column;
use ratatui_datatable_core::datatable::view::DataTableAction;
use ratatui_datatable_core::datatable::view::DataTableView;
use ratatui_datatable_core::datatable::view::DataTableViewOptions;
use ratatui_datatable_core::help::HelpBar;
use ratatui_datatable_core::input::InputEvent;
use ratatui_datatable_core::input::KeyCode;
use ratatui_datatable_core::input::KeyEvent;
use ratatui_datatable_core::input::MouseEvent;
use ratatui_datatable_core::record::Row;
use ratatui_datatable_core::render::buffer_line;
use ratatui_datatable_core::sort::SortSpec;
use ratatui_datatable_core::table::TableOptions;
use ratatui_datatable_core::theme::Theme;
use ratatui_datatable_core::value::Value;

fn rows() -> Vec<Row> {
    vec![
        Row::new().with("id", 1).with("name", "Bob").with("price", 9.5),
        Row::new().with("id", 2).with("name", "Amy").with("price", Value::Null),
        Row::new().with("id", 3).with("name", "Amy").with("price", 12),
    ]
}

fn view(options: TableOptions) -> DataTableView {
    DataTableView::new(
        vec![
            Column::new("id", "ID").width(3),
            Column::new("name", "Name").width(5),
            Column::new("price", "Price").width(7).render(|v| match v.as_f64() {
                Some(p) => format!("${p:.2}"),
                None => "-".to_string(),
            }),
        ],
        options,
    )
    .expect("valid columns")
    .with_options(DataTableViewOptions {
        show_scrollbar_y: false,
        ..Default::default()
    })
}

fn draw(v: &mut DataTableView, rows: &[Row], w: u16, h: u16) -> Vec<String> {
    let area = Rect::new(0, 0, w, h);
    let mut buf = Buffer::empty(area);
    v.render(area, &mut buf, &Theme::default(), rows);
    (0..h).map(|y| buffer_line(&buf, y)).collect()
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::Key(KeyEvent::new(code))
}

#[test]
fn renders_custom_cells_and_sort_indicator() {
    let rows = rows();
    let mut v = view(TableOptions::default());
    let lines = draw(&mut v, &rows, 20, 5);
    assert_eq!(lines[1], "ID │Name │Price");
    assert_eq!(lines[2], "1  │Bob  │$9.50");
    assert_eq!(lines[3], "2  │Amy  │-");

    // Click "Price" twice: descending, nulls still last.
    v.handle_event(InputEvent::Mouse(MouseEvent::left_click(10, 1)), &rows);
    let action = v.handle_event(InputEvent::Mouse(MouseEvent::left_click(10, 1)), &rows);
    assert_eq!(action, DataTableAction::SortChanged(Some(SortSpec::desc("price"))));
    let lines = draw(&mut v, &rows, 20, 5);
    assert_eq!(lines[1], "ID │Name │Price ▼");
    assert_eq!(lines[2], "3  │Amy  │$12.00");
    assert_eq!(lines[4], "2  │Amy  │-");
}

#[test]
fn narrow_columns_truncate_with_ellipsis() {
    let rows = vec![Row::new().with("id", 12345).with("name", "Bartholomew")];
    let mut v = view(TableOptions::default());
    let lines = draw(&mut v, &rows, 20, 3);
    assert_eq!(lines[2], "12…│Bart…│-");
}

#[test]
fn filter_round_trip_through_keys() {
    let rows = rows();
    let mut v = view(TableOptions::default());
    v.handle_event(key(KeyCode::Char('/')), &rows);
    v.handle_event(key(KeyCode::Char('b')), &rows);
    assert_eq!(v.visible_rows(), &[0]);
    assert_eq!(
        v.handle_event(key(KeyCode::Backspace), &rows),
        DataTableAction::FilterChanged(String::new())
    );
    assert_eq!(v.visible_rows(), &[0, 1, 2]);
    assert_eq!(v.handle_event(key(KeyCode::Enter), &rows), DataTableAction::Redraw);
    assert!(!v.is_filter_focused());
    assert_eq!(
        v.handle_event(key(KeyCode::Enter), &rows),
        DataTableAction::Activated(0)
    );
}

#[test]
fn custom_empty_text_is_shown() {
    let mut v = view(TableOptions {
        empty_text: "Nothing here".into(),
        ..Default::default()
    });
    let rows: Vec<Row> = Vec::new();
    let lines = draw(&mut v, &rows, 20, 4);
    assert_eq!(lines[2], "Nothing here");
    assert_eq!(v.handle_event(key(KeyCode::Enter), &rows), DataTableAction::None);
}

#[test]
fn help_reflects_table_flags() {
    let v = view(TableOptions {
        sortable: false,
        filterable: false,
        ..Default::default()
    });
    let help = HelpBar::new(v.bindings_help());
    let area = Rect::new(0, 0, 60, 1);
    let mut buf = Buffer::empty(area);
    help.render_ref(area, &mut buf);
    let line = buffer_line(&buf, 0);
    assert!(line.contains("move"));
    assert!(!line.contains("sort"));
    assert!(!line.contains("filter"));
}
