use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use log::LevelFilter;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_datatable::column::Column;
use ratatui_datatable::crossterm_input::input_event_from_crossterm;
use ratatui_datatable::datatable::view::DataTableAction;
use ratatui_datatable::datatable::view::DataTableView;
use ratatui_datatable::help::HelpBar;
use ratatui_datatable::record::Row;
use ratatui_datatable::table::TableOptions;
use ratatui_datatable::theme::Theme;
use ratatui_datatable::value::Value;
use simplelog::Config;
use simplelog::WriteLogger;
use std::fs::File;
use std::io;
use std::time::Duration;

const NAMES: [&str; 8] = [
    "Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret", "Dennis", "Frances",
];
const STATUSES: [&str; 3] = ["active", "away", "offline"];

fn main() -> io::Result<()> {
    if let Ok(file) = File::create("datatable-example.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
    }

    let rows = sample_rows(500);
    let columns = vec![
        Column::new("id", "ID").width(6),
        Column::new("name", "Name").width(12),
        Column::new("status", "Status").width(10).sortable(false),
        Column::new("score", "Score").width(8).render(|v| match v {
            Value::Null => "-".to_string(),
            Value::Float(f) => format!("{f:.1}"),
            other => other.to_string(),
        }),
    ];
    let mut table = DataTableView::new(columns, TableOptions::default())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    let res = run(&mut terminal, &theme, &mut table, &rows);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn sample_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let score = if i % 7 == 0 {
                Value::Null
            } else {
                Value::Float(((i * 37) % 1000) as f64 / 10.0)
            };
            Row::new()
                .with("id", i as i64)
                .with("name", format!("{} {}", NAMES[i % NAMES.len()], i / NAMES.len()))
                .with("status", STATUSES[i % STATUSES.len()])
                .with("score", score)
        })
        .collect()
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    theme: &Theme,
    table: &mut DataTableView,
    rows: &[Row],
) -> io::Result<()> {
    let mut status = String::new();
    loop {
        let help = HelpBar::new(table.bindings_help());
        terminal.draw(|f| {
            let area = f.area();
            let block = Block::default()
                .title("DataTableView (q to quit)")
                .borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let buf = f.buffer_mut();
            let table_area = Rect::new(
                inner.x,
                inner.y,
                inner.width,
                inner.height.saturating_sub(2),
            );
            let status_area = Rect::new(inner.x, inner.y + table_area.height, inner.width, 1);
            let help_area = Rect::new(
                inner.x,
                (inner.y + table_area.height + 1).min(inner.y + inner.height.saturating_sub(1)),
                inner.width,
                inner.height.saturating_sub(table_area.height + 1).min(1),
            );

            table.render(table_area, buf, theme, rows);

            let pct = table.state.percent_y().unwrap_or(100);
            let line = format!(
                "{} of {} rows  {pct}%  {status}",
                table.visible_rows().len(),
                rows.len()
            );
            buf.set_span(
                status_area.x,
                status_area.y,
                &Span::styled(line, theme.text_muted),
                status_area.width,
            );
            help.render_ref(help_area, buf);
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev {
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('q')
                && !table.is_filter_focused()
            {
                return Ok(());
            }
        }
        let Some(ev) = input_event_from_crossterm(ev) else {
            continue;
        };
        match table.handle_event(ev, rows) {
            DataTableAction::Activated(i) => {
                let id = rows[i].get("id").map(Value::to_string).unwrap_or_default();
                status = format!("opened row {id}");
            }
            DataTableAction::SortChanged(Some(spec)) => {
                status = format!("sorted by {} {:?}", spec.key, spec.direction);
            }
            DataTableAction::SortChanged(None) => {
                status = "unsorted".to_string();
            }
            DataTableAction::FilterChanged(text) => {
                status = format!("filter {text:?}");
            }
            DataTableAction::Redraw | DataTableAction::None => {}
        }
    }
}
