use crate::column::Column;
use crate::error::Result;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::keymap;
use crate::keymap::Binding;
use crate::record::Record;
use crate::render;
use crate::sort::SortSpec;
use crate::table::DataTable;
use crate::table::SortIndicator;
use crate::table::TableOptions;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use virtualizer::Align;
use virtualizer::Virtualizer;
use virtualizer::VirtualizerOptions;

/// What the host should do after [`DataTableView::handle_event`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataTableAction {
    None,
    Redraw,
    SortChanged(Option<SortSpec>),
    FilterChanged(String),
    /// The cursor row was activated. Carries the row's index in the caller's slice.
    Activated(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TableCommand {
    FocusFilter,
    Sort,
    Activate,
    ClearFilter,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

/// Key bindings for [`DataTableView`].
///
/// While the filter line has focus, keys edit the filter instead: printable characters append,
/// `Backspace` deletes, `Enter`/`Tab` leave the filter and `Esc` clears it and leaves.
#[derive(Clone, Debug)]
pub struct DataTableBindings {
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub left: Vec<KeyEvent>,
    pub right: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
    pub sort: Vec<KeyEvent>,
    pub filter: Vec<KeyEvent>,
    pub activate: Vec<KeyEvent>,
    pub clear_filter: Vec<KeyEvent>,
}

impl Default for DataTableBindings {
    fn default() -> Self {
        Self {
            up: vec![keymap::key(KeyCode::Up), keymap::key_char('k')],
            down: vec![keymap::key(KeyCode::Down), keymap::key_char('j')],
            left: vec![keymap::key(KeyCode::Left), keymap::key_char('h')],
            right: vec![keymap::key(KeyCode::Right), keymap::key_char('l')],
            page_up: vec![keymap::key(KeyCode::PageUp), keymap::key_ctrl('u')],
            page_down: vec![keymap::key(KeyCode::PageDown), keymap::key_ctrl('d')],
            top: vec![keymap::key(KeyCode::Home), keymap::key_char('g')],
            bottom: vec![keymap::key(KeyCode::End), keymap::key_char('G')],
            sort: vec![keymap::key_char('s')],
            filter: vec![keymap::key_char('/')],
            activate: vec![keymap::key(KeyCode::Enter)],
            clear_filter: vec![keymap::key(KeyCode::Esc)],
        }
    }
}

impl DataTableBindings {
    fn command_for(&self, key: &KeyEvent) -> Option<TableCommand> {
        let table = [
            (&self.filter, TableCommand::FocusFilter),
            (&self.sort, TableCommand::Sort),
            (&self.activate, TableCommand::Activate),
            (&self.clear_filter, TableCommand::ClearFilter),
            (&self.up, TableCommand::Up),
            (&self.down, TableCommand::Down),
            (&self.left, TableCommand::Left),
            (&self.right, TableCommand::Right),
            (&self.page_up, TableCommand::PageUp),
            (&self.page_down, TableCommand::PageDown),
            (&self.top, TableCommand::Top),
            (&self.bottom, TableCommand::Bottom),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keymap::any_matches(keys, key))
            .map(|(_, cmd)| cmd)
    }

    /// Help entries for a [`crate::help::HelpBar`].
    pub fn help(&self, filterable: bool, sortable: bool) -> Vec<Binding> {
        let mut out = vec![
            Binding::new("↑/↓", "move", [self.up.clone(), self.down.clone()].concat()),
            Binding::new(
                "←/→",
                "column",
                [self.left.clone(), self.right.clone()].concat(),
            ),
        ];
        if sortable {
            out.push(Binding::new("s", "sort", self.sort.clone()));
        }
        if filterable {
            out.push(Binding::new("/", "filter", self.filter.clone()));
            out.push(Binding::new("esc", "clear filter", self.clear_filter.clone()));
        }
        out.push(Binding::new("enter", "open", self.activate.clone()));
        out
    }
}

/// Options for [`DataTableView`].
#[derive(Clone, Debug)]
pub struct DataTableViewOptions {
    pub show_header: bool,
    pub show_scrollbar_y: bool,
    pub overscan_rows: usize,
    pub col_gap: u16,
    pub style: Style,
    pub header_style: Style,
    pub focused_header_style: Style,
    pub grid_line_style: Style,
    pub scrollbar_style: Style,
    pub cursor_style: Style,
    pub filter_style: Style,
    pub indicator_asc: String,
    pub indicator_desc: String,
    pub filter_prompt: String,
    pub filter_placeholder: String,
}

impl Default for DataTableViewOptions {
    fn default() -> Self {
        Self {
            show_header: true,
            show_scrollbar_y: true,
            overscan_rows: 2,
            col_gap: 1,
            style: Style::default(),
            header_style: Style::default().add_modifier(Modifier::BOLD),
            focused_header_style: Style::default().add_modifier(Modifier::UNDERLINED),
            grid_line_style: Style::default(),
            scrollbar_style: Style::default(),
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            filter_style: Style::default(),
            indicator_asc: "▲".to_string(),
            indicator_desc: "▼".to_string(),
            filter_prompt: "/ ".to_string(),
            filter_placeholder: "filter".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct HitAreas {
    filter: Rect,
    header: Rect,
    body: Rect,
}

#[derive(Clone, Copy)]
struct BodyStyles {
    base: Style,
    cursor: Style,
    grid_line: Style,
}

/// A sortable, filterable table widget.
///
/// Rows stay owned by the caller and are passed to [`DataTableView::handle_event`] and
/// [`DataTableView::render`]; the widget only keeps the visible row order derived from them.
/// Body rows are virtualized, so only rows on screen are formatted.
///
/// Layout, top to bottom: filter line (only when the table is filterable), header, body. A left
/// click on a header cell sorts by that column.
pub struct DataTableView {
    pub state: ViewportState,
    table: DataTable,
    options: DataTableViewOptions,
    bindings: DataTableBindings,
    visible: Vec<usize>,
    cursor: Option<usize>,
    focused_col: usize,
    filter_focused: bool,
    row_v: Virtualizer,
    row_items: Vec<virtualizer::VirtualItem>,
    hit: HitAreas,
}

impl DataTableView {
    /// # Errors
    ///
    /// Fails when the column set is invalid.
    pub fn new(columns: Vec<Column>, table_options: TableOptions) -> Result<Self> {
        Ok(Self::from_table(DataTable::new(columns, table_options)?))
    }

    pub fn from_table(table: DataTable) -> Self {
        let options = DataTableViewOptions::default();
        let mut row_opts = VirtualizerOptions::new(0, |_| 1);
        row_opts.overscan = options.overscan_rows;
        Self {
            state: ViewportState::default(),
            table,
            options,
            bindings: DataTableBindings::default(),
            visible: Vec::new(),
            cursor: None,
            focused_col: 0,
            filter_focused: false,
            row_v: Virtualizer::new(row_opts),
            row_items: Vec::new(),
            hit: HitAreas::default(),
        }
    }

    pub fn with_options(mut self, options: DataTableViewOptions) -> Self {
        self.set_options(options);
        self
    }

    pub fn options(&self) -> &DataTableViewOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DataTableViewOptions) {
        self.options = options;
        self.row_v.set_overscan(self.options.overscan_rows);
        self.sync_content();
    }

    pub fn bindings(&self) -> &DataTableBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: DataTableBindings) {
        self.bindings = bindings;
    }

    pub fn bindings_help(&self) -> Vec<Binding> {
        let opts = self.table.options();
        self.bindings.help(opts.filterable, opts.sortable)
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// Direct access to the model, e.g. to restore a saved sort. Changes show up on the next
    /// `render`/`sync_rows`.
    pub fn table_mut(&mut self) -> &mut DataTable {
        &mut self.table
    }

    /// # Errors
    ///
    /// Fails when the column set is invalid; the widget is left unchanged.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        self.table.set_columns(columns)?;
        self.focused_col = self.focused_col.min(self.table.columns().len() - 1);
        self.sync_content();
        Ok(())
    }

    /// Source indices of the rows currently shown, in display order.
    pub fn visible_rows(&self) -> &[usize] {
        &self.visible
    }

    /// Position of the cursor within [`DataTableView::visible_rows`].
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Source index of the row under the cursor.
    pub fn cursor_row(&self) -> Option<usize> {
        self.cursor.and_then(|c| self.visible.get(c).copied())
    }

    pub fn focused_column(&self) -> usize {
        self.focused_col
    }

    pub fn is_filter_focused(&self) -> bool {
        self.filter_focused
    }

    /// Re-derives the visible rows. The cursor stays on the same source row when that row is
    /// still visible.
    pub fn sync_rows<R: Record>(&mut self, rows: &[R]) {
        let anchor = self.cursor_row();
        self.visible = self.table.visible_indices(rows);
        self.cursor = if self.visible.is_empty() {
            None
        } else {
            let last = self.visible.len() - 1;
            anchor
                .and_then(|src| self.visible.iter().position(|&i| i == src))
                .or_else(|| self.cursor.map(|c| c.min(last)))
                .or(Some(0))
        };
        self.row_v.set_count(self.visible.len());
        self.sync_content();
    }

    pub fn handle_event<R: Record>(&mut self, event: InputEvent, rows: &[R]) -> DataTableAction {
        self.sync_rows(rows);
        let action = match event {
            InputEvent::Key(key) if self.filter_focused => self.handle_filter_key(&key),
            InputEvent::Key(key) => self.handle_key(&key),
            InputEvent::Paste(text) => self.handle_paste(&text),
            InputEvent::Mouse(m) => self.handle_mouse(m),
        };
        if matches!(
            action,
            DataTableAction::SortChanged(_) | DataTableAction::FilterChanged(_)
        ) {
            self.sync_rows(rows);
            self.ensure_cursor_visible();
        }
        action
    }

    pub fn scroll_y_by(&mut self, delta: i32) {
        self.sync_virtualizer_from_state();
        self.state.scroll_y_by(delta);
        self.row_v.set_scroll_offset(u64::from(self.state.y));
        self.state.y = clamp_u32(self.row_v.scroll_offset());
    }

    pub fn ensure_cursor_visible(&mut self) {
        self.sync_virtualizer_from_state();
        if let Some(c) = self.cursor {
            self.row_v.scroll_to_index(c, Align::Auto);
            self.state.y = clamp_u32(self.row_v.scroll_offset());
        }
        if let Some((start, width)) = self.column_spans().get(self.focused_col).copied() {
            let view_w = u32::from(self.state.viewport_w);
            if start < self.state.x {
                self.state.x = start;
            } else if view_w > 0 && start + width > self.state.x + view_w {
                self.state.x = (start + width).saturating_sub(view_w);
            }
        }
        self.state.clamp();
    }

    pub fn render<R: Record>(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, rows: &[R]) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.sync_rows(rows);

        let filter_h = u16::from(self.table.options().filterable).min(area.height);
        let header_h = u16::from(self.options.show_header).min(area.height - filter_h);
        let body_h = area.height - filter_h - header_h;

        let filter_area = Rect::new(area.x, area.y, area.width, filter_h);
        let rest = Rect::new(area.x, area.y + filter_h, area.width, area.height - filter_h);
        let (content_area, scrollbar_x) = if self.options.show_scrollbar_y && rest.width >= 2 {
            (
                Rect::new(rest.x, rest.y, rest.width - 1, rest.height),
                Some(rest.x + rest.width - 1),
            )
        } else {
            (rest, None)
        };
        let header_area = Rect::new(content_area.x, content_area.y, content_area.width, header_h);
        let body_area = Rect::new(
            content_area.x,
            content_area.y + header_h,
            content_area.width,
            body_h,
        );

        let base_style = if self.options.style == Style::default() {
            theme.text_primary
        } else {
            self.options.style
        };
        let grid_line_style = if self.options.grid_line_style == Style::default() {
            theme.text_muted
        } else {
            self.options.grid_line_style
        };
        buf.set_style(area, base_style);

        self.state.set_viewport(body_area.width, body_area.height);
        self.sync_virtualizer_from_state();
        self.row_v.collect_virtual_items(&mut self.row_items);

        if filter_area.height > 0 {
            self.render_filter(filter_area, buf, theme);
        }
        if header_area.height > 0 {
            self.render_header(header_area, buf, theme, grid_line_style);
        }
        if self.visible.is_empty() {
            if body_area.height > 0 {
                render::render_str_truncated(
                    body_area.x,
                    body_area.y,
                    body_area.width,
                    buf,
                    &self.table.options().empty_text,
                    theme.text_muted,
                );
            }
        } else {
            self.render_body(
                body_area,
                buf,
                rows,
                BodyStyles {
                    base: base_style,
                    cursor: self.options.cursor_style.patch(theme.accent),
                    grid_line: grid_line_style,
                },
            );
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, body_area.y, 1, body_area.height),
                buf,
                &self.state,
                self.options.scrollbar_style,
            );
        }

        self.hit = HitAreas {
            filter: filter_area,
            header: header_area,
            body: body_area,
        };
    }

    fn handle_key(&mut self, key: &KeyEvent) -> DataTableAction {
        let Some(cmd) = self.bindings.command_for(key) else {
            return DataTableAction::None;
        };
        let page = i64::from(self.state.viewport_h.saturating_sub(1).max(1));
        match cmd {
            TableCommand::FocusFilter => {
                if !self.table.options().filterable {
                    return DataTableAction::None;
                }
                self.filter_focused = true;
                DataTableAction::Redraw
            }
            TableCommand::Sort => self.sort_column(self.focused_col),
            TableCommand::Activate => match self.cursor_row() {
                Some(src) => {
                    log::debug!("activated row {src}");
                    DataTableAction::Activated(src)
                }
                None => DataTableAction::None,
            },
            TableCommand::ClearFilter => self.set_filter(String::new()),
            TableCommand::Up => self.move_cursor_by(-1),
            TableCommand::Down => self.move_cursor_by(1),
            TableCommand::PageUp => self.move_cursor_by(-page),
            TableCommand::PageDown => self.move_cursor_by(page),
            TableCommand::Top => self.move_cursor_to(0),
            TableCommand::Bottom => self.move_cursor_to(self.visible.len().saturating_sub(1)),
            TableCommand::Left => self.focus_column_by(-1),
            TableCommand::Right => self.focus_column_by(1),
        }
    }

    fn handle_filter_key(&mut self, key: &KeyEvent) -> DataTableAction {
        match key.code {
            KeyCode::Esc => {
                self.filter_focused = false;
                match self.set_filter(String::new()) {
                    DataTableAction::None => DataTableAction::Redraw,
                    changed => changed,
                }
            }
            KeyCode::Enter | KeyCode::Tab => {
                self.filter_focused = false;
                DataTableAction::Redraw
            }
            KeyCode::Backspace => {
                let mut text = self.table.filter_text().to_string();
                if text.pop().is_none() {
                    return DataTableAction::None;
                }
                self.set_filter(text)
            }
            _ => match key.typed_char() {
                Some(c) => {
                    let mut text = self.table.filter_text().to_string();
                    text.push(c);
                    self.set_filter(text)
                }
                None => DataTableAction::None,
            },
        }
    }

    fn handle_paste(&mut self, pasted: &str) -> DataTableAction {
        if !self.filter_focused {
            return DataTableAction::None;
        }
        let mut text = self.table.filter_text().to_string();
        text.push_str(&render::single_line(pasted));
        self.set_filter(text)
    }

    fn handle_mouse(&mut self, m: MouseEvent) -> DataTableAction {
        match m.kind {
            MouseEventKind::ScrollUp => {
                self.scroll_y_by(-1);
                return DataTableAction::Redraw;
            }
            MouseEventKind::ScrollDown => {
                self.scroll_y_by(1);
                return DataTableAction::Redraw;
            }
            _ => {}
        }
        if !m.is_left_click() {
            return DataTableAction::None;
        }

        if contains(self.hit.filter, m.x, m.y) {
            self.filter_focused = true;
            return DataTableAction::Redraw;
        }
        if contains(self.hit.header, m.x, m.y) {
            self.filter_focused = false;
            let Some(col) = self.column_at(m.x) else {
                return DataTableAction::None;
            };
            self.focused_col = col;
            return match self.sort_column(col) {
                DataTableAction::None => DataTableAction::Redraw,
                changed => changed,
            };
        }
        if contains(self.hit.body, m.x, m.y) {
            self.filter_focused = false;
            let row = u64::from(m.y - self.hit.body.y) + u64::from(self.state.y);
            return match usize::try_from(row) {
                Ok(row) if row < self.visible.len() => self.move_cursor_to(row),
                _ => DataTableAction::None,
            };
        }
        DataTableAction::None
    }

    fn sort_column(&mut self, col: usize) -> DataTableAction {
        let Some(key) = self.table.columns().get(col).map(|c| c.key.clone()) else {
            return DataTableAction::None;
        };
        if self.table.on_header_activate(&key) {
            DataTableAction::SortChanged(self.table.sort_state().cloned())
        } else {
            DataTableAction::None
        }
    }

    fn set_filter(&mut self, text: String) -> DataTableAction {
        if self.table.on_filter_input(text) {
            DataTableAction::FilterChanged(self.table.filter_text().to_string())
        } else {
            DataTableAction::None
        }
    }

    fn move_cursor_by(&mut self, delta: i64) -> DataTableAction {
        if self.visible.is_empty() {
            return DataTableAction::None;
        }
        let cur = self.cursor.unwrap_or(0) as i64;
        let last = (self.visible.len() - 1) as i64;
        self.move_cursor_to((cur + delta).clamp(0, last) as usize)
    }

    fn move_cursor_to(&mut self, row: usize) -> DataTableAction {
        if self.visible.is_empty() {
            return DataTableAction::None;
        }
        let next = row.min(self.visible.len() - 1);
        if self.cursor == Some(next) {
            return DataTableAction::None;
        }
        self.cursor = Some(next);
        self.ensure_cursor_visible();
        DataTableAction::Redraw
    }

    fn focus_column_by(&mut self, delta: i64) -> DataTableAction {
        let last = self.table.columns().len().saturating_sub(1) as i64;
        let next = (self.focused_col as i64 + delta).clamp(0, last) as usize;
        if next == self.focused_col {
            return DataTableAction::None;
        }
        self.focused_col = next;
        self.ensure_cursor_visible();
        DataTableAction::Redraw
    }

    /// `(start, width)` of each column in content coordinates.
    fn column_spans(&self) -> Vec<(u32, u32)> {
        let gap = u32::from(self.options.col_gap);
        let mut x = 0u32;
        self.table
            .columns()
            .iter()
            .map(|c| {
                let span = (x, u32::from(c.width.max(1)));
                x = x + span.1 + gap;
                span
            })
            .collect()
    }

    fn content_width(&self) -> u32 {
        self.column_spans()
            .last()
            .map(|(start, width)| start + width)
            .unwrap_or(0)
    }

    fn column_at(&self, x: u16) -> Option<usize> {
        let rel = u32::from(x.checked_sub(self.hit.header.x)?) + self.state.x;
        self.column_spans()
            .iter()
            .position(|&(start, width)| rel >= start && rel < start + width)
    }

    fn sync_content(&mut self) {
        let total_h = clamp_u32(self.row_v.total_size());
        self.state.set_content(self.content_width(), total_h);
    }

    fn sync_virtualizer_from_state(&mut self) {
        self.row_v.set_count(self.visible.len());
        self.row_v.set_viewport_size(u32::from(self.state.viewport_h));
        self.row_v.set_scroll_offset(u64::from(self.state.y));
        self.state.y = clamp_u32(self.row_v.scroll_offset());
        self.row_v.set_overscan(self.options.overscan_rows);
        self.sync_content();
    }

    fn render_filter(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let prompt_style = if self.filter_focused {
            theme.accent
        } else {
            theme.text_muted
        };
        let text_style = if self.options.filter_style == Style::default() {
            theme.text_primary
        } else {
            self.options.filter_style
        };

        let mut x = area.x;
        let right = area.x + area.width;
        x += render::render_str_truncated(
            x,
            area.y,
            right - x,
            buf,
            &self.options.filter_prompt,
            prompt_style,
        );
        let text = self.table.filter_text();
        if !self.table.filter_engine().is_active() && !self.filter_focused {
            render::render_str_truncated(
                x,
                area.y,
                right.saturating_sub(x),
                buf,
                &self.options.filter_placeholder,
                theme.text_muted,
            );
            return;
        }
        x += render::render_str_truncated(
            x,
            area.y,
            right.saturating_sub(x),
            buf,
            text,
            text_style,
        );
        if self.filter_focused && x < right {
            buf.set_stringn(
                x,
                area.y,
                " ",
                1,
                text_style.add_modifier(Modifier::REVERSED),
            );
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, theme: &Theme, grid_line_style: Style) {
        let header_style = self.options.header_style.patch(theme.header);
        let focused_style = header_style.patch(self.options.focused_header_style);
        let indicator_style = header_style.patch(theme.sort_indicator);
        buf.set_style(area, header_style);

        let spans = self.column_spans();
        let scroll_x = self.state.x;
        for (i, (col, &(start, width))) in self.table.columns().iter().zip(&spans).enumerate() {
            let (rect, clip_left) = clipped_rect_x(area, scroll_x, start, width);
            if rect.width == 0 {
                continue;
            }
            let indicator = match self.table.sort_indicator(&col.key) {
                SortIndicator::None => None,
                SortIndicator::Asc => Some(self.options.indicator_asc.as_str()),
                SortIndicator::Desc => Some(self.options.indicator_desc.as_str()),
            };
            let label = match indicator {
                Some(ind) => format!("{} {ind}", col.header),
                None => col.header.clone(),
            };
            let style = if i == self.focused_col && !self.filter_focused {
                focused_style
            } else {
                header_style
            };
            draw_cell_text(rect, clip_left, width, buf, &label, style);
            if let Some(ind) = indicator {
                restyle_symbol(rect, buf, ind, indicator_style);
            }
            if i + 1 < spans.len() {
                draw_col_separator(area, buf, scroll_x, start + width, grid_line_style);
            }
        }
    }

    fn render_body<R: Record>(
        &self,
        area: Rect,
        buf: &mut Buffer,
        rows: &[R],
        styles: BodyStyles,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let spans = self.column_spans();
        let scroll_x = self.state.x;
        let scroll_y = self.row_v.scroll_offset();

        for row_item in self.row_items.iter().copied() {
            let (row_rect, _clip_top) = clipped_rect_y(area, scroll_y, row_item.start, row_item.size);
            if row_rect.height == 0 {
                continue;
            }
            let Some(&src) = self.visible.get(row_item.index) else {
                continue;
            };
            let Some(row) = rows.get(src) else {
                continue;
            };

            let style = if self.cursor == Some(row_item.index) {
                styles.cursor
            } else {
                styles.base
            };
            buf.set_style(row_rect, style);

            let rendered = self.table.render_row(src, row);
            for (i, (cell, &(start, width))) in rendered.cells.iter().zip(&spans).enumerate() {
                let (cell_rect, clip_left) = clipped_rect_x(row_rect, scroll_x, start, width);
                if cell_rect.width == 0 {
                    continue;
                }
                draw_cell_text(cell_rect, clip_left, width, buf, &cell.display, style);
                if i + 1 < spans.len() {
                    draw_col_separator(row_rect, buf, scroll_x, start + width, styles.grid_line);
                }
            }
        }
    }
}

fn clamp_u32(v: u64) -> u32 {
    v.min(u64::from(u32::MAX)) as u32
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

/// Draws a cell's text truncated to its column width, skipping `clip_left` columns that are
/// scrolled out on the left.
fn draw_cell_text(rect: Rect, clip_left: u32, col_width: u32, buf: &mut Buffer, text: &str, style: Style) {
    let col_width = u16::try_from(col_width).unwrap_or(u16::MAX);
    let text = render::truncate_to_width(&render::single_line(text), col_width);
    let visible = render::slice_by_cols(&text, clip_left, rect.width);
    buf.set_stringn(rect.x, rect.y, visible, usize::from(rect.width), style);
}

fn restyle_symbol(rect: Rect, buf: &mut Buffer, symbol: &str, style: Style) {
    for x in rect.x..rect.x + rect.width {
        if let Some(cell) = buf.cell_mut((x, rect.y)) {
            if cell.symbol() == symbol {
                cell.set_style(style);
            }
        }
    }
}

fn draw_col_separator(area: Rect, buf: &mut Buffer, scroll_x: u32, content_x: u32, style: Style) {
    let Some(rel) = content_x.checked_sub(scroll_x) else {
        return;
    };
    let Ok(rel) = u16::try_from(rel) else {
        return;
    };
    if rel >= area.width {
        return;
    }
    for dy in 0..area.height {
        buf.set_span(area.x + rel, area.y + dy, &Span::styled("│", style), 1);
    }
}

fn clipped_rect_x(area: Rect, scroll_x: u32, start: u32, size: u32) -> (Rect, u32) {
    let rel = i64::from(start) - i64::from(scroll_x);
    let clip_left = (-rel).max(0) as u32;
    let x = rel.clamp(0, i64::from(area.width)) as u16;
    let max_w = area.width.saturating_sub(x);
    let visible_w = size.saturating_sub(clip_left).min(u32::from(max_w)) as u16;
    (
        Rect::new(area.x + x, area.y, visible_w, area.height),
        clip_left,
    )
}

fn clipped_rect_y(area: Rect, scroll_y: u64, start: u64, size: u32) -> (Rect, u32) {
    let rel = start as i64 - scroll_y as i64;
    let clip_top = (-rel).max(0) as u32;
    let y = rel.clamp(0, i64::from(area.height)) as u16;
    let max_h = area.height.saturating_sub(y);
    let visible_h = size.saturating_sub(clip_top).min(u32::from(max_h)) as u16;
    (
        Rect::new(area.x, area.y + y, area.width, visible_h),
        clip_top,
    )
}
