use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::ViewportState;

const ELLIPSIS: char = '…';

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= u32::from(state.viewport_h) || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = f64::from(area.height);
    let thumb_h = ((f64::from(state.viewport_h) / f64::from(state.content_h)) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = f64::from(
        state
            .content_h
            .saturating_sub(u32::from(state.viewport_h))
            .max(1),
    );
    let thumb_top = ((f64::from(state.y) / max_y) * (track_h - f64::from(thumb_h)))
        .round()
        .clamp(0.0, (track_h - f64::from(thumb_h)).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Flattens cell text to a single line: tabs and newlines become spaces, other control
/// characters are dropped.
pub fn single_line(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            '\t' | '\n' | '\r' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Cuts `input` to at most `max_cols` display columns, ending in `…` when anything was cut.
/// A wide char that would straddle the limit is dropped whole.
pub fn truncate_to_width(input: &str, max_cols: u16) -> String {
    let max_cols = usize::from(max_cols);
    if max_cols == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(input) <= max_cols {
        return input.to_string();
    }

    let budget = max_cols - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Draws `input` at `(x, y)` into at most `max_cols` columns, truncating with an ellipsis.
/// Returns the number of columns written.
pub fn render_str_truncated(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }
    let text = truncate_to_width(&single_line(input), max_cols);
    let (end_x, _) = buf.set_stringn(x, y, &text, usize::from(max_cols), style);
    end_x.saturating_sub(x)
}

/// Returns the substring covering display columns `[start_col, start_col + max_cols)`.
///
/// Tabs count as four columns; wide chars partially outside the range are skipped.
pub fn slice_by_cols(input: &str, start_col: u32, max_cols: u16) -> String {
    if max_cols == 0 {
        return String::new();
    }

    let start_col = start_col as usize;
    let max_cols = usize::from(max_cols);
    let input = if input.contains('\t') {
        std::borrow::Cow::Owned(input.replace('\t', "    "))
    } else {
        std::borrow::Cow::Borrowed(input)
    };

    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut out = String::new();

    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if col < start_col {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }
        out.push(ch);
        col += w;
        out_cols += w;
    }

    out
}

/// Reads one buffer row back as text, trailing spaces removed. Used by snapshot tests.
pub fn buffer_line(buf: &Buffer, y: u16) -> String {
    let area = buf.area;
    let mut out = String::new();
    for x in area.x..area.x + area.width {
        if let Some(cell) = buf.cell((x, y)) {
            out.push_str(cell.symbol());
        }
    }
    out.trim_end().to_string()
}
