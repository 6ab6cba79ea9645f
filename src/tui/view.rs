//! Pure rendering: map App state to ratatui widgets.
//!
//! `render` lays the frame out with `compute_layout`, draws each part,
//! and returns the regions it used so the event loop can hit-test
//! pointer events against exactly what is on screen. The only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Gauge, Paragraph};
use ratatui::Frame;

use crate::types::{format_number, Band, Icon, THEME_OPTIONS};

use super::layout::{compute_layout, Regions};
use super::state::{App, DisplayState, MenuItem};
use super::theme::{Palette, STYLE_CURSOR, STYLE_NUMBER};

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the widget to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) -> Regions {
    let state = &app.state;
    let palette = app.scope.palette();
    let regions = compute_layout(frame.area(), state);

    frame.render_widget(
        Block::new().style(Style::new().bg(palette.background)),
        regions.area,
    );

    let card = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(palette.border_style())
        .style(palette.surface_style());
    frame.render_widget(card, regions.card);

    render_number(state.number, palette, frame, regions.number);

    if let (Some(bar), Some(label)) = (regions.gauge, regions.gauge_label) {
        render_gauge(state.number, palette, frame, bar, label);
    }

    render_controls(state, palette, frame, &regions);
    render_help(palette, frame, regions.help);

    if regions.menu.is_some() {
        render_menu(state, palette, frame, &regions);
    }

    regions
}

// ============================================================================
// NUMBER
// ============================================================================

/// 3x5 bitmaps for the digits, `#` filled.
const DIGIT_FONT: [[&str; 5]; 10] = [
    ["###", "#.#", "#.#", "#.#", "###"],
    [".#.", "##.", ".#.", ".#.", "###"],
    ["###", "..#", "###", "#..", "###"],
    ["###", "..#", "###", "..#", "###"],
    ["#.#", "#.#", "###", "..#", "..#"],
    ["###", "#..", "###", "..#", "###"],
    ["###", "#..", "###", "#.#", "###"],
    ["###", "..#", "..#", "..#", "..#"],
    ["###", "#.#", "###", "#.#", "###"],
    ["###", "#.#", "###", "..#", "###"],
];

/// Expand digit text into five rows of block glyphs.
///
/// Each bitmap pixel is two cells wide; digits are separated by two spaces.
/// Non-digit characters are skipped.
pub fn big_digit_rows(text: &str) -> [String; 5] {
    let mut rows: [String; 5] = Default::default();
    let digits: Vec<usize> = text
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as usize)
        .collect();

    for (i, digit) in digits.iter().enumerate() {
        for (r, row) in rows.iter_mut().enumerate() {
            if i > 0 {
                row.push_str("  ");
            }
            for pixel in DIGIT_FONT[*digit][r].chars() {
                row.push_str(if pixel == '#' { "██" } else { "  " });
            }
        }
    }
    rows
}

fn render_number(number: u8, palette: &Palette, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let style = STYLE_NUMBER.fg(palette.band(Band::of(number)));
    let lines: Vec<Line> = big_digit_rows(&format_number(number))
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

// ============================================================================
// GAUGE
// ============================================================================

fn render_gauge(number: u8, palette: &Palette, frame: &mut Frame, bar: Rect, label: Rect) {
    if !bar.is_empty() {
        let gauge = Gauge::default()
            .gauge_style(
                Style::new()
                    .fg(palette.band(Band::of(number)))
                    .bg(palette.gauge_track),
            )
            .percent(u16::from(number.min(99)))
            .label("")
            .use_unicode(true);
        frame.render_widget(gauge, bar);
    }
    if !label.is_empty() {
        let text = Paragraph::new(Span::styled(
            format!("{}%", number),
            palette.secondary_style(),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(text, label);
    }
}

// ============================================================================
// CONTROLS
// ============================================================================

fn play_icon(is_running: bool) -> Icon {
    if is_running { Icon::Pause } else { Icon::Play }
}

fn render_button(icon: Icon, style: Style, palette: &Palette, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let button = Paragraph::new(Line::from(icon.glyph()))
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(palette.border_style()),
        );
    frame.render_widget(button, area);
}

fn render_controls(state: &DisplayState, palette: &Palette, frame: &mut Frame, regions: &Regions) {
    render_button(
        play_icon(state.is_running),
        palette.accent_style(),
        palette,
        frame,
        regions.play,
    );
    render_button(Icon::Dice, palette.surface_style(), palette, frame, regions.generate);
    render_button(Icon::Menu, palette.surface_style(), palette, frame, regions.menu_button);
}

fn render_help(palette: &Palette, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let help = Paragraph::new(Span::styled(
        "[space] play/pause  [g] generate  [m] menu  [q] quit",
        palette.secondary_style(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

// ============================================================================
// MENU
// ============================================================================

/// Label and icon of the gauge item for the current visibility.
pub fn gauge_item_label(show_gauge: bool) -> (Icon, &'static str) {
    if show_gauge {
        (Icon::EyeOff, "Hide Progress")
    } else {
        (Icon::Eye, "Show Progress")
    }
}

fn item_line(icon: Icon, label: &str, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {} ", icon.glyph()), style),
        Span::styled(label.to_string(), style),
    ])
    .style(style)
}

fn render_menu(state: &DisplayState, palette: &Palette, frame: &mut Frame, regions: &Regions) {
    let Some(menu) = regions.menu else {
        return;
    };
    if menu.is_empty() {
        return;
    }

    frame.render_widget(Clear, menu);
    frame.render_widget(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(palette.border_style())
            .style(palette.surface_style()),
        menu,
    );

    let cursor = state.menu.cursor();
    for (index, (item, area)) in regions.menu_items.iter().enumerate() {
        if area.is_empty() {
            continue;
        }
        let (icon, label, mut style) = match item {
            MenuItem::ToggleGauge => {
                let (icon, label) = gauge_item_label(state.show_gauge);
                (icon, label, palette.surface_style())
            }
            MenuItem::Theme(theme) => {
                let Some(option) = THEME_OPTIONS.iter().find(|o| o.key == *theme) else {
                    continue;
                };
                let style = if *theme == state.theme {
                    palette.accent_style()
                } else {
                    palette.surface_style()
                };
                (option.icon, option.label, style)
            }
        };
        if cursor == Some(index) {
            style = style.patch(STYLE_CURSOR);
        }
        frame.render_widget(Paragraph::new(item_line(icon, label, style)), *area);
    }

    if let Some(divider) = regions.divider {
        if !divider.is_empty() {
            let rule = "─".repeat(usize::from(divider.width));
            frame.render_widget(
                Paragraph::new(Span::styled(rule, palette.border_style())),
                divider,
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
