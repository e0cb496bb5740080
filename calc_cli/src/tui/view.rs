//! Drawing the keypad screen.

use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use super::app::App;
use super::buttons::{Button, LAYOUT};

const KEYPAD_WIDTH: u16 = 44;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let [keypad_area, side_area] =
        Layout::horizontal([Constraint::Length(KEYPAD_WIDTH), Constraint::Min(20)]).areas(frame.area());
    app.keypad_area = keypad_area;

    let focused = app.is_focused(Instant::now());
    draw_keypad(frame, app, keypad_area, focused);

    let [history_area, help_area] =
        Layout::vertical([Constraint::Min(5), Constraint::Length(8)]).areas(side_area);
    draw_history(frame, app, history_area);
    draw_help(frame, app, help_area, focused);
}

fn draw_keypad(frame: &mut Frame, app: &mut App, area: Rect, focused: bool) {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::bordered()
        .title(" Calculator ")
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [display_area, grid_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(7)]).areas(inner);

    let pending = app.keypad.pending_expression().unwrap_or_default();
    let display = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(app.keypad.angle_mode().label(), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(pending, Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            app.keypad.display().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Right)
    .block(Block::bordered());
    frame.render_widget(display, display_area);

    app.button_areas.clear();
    let rows = Layout::vertical([Constraint::Fill(1); 7]).split(grid_area);
    for (row, buttons) in rows.iter().zip(LAYOUT.iter()) {
        let cells = Layout::horizontal([Constraint::Fill(1); 5]).spacing(1).split(*row);
        for (cell, button) in cells.iter().zip(buttons.iter()) {
            let label = Paragraph::new(button.label(&app.keypad))
                .alignment(Alignment::Center)
                .style(button_style(button));
            // Center the label vertically when rows are taller than one line
            let [label_area] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(*cell);
            frame.render_widget(Paragraph::new("").style(button_style(button)), *cell);
            frame.render_widget(label, label_area);
            app.button_areas.push((*cell, *button));
        }
    }
}

fn button_style(button: &Button) -> Style {
    match button {
        Button::Digit(_) | Button::Decimal => Style::default().bg(Color::Gray).fg(Color::Black),
        Button::Equals => Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        Button::Operation(_) => Style::default().bg(Color::LightBlue).fg(Color::Black),
        Button::Clear | Button::Backspace => Style::default().bg(Color::LightRed).fg(Color::Black),
        _ => Style::default().bg(Color::DarkGray).fg(Color::White),
    }
}

fn draw_history(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .history
        .iter()
        .rev()
        .map(|entry| ListItem::new(entry.as_str()))
        .collect();
    let list = List::new(items).block(Block::bordered().title(" History "));
    frame.render_widget(list, area);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect, focused: bool) {
    let focus = if focused {
        Span::styled("focused", Style::default().fg(Color::Green))
    } else {
        Span::styled("not focused (click the keypad)", Style::default().fg(Color::Red))
    };
    let mut lines = vec![
        Line::from(vec![Span::raw("Keypad: "), focus]),
        Line::from("0-9 . + - * /   Enter/= equals   Esc/c clear"),
        Line::from("Shift+S/C/T sin cos tan   F2 angle   Backspace"),
        Line::from("Ctrl+Q quit"),
    ];
    if !app.status.is_empty() {
        lines.push(Line::from(Span::styled(
            app.status.as_str(),
            Style::default().fg(Color::Yellow),
        )));
    }
    let help = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Keys "));
    frame.render_widget(help, area);
}
