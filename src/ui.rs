use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Palette;
use crate::view::{Body, CharCell, CharClass, View};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &View {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.theme.palette();
        let base = Style::default().fg(palette.text).bg(palette.background);
        Block::default().style(base).render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(1),    // body
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_header(self, &palette, chunks[0], buf);

        match &self.body {
            Body::Home {
                selected,
                durations,
            } => {
                let bold = Style::default().add_modifier(Modifier::BOLD);
                let options = Itertools::intersperse(
                    durations.iter().map(|d| {
                        if d == selected {
                            Span::styled(
                                format!("[{d}]"),
                                bold.fg(palette.primary).add_modifier(Modifier::UNDERLINED),
                            )
                        } else {
                            Span::styled(format!(" {d} "), Style::default().fg(palette.muted))
                        }
                    }),
                    Span::raw("   "),
                )
                .collect::<Vec<Span>>();

                let lines = vec![
                    Line::styled("Check Your Typing Speed", bold),
                    Line::styled(
                        "Improve your typing skills with real-time feedback",
                        Style::default().fg(palette.muted),
                    ),
                    Line::raw(""),
                    Line::styled("Select Time", Style::default().fg(palette.muted)),
                    Line::from(options),
                    Line::raw(""),
                    Line::styled("Press Enter to start", bold.fg(palette.primary)),
                ];
                render_centered(lines, chunks[1], buf);
            }
            Body::Typing {
                cells,
                time_left,
                wpm,
                accuracy,
                progress,
            } => render_typing(
                cells,
                (*time_left, *wpm, *accuracy, *progress),
                &palette,
                chunks[1],
                buf,
            ),
            Body::Result {
                wpm,
                accuracy,
                errors,
            } => {
                let bold = Style::default().add_modifier(Modifier::BOLD);
                let lines = vec![
                    Line::styled("Test Completed!", bold),
                    Line::raw(""),
                    Line::from(vec![
                        Span::styled(format!("{wpm}"), bold.fg(palette.primary)),
                        Span::styled(" WPM", Style::default().fg(palette.muted)),
                        Span::raw("     "),
                        Span::styled(format!("{accuracy}%"), bold.fg(palette.correct)),
                        Span::styled(" Accuracy", Style::default().fg(palette.muted)),
                    ]),
                    Line::raw(""),
                    Line::from(vec![
                        Span::styled(format!("{errors}"), bold.fg(palette.incorrect)),
                        Span::styled(" Total Errors", Style::default().fg(palette.muted)),
                    ]),
                ];
                render_centered(lines, chunks[1], buf);
            }
            Body::History { records } => {
                let mut lines = vec![
                    Line::styled(
                        "Your Score History",
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Line::raw(""),
                ];
                if records.is_empty() {
                    lines.push(Line::styled(
                        "No history yet. Take a test!",
                        Style::default().fg(palette.muted),
                    ));
                } else {
                    lines.extend(records.iter().map(|r| {
                        Line::from(vec![
                            Span::styled(
                                format!("{:<12} ({:>3}s)", r.date, r.duration_secs),
                                Style::default().fg(palette.muted),
                            ),
                            Span::raw("   "),
                            Span::styled(
                                format!("{:>4} WPM", r.words_per_minute),
                                Style::default()
                                    .fg(palette.primary)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::raw("   "),
                            Span::styled(
                                format!("{:>3}% Acc", r.accuracy_percent),
                                Style::default().fg(palette.correct),
                            ),
                        ])
                    }));
                }
                render_centered(lines, chunks[1], buf);
            }
        }

        let legend = Paragraph::new(Span::styled(
            legend_for(&self.body).iter().join(" / "),
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        legend.render(chunks[2], buf);
    }
}

fn render_header(view: &View, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    Paragraph::new(Span::styled(
        "TypeSpeed",
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD),
    ))
    .render(halves[0], buf);

    let history_label = if view.history_open {
        "(tab) Close History"
    } else {
        "(tab) History"
    };
    Paragraph::new(Span::styled(
        format!("{history_label}   (^t) {}", view.theme.toggle_label()),
        Style::default().fg(palette.muted),
    ))
    .alignment(Alignment::Right)
    .render(halves[1], buf);
}

fn render_typing(
    cells: &[CharCell],
    (time_left, wpm, accuracy, progress): (u64, u32, u32, f64),
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let text: String = cells.iter().map(|c| c.ch).collect();
    let max_chars_per_line = area.width.max(1) as usize;
    let prompt_lines = (text.width().div_ceil(max_chars_per_line).max(1) + 1) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // stats
            Constraint::Length(1), // padding
            Constraint::Length(1), // progress
            Constraint::Length(1), // padding
            Constraint::Length(prompt_lines),
            Constraint::Min(0),
        ])
        .split(area);

    let stats = Line::from(vec![
        Span::styled(format!("{time_left}"), bold.fg(palette.primary)),
        Span::styled(" Seconds", Style::default().fg(palette.muted)),
        Span::raw("     "),
        Span::styled(format!("{wpm}"), bold.fg(palette.primary)),
        Span::styled(" WPM", Style::default().fg(palette.muted)),
        Span::raw("     "),
        Span::styled(format!("{accuracy}%"), bold.fg(palette.primary)),
        Span::styled(" Accuracy", Style::default().fg(palette.muted)),
    ]);
    Paragraph::new(stats)
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Gauge::default()
        .ratio(progress.clamp(0.0, 1.0))
        .label("")
        .gauge_style(Style::default().fg(palette.primary).bg(palette.background))
        .render(chunks[2], buf);

    let spans = cells
        .iter()
        .map(|cell| match cell.class {
            CharClass::Correct => Span::styled(cell.ch.to_string(), bold.fg(palette.correct)),
            CharClass::Incorrect => Span::styled(
                match cell.ch {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                bold.fg(palette.incorrect),
            ),
            CharClass::Cursor => Span::styled(
                cell.ch.to_string(),
                bold.fg(palette.text).add_modifier(Modifier::UNDERLINED),
            ),
            CharClass::Unvisited => Span::styled(cell.ch.to_string(), Style::default().fg(palette.muted)),
        })
        .collect::<Vec<Span>>();

    Paragraph::new(Line::from(spans))
        .alignment(if prompt_lines <= 2 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: false })
        .render(chunks[4], buf);
}

fn render_centered(lines: Vec<Line<'_>>, area: Rect, buf: &mut Buffer) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.height.saturating_sub(height) / 2;
    let inner = Rect {
        y: area.y + top,
        height,
        ..area
    };
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

fn legend_for(body: &Body) -> &'static [&'static str] {
    match body {
        Body::Home { .. } => &["(1/2/3) time", "(enter) start", "(h)istory", "(t)heme", "(esc)ape"],
        Body::Typing { .. } => &["(esc) end early", "(tab) history"],
        Body::Result { .. } => &["(r)etry", "(b)ack home", "(h)istory", "(t)heme", "(q)uit"],
        Body::History { .. } => &["(esc) close"],
    }
}
