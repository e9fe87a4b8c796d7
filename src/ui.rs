//! UI rendering for the terminal interface.
//!
//! Everything here is presentation: the browser table, the inline waveform
//! pane, the progress gauge and the properties popup. The waveform renderer
//! receives an amplitude sequence plus a [`PlotStyle`] hint and draws cells;
//! it never decodes anything itself.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::Line,
    widgets::{
        Axis, Block, Borders, Chart, Clear, Dataset, Gauge, GraphType, Padding, Paragraph, Row,
        Sparkline, Table, TableState, Wrap,
    },
};

use crate::app::App;
use crate::config::{PlayerSettings, UiSettings};
use crate::library::{EntryKind, format_mode, format_mtime, humanize_size};
use crate::player::{Session, TransportState};
use crate::wave::Waveform;

/// How the waveform should be plotted: `Full` with axes for inspection in
/// the properties popup, `Neat` for the compact inline pane.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlotStyle {
    Full,
    Neat,
}

/// Render the whole screen.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    session: &Session,
    ui_settings: &UiSettings,
    player_settings: &PlayerSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(ui_settings.waveform_rows.max(3)),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" beatpick ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_waveform_pane(frame, chunks[1], app);
    draw_progress(frame, chunks[2], session);
    draw_status(frame, chunks[3], app, session);
    draw_listing(frame, chunks[4], app);

    let footer = Paragraph::new(controls_text(player_settings.seek_step_secs)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(footer, chunks[5]);

    if let Some(props) = &app.properties {
        draw_properties_popup(frame, chunks[4], props);
    }
}

fn controls_text(seek_step_secs: u64) -> String {
    [
        "[j/k] move".to_string(),
        "[enter] open".to_string(),
        "[space/p] play/pause".to_string(),
        "[n/l] next".to_string(),
        format!("[H/L] seek -/+{}s", seek_step_secs),
        "[gg/G] top/bottom".to_string(),
        "[i] properties".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn format_mmss(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn draw_waveform_pane(frame: &mut Frame, area: Rect, app: &App) {
    match &app.waveform {
        Some(waveform) => render_waveform(frame, area, waveform, PlotStyle::Neat),
        None => {
            let placeholder = Paragraph::new("No file loaded")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" waveform "));
            frame.render_widget(placeholder, area);
        }
    }
}

/// Draw an amplitude sequence. The `Neat` style is a borderless-content
/// sparkline; `Full` gets axes and bounds for inspection.
pub fn render_waveform(frame: &mut Frame, area: Rect, waveform: &Waveform, style: PlotStyle) {
    let samples = match waveform {
        Waveform::Renderable(samples) => samples,
        Waveform::NotRenderable(reason) => {
            // The original fallback label, with the reason tacked on.
            let placeholder = Paragraph::new(format!("No Viz ({reason})"))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" waveform "));
            frame.render_widget(placeholder, area);
            return;
        }
    };

    match style {
        PlotStyle::Neat => {
            let columns = area.width.saturating_sub(2).max(1) as usize;
            let peaks = peak_buckets(samples, columns);
            let sparkline = Sparkline::default()
                .block(Block::default().borders(Borders::ALL).title(" waveform "))
                .style(Style::default().fg(Color::LightRed))
                .data(peaks);
            frame.render_widget(sparkline, area);
        }
        PlotStyle::Full => {
            let columns = (area.width as usize * 2).max(1);
            let points: Vec<(f64, f64)> = mean_buckets(samples, columns)
                .into_iter()
                .enumerate()
                .map(|(i, amp)| (i as f64, amp))
                .collect();
            let peak = points
                .iter()
                .map(|(_, amp)| amp.abs())
                .fold(1.0_f64, f64::max);

            let dataset = Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::LightRed))
                .data(&points);
            let chart = Chart::new(vec![dataset])
                .block(Block::default().borders(Borders::ALL).title(" waveform "))
                .x_axis(
                    Axis::default()
                        .bounds([0.0, points.len().saturating_sub(1).max(1) as f64])
                        .labels(["0".to_string(), format!("{} frames", samples.len())]),
                )
                .y_axis(
                    Axis::default()
                        .bounds([-peak, peak])
                        .labels([format!("{:.0}", -peak), "0".to_string(), format!("{peak:.0}")]),
                );
            frame.render_widget(chart, area);
        }
    }
}

/// Peak absolute amplitude per bucket, for the sparkline.
fn peak_buckets(samples: &[i32], buckets: usize) -> Vec<u64> {
    if samples.is_empty() || buckets == 0 {
        return Vec::new();
    }
    let chunk = samples.len().div_ceil(buckets);
    samples
        .chunks(chunk)
        .map(|c| c.iter().map(|s| s.unsigned_abs() as u64).max().unwrap_or(0))
        .collect()
}

/// Mean amplitude per bucket, keeping sign, for the line chart.
fn mean_buckets(samples: &[i32], buckets: usize) -> Vec<f64> {
    if samples.is_empty() || buckets == 0 {
        return Vec::new();
    }
    let chunk = samples.len().div_ceil(buckets);
    samples
        .chunks(chunk)
        .map(|c| c.iter().map(|&s| s as f64).sum::<f64>() / c.len() as f64)
        .collect()
}

fn draw_progress(frame: &mut Frame, area: Rect, session: &Session) {
    let ratio = if session.duration_secs > 0.0 {
        (session.position_secs / session.duration_secs).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let label = format!(
        "{} / {}",
        format_mmss(session.position_secs),
        format_mmss(session.duration_secs)
    );
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::LightRed))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App, session: &Session) {
    let mut parts: Vec<String> = Vec::new();

    let state = match session.state {
        TransportState::Idle => "Idle",
        TransportState::Playing => "Playing",
        TransportState::Paused => "Paused",
    };
    parts.push(state.to_string());

    if let Some(path) = &session.current_path {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            parts.push(name.to_string());
        }
    }

    if let Some(codec) = &app.codec {
        parts.push(codec.clone());
    }

    parts.push(format!("Dir: {}", app.dir.display()));

    if let Some(notice) = &app.notice {
        parts.push(format!("!! {notice}"));
    }

    let status = Paragraph::new(parts.join(" • "))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" status ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

fn kind_marker(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "/",
        EntryKind::AudioFile => "♪",
        EntryKind::Other => " ",
    }
}

fn draw_listing(frame: &mut Frame, area: Rect, app: &App) {
    let rows: Vec<Row> = app
        .entries
        .iter()
        .map(|entry| {
            Row::new(vec![
                kind_marker(entry.kind).to_string(),
                entry.name.clone(),
                humanize_size(entry.size_bytes),
                format_mode(entry.mode_bits),
                format_mtime(entry.modified),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(24),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Name", "Size", "Mode", "Last Changed"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(" files "))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if app.has_entries() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_properties_popup(frame: &mut Frame, area: Rect, props: &crate::app::PropertiesView) {
    let popup = centered_rect_sized(76, 18, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(format!(" {} (i/esc closes) ", props.title)));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(9)])
        .split(inner);

    let details = Paragraph::new(props.details.as_str()).wrap(Wrap { trim: true });
    frame.render_widget(details, sections[0]);

    render_waveform(frame, sections[1], &props.waveform, PlotStyle::Full);
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}
