use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::{App, PropertiesView};
use crate::config;
use crate::library::{self, Entry, EntryKind};
use crate::player::{Pipeline, PlaybackController, Poll, PollHandle, Toggle};
use crate::ui;
use crate::wave::{self, Waveform};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// The controller's current polling token. `None` means polling is off;
    /// the token is refreshed after every transport action and dropped when
    /// a poll reports cancellation.
    poll: Option<PollHandle>,
    last_poll: Instant,
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            poll: None,
            last_poll: Instant::now(),
            pending_gg: false,
        }
    }

    fn refresh_poll<P: Pipeline>(&mut self, controller: &PlaybackController<P>) {
        self.poll = controller.poll_handle();
    }
}

/// Main terminal event loop: input handling, drawing and the position poll
/// cadence all run on this one thread. Returns `Ok(())` on quit.
pub fn run<P: Pipeline>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<P>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll_interval = Duration::from_millis(settings.player.poll_interval_ms);

    loop {
        if let Some(handle) = state.poll {
            if state.last_poll.elapsed() >= poll_interval {
                state.last_poll = Instant::now();
                if controller.poll(handle) == Poll::Cancelled {
                    state.poll = None;
                }
            }
        }

        terminal.draw(|f| {
            ui::draw(f, app, controller.session(), &settings.ui, &settings.player)
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, controller, state)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_key_event<P: Pipeline>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<P>,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    // The properties popup is modal: it swallows everything except close
    // and quit.
    if app.properties.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('i') => app.close_properties(),
            KeyCode::Char('q') => return Ok(true),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return Ok(true);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.select_next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.select_prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            activate_selected(settings, app, controller, state);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            if controller.toggle_play_pause() == Toggle::NothingSelected {
                app.set_notice("nothing selected");
            }
            state.refresh_poll(controller);
        }
        KeyCode::Char('n') | KeyCode::Char('l') => {
            state.pending_gg = false;
            advance_to_next(app, controller, state);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            let step = settings.player.seek_step_secs as f64;
            controller.seek(controller.session().position_secs - step);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            let step = settings.player.seek_step_secs as f64;
            controller.seek(controller.session().position_secs + step);
        }
        KeyCode::Char('i') => {
            state.pending_gg = false;
            open_properties(app);
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}

/// Enter on a row: descend into directories, play audio files, shrug at
/// everything else.
fn activate_selected<P: Pipeline>(
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<P>,
    state: &mut EventLoopState,
) {
    let Some(entry) = app.selected_entry().cloned() else {
        return;
    };

    match entry.kind {
        EntryKind::Directory => match library::list_dir(&entry.path, &settings.library) {
            Ok(listing) => app.replace_listing(entry.path, listing),
            Err(err) => {
                // Keep the previous listing on screen.
                warn!(%err, "navigation failed");
                app.set_notice(err.to_string());
            }
        },
        EntryKind::AudioFile => open_for_preview(&entry.path, app, controller, state),
        EntryKind::Other => {
            app.set_notice(format!("{} is not an audio file", entry.name));
        }
    }
}

/// Start playback of `path` and load its waveform for the inline pane.
fn open_for_preview<P: Pipeline>(
    path: &Path,
    app: &mut App,
    controller: &mut PlaybackController<P>,
    state: &mut EventLoopState,
) {
    match controller.open(path) {
        Ok(()) => {
            app.notice = None;
            app.waveform = Some(wave::extract(path));
            app.codec = codec_summary(path);
        }
        Err(err) => {
            app.set_notice(err.to_string());
            app.waveform = None;
            app.codec = None;
        }
    }
    state.refresh_poll(controller);
}

/// Short "what is playing" summary for the status line.
fn codec_summary(path: &Path) -> Option<String> {
    let tagged = lofty::read_from_path(path).ok()?;
    let props = tagged.properties();
    let mut summary = format!("{:?}", tagged.file_type());
    if let Some(rate) = props.sample_rate() {
        summary.push_str(&format!(" {rate} Hz"));
    }
    if let Some(channels) = props.channels() {
        summary.push_str(&format!(" {channels}ch"));
    }
    Some(summary)
}

fn advance_to_next<P: Pipeline>(
    app: &mut App,
    controller: &mut PlaybackController<P>,
    state: &mut EventLoopState,
) {
    match controller.next(&app.entries) {
        Ok(Some(path)) => {
            app.waveform = Some(wave::extract(&path));
            app.codec = codec_summary(&path);
            app.select_path(&path);
            app.notice = None;
        }
        Ok(None) => {}
        Err(err) => app.set_notice(err.to_string()),
    }
    state.refresh_poll(controller);
}

fn open_properties(app: &mut App) {
    let Some(entry) = app.selected_entry() else {
        app.set_notice("Select something");
        return;
    };
    app.properties = Some(build_properties(entry));
}

fn build_properties(entry: &Entry) -> PropertiesView {
    let (details, waveform) = match entry.kind {
        EntryKind::AudioFile => (
            describe_audio(&entry.path),
            wave::extract(&entry.path),
        ),
        _ => (
            format!("{} is not an audio file", entry.path.display()),
            Waveform::NotRenderable("not an audio file".into()),
        ),
    };

    PropertiesView {
        title: entry.name.clone(),
        details,
        waveform,
    }
}

fn describe_audio(path: &Path) -> String {
    let mut lines = vec![format!("Location: {}", path.display())];

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let props = tagged.properties();
            lines.push(format!("Format: {:?}", tagged.file_type()));
            lines.push(format!("Duration: {}s", props.duration().as_secs()));
            if let Some(rate) = props.sample_rate() {
                lines.push(format!("Sample rate: {rate} Hz"));
            }
            if let Some(depth) = props.bit_depth() {
                lines.push(format!("Bit depth: {depth}"));
            }
            if let Some(channels) = props.channels() {
                lines.push(format!("Channels: {channels}"));
            }
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                for (label, key) in [
                    ("Title", ItemKey::TrackTitle),
                    ("Artist", ItemKey::TrackArtist),
                    ("Album", ItemKey::AlbumTitle),
                ] {
                    if let Some(v) = tag.get_string(key) {
                        let v = v.trim();
                        if !v.is_empty() {
                            lines.push(format!("{label}: {v}"));
                        }
                    }
                }
            }
        }
        Err(err) => lines.push(format!("Unreadable properties: {err}")),
    }

    lines.join("\n")
}
