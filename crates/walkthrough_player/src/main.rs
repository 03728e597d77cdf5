use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use mise_walkthrough::config::EnvConfig;
use mise_walkthrough::core::clock::SystemClock;
use mise_walkthrough::core::component::Component;
use mise_walkthrough::core::input_event::parse_input_events;
use mise_walkthrough::core::keybindings::DismissAction;
use mise_walkthrough::logging::init_file_logging;
use mise_walkthrough::render::WalkthroughTheme;
use mise_walkthrough::walkthrough::{cooking_walkthrough, RenderRequester, Sequencer, SequencerHandle};
use mise_walkthrough::widgets::TutorialModal;
use tracing::info;

#[cfg(unix)]
mod terminal;

#[cfg(unix)]
use terminal::{PlayerEvent, RawTerminal};

/// Redraw cadence for pointer easing and the loading spinner.
const FRAME_INTERVAL: Duration = Duration::from_millis(80);
const MAX_MODAL_WIDTH: usize = 72;

#[cfg(unix)]
fn main() -> io::Result<()> {
    let config = EnvConfig::from_env();
    if let Err(err) = init_file_logging(&config) {
        eprintln!("walkthrough_player: {err}");
    }

    let script = cooking_walkthrough().scaled(config.speed);
    let sequencer = SequencerHandle::new(Sequencer::new(script, Arc::new(SystemClock)));
    let theme = if config.plain {
        WalkthroughTheme::plain()
    } else {
        WalkthroughTheme::ansi()
    };

    let (events_tx, events_rx) = mpsc::channel();
    let render_tx = Mutex::new(events_tx.clone());
    let requester: RenderRequester = Arc::new(move || {
        let _ = lock_unpoisoned(&render_tx).send(PlayerEvent::Render);
    });

    let mut modal = TutorialModal::new(sequencer, theme).with_driver(Some(requester));
    modal.set_hide_pointer(config.hide_pointer);
    let dismissed = Rc::new(Cell::new(None::<DismissAction>));
    let sink = Rc::clone(&dismissed);
    modal.set_on_dismiss(Some(Box::new(move |action| sink.set(Some(action)))));

    let mut terminal = RawTerminal::start(events_tx)?;
    modal.set_active(true);
    info!(speed = config.speed, "walkthrough player started");

    let result = run(&mut terminal, &mut modal, &events_rx, &dismissed);

    modal.set_active(false);
    terminal.stop()?;
    info!(action = ?dismissed.get(), "walkthrough player exiting");
    result
}

#[cfg(not(unix))]
fn main() -> io::Result<()> {
    Err(io::Error::other("walkthrough_player requires a unix terminal"))
}

#[cfg(unix)]
fn run(
    terminal: &mut RawTerminal,
    modal: &mut TutorialModal,
    events: &mpsc::Receiver<PlayerEvent>,
    dismissed: &Cell<Option<DismissAction>>,
) -> io::Result<()> {
    draw(terminal, modal, false)?;
    while dismissed.get().is_none() {
        let clear = match events.recv_timeout(FRAME_INTERVAL) {
            Ok(PlayerEvent::Input(data)) => {
                for event in parse_input_events(&data) {
                    modal.handle_event(&event);
                }
                false
            }
            Ok(PlayerEvent::Interrupt) => {
                modal.dismiss(DismissAction::Close);
                false
            }
            Ok(PlayerEvent::Resize) => true,
            Ok(PlayerEvent::Render) | Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        if dismissed.get().is_none() {
            draw(terminal, modal, clear)?;
        }
    }
    Ok(())
}

/// Paints the modal centred in the terminal, overwriting the previous frame in place.
#[cfg(unix)]
fn draw(terminal: &RawTerminal, modal: &mut TutorialModal, clear: bool) -> io::Result<()> {
    let (columns, rows) = terminal.size();
    let (columns, rows) = (usize::from(columns), usize::from(rows));
    let width = columns.min(MAX_MODAL_WIDTH);
    let lines = modal.render(width);

    let left = " ".repeat((columns - width) / 2);
    let top = rows.saturating_sub(lines.len()) / 2;

    let mut buffer = String::from(if clear { "\x1b[2J\x1b[H" } else { "\x1b[H" });
    for row in 0..rows {
        if row > 0 {
            buffer.push_str("\r\n");
        }
        if let Some(line) = row.checked_sub(top).and_then(|index| lines.get(index)) {
            buffer.push_str(&left);
            buffer.push_str(line);
        }
        buffer.push_str("\x1b[K");
    }
    terminal.write(&buffer)
}

#[cfg(unix)]
fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
