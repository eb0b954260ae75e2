//! Terminal event abstraction.
//!
//! Wraps crossterm events into the small set the app actually consumes and
//! runs a background task that forwards them over a channel so the main
//! loop stays non-blocking.  `Tick` is the animation frame clock — smooth
//! scroll, decay tail, and intro all advance on it — and keeps firing on
//! schedule even while input events stream in continuously.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEventKind};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Mouse wheel movement in notches; positive scrolls down.
    Wheel(i16),
    Resize(u16, u16),
    /// Frame clock.
    Tick,
}

/// Spawns a background task that polls the terminal and sends events
/// through the returned channel.  One `Tick` is emitted per `frame_rate`
/// interval regardless of how busy the input stream is.
pub fn spawn_event_reader(frame_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut next_frame = Instant::now() + frame_rate;
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            let has_event = event::poll(timeout).unwrap_or(false);

            if has_event {
                let app_event = match event::read() {
                    Ok(CtEvent::Key(k)) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
                    Ok(CtEvent::Mouse(m)) => match m.kind {
                        MouseEventKind::ScrollUp => Some(AppEvent::Wheel(-1)),
                        MouseEventKind::ScrollDown => Some(AppEvent::Wheel(1)),
                        _ => None,
                    },
                    Ok(CtEvent::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                    Ok(_) => None,
                    Err(_) => break,
                };
                if let Some(ev) = app_event {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped — the app is shutting down
                    }
                }
            }

            if Instant::now() >= next_frame {
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
                next_frame = Instant::now() + frame_rate;
            }
        }
    });

    rx
}
