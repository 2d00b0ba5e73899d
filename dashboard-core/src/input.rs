//! Terminal input polling
//!
//! crossterm's `poll`/`read` are blocking, so input is drained in short
//! bursts from a tokio task and forwarded over a channel the main loop
//! selects on alongside actions and view messages.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::event::EventKind;

/// What the poller forwards: the crossterm events the dashboard reacts to
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// How long one `poll` may block
    pub poll_timeout: Duration,
    /// Pause between bursts
    pub loop_sleep: Duration,
    /// Events read per burst at most
    pub max_batch: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
            max_batch: 20,
        }
    }
}

/// Forward terminal input to `tx` until `cancel_token` fires or `tx` closes
pub fn spawn_input_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Input poller stopping");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    for _ in 0..config.max_batch {
                        if !event::poll(config.poll_timeout).unwrap_or(false) {
                            break;
                        }
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Mouse(mouse)) => RawEvent::Mouse(mouse),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("Input receiver gone");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Turn wheel motion into `Scroll`; everything else passes through
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    let mouse = match raw {
        RawEvent::Key(key) => return EventKind::Key(key),
        RawEvent::Resize(width, height) => return EventKind::Resize(width, height),
        RawEvent::Mouse(mouse) => mouse,
    };
    let delta = match mouse.kind {
        MouseEventKind::ScrollDown => 1,
        MouseEventKind::ScrollUp => -1,
        _ => return EventKind::Mouse(mouse),
    };
    EventKind::Scroll {
        column: mouse.column,
        row: mouse.row,
        delta,
    }
}
