//! Unified event handling system

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::sim::TickSource;

/// All possible events in the system
#[derive(Debug, Clone)]
pub enum Event {
    // Input events
    Key(KeyEvent),
    Resize(u16, u16),

    // Render tick, also expires notifications
    Tick,

    // Simulation ticks, driven by the scheduler
    FleetTick,
    HistoryTick,
    /// End of a restart pause, tagged with the restart it belongs to
    SimulationResumed(u64),

    // Lifecycle
    Quit,
}

impl From<TickSource> for Event {
    fn from(source: TickSource) -> Self {
        match source {
            TickSource::Fleet => Event::FleetTick,
            TickSource::History => Event::HistoryTick,
        }
    }
}

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
}

const RENDER_TICK: Duration = Duration::from_millis(250);

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new() -> (Self, mpsc::UnboundedSender<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, tx)
    }

    /// Start terminal input and the render tick
    pub fn spawn_sources(event_tx: mpsc::UnboundedSender<Event>) {
        tokio::spawn(Self::terminal_events(event_tx.clone()));
        tokio::spawn(Self::tick_events(event_tx, RENDER_TICK, Event::Tick));
    }

    async fn terminal_events(tx: mpsc::UnboundedSender<Event>) {
        use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
        use futures::StreamExt;

        let mut reader = event::EventStream::new();
        while let Some(event_result) = reader.next().await {
            let event = match event_result {
                Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                Ok(CrosstermEvent::Resize(w, h)) => Event::Resize(w, h),
                _ => continue,
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    }

    async fn tick_events(tx: mpsc::UnboundedSender<Event>, interval: Duration, event: Event) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if tx.send(event.clone()).is_err() {
                break;
            }
        }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key binding helper
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn ctrl(key: KeyCode) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Shifted characters arrive with SHIFT set on some terminals, so
    /// character bindings ignore it.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let modifiers = match event.code {
            KeyCode::Char(_) | KeyCode::BackTab => event.modifiers.difference(KeyModifiers::SHIFT),
            _ => event.modifiers,
        };
        event.code == self.key && modifiers == self.modifiers
    }
}

/// Standard key bindings
pub struct KeyBindings;

impl KeyBindings {
    pub fn quit() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('q'))
    }

    pub fn quit_alt() -> KeyBinding {
        KeyBinding::ctrl(KeyCode::Char('c'))
    }

    pub fn help() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('?'))
    }

    pub fn escape() -> KeyBinding {
        KeyBinding::new(KeyCode::Esc)
    }

    pub fn enter() -> KeyBinding {
        KeyBinding::new(KeyCode::Enter)
    }

    pub fn space() -> KeyBinding {
        KeyBinding::new(KeyCode::Char(' '))
    }

    pub fn tab() -> KeyBinding {
        KeyBinding::new(KeyCode::Tab)
    }

    pub fn backtab() -> KeyBinding {
        KeyBinding::new(KeyCode::BackTab)
    }

    pub fn up() -> KeyBinding {
        KeyBinding::new(KeyCode::Up)
    }

    pub fn down() -> KeyBinding {
        KeyBinding::new(KeyCode::Down)
    }

    pub fn left() -> KeyBinding {
        KeyBinding::new(KeyCode::Left)
    }

    pub fn right() -> KeyBinding {
        KeyBinding::new(KeyCode::Right)
    }

    pub fn vim_up() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('k'))
    }

    pub fn vim_down() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('j'))
    }

    pub fn vim_left() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('h'))
    }

    pub fn vim_right() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('l'))
    }

    pub fn zoom_in() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('+'))
    }

    pub fn zoom_in_alt() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('='))
    }

    pub fn zoom_out() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('-'))
    }

    pub fn reset_map() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('0'))
    }

    pub fn restart() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('r'))
    }

    pub fn emergency_stop() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('e'))
    }

    pub fn reset_system() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('z'))
    }

    pub fn cycle_range() -> KeyBinding {
        KeyBinding::new(KeyCode::Char('g'))
    }

    /// `1`..`4` select a view directly
    pub fn view_digit(event: &KeyEvent) -> Option<usize> {
        match event.code {
            KeyCode::Char(c @ '1'..='4') if !event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(c as usize - '1' as usize)
            }
            _ => None,
        }
    }
}
