//! Main application orchestrator

use anyhow::Result;
use chrono::{Local, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::SimSettings;
use crate::control::{ControlKind, SystemAction};
use crate::core::events::{Event, EventHandler, EventResult, KeyBindings};
use crate::core::state::{
    AppMode, AppState, NotificationLevel, PanelStates, StateChange, StateStore, View,
};
use crate::sim::{
    HistoricalSample, HistoryBuffer, HistoryRange, HistorySource, RandomSource, SampleGenerator,
    Scheduler, TickSource,
};
use crate::ui::renderer::Renderer;
use crate::ui::theme::Theme;

/// Slider step for left/right in the control center
const SLIDER_STEP: i16 = 5;

/// Terminal front end: owns the screen and pumps events into the dashboard.
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventHandler,
    event_tx: mpsc::UnboundedSender<Event>,
    dashboard: Dashboard,
}

impl App {
    pub fn new(settings: SimSettings, theme: Theme, rng: Box<dyn RandomSource>) -> Result<Self> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let terminal = Terminal::new(backend)?;

        let (events, event_tx) = EventHandler::new();
        let dashboard = Dashboard::new(settings, theme, rng, event_tx.clone());

        Ok(Self {
            terminal,
            events,
            event_tx,
            dashboard,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.setup_terminal()?;

        EventHandler::spawn_sources(self.event_tx.clone());
        let result = match self.dashboard.start() {
            Ok(()) => {
                self.render()?;
                self.event_loop().await
            }
            Err(e) => Err(e),
        };

        self.dashboard.shutdown();
        self.restore_terminal()?;
        result
    }

    fn setup_terminal(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide,
        )?;
        Ok(())
    }

    fn restore_terminal(&mut self) -> Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show,
        )?;
        Ok(())
    }

    async fn event_loop(&mut self) -> Result<()> {
        while let Some(event) = self.events.next().await {
            match self.dashboard.handle_event(event)? {
                EventResult::Continue => self.render()?,
                EventResult::Quit => break,
            }
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let state = self.dashboard.state.snapshot();
        self.terminal.draw(|frame| {
            Renderer::render(frame, &state);
        })?;
        Ok(())
    }
}

/// Everything behind the screen: state, tickers and the random source.
///
/// Ticks arrive as events on the same channel as key presses and are
/// applied one at a time, so a tick never races a user action.
pub struct Dashboard {
    state: StateStore,
    event_tx: mpsc::UnboundedSender<Event>,
    scheduler: Scheduler<Event>,
    rng: Box<dyn RandomSource>,
    generator: SampleGenerator,
    settings: SimSettings,
    /// Bumped by every system action; a resume only applies to its own restart
    restart_epoch: u64,
    resume_task: Option<JoinHandle<()>>,
}

impl Dashboard {
    pub fn new(
        settings: SimSettings,
        theme: Theme,
        rng: Box<dyn RandomSource>,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        let state = StateStore::new(AppState::new(&settings, theme, Utc::now()));
        Self {
            state,
            scheduler: Scheduler::new(event_tx.clone()),
            event_tx,
            rng,
            generator: SampleGenerator,
            settings,
            restart_epoch: 0,
            resume_task: None,
        }
    }

    pub fn state(&self) -> &StateStore {
        &self.state
    }

    /// Bring up the tickers for the initial view
    pub fn start(&mut self) -> Result<()> {
        let view = self.state.read().view;
        tracing::info!(view = view.label(), seed = ?self.settings.seed, "dashboard started");
        self.activate_view(view)
    }

    pub fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        self.cancel_pending_resume();
        tracing::info!("dashboard stopped");
    }

    pub fn handle_event(&mut self, event: Event) -> Result<EventResult> {
        match event {
            Event::Key(key) => return self.handle_key(key),
            Event::Resize(w, h) => {
                self.state.update(|s| {
                    s.terminal_size = (w, h);
                    ((), None)
                });
            }
            Event::Tick => {
                self.state.update(|s| {
                    s.remove_expired_notifications(Utc::now());
                    ((), None)
                });
            }
            Event::FleetTick => self.on_fleet_tick(),
            Event::HistoryTick => self.on_history_tick(),
            Event::SimulationResumed(epoch) => {
                if epoch != self.restart_epoch {
                    tracing::debug!(epoch, current = self.restart_epoch, "stale resume ignored");
                    return Ok(EventResult::Continue);
                }
                self.resume_task = None;
                self.state.update(|s| {
                    s.panels.control.center.resume_simulation();
                    ((), Some(StateChange::ControlsChanged))
                });
                tracing::info!("simulation resumed");
                self.notify("Simulation resumed".to_string(), NotificationLevel::Success);
            }
            Event::Quit => return Ok(EventResult::Quit),
        }
        Ok(EventResult::Continue)
    }

    fn on_fleet_tick(&mut self) {
        let rng = self.rng.as_mut();
        self.state.update(|s| {
            if !s.panels.control.center.status().simulation_running {
                tracing::trace!("fleet tick skipped, simulation stopped");
                return ((), None);
            }
            let generation = s.fleet.tick(rng, Utc::now());
            ((), Some(StateChange::FleetUpdated { generation }))
        });
    }

    fn on_history_tick(&mut self) {
        let rng = self.rng.as_mut();
        let generator = &self.generator;
        self.state.update(|s| {
            if !s.panels.control.center.status().data_streaming {
                tracing::trace!("history tick skipped, streaming off");
                return ((), None);
            }
            let now = Local::now();
            let sample = match s.history_source {
                HistorySource::Synthetic => generator.generate(rng, now),
                HistorySource::Fleet => {
                    // The fleet ticker only runs on the Assets view, so the
                    // chart advances the fleet itself.
                    if s.panels.control.center.status().simulation_running {
                        s.fleet.tick(rng, Utc::now());
                    }
                    HistoricalSample::from_aggregate(&s.fleet.aggregate(), now)
                }
            };
            s.history.append(sample);
            tracing::trace!(samples = s.history.len(), "history ticked");
            ((), Some(StateChange::HistoryUpdated))
        });
    }

    fn switch_view(&mut self, view: View) -> Result<()> {
        let previous = self.state.update(|s| {
            let previous = s.view;
            s.view = view;
            (previous, Some(StateChange::ViewChanged(view)))
        });
        if previous == view {
            return Ok(());
        }
        self.activate_view(view)
    }

    /// Cancel tickers the view does not need, then start its own.
    fn activate_view(&mut self, view: View) -> Result<()> {
        for source in [TickSource::Fleet, TickSource::History] {
            if view.ticker() != Some(source) {
                self.scheduler.cancel(source);
            }
        }

        match view.ticker() {
            Some(TickSource::Fleet) => {
                self.scheduler
                    .start(TickSource::Fleet, self.settings.asset_interval)?;
            }
            Some(TickSource::History) => {
                let range = self.state.read().history_range();
                self.backfill_history(range);
                self.scheduler
                    .start(TickSource::History, self.settings.history_interval)?;
            }
            None => {}
        }
        tracing::debug!(view = view.label(), "view activated");
        Ok(())
    }

    fn backfill_history(&mut self, range: HistoryRange) {
        let rng = self.rng.as_mut();
        let generator = &self.generator;
        self.state.update(|s| {
            s.history.backfill(range, Local::now(), generator, rng);
            ((), Some(StateChange::RangeChanged(range)))
        });
    }

    fn notify(&self, message: String, level: NotificationLevel) {
        self.state.update(|s| {
            let id = s.add_notification(message, level, Utc::now());
            ((), Some(StateChange::NotificationAdded(id)))
        });
    }

    fn set_mode(&self, mode: AppMode) {
        self.state.update(|s| {
            s.mode = mode.clone();
            ((), Some(StateChange::ModeChanged(mode)))
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult> {
        let mode = self.state.read().mode.clone();

        match mode {
            AppMode::Dashboard => self.handle_dashboard_key(key),
            AppMode::Help => {
                if KeyBindings::escape().matches(&key)
                    || KeyBindings::help().matches(&key)
                    || KeyBindings::quit().matches(&key)
                {
                    self.set_mode(AppMode::Dashboard);
                }
                Ok(EventResult::Continue)
            }
            AppMode::Confirm { action, .. } => {
                self.handle_confirm_key(key, action);
                Ok(EventResult::Continue)
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<EventResult> {
        if KeyBindings::quit().matches(&key) || KeyBindings::quit_alt().matches(&key) {
            return Ok(EventResult::Quit);
        }

        if KeyBindings::help().matches(&key) {
            self.set_mode(AppMode::Help);
            return Ok(EventResult::Continue);
        }

        let view = self.state.read().view;

        if KeyBindings::tab().matches(&key) {
            self.switch_view(view.next())?;
            return Ok(EventResult::Continue);
        }
        if KeyBindings::backtab().matches(&key) {
            self.switch_view(view.prev())?;
            return Ok(EventResult::Continue);
        }
        if let Some(index) = KeyBindings::view_digit(&key) {
            self.switch_view(View::ALL[index])?;
            return Ok(EventResult::Continue);
        }

        match view {
            View::Map => self.handle_map_key(key),
            View::Assets => self.handle_monitor_key(key),
            View::Control => self.handle_control_key(key),
            View::Analytics => self.handle_analytics_key(key),
        }
        Ok(EventResult::Continue)
    }

    fn handle_map_key(&mut self, key: KeyEvent) {
        let forward = if is_down(&key) {
            Some(true)
        } else if is_up(&key) {
            Some(false)
        } else {
            None
        };

        self.state.update(|s| {
            let map = &mut s.panels.map;
            if let Some(forward) = forward {
                map.select(forward);
            } else if KeyBindings::zoom_in().matches(&key) || KeyBindings::zoom_in_alt().matches(&key)
            {
                map.viewport.zoom_in();
            } else if KeyBindings::zoom_out().matches(&key) {
                map.viewport.zoom_out();
            } else if KeyBindings::reset_map().matches(&key) {
                map.viewport.reset();
            } else {
                return ((), None);
            }
            tracing::debug!(zoom = map.viewport.zoom, site = map.selected_index, "map moved");
            ((), Some(StateChange::MapMoved))
        });
    }

    fn handle_monitor_key(&mut self, key: KeyEvent) {
        self.state.update(|s| {
            let count = s.fleet.entities().len();
            let monitor = &mut s.panels.monitor;
            if is_down(&key) {
                monitor.selected_index = (monitor.selected_index + 1).min(count.saturating_sub(1));
            } else if is_up(&key) {
                monitor.selected_index = monitor.selected_index.saturating_sub(1);
            }
            ((), None)
        });
    }

    fn handle_control_key(&mut self, key: KeyEvent) {
        if is_down(&key) || is_up(&key) {
            let forward = is_down(&key);
            self.state.update(|s| {
                s.panels.control.select(forward);
                ((), None)
            });
            return;
        }

        if KeyBindings::restart().matches(&key) {
            self.request_action(SystemAction::RestartSimulation);
            return;
        }
        if KeyBindings::emergency_stop().matches(&key) {
            self.request_action(SystemAction::EmergencyStop);
            return;
        }
        if KeyBindings::reset_system().matches(&key) {
            self.request_action(SystemAction::ResetSystem);
            return;
        }

        let Some(control) = self.state.read().panels.control.selected_control().cloned() else {
            return;
        };

        let delta = if is_right(&key) {
            SLIDER_STEP
        } else if is_left(&key) {
            -SLIDER_STEP
        } else {
            0
        };

        let result = match control.kind {
            ControlKind::Toggle
                if KeyBindings::enter().matches(&key) || KeyBindings::space().matches(&key) =>
            {
                self.state.update(|s| {
                    let result = s.panels.control.center.toggle(control.id);
                    (result.map(|_| ()), Some(StateChange::ControlsChanged))
                })
            }
            ControlKind::Slider if delta != 0 => self.state.update(|s| {
                let result = s.panels.control.center.adjust(control.id, delta);
                (result.map(|_| ()), Some(StateChange::ControlsChanged))
            }),
            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "control update rejected");
            self.notify(e.to_string(), NotificationLevel::Error);
        }
    }

    fn handle_analytics_key(&mut self, key: KeyEvent) {
        if KeyBindings::cycle_range().matches(&key) {
            let range = self.state.read().history_range().next();
            self.backfill_history(range);
            tracing::debug!(range = %range, "history range changed");
            self.notify(
                format!("Showing last {}", range.label()),
                NotificationLevel::Info,
            );
            return;
        }

        self.state.update(|s| {
            let tab = &mut s.panels.analytics.tab;
            if is_right(&key) {
                *tab = tab.next();
            } else if is_left(&key) {
                *tab = tab.prev();
            }
            ((), None)
        });
    }

    fn request_action(&mut self, action: SystemAction) {
        if action.needs_confirmation() {
            self.set_mode(AppMode::Confirm {
                message: format!("{}? (y/n)", action.label()),
                action,
            });
        } else {
            self.apply_action(action);
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent, action: SystemAction) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.set_mode(AppMode::Dashboard);
                self.apply_action(action);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_mode(AppMode::Dashboard);
            }
            _ => {}
        }
    }

    fn apply_action(&mut self, action: SystemAction) {
        let outcome = self.state.update(|s| {
            let outcome = s.panels.control.center.apply(action);
            (outcome, Some(StateChange::ControlsChanged))
        });

        // Any action supersedes a restart that is still waiting to resume
        self.cancel_pending_resume();
        if let Some(delay) = outcome.resume_after {
            let tx = self.event_tx.clone();
            let epoch = self.restart_epoch;
            self.resume_task = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(Event::SimulationResumed(epoch));
            }));
        }

        if outcome.reset_state {
            self.reset_state();
        }

        let level = match action {
            SystemAction::RestartSimulation => NotificationLevel::Info,
            SystemAction::EmergencyStop => NotificationLevel::Error,
            SystemAction::ResetSystem => NotificationLevel::Warning,
        };
        self.notify(format!("{} executed", action.label()), level);
    }

    fn cancel_pending_resume(&mut self) {
        self.restart_epoch += 1;
        if let Some(task) = self.resume_task.take() {
            task.abort();
            tracing::debug!("pending resume cancelled");
        }
    }

    /// Restore fleet, chart and panels to their startup state. The current
    /// view and its tickers are kept.
    fn reset_state(&mut self) {
        let range = self.settings.history_range;
        let view = self.state.update(|s| {
            s.fleet.reset(Utc::now());
            s.history = HistoryBuffer::new(range);
            s.panels = PanelStates::default();
            (s.view, Some(StateChange::SystemReset))
        });

        if view == View::Analytics {
            self.backfill_history(range);
        }
    }
}

fn is_up(key: &KeyEvent) -> bool {
    KeyBindings::up().matches(key) || KeyBindings::vim_up().matches(key)
}

fn is_down(key: &KeyEvent) -> bool {
    KeyBindings::down().matches(key) || KeyBindings::vim_down().matches(key)
}

fn is_left(key: &KeyEvent) -> bool {
    KeyBindings::left().matches(key) || KeyBindings::vim_left().matches(key)
}

fn is_right(key: &KeyEvent) -> bool {
    KeyBindings::right().matches(key) || KeyBindings::vim_right().matches(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::ChaChaSource;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn dashboard(view: &str) -> (Dashboard, mpsc::UnboundedReceiver<Event>) {
        let mut config = Config::default();
        config.display.default_view = view.to_string();
        dashboard_with(config)
    }

    fn dashboard_with(config: Config) -> (Dashboard, mpsc::UnboundedReceiver<Event>) {
        let settings = config.validate().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        let rng = Box::new(ChaChaSource::seeded(7));
        (Dashboard::new(settings, Theme::default(), rng, tx), rx)
    }

    fn press(dashboard: &mut Dashboard, c: char) {
        let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        dashboard.handle_event(Event::Key(key)).unwrap();
    }

    /// Let the paused clock run and feed every posted event back in.
    async fn advance(
        dashboard: &mut Dashboard,
        rx: &mut mpsc::UnboundedReceiver<Event>,
        by: Duration,
    ) {
        tokio::time::sleep(by).await;
        while let Ok(event) = rx.try_recv() {
            dashboard.handle_event(event).unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fleet_ticks_only_while_assets_view_is_active() {
        let (mut d, mut rx) = dashboard("assets");
        d.start().unwrap();

        advance(&mut d, &mut rx, Duration::from_millis(6100)).await;
        assert_eq!(d.state().read().fleet.generation(), 2);

        press(&mut d, '1');
        assert_eq!(d.state().read().view, View::Map);
        advance(&mut d, &mut rx, Duration::from_secs(10)).await;
        assert_eq!(d.state().read().fleet.generation(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn analytics_backfills_then_rolls() {
        let (mut d, mut rx) = dashboard("map");
        d.start().unwrap();
        assert!(d.state().read().history.is_empty());

        press(&mut d, '4');
        let first = d.state().read().history.iter().next().map(|s| s.timestamp);
        assert_eq!(d.state().read().history.len(), 13);

        advance(&mut d, &mut rx, Duration::from_millis(5100)).await;
        let state = d.state().read();
        assert_eq!(state.history.len(), 13);
        assert_ne!(state.history.iter().next().map(|s| s.timestamp), first);
    }

    #[tokio::test(start_paused = true)]
    async fn range_cycle_regenerates_window() {
        let (mut d, _rx) = dashboard("analytics");
        d.start().unwrap();
        press(&mut d, 'g');
        assert_eq!(d.state().read().history_range(), HistoryRange::SixHours);
        assert_eq!(d.state().read().history.len(), 73);
        press(&mut d, 'g');
        assert_eq!(d.state().read().history.len(), 289);
    }

    #[tokio::test(start_paused = true)]
    async fn emergency_stop_needs_confirmation_and_freezes_ticks() {
        let (mut d, mut rx) = dashboard("control");
        d.start().unwrap();

        press(&mut d, 'e');
        assert!(matches!(d.state().read().mode, AppMode::Confirm { .. }));
        press(&mut d, 'y');
        assert_eq!(d.state().read().mode, AppMode::Dashboard);

        press(&mut d, '2');
        advance(&mut d, &mut rx, Duration::from_secs(10)).await;
        assert_eq!(d.state().read().fleet.generation(), 0);

        press(&mut d, '4');
        let before = d.state().read().history.latest().map(|s| s.timestamp);
        advance(&mut d, &mut rx, Duration::from_secs(10)).await;
        assert_eq!(d.state().read().history.latest().map(|s| s.timestamp), before);
    }

    #[tokio::test(start_paused = true)]
    async fn declining_confirmation_changes_nothing() {
        let (mut d, _rx) = dashboard("control");
        d.start().unwrap();
        press(&mut d, 'z');
        press(&mut d, 'n');
        assert_eq!(d.state().read().mode, AppMode::Dashboard);
        assert!(d.state().read().panels.control.center.status().simulation_running);
        assert!(d.state().read().notifications.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resumes_after_delay() {
        let (mut d, mut rx) = dashboard("control");
        d.start().unwrap();

        press(&mut d, 'r');
        assert!(!d.state().read().panels.control.center.status().simulation_running);

        advance(&mut d, &mut rx, Duration::from_millis(1900)).await;
        assert!(!d.state().read().panels.control.center.status().simulation_running);

        advance(&mut d, &mut rx, Duration::from_millis(200)).await;
        assert!(d.state().read().panels.control.center.status().simulation_running);
    }

    #[tokio::test(start_paused = true)]
    async fn emergency_stop_cancels_pending_restart() {
        let (mut d, mut rx) = dashboard("control");
        d.start().unwrap();

        press(&mut d, 'r');
        press(&mut d, 'e');
        press(&mut d, 'y');
        advance(&mut d, &mut rx, Duration::from_millis(2100)).await;

        let status = *d.state().read().panels.control.center.status();
        assert!(!status.simulation_running);
        assert!(!status.data_streaming);
    }

    #[tokio::test(start_paused = true)]
    async fn resume_from_superseded_restart_is_ignored() {
        let (mut d, _rx) = dashboard("control");
        d.start().unwrap();

        press(&mut d, 'r');
        let stale = d.restart_epoch;
        press(&mut d, 'e');
        press(&mut d, 'y');
        d.handle_event(Event::SimulationResumed(stale)).unwrap();

        assert!(!d.state().read().panels.control.center.status().simulation_running);
    }

    #[tokio::test(start_paused = true)]
    async fn fleet_history_source_advances_fleet_on_analytics() {
        let mut config = Config::default();
        config.display.default_view = "analytics".to_string();
        config.simulation.history_source = HistorySource::Fleet;
        let (mut d, mut rx) = dashboard_with(config);
        d.start().unwrap();
        let initial_cpu = d.state().read().fleet.aggregate().avg_cpu;

        advance(&mut d, &mut rx, Duration::from_millis(15100)).await;

        let state = d.state().read();
        assert_eq!(state.fleet.generation(), 3);
        let live: Vec<f64> = state.history.iter().rev().take(3).map(|s| s.cpu).collect();
        assert!(live.iter().all(|&cpu| cpu != initial_cpu), "{:?}", live);
        assert!(live.windows(2).any(|w| w[0] != w[1]), "{:?}", live);
        assert_eq!(live[0], state.fleet.aggregate().avg_cpu);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restores_fleet_and_controls() {
        let (mut d, mut rx) = dashboard("assets");
        d.start().unwrap();
        advance(&mut d, &mut rx, Duration::from_millis(3100)).await;
        assert_eq!(d.state().read().fleet.generation(), 1);

        press(&mut d, '3');
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        d.handle_event(Event::Key(key)).unwrap();
        assert!(!d.state().read().panels.control.center.controls()[0].enabled);

        press(&mut d, 'z');
        press(&mut d, 'y');
        let state = d.state().read();
        assert_eq!(state.fleet.generation(), 0);
        assert!(state.panels.control.center.controls()[0].enabled);
        assert_eq!(state.view, View::Control);
    }

    #[tokio::test(start_paused = true)]
    async fn sliders_move_in_steps() {
        let (mut d, _rx) = dashboard("control");
        d.start().unwrap();
        // data-retention is third in display order
        press(&mut d, 'j');
        press(&mut d, 'j');
        press(&mut d, 'l');
        let state = d.state().read();
        assert_eq!(
            state.panels.control.center.get("data-retention").and_then(|c| c.value),
            Some(35)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn quit_from_any_view() {
        let (mut d, _rx) = dashboard("analytics");
        d.start().unwrap();
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(d.handle_event(Event::Key(key)).unwrap(), EventResult::Quit);
    }
}
