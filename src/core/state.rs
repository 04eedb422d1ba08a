//! Application state machine with fine-grained reactive updates

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::analytics::AnalyticsTab;
use crate::config::SimSettings;
use crate::control::{ControlCenter, SystemAction, SystemControl};
use crate::map::{default_sites, MapSite, MapViewport};
use crate::sim::{AssetStore, HistoryBuffer, HistoryRange, HistorySource, SimError, TickSource};
use crate::ui::theme::Theme;

/// Top-level application mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Normal dashboard view
    #[default]
    Dashboard,
    /// Help overlay showing
    Help,
    /// Confirmation dialog for a destructive system action
    Confirm {
        message: String,
        action: SystemAction,
    },
}

/// Dashboard page shown in the body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Map,
    Assets,
    Control,
    Analytics,
}

impl View {
    pub const ALL: [View; 4] = [Self::Map, Self::Assets, Self::Control, Self::Analytics];

    pub fn label(self) -> &'static str {
        match self {
            Self::Map => "Digital Map",
            Self::Assets => "Asset Monitor",
            Self::Control => "Control Center",
            Self::Analytics => "Analytics",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// The periodic source that feeds this view while it is visible
    pub fn ticker(self) -> Option<TickSource> {
        match self {
            Self::Assets => Some(TickSource::Fleet),
            Self::Analytics => Some(TickSource::History),
            Self::Map | Self::Control => None,
        }
    }
}

impl FromStr for View {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "map" => Ok(Self::Map),
            "assets" | "monitor" => Ok(Self::Assets),
            "control" => Ok(Self::Control),
            "analytics" => Ok(Self::Analytics),
            _ => Err(SimError::UnknownSetting {
                kind: "view",
                value: s.to_string(),
            }),
        }
    }
}

fn step(index: usize, len: usize, forward: bool) -> usize {
    if forward {
        (index + 1).min(len.saturating_sub(1))
    } else {
        index.saturating_sub(1)
    }
}

/// Digital map panel state
#[derive(Debug, Clone)]
pub struct MapPanelState {
    pub sites: Vec<MapSite>,
    pub selected_index: usize,
    pub viewport: MapViewport,
}

impl Default for MapPanelState {
    fn default() -> Self {
        Self {
            sites: default_sites(),
            selected_index: 0,
            viewport: MapViewport::default(),
        }
    }
}

impl MapPanelState {
    pub fn selected_site(&self) -> Option<&MapSite> {
        self.sites.get(self.selected_index)
    }

    /// Move the selection and center the map on the new site
    pub fn select(&mut self, forward: bool) {
        self.selected_index = step(self.selected_index, self.sites.len(), forward);
        if let Some(site) = self.sites.get(self.selected_index) {
            self.viewport.focus(site);
        }
    }
}

/// Asset monitor panel state
#[derive(Debug, Clone, Default)]
pub struct MonitorPanelState {
    pub selected_index: usize,
}

/// Control center panel state
#[derive(Debug, Clone, Default)]
pub struct ControlPanelState {
    pub center: ControlCenter,
    pub selected_index: usize,
}

impl ControlPanelState {
    pub fn selected_control(&self) -> Option<&SystemControl> {
        self.center.ordered().get(self.selected_index).copied()
    }

    pub fn select(&mut self, forward: bool) {
        self.selected_index = step(self.selected_index, self.center.controls().len(), forward);
    }
}

/// Analytics panel state
#[derive(Debug, Clone, Default)]
pub struct AnalyticsPanelState {
    pub tab: AnalyticsTab,
}

/// Granular view state for all panels
#[derive(Debug, Clone, Default)]
pub struct PanelStates {
    pub map: MapPanelState,
    pub monitor: MonitorPanelState,
    pub control: ControlPanelState,
    pub analytics: AnalyticsPanelState,
}

/// Notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: uuid::Uuid,
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: DateTime<Utc>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

const NOTIFICATION_MS: u64 = 5000;

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: AppMode,
    pub view: View,
    pub panels: PanelStates,
    pub fleet: AssetStore,
    pub history: HistoryBuffer,
    pub history_source: HistorySource,
    pub theme: Theme,
    pub notifications: Vec<Notification>,
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(settings: &SimSettings, theme: Theme, now: DateTime<Utc>) -> Self {
        Self {
            mode: AppMode::Dashboard,
            view: settings.default_view,
            panels: PanelStates::default(),
            fleet: AssetStore::with_default_fleet(settings.channels, now),
            history: HistoryBuffer::new(settings.history_range),
            history_source: settings.history_source,
            theme,
            notifications: Vec::new(),
            terminal_size: (80, 24),
        }
    }

    pub fn history_range(&self) -> HistoryRange {
        self.history.range()
    }

    pub fn add_notification(
        &mut self,
        message: String,
        level: NotificationLevel,
        now: DateTime<Utc>,
    ) -> uuid::Uuid {
        let notification = Notification {
            id: uuid::Uuid::new_v4(),
            message,
            level,
            created_at: now,
            duration_ms: NOTIFICATION_MS,
        };
        let id = notification.id;
        self.notifications.push(notification);
        id
    }

    pub fn remove_expired_notifications(&mut self, now: DateTime<Utc>) {
        self.notifications.retain(|n| {
            let elapsed = now.signed_duration_since(n.created_at).num_milliseconds();
            elapsed < n.duration_ms as i64
        });
    }
}

/// Reactive state changes via broadcast channel
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    ModeChanged(AppMode),
    ViewChanged(View),
    FleetUpdated { generation: u64 },
    HistoryUpdated,
    RangeChanged(HistoryRange),
    ControlsChanged,
    MapMoved,
    SystemReset,
    NotificationAdded(uuid::Uuid),
}

/// Thread-safe state store
pub struct StateStore {
    state: Arc<RwLock<AppState>>,
    change_tx: broadcast::Sender<StateChange>,
}

impl StateStore {
    pub fn new(initial: AppState) -> Self {
        let (change_tx, _) = broadcast::channel(256);
        Self {
            state: Arc::new(RwLock::new(initial)),
            change_tx,
        }
    }

    /// Subscribe to state changes
    #[cfg(test)]
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.change_tx.subscribe()
    }

    /// Atomic state mutation with change notification
    pub fn update<F, R>(&self, mutator: F) -> R
    where
        F: FnOnce(&mut AppState) -> (R, Option<StateChange>),
    {
        let mut state = self.state.write();
        let (result, change) = mutator(&mut state);
        if let Some(change) = change {
            let _ = self.change_tx.send(change);
        }
        result
    }

    /// Read current state
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, AppState> {
        self.state.read()
    }

    /// Get a clone of the current state
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }
}

impl Clone for StateStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            change_tx: self.change_tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn state() -> AppState {
        let settings = Config::default().validate().unwrap();
        AppState::new(&settings, Theme::default(), Utc::now())
    }

    #[test]
    fn views_cycle_both_ways() {
        assert_eq!(View::Map.next(), View::Assets);
        assert_eq!(View::Analytics.next(), View::Map);
        assert_eq!(View::Map.prev(), View::Analytics);
        assert_eq!("Analytics".parse::<View>(), Ok(View::Analytics));
    }

    #[test]
    fn only_live_views_own_a_ticker() {
        assert_eq!(View::Assets.ticker(), Some(TickSource::Fleet));
        assert_eq!(View::Analytics.ticker(), Some(TickSource::History));
        assert_eq!(View::Map.ticker(), None);
        assert_eq!(View::Control.ticker(), None);
    }

    #[test]
    fn initial_state_follows_settings() {
        let s = state();
        assert_eq!(s.view, View::Map);
        assert_eq!(s.fleet.entities().len(), 4);
        assert!(s.history.is_empty());
        assert_eq!(s.history_range(), HistoryRange::OneHour);
    }

    #[test]
    fn map_selection_clamps_and_recenters() {
        let mut map = MapPanelState::default();
        map.select(false);
        assert_eq!(map.selected_index, 0);
        for _ in 0..10 {
            map.select(true);
        }
        assert_eq!(map.selected_index, 3);
        assert_eq!(map.viewport.center, (37.7549, -122.4394));
    }

    #[test]
    fn control_selection_follows_display_order() {
        let mut control = ControlPanelState::default();
        control.select(true);
        assert_eq!(control.selected_control().map(|c| c.id), Some("ai-prediction"));
    }

    #[test]
    fn notifications_expire_after_five_seconds() {
        let mut s = state();
        let now = Utc::now();
        s.add_notification("hello".into(), NotificationLevel::Info, now);
        s.remove_expired_notifications(now + Duration::milliseconds(4999));
        assert_eq!(s.notifications.len(), 1);
        s.remove_expired_notifications(now + Duration::seconds(5));
        assert!(s.notifications.is_empty());
    }

    #[test]
    fn updates_are_broadcast() {
        let store = StateStore::new(state());
        let mut rx = store.subscribe();
        store.update(|s| {
            s.view = View::Control;
            ((), Some(StateChange::ViewChanged(s.view)))
        });
        assert_eq!(rx.try_recv().unwrap(), StateChange::ViewChanged(View::Control));
        assert_eq!(store.read().view, View::Control);
    }
}
