//! Control Center: operator toggles, sliders and system-wide actions

use std::time::Duration;

use crate::sim::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Toggle,
    Slider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCategory {
    System,
    Simulation,
    Security,
    Performance,
}

impl ControlCategory {
    pub const ALL: [ControlCategory; 4] = [
        Self::System,
        Self::Simulation,
        Self::Security,
        Self::Performance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Simulation => "Simulation",
            Self::Security => "Security",
            Self::Performance => "Performance",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SystemControl {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub enabled: bool,
    pub value: Option<u8>,
    pub kind: ControlKind,
    pub category: ControlCategory,
}

pub const SLIDER_MAX: u8 = 100;

fn default_controls() -> Vec<SystemControl> {
    let toggle = |id: &'static str,
                  name: &'static str,
                  description: &'static str,
                  category: ControlCategory| SystemControl {
        id,
        name,
        description,
        enabled: true,
        value: None,
        kind: ControlKind::Toggle,
        category,
    };
    let slider = |id: &'static str,
                  name: &'static str,
                  description: &'static str,
                  value: u8,
                  category: ControlCategory| SystemControl {
        id,
        name,
        description,
        enabled: true,
        value: Some(value),
        kind: ControlKind::Slider,
        category,
    };

    vec![
        toggle(
            "auto-sync",
            "Auto Synchronization",
            "Automatically sync digital twin with physical assets",
            ControlCategory::System,
        ),
        toggle(
            "gpu-acceleration",
            "GPU Acceleration",
            "Enable NVIDIA GPU acceleration for rendering",
            ControlCategory::Performance,
        ),
        toggle(
            "ai-prediction",
            "AI Predictive Analytics",
            "Use AI to predict system failures and maintenance needs",
            ControlCategory::System,
        ),
        toggle(
            "security-monitoring",
            "Security Monitoring",
            "Real-time security threat detection",
            ControlCategory::Security,
        ),
        slider(
            "simulation-quality",
            "Simulation Quality",
            "Adjust rendering quality vs performance",
            85,
            ControlCategory::Simulation,
        ),
        slider(
            "data-retention",
            "Data Retention Period",
            "Historical data retention in days",
            30,
            ControlCategory::System,
        ),
    ]
}

/// Platform-wide flags. Simulation and streaming gate the tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemStatus {
    pub omniverse_connected: bool,
    pub simulation_running: bool,
    pub data_streaming: bool,
    pub security_active: bool,
}

impl Default for SystemStatus {
    fn default() -> Self {
        Self {
            omniverse_connected: true,
            simulation_running: true,
            data_streaming: true,
            security_active: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAction {
    RestartSimulation,
    EmergencyStop,
    ResetSystem,
}

impl SystemAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::RestartSimulation => "Restart Simulation",
            Self::EmergencyStop => "Emergency Stop",
            Self::ResetSystem => "Reset System",
        }
    }

    pub fn needs_confirmation(self) -> bool {
        !matches!(self, Self::RestartSimulation)
    }
}

/// What the caller must do after an action was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    /// Call [`ControlCenter::resume_simulation`] after this delay
    pub resume_after: Option<Duration>,
    /// Fleet and history must be restored to their startup state
    pub reset_state: bool,
}

pub const RESTART_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct ControlCenter {
    controls: Vec<SystemControl>,
    status: SystemStatus,
}

impl Default for ControlCenter {
    fn default() -> Self {
        Self {
            controls: default_controls(),
            status: SystemStatus::default(),
        }
    }
}

impl ControlCenter {
    pub fn status(&self) -> &SystemStatus {
        &self.status
    }

    pub fn controls(&self) -> &[SystemControl] {
        &self.controls
    }

    /// Controls in display order: grouped by category, then declaration order.
    pub fn ordered(&self) -> Vec<&SystemControl> {
        ControlCategory::ALL
            .iter()
            .flat_map(|&category| self.controls.iter().filter(move |c| c.category == category))
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&SystemControl> {
        self.controls.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut SystemControl, SimError> {
        self.controls
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| SimError::UnknownControl(id.to_string()))
    }

    /// Flip a control's enabled flag, returning the new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool, SimError> {
        let control = self.get_mut(id)?;
        control.enabled = !control.enabled;
        tracing::info!(control = id, enabled = control.enabled, "control toggled");
        Ok(control.enabled)
    }

    /// Move a slider by `delta`, saturating at 0 and [`SLIDER_MAX`].
    pub fn adjust(&mut self, id: &str, delta: i16) -> Result<u8, SimError> {
        let control = self.get_mut(id)?;
        let Some(current) = control.value else {
            return Err(SimError::NotAdjustable(id.to_string()));
        };
        let next = (current as i16 + delta).clamp(0, SLIDER_MAX as i16) as u8;
        control.value = Some(next);
        tracing::info!(control = id, value = next, "control adjusted");
        Ok(next)
    }

    pub fn apply(&mut self, action: SystemAction) -> ActionOutcome {
        tracing::info!(action = action.label(), "system action");
        match action {
            SystemAction::RestartSimulation => {
                self.status.simulation_running = false;
                ActionOutcome {
                    resume_after: Some(RESTART_DELAY),
                    ..Default::default()
                }
            }
            SystemAction::EmergencyStop => {
                self.status.simulation_running = false;
                self.status.data_streaming = false;
                ActionOutcome::default()
            }
            SystemAction::ResetSystem => {
                *self = Self::default();
                ActionOutcome {
                    reset_state: true,
                    ..Default::default()
                }
            }
        }
    }

    pub fn resume_simulation(&mut self) {
        self.status.simulation_running = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggles_flip_enabled() {
        let mut center = ControlCenter::default();
        assert_eq!(center.toggle("auto-sync"), Ok(false));
        assert_eq!(center.toggle("auto-sync"), Ok(true));
    }

    #[test]
    fn unknown_control_is_an_error() {
        let mut center = ControlCenter::default();
        assert_eq!(
            center.toggle("warp-drive"),
            Err(SimError::UnknownControl("warp-drive".to_string()))
        );
    }

    #[test]
    fn sliders_saturate() {
        let mut center = ControlCenter::default();
        assert_eq!(center.adjust("simulation-quality", 10), Ok(95));
        assert_eq!(center.adjust("simulation-quality", 10), Ok(100));
        assert_eq!(center.adjust("data-retention", -50), Ok(0));
    }

    #[test]
    fn toggles_cannot_be_adjusted() {
        let mut center = ControlCenter::default();
        assert_eq!(
            center.adjust("gpu-acceleration", 5),
            Err(SimError::NotAdjustable("gpu-acceleration".to_string()))
        );
    }

    #[test]
    fn restart_pauses_then_resumes() {
        let mut center = ControlCenter::default();
        let outcome = center.apply(SystemAction::RestartSimulation);
        assert_eq!(outcome.resume_after, Some(RESTART_DELAY));
        assert!(!center.status().simulation_running);
        assert!(center.status().data_streaming);

        center.resume_simulation();
        assert!(center.status().simulation_running);
    }

    #[test]
    fn emergency_stop_halts_streaming() {
        let mut center = ControlCenter::default();
        let outcome = center.apply(SystemAction::EmergencyStop);
        assert_eq!(outcome, ActionOutcome::default());
        assert!(!center.status().simulation_running);
        assert!(!center.status().data_streaming);
        assert!(center.status().security_active);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut center = ControlCenter::default();
        center.toggle("ai-prediction").unwrap();
        center.adjust("data-retention", 20).unwrap();
        center.apply(SystemAction::EmergencyStop);

        let outcome = center.apply(SystemAction::ResetSystem);
        assert!(outcome.reset_state);
        assert_eq!(center, ControlCenter::default());
    }

    #[test]
    fn ordered_groups_by_category() {
        let center = ControlCenter::default();
        let ids: Vec<&str> = center.ordered().iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                "auto-sync",
                "ai-prediction",
                "data-retention",
                "simulation-quality",
                "security-monitoring",
                "gpu-acceleration",
            ]
        );
    }
}
