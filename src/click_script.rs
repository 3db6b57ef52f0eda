use anyhow::{Context, Result};
use gridstash_core::{DepositMode, ItemId, SimTick};
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct ClickScriptFile {
    steps: Vec<ClickStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct ClickStepDef {
    tick: u64,
    #[serde(flatten)]
    action: ScriptAction,
}

/// Mouse button named in a click step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickButton {
    Left,
    Right,
}

impl ClickButton {
    /// Left click deposits the whole stack, right click a single unit.
    pub fn mode(self) -> DepositMode {
        match self {
            ClickButton::Left => DepositMode::All,
            ClickButton::Right => DepositMode::One,
        }
    }
}

/// One scripted interaction.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Put a stack in the cursor, replacing whatever was held.
    Hold { item: ItemId, amount: u32 },
    /// Click a slot by index.
    Click { button: ClickButton, slot: usize },
    /// Click a pointer position in window points.
    ClickAt { button: ClickButton, x: f32, y: f32 },
}

#[derive(Debug, Clone)]
struct ClickStep {
    tick: SimTick,
    action: ScriptAction,
}

/// Deterministic click script runner.
///
/// Scripts are a list of `{tick, action, ...}` steps, executed in file order.
#[derive(Debug)]
pub struct ClickScriptPlayer {
    pending: VecDeque<ClickStep>,
}

impl ClickScriptPlayer {
    /// Load a click script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read click script {}", path.display()))?;
        Self::from_str(&contents)
            .with_context(|| format!("invalid click script {}", path.display()))
    }

    /// Load a click script from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: ClickScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("click script contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick: Option<u64> = None;
        for step in file.steps {
            if let Some(prev) = last_tick {
                if step.tick < prev {
                    anyhow::bail!("click script steps must be sorted by tick");
                }
            }
            last_tick = Some(step.tick);

            pending.push_back(ClickStep {
                tick: SimTick(step.tick),
                action: step.action,
            });
        }

        Ok(Self { pending })
    }

    /// Drain and return all actions scheduled for ticks `<= tick`.
    pub fn drain_ready(&mut self, tick: SimTick) -> Vec<ScriptAction> {
        let mut actions = Vec::new();
        while let Some(step) = self.pending.front() {
            if step.tick > tick {
                break;
            }
            actions.push(step.action);
            self.pending.pop_front();
        }
        actions
    }

    /// Tick of the next pending step, if any.
    pub fn next_tick(&self) -> Option<SimTick> {
        self.pending.front().map(|step| step.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_script_rejects_unsorted_ticks() {
        let json = r#"{
            "steps": [
                {"tick": 2, "action": "click", "button": "left", "slot": 0},
                {"tick": 1, "action": "click", "button": "left", "slot": 1}
            ]
        }"#;
        let err = ClickScriptPlayer::from_str(json).unwrap_err();
        assert!(
            err.to_string().contains("sorted by tick"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn click_script_rejects_empty_and_unknown_actions() {
        assert!(ClickScriptPlayer::from_str(r#"{"steps": []}"#).is_err());
        assert!(ClickScriptPlayer::from_str(
            r#"{"steps": [{"tick": 0, "action": "drop", "slot": 1}]}"#
        )
        .is_err());
        assert!(ClickScriptPlayer::from_str(
            r#"{"steps": [{"tick": 0, "action": "click", "button": "middle", "slot": 1}]}"#
        )
        .is_err());
    }

    #[test]
    fn click_script_drains_in_order() {
        let json = r#"{
            "steps": [
                {"tick": 0, "action": "hold", "item": 1, "amount": 10},
                {"tick": 0, "action": "click", "button": "left", "slot": 1},
                {"tick": 3, "action": "click_at", "button": "right", "x": 300, "y": 220.5}
            ]
        }"#;
        let mut script = ClickScriptPlayer::from_str(json).expect("script should parse");

        assert_eq!(
            script.drain_ready(SimTick(0)),
            vec![
                ScriptAction::Hold {
                    item: 1,
                    amount: 10
                },
                ScriptAction::Click {
                    button: ClickButton::Left,
                    slot: 1
                },
            ]
        );
        assert!(script.drain_ready(SimTick(2)).is_empty());
        assert_eq!(script.next_tick(), Some(SimTick(3)));
        assert_eq!(
            script.drain_ready(SimTick(3)),
            vec![ScriptAction::ClickAt {
                button: ClickButton::Right,
                x: 300.0,
                y: 220.5
            }]
        );
        assert_eq!(script.next_tick(), None);
    }

    #[test]
    fn buttons_map_to_deposit_modes() {
        assert_eq!(ClickButton::Left.mode(), DepositMode::All);
        assert_eq!(ClickButton::Right.mode(), DepositMode::One);
    }
}
