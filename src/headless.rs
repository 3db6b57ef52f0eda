use crate::click_script::{ClickButton, ClickScriptPlayer, ScriptAction};
use anyhow::Result;
use gridstash_core::{DepositMode, DepositOutcome, GridInventory, SimTick, Slot};
use gridstash_testkit::{EventRecord, JsonlSink};
use gridstash_ui::GridLayout;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub struct HeadlessConfig {
    pub inventory: GridInventory,
    pub layout: GridLayout,
    pub script: PathBuf,
    pub event_log: Option<PathBuf>,
    pub max_ticks: Option<u64>,
}

/// Replay the click script and return the final inventory.
pub fn run(cfg: HeadlessConfig) -> Result<GridInventory> {
    let script = ClickScriptPlayer::from_path(&cfg.script)?;
    let sink = cfg.event_log.as_ref().map(JsonlSink::create).transpose()?;

    let mut runner = HeadlessRunner::new(cfg.inventory, cfg.layout, script, sink);
    runner.run(cfg.max_ticks)?;
    Ok(runner.into_inventory())
}

/// Explicit tick loop driving an owned inventory from a click script.
pub struct HeadlessRunner {
    inventory: GridInventory,
    layout: GridLayout,
    script: ClickScriptPlayer,
    sink: Option<JsonlSink>,
    tick: SimTick,
}

impl HeadlessRunner {
    pub fn new(
        inventory: GridInventory,
        layout: GridLayout,
        script: ClickScriptPlayer,
        sink: Option<JsonlSink>,
    ) -> Self {
        Self {
            inventory,
            layout,
            script,
            sink,
            tick: SimTick::ZERO,
        }
    }

    /// Step until the script is exhausted or `max_ticks` ticks have run.
    ///
    /// Idle ticks between steps are skipped rather than stepped through.
    pub fn run(&mut self, max_ticks: Option<u64>) -> Result<()> {
        while let Some(next) = self.script.next_tick() {
            if let Some(max) = max_ticks.filter(|&max| next.0 >= max) {
                self.tick = self.tick.max(SimTick(max));
                warn!(tick = self.tick.0, "Tick limit reached before click script finished");
                break;
            }
            self.tick = self.tick.max(next);
            self.step()?;
        }
        info!(ticks = self.tick.0, "Click script finished");
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        Ok(())
    }

    /// Apply every action scheduled for the current tick, then advance.
    pub fn step(&mut self) -> Result<()> {
        for action in self.script.drain_ready(self.tick) {
            self.apply(action)?;
        }
        self.tick = self.tick.advance(1);
        Ok(())
    }

    pub fn into_inventory(self) -> GridInventory {
        self.inventory
    }

    fn apply(&mut self, action: ScriptAction) -> Result<()> {
        match action {
            ScriptAction::Hold { item, amount } => {
                self.inventory.set_held(Slot::new(item, amount));
                self.record("hold", None, None)
            }
            ScriptAction::Click { button, slot } => self.click(button, slot),
            ScriptAction::ClickAt { button, x, y } => {
                match self.layout.slot_at(x, y, self.inventory.len()) {
                    Some(slot) => self.click(button, slot),
                    None => {
                        warn!(tick = self.tick.0, x, y, "Click outside the grid, discarding");
                        self.record("rejected", None, None)
                    }
                }
            }
        }
    }

    fn click(&mut self, button: ClickButton, slot: usize) -> Result<()> {
        let mode = button.mode();
        match self.inventory.deposit(mode, slot) {
            Ok(outcome) => {
                debug!(tick = self.tick.0, slot, ?mode, ?outcome, "Deposit");
                self.record(event_kind(mode), Some(slot), Some(outcome))
            }
            Err(err) => {
                warn!(tick = self.tick.0, %err, "Discarding click");
                self.record("rejected", Some(slot), None)
            }
        }
    }

    fn record(
        &mut self,
        kind: &str,
        slot: Option<usize>,
        outcome: Option<DepositOutcome>,
    ) -> Result<()> {
        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };
        sink.write(&EventRecord {
            tick: self.tick,
            kind,
            slot,
            outcome,
            held: *self.inventory.held(),
        })
    }
}

fn event_kind(mode: DepositMode) -> &'static str {
    match mode {
        DepositMode::All => "deposit_all",
        DepositMode::One => "deposit_one",
    }
}
