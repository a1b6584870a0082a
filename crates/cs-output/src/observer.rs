//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use cs_agent::AgentRegistry;
use cs_core::{SimConfig, Tick};
use cs_sim::{SimObserver, StepStats};

use crate::row::{AgentSnapshotRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes step summaries and cell snapshots to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.simulate()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:             W,
    tick_duration_secs: u32,
    last_error:         Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for the
    /// tick-to-hours conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_secs: config.tick_duration_secs,
            last_error:         None,
        }
    }

    /// Take the stored write error (if any) after `sim.simulate()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn hours_after(&self, tick: Tick) -> f64 {
        (tick.0 + 1) as f64 * self.tick_duration_secs as f64 / 3600.0
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, tick: Tick, stats: &StepStats, _registry: &AgentRegistry) {
        let row = StepSummaryRow {
            tick:      tick.0,
            hours:     self.hours_after(tick),
            live:      stats.live as u64,
            divisions: stats.divisions as u64,
            removals:  stats.removals as u64,
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, registry: &AgentRegistry) {
        let store = &registry.store;
        let rows: Vec<AgentSnapshotRow> = registry
            .live_ids()
            .map(|agent| {
                let i = agent.index();
                let p = store.position[i];
                AgentSnapshotRow {
                    agent_id: agent.0,
                    tick:     tick.0,
                    x:        p.x,
                    y:        p.y,
                    z:        p.z,
                    diameter: store.diameter[i],
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
