//! Session records and best-effort persistence
//!
//! The engine never stores anything itself. Callers hand a [`SessionRecord`]
//! to a [`SessionSink`]; a failing sink is logged and the spin result is
//! still returned to the caller.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::spin::SpinResult;
use crate::tumble::TumbleResult;
use crate::win_tiers::WinTier;

/// Serializable summary of one spin, shaped for a history store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub bet_amount: f64,
    pub grid: Grid,
    pub tumbles_count: usize,
    pub tumbles: Vec<TumbleResult>,
    pub total_win: f64,
    pub base_win: f64,
    pub multiplier_win: f64,
    pub scatter_count: usize,
    pub free_spins_active: bool,
    pub free_spins_remain: u32,
    pub global_multiplier: f64,
    pub win_tier: WinTier,
}

impl SessionRecord {
    pub fn from_spin(result: &SpinResult) -> Self {
        Self {
            bet_amount: result.bet,
            grid: result.grid,
            tumbles_count: result.tumbles.len(),
            tumbles: result.tumbles.clone(),
            total_win: result.total_win,
            base_win: result.base_win,
            multiplier_win: result.multiplier_win(),
            scatter_count: result.scatter_count,
            free_spins_active: result.free_spins_awarded > 0,
            free_spins_remain: result.free_spins_awarded,
            global_multiplier: result.total_multiplier,
            win_tier: result.win_tier,
        }
    }
}

/// Session sink failures (never part of the engine's own errors)
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Record rejected: {0}")]
    Rejected(String),
}

/// Destination for session records
pub trait SessionSink {
    fn record(&mut self, record: &SessionRecord) -> Result<(), SinkError>;
}

/// In-memory sink
impl SessionSink for Vec<SessionRecord> {
    fn record(&mut self, record: &SessionRecord) -> Result<(), SinkError> {
        self.push(record.clone());
        Ok(())
    }
}

/// Writes one JSON document per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SessionSink for JsonLinesSink<W> {
    fn record(&mut self, record: &SessionRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Persist a spin without letting sink failures reach the caller
///
/// Returns `true` if the sink accepted the record.
pub fn record_best_effort<S: SessionSink + ?Sized>(sink: &mut S, result: &SpinResult) -> bool {
    match sink.record(&SessionRecord::from_spin(result)) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to save session: {e}");
            false
        }
    }
}
