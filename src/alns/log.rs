//! Per-iteration log records, their sinks, and the clock that stamps them.

use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Column names of the iteration log, in output order.
pub const CSV_HEADER: &str =
    "iter,time_s,cost,best_cost,rpd,delta_rpd,accepted,temp,destroy_op,repair_op,feasible,num_edges";

/// One row of the iteration log.
///
/// Field order is the column order of [`CSV_HEADER`]; downstream tooling
/// depends on it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationRecord {
    pub iter: usize,
    pub time_s: f64,
    /// Cost of the current solution.
    pub cost: f64,
    pub best_cost: f64,
    /// Relative percentage difference of `cost` to the reference cost.
    pub rpd: f64,
    /// Change in `rpd` since the previous record.
    pub delta_rpd: f64,
    pub accepted: bool,
    /// Temperature used for this iteration's acceptance decision.
    pub temp: f64,
    pub destroy_op: String,
    pub repair_op: String,
    /// Feasibility of the current solution.
    pub feasible: bool,
    /// Edge count of the current solution.
    pub num_edges: usize,
}

impl IterationRecord {
    /// Comma-separated row without a trailing newline; flags print as 0/1.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{}",
            self.iter,
            self.time_s,
            self.cost,
            self.best_cost,
            self.rpd,
            self.delta_rpd,
            u8::from(self.accepted),
            self.temp,
            self.destroy_op,
            self.repair_op,
            u8::from(self.feasible),
            self.num_edges,
        )
    }
}

/// Append-only destination for iteration records.
pub trait IterationSink {
    /// Writes one record. Implementations must make it durable before
    /// returning.
    fn record(&mut self, record: &IterationRecord) -> io::Result<()>;
}

/// In-memory sink.
impl IterationSink for Vec<IterationRecord> {
    fn record(&mut self, record: &IterationRecord) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// CSV sink: header on creation, one flushed row per record.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    /// Wraps `writer` and writes the header line.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{CSV_HEADER}")?;
        writer.flush()?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl CsvSink<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> IterationSink for CsvSink<W> {
    fn record(&mut self, record: &IterationRecord) -> io::Result<()> {
        writeln!(self.writer, "{}", record.to_csv_row())?;
        self.writer.flush()
    }
}

/// Source of elapsed seconds since the search started.
pub trait Clock {
    fn elapsed_secs(&self) -> f64;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for Stopwatch {
    fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Deterministic clock: each reading advances time by a fixed step.
///
/// Makes log records reproducible byte for byte.
#[derive(Debug, Clone)]
pub struct StepClock {
    step: f64,
    reads: Cell<u64>,
}

impl StepClock {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            reads: Cell::new(0),
        }
    }
}

impl Clock for StepClock {
    fn elapsed_secs(&self) -> f64 {
        let n = self.reads.get();
        self.reads.set(n + 1);
        n as f64 * self.step
    }
}
