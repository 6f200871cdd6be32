use crate::detect::{DetectCtx, DetectorSet, Firing, Lookback};
use crate::pipeline::{PipelineError, ShutdownHandle};
use crate::record::{LogRecord, parse_line};
use crate::rotate::RotatingWriter;
use crate::snapshot::{SnapshotTask, SnapshotTrigger};
use chrono::NaiveDateTime;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Running totals for one stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    pub lines: u64,
    /// Lines at or before the start cutoff.
    pub skipped: u64,
    /// Lines stored as fallback records.
    pub unparsed: u64,
    pub firings: u64,
    pub snapshots: u64,
}

/// What happened to one line.
#[derive(Debug, Default)]
pub struct LineOutcome {
    pub skipped: bool,
    pub firings: Vec<Firing>,
    /// Captures started because of this line.
    pub snapshots: Vec<SnapshotTask>,
}

/// Why [`run_stream`] returned.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StreamEnd {
    Eof,
    Shutdown,
    ReadError,
}

/// Per-line state of the stream loop.
///
/// Only one prior record is ever kept, for the detectors that look back.
pub struct Pipeline {
    writer: RotatingWriter,
    detectors: DetectorSet,
    trigger: SnapshotTrigger,
    cooldown: Duration,
    skip_before: Option<NaiveDateTime>,

    prev_record: Option<LogRecord>,
    prev_raw: String,
    prev_minute: Option<String>,

    mirror: Box<dyn Write + Send>,
    stats: StreamStats,
}

impl Pipeline {
    pub fn new(
        writer: RotatingWriter,
        detectors: DetectorSet,
        trigger: SnapshotTrigger,
        cooldown: Duration,
    ) -> Self {
        Self {
            writer,
            detectors,
            trigger,
            cooldown,
            skip_before: None,
            prev_record: None,
            prev_raw: String::new(),
            prev_minute: None,
            mirror: Box::new(io::stdout()),
            stats: StreamStats::default(),
        }
    }

    /// Drop parsed records stamped at or before `cutoff`.
    pub fn skip_before(mut self, cutoff: Option<NaiveDateTime>) -> Self {
        self.skip_before = cutoff;
        self
    }

    /// Where raw lines are echoed. Defaults to stdout.
    pub fn mirror(mut self, mirror: Box<dyn Write + Send>) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn trigger(&self) -> &SnapshotTrigger {
        &self.trigger
    }

    pub fn writer(&self) -> &RotatingWriter {
        &self.writer
    }

    /// Flush and close the current output file.
    pub fn close(&mut self) {
        self.writer.close();
    }

    /// Handle one line, without its terminator.
    ///
    /// Only a failure to open or write an output file is returned; everything
    /// else is logged and the line moves on.
    pub fn process_line(&mut self, raw: &str) -> Result<LineOutcome, PipelineError> {
        self.stats.lines += 1;
        self.echo(raw);

        let record = match parse_line(raw) {
            Some(record) => record,
            None => {
                self.stats.unparsed += 1;
                LogRecord::fallback(raw)
            }
        };

        if self.is_before_start(&record) {
            self.stats.skipped += 1;
            return Ok(LineOutcome {
                skipped: true,
                ..LineOutcome::default()
            });
        }

        let minute = record.minute_key();
        let minute_rolled = self.prev_minute.as_ref().is_some_and(|m| *m != minute);

        self.writer.write(&record)?;

        let mut outcome = LineOutcome::default();
        if self.trigger.state().is_enabled() {
            let ctx = DetectCtx {
                record: &record,
                raw,
                previous: self.prev_record.as_ref().map(|record| Lookback {
                    record,
                    raw: &self.prev_raw,
                }),
                minute_rolled,
            };
            outcome.firings = self.detectors.evaluate(&ctx);
        }

        for firing in &outcome.firings {
            self.stats.firings += 1;

            if !self.trigger.cooldown_elapsed(self.cooldown) {
                tracing::debug!(detector = firing.detector, "snapshot cooldown active");
                continue;
            }

            if let Some(task) = self.trigger.trigger(firing.reason.as_deref()) {
                self.stats.snapshots += 1;
                outcome.snapshots.push(task);
            }
        }

        self.prev_minute = Some(minute);
        self.prev_raw.clear();
        self.prev_raw.push_str(raw);
        self.prev_record = Some(record);

        Ok(outcome)
    }

    fn is_before_start(&self, record: &LogRecord) -> bool {
        match self.skip_before {
            Some(cutoff) => record.is_parsed() && record.timestamp <= cutoff,
            None => false,
        }
    }

    fn echo(&mut self, raw: &str) {
        let res = writeln!(self.mirror, "{raw}").and_then(|_| self.mirror.flush());
        if let Err(e) = res {
            tracing::trace!(error = %e, "mirror write failed");
        }
    }
}

/// Feed lines from `reader` into `pipeline` until end of input, a read error,
/// or shutdown. Bytes that are not UTF-8 are replaced, never rejected.
pub async fn run_stream<R>(
    mut reader: R,
    pipeline: &mut Pipeline,
    shutdown: &ShutdownHandle,
) -> Result<StreamEnd, PipelineError>
where
    R: AsyncBufRead + Unpin,
{
    let mut stop = shutdown.subscribe();
    let mut buf = Vec::with_capacity(1024);

    loop {
        buf.clear();

        let read = tokio::select! {
            biased;
            _ = stop.wait_for(|stopped| *stopped) => return Ok(StreamEnd::Shutdown),
            read = reader.read_until(b'\n', &mut buf) => read,
        };

        match read {
            Ok(0) => {
                tracing::info!("capture stream ended");
                return Ok(StreamEnd::Eof);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "capture stream read failed");
                return Ok(StreamEnd::ReadError);
            }
        }

        let line = String::from_utf8_lossy(&buf);
        pipeline.process_line(line.trim_end_matches(['\n', '\r']))?;
    }
}
