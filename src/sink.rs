//! Sink — the consumer end of a tracking run.
//!
//! [`drain`] reads a merged result stream until it closes. Records go to a
//! [`Sink`]; parse errors are logged and counted, never persisted. A sink
//! failure on one record is logged and counted and draining carries on.

use std::io::Write;

use logfan_core::{LogRecord, TrackingResult};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Somewhere to persist parsed records.
pub trait Sink {
    fn persist(&mut self, record: &LogRecord) -> anyhow::Result<()>;

    fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes one JSON document per record, newline separated.
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

impl<W: Write> Sink for JsonLinesSink<W> {
    fn persist(&mut self, record: &LogRecord) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Counters reported once a stream has been drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    pub persisted: u64,
    pub parse_errors: u64,
    pub sink_errors: u64,
}

/// Consume `results` until every tracker has stopped.
///
/// The sink is flushed whenever the stream has nothing buffered and once
/// more at the end.
pub async fn drain<S>(results: &mut mpsc::Receiver<TrackingResult>, sink: &mut S) -> DrainStats
where
    S: Sink + ?Sized,
{
    let mut stats = DrainStats::default();

    while let Some(result) = results.recv().await {
        match result {
            Ok(record) => match sink.persist(&record) {
                Ok(()) => stats.persisted += 1,
                Err(err) => {
                    stats.sink_errors += 1;
                    error!(path = %record.source_path.display(), error = %err, "failed to persist record");
                }
            },
            Err(err) => {
                stats.parse_errors += 1;
                warn!(
                    format = %err.format(),
                    path = %err.source_path().display(),
                    error = %err,
                    "unparseable line"
                );
            }
        }

        if results.is_empty() {
            flush(sink);
        }
    }

    flush(sink);
    stats
}

fn flush<S: Sink + ?Sized>(sink: &mut S) {
    if let Err(err) = sink.flush() {
        error!(error = %err, "failed to flush sink");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use logfan_core::{parser, LogFormat};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    struct FailingSink;

    impl Sink for FailingSink {
        fn persist(&mut self, _record: &LogRecord) -> anyhow::Result<()> {
            anyhow::bail!("store unavailable")
        }
    }

    fn results(lines: &[&str]) -> mpsc::Receiver<TrackingResult> {
        let (tx, rx) = mpsc::channel(lines.len().max(1));
        for line in lines {
            tx.try_send(parser::parse(line, Path::new("/tmp/a.log"), LogFormat::FirstFormat))
                .unwrap();
        }
        rx
    }

    #[tokio::test]
    async fn records_are_written_and_errors_counted() {
        let mut rx = results(&["Feb 1, 2018 at 3:04:05pm (UTC) | hello", "garbage"]);
        let mut sink = JsonLinesSink::new(Vec::new());

        let stats = drain(&mut rx, &mut sink).await;
        assert_eq!(
            stats,
            DrainStats {
                persisted: 1,
                parse_errors: 1,
                sink_errors: 0
            }
        );

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            written,
            "{\"log_time\":\"2018-02-01T15:04:05Z\",\"log_msg\":\"hello\",\"file_name\":\"/tmp/a.log\",\"log_format\":\"first_format\"}\n"
        );
    }

    #[tokio::test]
    async fn sink_failure_does_not_stop_draining() {
        let mut rx = results(&[
            "Feb 1, 2018 at 3:04:05pm (UTC) | one",
            "Feb 1, 2018 at 3:04:06pm (UTC) | two",
        ]);
        let stats = drain(&mut rx, &mut FailingSink).await;
        assert_eq!(stats.sink_errors, 2);
        assert_eq!(stats.persisted, 0);
    }
}
