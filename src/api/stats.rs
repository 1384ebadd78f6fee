use crate::grpc::{ProtoLatencySummary, ProtoRecoveryStats, ProtoStatsReply};
use chrono::{DateTime, TimeZone, Utc};

/// Stats is a server's view of its own activity since it started.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub key_count: u64,
    pub total_reads: u64,
    pub total_writes: u64,
    pub total_deletes: u64,
    pub read_latency: LatencySummary,
    pub write_latency: LatencySummary,
    pub recovery: RecoveryStats,
    /// `None` if the server didn't report it.
    pub started_at: Option<DateTime<Utc>>,
}

/// Latencies in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LatencySummary {
    pub count: u64,
    pub avg_micros: f64,
    pub min_micros: u64,
    pub max_micros: u64,
}

/// What the server found replaying its log at startup.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RecoveryStats {
    pub recovered_entries: u64,
    pub replayed_batches: u64,
    pub corrupted_entries: u64,
}

impl From<ProtoStatsReply> for Stats {
    fn from(reply: ProtoStatsReply) -> Self {
        let started_at = if reply.started_at_unix_ms > 0 {
            Utc.timestamp_millis_opt(reply.started_at_unix_ms).single()
        } else {
            None
        };

        Stats {
            key_count: reply.key_count,
            total_reads: reply.total_reads,
            total_writes: reply.total_writes,
            total_deletes: reply.total_deletes,
            read_latency: reply.read_latency.map(LatencySummary::from).unwrap_or_default(),
            write_latency: reply.write_latency.map(LatencySummary::from).unwrap_or_default(),
            recovery: reply.recovery.map(RecoveryStats::from).unwrap_or_default(),
            started_at,
        }
    }
}

impl From<ProtoLatencySummary> for LatencySummary {
    fn from(summary: ProtoLatencySummary) -> Self {
        LatencySummary {
            count: summary.count,
            avg_micros: summary.avg_micros,
            min_micros: summary.min_micros,
            max_micros: summary.max_micros,
        }
    }
}

impl From<ProtoRecoveryStats> for RecoveryStats {
    fn from(recovery: ProtoRecoveryStats) -> Self {
        RecoveryStats {
            recovered_entries: recovery.recovered_entries,
            replayed_batches: recovery.replayed_batches,
            corrupted_entries: recovery.corrupted_entries,
        }
    }
}
