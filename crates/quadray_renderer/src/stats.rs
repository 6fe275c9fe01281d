//! Trace counters, accumulated explicitly by the integrator.

use std::time::Duration;

/// Counters for one or more traced paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Camera paths started
    pub rays: u64,
    /// Packets of four paths started
    pub packets: u64,
    /// Surface hits
    pub hits: u64,
    /// Bounces that produced a new ray
    pub scatters: u64,
    /// Paths ended by a material absorbing the ray
    pub absorbed: u64,
    /// Paths that left the scene into the sky
    pub escaped: u64,
    /// Paths cut off by the depth limit
    pub depth_exhausted: u64,
}

impl TraceStats {
    /// Add another set of counters to this one.
    pub fn merge(&mut self, other: &TraceStats) {
        self.rays += other.rays;
        self.packets += other.packets;
        self.hits += other.hits;
        self.scatters += other.scatters;
        self.absorbed += other.absorbed;
        self.escaped += other.escaped;
        self.depth_exhausted += other.depth_exhausted;
    }

    /// Paths that have reached one of their three endings.
    pub fn finished_paths(&self) -> u64 {
        self.absorbed + self.escaped + self.depth_exhausted
    }

    /// Report the counters through the `log` facade.
    pub fn log_summary(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        let rate = if secs > 0.0 {
            self.rays as f64 / secs
        } else {
            0.0
        };

        log::info!(
            "Traced {} paths ({} packets) in {:.2?} ({:.0} paths/s)",
            self.rays,
            self.packets,
            elapsed,
            rate
        );
        log::info!(
            "Hits: {}, scatters: {}, absorbed: {}, escaped: {}, depth-limited: {}",
            self.hits,
            self.scatters,
            self.absorbed,
            self.escaped,
            self.depth_exhausted
        );
    }
}
