use std::{
    fmt::Display,
    time::{Duration, Instant},
};

pub mod config;
pub mod controls;
pub mod core;
pub mod pipeline;
pub mod runner;
pub mod scroll;
pub mod surface;
pub mod util;

pub use config::{create_clap_command, RunConfig};
pub use core::geometry;
pub use core::Camera;
pub use core::Color;
pub use core::Scene;
pub use runner::{SceneRunner, StopHandle};
pub use util::format_mat4;

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Frame timing, summarised once per report interval.
pub struct Metrics {
    pub frame_time: Duration,
    pub fps_counter: u32,
    pub fps_update_timer: Instant,
    pub current_fps: f32,
    pub frame_times: Vec<f32>,
    min_ms: f32,
    max_ms: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
impl Metrics {
    pub fn new() -> Self {
        Self {
            frame_time: Duration::from_secs_f32(1.0 / 60.0),
            fps_counter: 0,
            fps_update_timer: Instant::now(),
            current_fps: 0.0,
            frame_times: Vec::with_capacity(120),
            min_ms: 0.0,
            max_ms: 0.0,
        }
    }

    /// Record one frame. Returns true when a fresh summary is ready to log.
    pub fn update(&mut self, frame_delta: Duration) -> bool {
        self.fps_counter += 1;
        self.frame_times.push(frame_delta.as_secs_f32() * 1000.0);

        let elapsed = self.fps_update_timer.elapsed();
        if elapsed < REPORT_INTERVAL {
            return false;
        }

        self.current_fps = self.fps_counter as f32 / elapsed.as_secs_f32();
        let total: f32 = self.frame_times.iter().sum();
        self.frame_time = Duration::from_secs_f32(total / self.frame_times.len() as f32 / 1000.0);
        self.min_ms = self.frame_times.iter().copied().reduce(f32::min).unwrap_or(0.0);
        self.max_ms = self.frame_times.iter().copied().reduce(f32::max).unwrap_or(0.0);

        self.fps_counter = 0;
        self.frame_times.clear();
        self.fps_update_timer = Instant::now();
        true
    }
}
impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.2} | Avg: {:.2}ms | Min: {:.2}ms | Max: {:.2}ms",
            self.current_fps,
            self.frame_time.as_secs_f32() * 1000.0,
            self.min_ms,
            self.max_ms
        )
    }
}

pub static DEBUG_PIPELINE: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

// Per-frame pipeline tracing, too chatty for the log
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        if $crate::DEBUG_PIPELINE.load(std::sync::atomic::Ordering::Relaxed) {
            println!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_wait_for_the_report_interval() {
        let mut metrics = Metrics::new();
        assert!(!metrics.update(Duration::from_millis(16)));
        assert_eq!(metrics.fps_counter, 1);
    }

    #[test]
    fn metrics_summarise_and_reset() {
        let mut metrics = Metrics::new();
        let Some(past) = Instant::now().checked_sub(Duration::from_secs(2)) else {
            return;
        };
        assert!(!metrics.update(Duration::from_millis(10)));
        metrics.fps_update_timer = past;
        assert!(metrics.update(Duration::from_millis(30)));

        assert!(metrics.current_fps > 0.0);
        assert!((metrics.frame_time.as_secs_f32() * 1000.0 - 20.0).abs() < 0.1);
        assert_eq!(metrics.fps_counter, 0);
        assert!(metrics.frame_times.is_empty());
        assert!(metrics.to_string().contains("Min: 10.00ms | Max: 30.00ms"));
    }
}
