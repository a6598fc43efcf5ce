use std::time::{Duration, Instant};

use tracing::info;

/// Accumulated duration of one pipeline step over many frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTiming {
    pub name: &'static str,
    pub total: Duration,
    pub count: u64,
    pub max: Duration,
}

impl StepTiming {
    pub fn average(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        match u32::try_from(self.count) {
            Ok(count) => self.total / count,
            Err(_) => Duration::from_secs_f64(self.total.as_secs_f64() / self.count as f64),
        }
    }
}

/// Per-step timings in first-seen order.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: &'static str, duration: Duration) {
        match self.steps.iter_mut().find(|s| s.name == name) {
            Some(step) => {
                step.total += duration;
                step.count += 1;
                step.max = step.max.max(duration);
            }
            None => self.steps.push(StepTiming {
                name,
                total: duration,
                count: 1,
                max: duration,
            }),
        }
    }

    pub fn record(&mut self, timer: Timer) {
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.total).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<&StepTiming> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self) {
        let total = self.total_duration().as_secs_f64();
        for step in &self.steps {
            let percentage = if total > 0.0 {
                step.total.as_secs_f64() / total * 100.0
            } else {
                0.0
            };
            info!(
                step = step.name,
                count = step.count,
                avg_ms = step.average().as_secs_f64() * 1000.0,
                max_ms = step.max.as_secs_f64() * 1000.0,
                "{:.1}% of pipeline time",
                percentage
            );
        }
    }
}

pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn stop(self) -> (&'static str, Duration) {
        (self.name, self.start.elapsed())
    }
}
