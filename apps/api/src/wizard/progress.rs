//! Cosmetic progress for the analyzing screen.
//!
//! The ticker only moves a step index forward on a fixed cadence. It never
//! completes an analysis and never navigates.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

pub const ANALYSIS_STEPS: [&str; 5] = [
    "Reading document structure...",
    "Extracting skills & experience...",
    "Comparing against job description...",
    "Calculating ATS score...",
    "Generating actionable insights...",
];

const LAST_STEP: usize = ANALYSIS_STEPS.len() - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Done,
    Active,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub label: &'static str,
    pub status: StepStatus,
}

/// Renders the step list for a given current index.
pub fn step_views(current: usize) -> Vec<StepView> {
    ANALYSIS_STEPS
        .iter()
        .enumerate()
        .map(|(index, label)| StepView {
            label,
            status: match index.cmp(&current) {
                std::cmp::Ordering::Less => StepStatus::Done,
                std::cmp::Ordering::Equal => StepStatus::Active,
                std::cmp::Ordering::Greater => StepStatus::Pending,
            },
        })
        .collect()
}

/// One ticker per analysis run. Dropping it stops the task.
pub struct ProgressTicker {
    step: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Starts at step 0 and advances once per `cadence`, stopping at the last step.
    pub fn start(cadence: Duration) -> Self {
        let step = Arc::new(AtomicUsize::new(0));
        let ticking = step.clone();

        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + cadence, cadence);
            loop {
                ticks.tick().await;
                let advanced = ticking.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |s| {
                    (s < LAST_STEP).then_some(s + 1)
                });
                if advanced.map_or(true, |prev| prev + 1 == LAST_STEP) {
                    break;
                }
            }
        });

        Self { step, handle }
    }

    pub fn current_step(&self) -> usize {
        self.step.load(Ordering::SeqCst)
    }

    /// Freezes the displayed step where it is.
    pub fn stop(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
