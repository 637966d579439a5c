use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Steps of [`LineDetector::process`](crate::LineDetector::process), in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Crop,
    Extract,
    Track,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed_ms: f64,
}

/// Stage timings for one frame plus the end-to-end total.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Runs `f` and records its wall-clock time under `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.stages.push(StageTiming {
            stage,
            elapsed_ms: elapsed_ms(start),
        });
        out
    }

    /// Milliseconds recorded for `stage`, if it ran.
    pub fn stage_ms(&self, stage: Stage) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.elapsed_ms)
    }
}

#[inline]
pub(crate) fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_stages_in_call_order() {
        let mut t = TimingBreakdown::default();
        let n = t.time(Stage::Crop, || 3);
        t.time(Stage::Track, || ());
        assert_eq!(n, 3);
        let order: Vec<Stage> = t.stages.iter().map(|s| s.stage).collect();
        assert_eq!(order, vec![Stage::Crop, Stage::Track]);
        assert!(t.stage_ms(Stage::Crop).is_some_and(|ms| ms >= 0.0));
        assert!(t.stage_ms(Stage::Extract).is_none());
    }
}
