/// Cooperative progress reporting for the batch segmentation pass.
///
/// The engine calls `update` at bounded intervals (each whole percent of
/// intervals processed) and polls `is_cancelled` at the same points, so a
/// caller driving a UI thread is never starved and can abandon a superseded
/// run without waiting for it to finish.
pub trait Progress {
    fn update(&mut self, percent: f32);

    fn is_cancelled(&self) -> bool {
        false
    }
}

/// No-op sink for callers that do not track progress.
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&mut self, _percent: f32) {}
}

/// Any closure taking a percentage works as a sink.
impl<F: FnMut(f32)> Progress for F {
    fn update(&mut self, percent: f32) {
        self(percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: f32| seen.push(p);
            Progress::update(&mut sink, 50.0);
            assert!(!Progress::is_cancelled(&sink));
        }
        assert_eq!(seen, vec![50.0]);
    }
}
