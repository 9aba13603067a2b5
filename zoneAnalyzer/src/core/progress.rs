/// Receives scan progress as a fraction in [0, 1] and a status line.
pub trait ProgressReporter {
    fn report(&mut self, fraction: f64, status: &str);
}

impl<F: FnMut(f64, &str)> ProgressReporter for F {
    fn report(&mut self, fraction: f64, status: &str) {
        self(fraction, status)
    }
}

/// Wraps an optional reporter so fractions never go backwards
pub(crate) struct ProgressTracker<'a> {
    reporter: Option<&'a mut dyn ProgressReporter>,
    last_fraction: f64,
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(reporter: Option<&'a mut dyn ProgressReporter>) -> Self {
        Self { reporter, last_fraction: 0.0 }
    }

    pub(crate) fn report(&mut self, fraction: f64, status: &str) {
        let fraction = fraction.clamp(0.0, 1.0).max(self.last_fraction);
        self.last_fraction = fraction;
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(fraction, status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractions_never_decrease() {
        let mut seen = Vec::new();
        let mut callback = |fraction: f64, _status: &str| seen.push(fraction);
        {
            let mut tracker = ProgressTracker::new(Some(&mut callback as &mut dyn ProgressReporter));
            tracker.report(0.2, "a");
            tracker.report(0.1, "b");
            tracker.report(1.5, "c");
        }
        assert_eq!(seen, vec![0.2, 0.2, 1.0]);
    }

    #[test]
    fn test_missing_reporter_is_noop() {
        let mut tracker = ProgressTracker::new(None);
        tracker.report(0.5, "nobody listening");
        assert_eq!(tracker.last_fraction, 0.5);
    }
}
