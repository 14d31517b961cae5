use crate::ports::Generator;
use greenplan_core::error::{GreenplanError, Result};
use std::thread;
use std::time::Duration;

/// Retries a generator a bounded number of times with a fixed delay
pub struct RetryingGenerator<G> {
    inner: G,
    max_attempts: u32,
    delay: Duration,
}

impl<G: Generator> RetryingGenerator<G> {
    /// Wrap `inner`; `max_attempts` is raised to at least one
    pub fn new(inner: G, max_attempts: u32, delay: Duration) -> Self {
        Self { inner, max_attempts: max_attempts.max(1), delay }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: Generator> Generator for RetryingGenerator<G> {
    fn generate(&self, prompt: &str, context: &[&str]) -> Result<String> {
        let mut last_error: Option<GreenplanError> = None;

        for attempt in 1..=self.max_attempts {
            match self.inner.generate(prompt, context) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "Generator attempt failed"
                    );
                    last_error = Some(e);
                    if attempt < self.max_attempts && !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GreenplanError::GeneratorUnavailable {
            reason: "no attempt was made".to_string(),
            remediation: "Configure max_attempts of at least 1".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails a fixed number of times, then succeeds
    struct FlakyGenerator {
        failures: usize,
        calls: AtomicUsize,
    }

    impl FlakyGenerator {
        fn new(failures: usize) -> Self {
            Self { failures, calls: AtomicUsize::new(0) }
        }
    }

    impl Generator for FlakyGenerator {
        fn generate(&self, _prompt: &str, _context: &[&str]) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(GreenplanError::GeneratorUnavailable {
                    reason: format!("call {} failed", call),
                    remediation: "wait".to_string(),
                })
            } else {
                Ok("ok".to_string())
            }
        }
    }

    #[test]
    fn test_succeeds_after_transient_failures() {
        let generator = RetryingGenerator::new(FlakyGenerator::new(2), 3, Duration::ZERO);
        assert_eq!(generator.generate("p", &[]).unwrap(), "ok");
        assert_eq!(generator.into_inner().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_last_error_is_returned() {
        let generator = RetryingGenerator::new(FlakyGenerator::new(5), 3, Duration::ZERO);
        let err = generator.generate("p", &[]).unwrap_err();
        assert!(err.to_string().contains("call 2 failed"));
        assert_eq!(generator.into_inner().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let generator = RetryingGenerator::new(FlakyGenerator::new(0), 0, Duration::ZERO);
        assert_eq!(generator.max_attempts(), 1);
        assert!(generator.generate("p", &[]).is_ok());
    }

    #[test]
    fn test_delay_between_attempts() {
        let delay = Duration::from_millis(20);
        let generator = RetryingGenerator::new(FlakyGenerator::new(1), 2, delay);
        let started = std::time::Instant::now();
        assert!(generator.generate("p", &[]).is_ok());
        assert!(started.elapsed() >= delay);
    }
}
