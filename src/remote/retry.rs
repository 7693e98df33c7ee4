use crate::error::Result;

/// Outcome of one attempt: finished, or worth another try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    Done(T),
    Retry(T),
}

/// Bounded immediate retry. Errors are returned as-is, never retried; only an
/// attempt that reports `Retry` is repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 1 }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self { max_retries: 0 }
    }

    /// Run `op` (given the zero-based attempt number) until it is `Done` or
    /// the retries are spent; the last `Retry` value is returned then.
    pub fn run<T>(&self, mut op: impl FnMut(u32) -> Result<Attempt<T>>) -> Result<T> {
        let mut attempt = 0;
        loop {
            match op(attempt)? {
                Attempt::Done(value) => return Ok(value),
                Attempt::Retry(value) if attempt >= self.max_retries => return Ok(value),
                Attempt::Retry(_) => {
                    log::debug!("attempt {} asked for a retry", attempt + 1);
                    attempt += 1;
                }
            }
        }
    }
}
