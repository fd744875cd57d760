// src/utils/http.rs

//! Blocking HTTP client utilities and request pacing.

use std::cell::Cell;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::FetchConfig;
use crate::error::Result;

/// Create a configured blocking HTTP client.
pub fn create_client(config: &FetchConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a URL and return the response body as text.
///
/// Non-2xx statuses are errors, matching timeouts and connection failures.
pub fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.text()?)
}

/// Politeness pacing shared by page and detail fetches.
///
/// The first call after a reset is free; every later call sleeps the
/// configured delay first. One pacer per category keeps the delay between
/// consecutive network calls and never after the last one.
#[derive(Debug)]
pub struct Pacer {
    delay: Duration,
    armed: Cell<bool>,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            armed: Cell::new(false),
        }
    }

    /// Forget the previous request; the next `pace` call will not sleep.
    pub fn reset(&self) {
        self.armed.set(false);
    }

    /// Sleep before a request if another request already went out.
    pub fn pace(&self) {
        if self.armed.replace(true) && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_pacer_first_call_is_free() {
        let pacer = Pacer::new(Duration::from_millis(50));
        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() < Duration::from_millis(40));
    }

    #[test]
    fn test_pacer_sleeps_between_calls() {
        let pacer = Pacer::new(Duration::from_millis(30));
        pacer.pace();
        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_pacer_reset_disarms() {
        let pacer = Pacer::new(Duration::from_millis(50));
        pacer.pace();
        pacer.reset();
        let start = Instant::now();
        pacer.pace();
        assert!(start.elapsed() < Duration::from_millis(40));
    }
}
