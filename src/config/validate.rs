//! Config validation logic.

use anyhow::{bail, Result};
use std::time::Duration;
use tracing::debug;

use super::types::Config;

/// Longest base delay we accept; five retries at this base already block for minutes.
const MAX_DELAY: Duration = Duration::from_secs(60);

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.remove.retries == 0 {
            bail!("retries must be at least 1");
        }
        if self.remove.delay > MAX_DELAY {
            bail!(
                "retry delay {}ms exceeds the maximum of {}ms",
                self.remove.delay.as_millis(),
                MAX_DELAY.as_millis()
            );
        }
        if let Some(log) = &self.log_file
            && log.as_os_str().is_empty()
        {
            bail!("log_file must not be empty");
        }
        debug!(
            retries = self.remove.retries,
            delay_ms = self.remove.delay.as_millis() as u64,
            ignore_errors = self.remove.ignore_errors,
            policy = ?self.policy,
            "Config validated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_retries_rejected() {
        let mut cfg = Config::default();
        cfg.remove.retries = 0;
        assert!(cfg.validate().unwrap_err().to_string().contains("at least 1"));
    }

    #[test]
    fn huge_delay_rejected() {
        let mut cfg = Config::default();
        cfg.remove.delay = Duration::from_secs(600);
        assert!(cfg.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
