//! Configuration primitives for the LPS2X driver.

use crate::params::DataRate;

/// Default number of reset polls before giving up.
pub const DEFAULT_RESET_ATTEMPTS: u32 = 100;
/// Default delay between reset polls, in milliseconds.
pub const DEFAULT_RESET_POLL_INTERVAL_MS: u32 = 1;

/// How long [`Lps2x::reset`](crate::Lps2x::reset) waits for `SWRESET` to clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetPolicy {
    /// Poll at most `max_attempts` times, then report [`Error::ResetTimeout`](crate::Error::ResetTimeout).
    Bounded {
        /// Number of reads of `SWRESET` before giving up.
        max_attempts: u32,
    },
    /// Poll until the chip clears the bit. An unresponsive chip blocks forever.
    Unbounded,
}

/// User-facing configuration for the LPS2X sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Identity given to the pressure channel. Temperature uses `sensor_id + 1`.
    pub sensor_id: i32,
    /// Output data rate applied during initialization.
    pub data_rate: DataRate,
    /// Bound on the software reset poll.
    pub reset: ResetPolicy,
    /// Delay between software reset polls.
    pub reset_poll_interval_ms: u32,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is usable.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.reset == (ResetPolicy::Bounded { max_attempts: 0 }) {
            return Err(ConfigError::ZeroResetAttempts);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Sets the base sensor identity.
    pub fn sensor_id(mut self, sensor_id: i32) -> Self {
        self.config.sensor_id = sensor_id;
        self
    }

    /// Overrides the output data rate.
    pub fn data_rate(mut self, data_rate: DataRate) -> Self {
        self.config.data_rate = data_rate;
        self
    }

    /// Overrides the reset poll bound.
    pub fn reset(mut self, reset: ResetPolicy) -> Self {
        self.config.reset = reset;
        self
    }

    /// Overrides the delay between reset polls.
    pub fn reset_poll_interval_ms(mut self, interval_ms: u32) -> Self {
        self.config.reset_poll_interval_ms = interval_ms;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sensor_id: 0,
            data_rate: DataRate::Hz25,
            reset: ResetPolicy::Bounded {
                max_attempts: DEFAULT_RESET_ATTEMPTS,
            },
            reset_poll_interval_ms: DEFAULT_RESET_POLL_INTERVAL_MS,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A bounded reset policy must allow at least one poll.
    ZeroResetAttempts,
}
