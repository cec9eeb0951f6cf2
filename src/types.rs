//! Common types used throughout the Sage Pay client
//!
//! This module contains shared type definitions and small enums used
//! across the registration, transport and configuration modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Gateway Mode
// ============================================================================

/// Which gateway environment a transaction is registered against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Vendor simulator, no card networks involved
    #[default]
    Simulator,
    /// Test gateway with test card numbers
    Test,
    /// Production gateway
    Live,
}

impl Mode {
    /// Registration endpoint for this environment
    pub fn registration_url(self) -> &'static str {
        match self {
            Mode::Simulator => {
                "https://test.sagepay.com/Simulator/VSPServerGateway.asp?Service=VendorRegisterTx"
            }
            Mode::Test => "https://test.sagepay.com/gateway/service/vspserver-register.vsp",
            Mode::Live => "https://live.sagepay.com/gateway/service/vspserver-register.vsp",
        }
    }
}

// ============================================================================
// Transaction Type
// ============================================================================

/// Kind of transaction being registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxType {
    /// Immediate authorisation and capture
    Payment,
    /// Authorise now, release later
    Deferred,
    /// Validate the card only
    Authenticate,
}

impl TxType {
    /// Wire spelling used in the `TxType` form field
    pub fn as_wire(self) -> &'static str {
        match self {
            TxType::Payment => "PAYMENT",
            TxType::Deferred => "DEFERRED",
            TxType::Authenticate => "AUTHENTICATE",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ============================================================================
// Backoff Strategy
// ============================================================================

/// Backoff strategy between transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

impl BackoffType {
    /// Delay before retry number `attempt` (zero-based), capped at `max`
    pub fn delay(self, initial: Duration, max: Duration, attempt: u32) -> Duration {
        let delay = match self {
            BackoffType::Constant => initial,
            BackoffType::Linear => initial.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => initial.saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_urls_are_distinct() {
        assert_ne!(Mode::Test.registration_url(), Mode::Live.registration_url());
        assert!(Mode::Live
            .registration_url()
            .starts_with("https://live.sagepay.com/"));
        assert!(Mode::Simulator.registration_url().contains("Simulator"));
    }

    #[test]
    fn test_mode_serde() {
        let mode: Mode = serde_yaml::from_str("live").unwrap();
        assert_eq!(mode, Mode::Live);
        assert_eq!(Mode::default(), Mode::Simulator);
    }

    #[test]
    fn test_tx_type_wire() {
        assert_eq!(TxType::Payment.as_wire(), "PAYMENT");
        assert_eq!(TxType::Deferred.to_string(), "DEFERRED");
        let tx: TxType = serde_yaml::from_str("authenticate").unwrap();
        assert_eq!(tx, TxType::Authenticate);
    }

    #[test]
    fn test_backoff_delay() {
        let initial = Duration::from_millis(100);
        let max = Duration::from_millis(500);

        assert_eq!(BackoffType::Constant.delay(initial, max, 3), initial);
        assert_eq!(
            BackoffType::Linear.delay(initial, max, 2),
            Duration::from_millis(300)
        );
        assert_eq!(
            BackoffType::Exponential.delay(initial, max, 2),
            Duration::from_millis(400)
        );
        assert_eq!(BackoffType::Exponential.delay(initial, max, 40), max);
    }
}
