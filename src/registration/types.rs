//! Registration option types
//!
//! Loosely-typed inputs merged from defaults and caller options before
//! being validated into a [`TransactionRegistration`](super::TransactionRegistration).

use crate::error::{Error, Result};
use crate::types::{Mode, TxType};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static VENDOR_TX_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9{}._-]{1,40}$").unwrap());

// ============================================================================
// Transaction Code
// ============================================================================

/// Vendor-unique transaction reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionCode(String);

impl TransactionCode {
    /// Validate a caller-supplied code
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if !VENDOR_TX_CODE.is_match(&code) {
            return Err(Error::invalid_registration(
                "vendor_tx_code",
                format!("'{code}' must be 1-40 characters of A-Z a-z 0-9 {{ }} . _ -"),
            ));
        }
        Ok(Self(code))
    }

    /// Generate a fresh random code
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TransactionCode {
    type Error = Error;

    fn try_from(code: String) -> Result<Self> {
        Self::new(code)
    }
}

impl From<TransactionCode> for String {
    fn from(code: TransactionCode) -> Self {
        code.0
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Address
// ============================================================================

/// Billing or delivery address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub first_names: String,
    pub surname: String,
    pub address_1: String,
    #[serde(default)]
    pub address_2: Option<String>,
    pub city: String,
    pub post_code: String,
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    /// US state code, only sent for US addresses
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Address {
    /// Check required parts, naming failures under `prefix`
    pub(crate) fn validate(&self, prefix: &str) -> Result<()> {
        let required = [
            ("first_names", &self.first_names),
            ("surname", &self.surname),
            ("address_1", &self.address_1),
            ("city", &self.city),
            ("post_code", &self.post_code),
            ("country", &self.country),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::missing_registration_field(format!(
                    "{prefix}.{name}"
                )));
            }
        }

        if self.country.len() != 2 || !self.country.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::invalid_registration(
                format!("{prefix}.country"),
                format!("'{}' is not a two-letter country code", self.country),
            ));
        }
        Ok(())
    }

    /// Form fields for this address, keyed `<wire_prefix><Part>`
    pub(crate) fn form_fields(&self, wire_prefix: &str) -> Vec<(String, String)> {
        let mut fields = vec![
            (format!("{wire_prefix}Surname"), self.surname.clone()),
            (format!("{wire_prefix}Firstnames"), self.first_names.clone()),
            (format!("{wire_prefix}Address1"), self.address_1.clone()),
        ];
        if let Some(line) = &self.address_2 {
            fields.push((format!("{wire_prefix}Address2"), line.clone()));
        }
        fields.push((format!("{wire_prefix}City"), self.city.clone()));
        fields.push((format!("{wire_prefix}PostCode"), self.post_code.clone()));
        fields.push((format!("{wire_prefix}Country"), self.country.clone()));
        if let Some(state) = &self.state {
            fields.push((format!("{wire_prefix}State"), state.clone()));
        }
        if let Some(phone) = &self.phone {
            fields.push((format!("{wire_prefix}Phone"), phone.clone()));
        }
        fields
    }
}

// ============================================================================
// Registration Options
// ============================================================================

/// Named registration options, every one optional until validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationOptions {
    pub mode: Option<Mode>,
    pub tx_type: Option<TxType>,
    pub vendor: Option<String>,
    pub vendor_tx_code: Option<TransactionCode>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub notification_url: Option<String>,
    pub billing_address: Option<Address>,
    pub delivery_address: Option<Address>,
    pub customer_email: Option<String>,
    pub protocol_version: Option<String>,
}

impl RegistrationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `overrides` on top of these options
    ///
    /// Values present in `overrides` win; absent ones fall back to `self`.
    #[must_use]
    pub fn merge(self, overrides: RegistrationOptions) -> Self {
        Self {
            mode: overrides.mode.or(self.mode),
            tx_type: overrides.tx_type.or(self.tx_type),
            vendor: overrides.vendor.or(self.vendor),
            vendor_tx_code: overrides.vendor_tx_code.or(self.vendor_tx_code),
            amount: overrides.amount.or(self.amount),
            currency: overrides.currency.or(self.currency),
            description: overrides.description.or(self.description),
            notification_url: overrides.notification_url.or(self.notification_url),
            billing_address: overrides.billing_address.or(self.billing_address),
            delivery_address: overrides.delivery_address.or(self.delivery_address),
            customer_email: overrides.customer_email.or(self.customer_email),
            protocol_version: overrides.protocol_version.or(self.protocol_version),
        }
    }

    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn tx_type(mut self, tx_type: TxType) -> Self {
        self.tx_type = Some(tx_type);
        self
    }

    #[must_use]
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    #[must_use]
    pub fn vendor_tx_code(mut self, code: TransactionCode) -> Self {
        self.vendor_tx_code = Some(code);
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn notification_url(mut self, url: impl Into<String>) -> Self {
        self.notification_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }

    #[must_use]
    pub fn delivery_address(mut self, address: Address) -> Self {
        self.delivery_address = Some(address);
        self
    }

    #[must_use]
    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }
}
