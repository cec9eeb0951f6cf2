//! Registration building
//!
//! Merges computed defaults, configured defaults and caller options, then
//! validates the result into a request ready to post.

use super::types::{Address, RegistrationOptions, TransactionCode};
use crate::error::{Error, Result};
use crate::types::{Mode, TxType};
use rust_decimal::Decimal;
use tracing::debug;
use url::Url;

/// Protocol version sent when none is configured
pub const DEFAULT_PROTOCOL_VERSION: &str = "3.00";

/// Largest amount the gateway accepts in one transaction
const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

const MAX_VENDOR_LEN: usize = 15;
const MAX_DESCRIPTION_LEN: usize = 100;

// ============================================================================
// Registrar
// ============================================================================

/// Builds registrations on top of configured defaults
#[derive(Debug, Clone, Default)]
pub struct Registrar {
    defaults: RegistrationOptions,
}

impl Registrar {
    /// Create a registrar with the given defaults
    pub fn new(defaults: RegistrationOptions) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &RegistrationOptions {
        &self.defaults
    }

    /// Register a payment; the caller may still override the tx type
    pub fn payment(&self, options: RegistrationOptions) -> Result<TransactionRegistration> {
        let base = RegistrationOptions::new().tx_type(TxType::Payment);
        self.registration(base.merge(options))
    }

    /// Register a transaction
    ///
    /// Precedence, lowest first: a random vendor tx code and the caller's
    /// billing address as delivery address, then the configured defaults,
    /// then `options`.
    pub fn registration(&self, options: RegistrationOptions) -> Result<TransactionRegistration> {
        let computed = RegistrationOptions {
            vendor_tx_code: Some(TransactionCode::random()),
            delivery_address: options.billing_address.clone(),
            ..RegistrationOptions::default()
        };

        let merged = computed.merge(self.defaults.clone()).merge(options);
        TransactionRegistration::try_from(merged)
    }
}

// ============================================================================
// Transaction Registration
// ============================================================================

/// A validated outbound registration request
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRegistration {
    mode: Mode,
    tx_type: TxType,
    vendor: String,
    vendor_tx_code: TransactionCode,
    amount: Decimal,
    currency: String,
    description: String,
    notification_url: String,
    billing_address: Address,
    delivery_address: Address,
    customer_email: Option<String>,
    protocol_version: String,
}

impl TransactionRegistration {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn vendor_tx_code(&self) -> &TransactionCode {
        &self.vendor_tx_code
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn billing_address(&self) -> &Address {
        &self.billing_address
    }

    pub fn delivery_address(&self) -> &Address {
        &self.delivery_address
    }

    /// Gateway URL this registration is posted to
    pub fn endpoint_url(&self) -> &'static str {
        self.mode.registration_url()
    }

    /// Form body in the order the gateway documents it
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![
            ("VPSProtocol".to_string(), self.protocol_version.clone()),
            ("TxType".to_string(), self.tx_type.as_wire().to_string()),
            ("Vendor".to_string(), self.vendor.clone()),
            ("VendorTxCode".to_string(), self.vendor_tx_code.to_string()),
            ("Amount".to_string(), format!("{:.2}", self.amount)),
            ("Currency".to_string(), self.currency.clone()),
            ("Description".to_string(), self.description.clone()),
            ("NotificationURL".to_string(), self.notification_url.clone()),
        ];
        form.extend(self.billing_address.form_fields("Billing"));
        form.extend(self.delivery_address.form_fields("Delivery"));
        if let Some(email) = &self.customer_email {
            form.push(("CustomerEMail".to_string(), email.clone()));
        }
        form
    }
}

impl TryFrom<RegistrationOptions> for TransactionRegistration {
    type Error = Error;

    fn try_from(options: RegistrationOptions) -> Result<Self> {
        let mode = required(options.mode, "mode")?;
        let tx_type = required(options.tx_type, "tx_type")?;
        let vendor = required_text(options.vendor, "vendor")?;
        let vendor_tx_code = required(options.vendor_tx_code, "vendor_tx_code")?;
        let amount = required(options.amount, "amount")?;
        let currency = required_text(options.currency, "currency")?;
        let description = required_text(options.description, "description")?;
        let notification_url = required_text(options.notification_url, "notification_url")?;
        let billing_address = required(options.billing_address, "billing_address")?;
        let delivery_address = required(options.delivery_address, "delivery_address")?;

        if vendor.len() > MAX_VENDOR_LEN {
            return Err(Error::invalid_registration(
                "vendor",
                format!("must be at most {MAX_VENDOR_LEN} characters"),
            ));
        }
        validate_amount(amount)?;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(Error::invalid_registration(
                "currency",
                format!("'{currency}' is not an ISO 4217 code"),
            ));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(Error::invalid_registration(
                "description",
                format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
            ));
        }
        Url::parse(&notification_url)
            .map_err(|e| Error::invalid_registration("notification_url", e.to_string()))?;
        billing_address.validate("billing_address")?;
        delivery_address.validate("delivery_address")?;

        debug!(
            vendor_tx_code = %vendor_tx_code,
            tx_type = %tx_type,
            ?mode,
            "Built transaction registration"
        );

        Ok(Self {
            mode,
            tx_type,
            vendor,
            vendor_tx_code,
            amount,
            currency,
            description,
            notification_url,
            billing_address,
            delivery_address,
            customer_email: options.customer_email,
            protocol_version: options
                .protocol_version
                .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string()),
        })
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::missing_registration_field(field))
}

fn required_text(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::missing_registration_field(field)),
    }
}

fn validate_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO || amount > MAX_AMOUNT {
        return Err(Error::invalid_registration(
            "amount",
            format!("{amount} is outside 0.01 to {MAX_AMOUNT}"),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(Error::invalid_registration(
            "amount",
            format!("{amount} has more than two decimal places"),
        ));
    }
    Ok(())
}
