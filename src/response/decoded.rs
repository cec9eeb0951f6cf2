//! Decoded gateway response
//!
//! Holds the translated fields of one reply and enforces that the
//! financially sensitive ones are only readable on an OK status.

use super::types::{
    Attributes, AvsCv2Result, Field, FieldValue, MatchResult, Status, ThreeDSecureStatus,
};
use crate::error::{Error, Result};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Label used for an absent status in access errors
const NO_STATUS: &str = "NONE";

/// One decoded gateway reply, immutable after construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    vps_protocol: Option<String>,
    status: Option<Status>,
    status_detail: Option<String>,
    tx_auth_no: Option<String>,
    md: Option<String>,
    acs_url: Option<String>,
    pa_req: Option<String>,
    avs_cv2: Option<AvsCv2Result>,
    address_result: Option<MatchResult>,
    post_code_result: Option<MatchResult>,
    cv2_result: Option<MatchResult>,
    three_d_secure_status: Option<ThreeDSecureStatus>,
    cavv: Option<String>,
    untranslated: BTreeMap<Field, String>,
    extensions: BTreeMap<String, String>,
}

impl Response {
    /// Build a response from decoded attributes
    ///
    /// Entries whose value does not fit the field's type are ignored.
    pub fn new(attributes: Attributes) -> Self {
        let Attributes {
            fields,
            untranslated,
            extensions,
        } = attributes;

        let mut response = Self {
            untranslated,
            extensions,
            ..Self::default()
        };

        for (field, value) in fields {
            let Some(value) = value else { continue };
            match (field, value) {
                (Field::VpsProtocol, FieldValue::Text(v)) => response.vps_protocol = Some(v),
                (Field::Status, FieldValue::Status(v)) => response.status = Some(v),
                (Field::StatusDetail, FieldValue::Text(v)) => response.status_detail = Some(v),
                (Field::TxAuthNo, FieldValue::Text(v)) => response.tx_auth_no = Some(v),
                (Field::Md, FieldValue::Text(v)) => response.md = Some(v),
                (Field::AcsUrl, FieldValue::Text(v)) => response.acs_url = Some(v),
                (Field::PaReq, FieldValue::Text(v)) => response.pa_req = Some(v),
                (Field::AvsCv2, FieldValue::AvsCv2(v)) => response.avs_cv2 = Some(v),
                (Field::AddressResult, FieldValue::Match(v)) => response.address_result = Some(v),
                (Field::PostCodeResult, FieldValue::Match(v)) => {
                    response.post_code_result = Some(v);
                }
                (Field::Cv2Result, FieldValue::Match(v)) => response.cv2_result = Some(v),
                (Field::ThreeDSecureStatus, FieldValue::ThreeDSecure(v)) => {
                    response.three_d_secure_status = Some(v);
                }
                (Field::Cavv, FieldValue::Text(v)) => response.cavv = Some(v),
                (field, value) => {
                    debug!(field = %field, ?value, "Ignoring attribute of unexpected type");
                }
            }
        }

        response
    }

    // ========================================================================
    // Ungated fields
    // ========================================================================

    /// Protocol version echoed by the gateway
    pub fn vps_protocol(&self) -> Option<&str> {
        self.vps_protocol.as_deref()
    }

    /// Canonical status, absent when missing or unrecognised
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Free-text explanation of the status
    pub fn status_detail(&self) -> Option<&str> {
        self.status_detail.as_deref()
    }

    // ========================================================================
    // Status predicates
    // ========================================================================

    pub fn is_ok(&self) -> bool {
        self.status == Some(Status::Ok)
    }

    pub fn is_failed(&self) -> bool {
        !self.is_ok()
    }

    pub fn is_invalid(&self) -> bool {
        self.status == Some(Status::Invalid)
    }

    pub fn is_malformed(&self) -> bool {
        self.status == Some(Status::Malformed)
    }

    pub fn is_error(&self) -> bool {
        self.status == Some(Status::Error)
    }

    // ========================================================================
    // Gated fields
    // ========================================================================

    /// Authorisation code from the acquiring bank
    pub fn tx_auth_no(&self) -> Result<Option<&str>> {
        self.gated(Field::TxAuthNo, self.tx_auth_no.as_deref())
    }

    /// Merchant data token for the 3-D Secure round trip
    pub fn md(&self) -> Result<Option<&str>> {
        self.gated(Field::Md, self.md.as_deref())
    }

    /// Access control server URL to redirect the cardholder to
    pub fn acs_url(&self) -> Result<Option<&str>> {
        self.gated(Field::AcsUrl, self.acs_url.as_deref())
    }

    /// Payer authentication request to forward to the ACS
    pub fn pa_req(&self) -> Result<Option<&str>> {
        self.gated(Field::PaReq, self.pa_req.as_deref())
    }

    pub fn avs_cv2(&self) -> Result<Option<AvsCv2Result>> {
        self.gated(Field::AvsCv2, self.avs_cv2)
    }

    pub fn address_result(&self) -> Result<Option<MatchResult>> {
        self.gated(Field::AddressResult, self.address_result)
    }

    pub fn post_code_result(&self) -> Result<Option<MatchResult>> {
        self.gated(Field::PostCodeResult, self.post_code_result)
    }

    pub fn cv2_result(&self) -> Result<Option<MatchResult>> {
        self.gated(Field::Cv2Result, self.cv2_result)
    }

    pub fn three_d_secure_status(&self) -> Result<Option<ThreeDSecureStatus>> {
        self.gated(Field::ThreeDSecureStatus, self.three_d_secure_status)
    }

    /// Cardholder authentication verification value
    pub fn cavv(&self) -> Result<Option<&str>> {
        self.gated(Field::Cavv, self.cavv.as_deref())
    }

    /// Read any field by identifier, applying the same gating as the accessors
    pub fn field(&self, field: Field) -> Result<Option<FieldValue>> {
        let text = |v: &Option<String>| v.clone().map(FieldValue::Text);
        let value = match field {
            Field::VpsProtocol => text(&self.vps_protocol),
            Field::Status => self.status.map(FieldValue::Status),
            Field::StatusDetail => text(&self.status_detail),
            Field::TxAuthNo => text(&self.tx_auth_no),
            Field::Md => text(&self.md),
            Field::AcsUrl => text(&self.acs_url),
            Field::PaReq => text(&self.pa_req),
            Field::AvsCv2 => self.avs_cv2.map(FieldValue::AvsCv2),
            Field::AddressResult => self.address_result.map(FieldValue::Match),
            Field::PostCodeResult => self.post_code_result.map(FieldValue::Match),
            Field::Cv2Result => self.cv2_result.map(FieldValue::Match),
            Field::ThreeDSecureStatus => self.three_d_secure_status.map(FieldValue::ThreeDSecure),
            Field::Cavv => text(&self.cavv),
        };

        if field.is_sensitive() {
            self.gated(field, value)
        } else {
            Ok(value)
        }
    }

    // ========================================================================
    // Compatibility side maps
    // ========================================================================

    /// Raw text of a field whose value had no translation
    ///
    /// Only populated when the decoder retains untranslated values.
    pub fn untranslated(&self, field: Field) -> Option<&str> {
        self.untranslated.get(&field).map(String::as_str)
    }

    /// Value of an unrecognised gateway key
    ///
    /// Only populated when the decoder retains unknown fields.
    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }

    pub fn extensions(&self) -> &BTreeMap<String, String> {
        &self.extensions
    }

    /// JSON view of the response; gated fields only appear on an OK status
    pub fn summary(&self) -> Value {
        let mut fields = Map::new();
        for field in Field::ALL {
            if let Ok(Some(value)) = self.field(field) {
                fields.insert(field.name().to_string(), json!(value));
            }
        }

        let mut summary = json!({
            "ok": self.is_ok(),
            "fields": fields,
        });
        if !self.untranslated.is_empty() {
            let untranslated: Map<String, Value> = self
                .untranslated
                .iter()
                .map(|(field, raw)| (field.name().to_string(), json!(raw)))
                .collect();
            summary["untranslated"] = Value::Object(untranslated);
        }
        if !self.extensions.is_empty() {
            summary["extensions"] = json!(self.extensions);
        }
        summary
    }

    fn status_label(&self) -> &'static str {
        self.status.map_or(NO_STATUS, Status::as_wire)
    }

    fn gated<T>(&self, field: Field, value: T) -> Result<T> {
        if self.is_ok() {
            return Ok(value);
        }
        let status = self.status_label();
        debug!(attribute = field.name(), status, "Denied read of gated field");
        Err(Error::access_denied(field.name(), status))
    }
}

impl From<Attributes> for Response {
    fn from(attributes: Attributes) -> Self {
        Self::new(attributes)
    }
}
