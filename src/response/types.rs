//! Canonical response symbols
//!
//! Closed enumerations the gateway's uppercase result strings are
//! translated into, plus the canonical field identifiers and the
//! attribute map a response is built from.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ============================================================================
// Status
// ============================================================================

/// Overall transaction status reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Malformed,
    Invalid,
    NotAuthed,
    Rejected,
    ThreeDAuth,
    PpRedirect,
    Authenticated,
    Registered,
    Error,
}

impl Status {
    /// Gateway spelling of this status
    pub fn as_wire(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Malformed => "MALFORMED",
            Status::Invalid => "INVALID",
            Status::NotAuthed => "NOTAUTHED",
            Status::Rejected => "REJECTED",
            Status::ThreeDAuth => "3DAUTH",
            Status::PpRedirect => "PPREDIRECT",
            Status::Authenticated => "AUTHENTICATED",
            Status::Registered => "REGISTERED",
            Status::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ============================================================================
// AVS / CV2
// ============================================================================

/// Combined address-verification and security-code check result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvsCv2Result {
    AllMatch,
    SecurityCodeMatchOnly,
    AddressMatchOnly,
    NoDataMatches,
    DataNotChecked,
}

/// Outcome of a single address, post code or CV2 check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    NotProvided,
    NotChecked,
    Matched,
    NotMatched,
}

// ============================================================================
// 3-D Secure
// ============================================================================

/// Result of the 3-D Secure cardholder authentication step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreeDSecureStatus {
    Ok,
    NoAuth,
    CantAuth,
    NotAuthed,
    AttemptOnly,
    NotChecked,
    Incomplete,
    Malformed,
    Invalid,
    Error,
}

// ============================================================================
// Fields
// ============================================================================

/// Canonical identifier of a decoded response field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    VpsProtocol,
    Status,
    StatusDetail,
    TxAuthNo,
    Md,
    AcsUrl,
    PaReq,
    AvsCv2,
    AddressResult,
    PostCodeResult,
    Cv2Result,
    ThreeDSecureStatus,
    Cavv,
}

impl Field {
    /// Every canonical field, in wire order
    pub const ALL: [Field; 13] = [
        Field::VpsProtocol,
        Field::Status,
        Field::StatusDetail,
        Field::TxAuthNo,
        Field::Md,
        Field::AcsUrl,
        Field::PaReq,
        Field::AvsCv2,
        Field::AddressResult,
        Field::PostCodeResult,
        Field::Cv2Result,
        Field::ThreeDSecureStatus,
        Field::Cavv,
    ];

    /// Attribute name used in accessors and error messages
    pub fn name(self) -> &'static str {
        match self {
            Field::VpsProtocol => "vps_protocol",
            Field::Status => "status",
            Field::StatusDetail => "status_detail",
            Field::TxAuthNo => "tx_auth_no",
            Field::Md => "md",
            Field::AcsUrl => "acs_url",
            Field::PaReq => "pa_req",
            Field::AvsCv2 => "avs_cv2",
            Field::AddressResult => "address_result",
            Field::PostCodeResult => "post_code_result",
            Field::Cv2Result => "cv2_result",
            Field::ThreeDSecureStatus => "three_d_secure_status",
            Field::Cavv => "cavv",
        }
    }

    /// Whether reading this field requires an OK status
    pub fn is_sensitive(self) -> bool {
        !matches!(
            self,
            Field::VpsProtocol | Field::Status | Field::StatusDetail
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded field value: raw text or a translated symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Status(Status),
    AvsCv2(AvsCv2Result),
    Match(MatchResult),
    ThreeDSecure(ThreeDSecureStatus),
}

// ============================================================================
// Attributes
// ============================================================================

/// Decoded attribute map a [`Response`](super::Response) is constructed from
///
/// An entry holding `None` records a recognised field whose value could
/// not be translated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub(crate) fields: HashMap<Field, Option<FieldValue>>,
    pub(crate) untranslated: BTreeMap<Field, String>,
    pub(crate) extensions: BTreeMap<String, String>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value and untranslated raw text
    pub fn insert(&mut self, field: Field, value: Option<FieldValue>) {
        self.untranslated.remove(&field);
        self.fields.insert(field, value);
    }

    /// Builder-style [`insert`](Self::insert) of a present value
    #[must_use]
    pub fn with(mut self, field: Field, value: FieldValue) -> Self {
        self.insert(field, Some(value));
        self
    }

    /// Keep the raw text of a value that had no table entry
    pub fn insert_untranslated(&mut self, field: Field, raw: impl Into<String>) {
        self.untranslated.insert(field, raw.into());
    }

    /// Keep a pair whose key is not a known gateway field
    pub fn insert_extension(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extensions.insert(key.into(), value.into());
    }

    /// Look up a field entry
    pub fn get(&self, field: Field) -> Option<&Option<FieldValue>> {
        self.fields.get(&field)
    }

    /// Number of recognised fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no recognised field was decoded
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
