//! Translation tables
//!
//! Read-only maps from the gateway's raw field names and enumerated
//! values to canonical identifiers. Built once on first use and shared
//! by every decoder.

use crate::response::{AvsCv2Result, Field, FieldValue, MatchResult, Status, ThreeDSecureStatus};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Raw gateway field name to canonical field
pub static FIELD_NAMES: LazyLock<HashMap<&'static str, Field>> = LazyLock::new(|| {
    HashMap::from([
        ("VPSProtocol", Field::VpsProtocol),
        ("Status", Field::Status),
        ("StatusDetail", Field::StatusDetail),
        ("TxAuthNo", Field::TxAuthNo),
        ("MD", Field::Md),
        ("ACSURL", Field::AcsUrl),
        ("PAReq", Field::PaReq),
        ("AVSCV2", Field::AvsCv2),
        ("AddressResult", Field::AddressResult),
        ("PostCodeResult", Field::PostCodeResult),
        ("CV2Result", Field::Cv2Result),
        ("3DSecureStatus", Field::ThreeDSecureStatus),
        ("CAVV", Field::Cavv),
    ])
});

pub static STATUS_VALUES: LazyLock<HashMap<&'static str, Status>> = LazyLock::new(|| {
    HashMap::from([
        ("OK", Status::Ok),
        ("MALFORMED", Status::Malformed),
        ("INVALID", Status::Invalid),
        ("NOTAUTHED", Status::NotAuthed),
        ("REJECTED", Status::Rejected),
        ("3DAUTH", Status::ThreeDAuth),
        ("PPREDIRECT", Status::PpRedirect),
        ("AUTHENTICATED", Status::Authenticated),
        ("REGISTERED", Status::Registered),
        ("ERROR", Status::Error),
    ])
});

pub static AVS_CV2_VALUES: LazyLock<HashMap<&'static str, AvsCv2Result>> = LazyLock::new(|| {
    HashMap::from([
        ("ALL MATCH", AvsCv2Result::AllMatch),
        ("SECURITY CODE MATCH ONLY", AvsCv2Result::SecurityCodeMatchOnly),
        ("ADDRESS MATCH ONLY", AvsCv2Result::AddressMatchOnly),
        ("NO DATA MATCHES", AvsCv2Result::NoDataMatches),
        ("DATA NOT CHECKED", AvsCv2Result::DataNotChecked),
    ])
});

/// Shared by the address, post code and CV2 result fields
pub static MATCH_VALUES: LazyLock<HashMap<&'static str, MatchResult>> = LazyLock::new(|| {
    HashMap::from([
        ("NOTPROVIDED", MatchResult::NotProvided),
        ("NOTCHECKED", MatchResult::NotChecked),
        ("MATCHED", MatchResult::Matched),
        ("NOTMATCHED", MatchResult::NotMatched),
    ])
});

pub static THREE_D_SECURE_VALUES: LazyLock<HashMap<&'static str, ThreeDSecureStatus>> =
    LazyLock::new(|| {
        HashMap::from([
            ("OK", ThreeDSecureStatus::Ok),
            ("NOAUTH", ThreeDSecureStatus::NoAuth),
            ("CANTAUTH", ThreeDSecureStatus::CantAuth),
            ("NOTAUTHED", ThreeDSecureStatus::NotAuthed),
            ("ATTEMPTONLY", ThreeDSecureStatus::AttemptOnly),
            ("NOTCHECKED", ThreeDSecureStatus::NotChecked),
            ("INCOMPLETE", ThreeDSecureStatus::Incomplete),
            ("MALFORMED", ThreeDSecureStatus::Malformed),
            ("INVALID", ThreeDSecureStatus::Invalid),
            ("ERROR", ThreeDSecureStatus::Error),
        ])
    });

/// Look up the canonical field for a raw gateway key
pub fn field_for(key: &str) -> Option<Field> {
    FIELD_NAMES.get(key).copied()
}

/// How a raw value of a given field is decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Field has no value table; keep the raw text
    Raw(FieldValue),
    /// Value found in the field's table
    Mapped(FieldValue),
    /// Field has a table but the value is not in it
    Unmapped,
}

/// Translate a raw value through the field's value table, if it has one
pub fn translate(field: Field, raw: &str) -> Translation {
    let mapped = match field {
        Field::Status => STATUS_VALUES.get(raw).copied().map(FieldValue::Status),
        Field::AvsCv2 => AVS_CV2_VALUES.get(raw).copied().map(FieldValue::AvsCv2),
        Field::AddressResult | Field::PostCodeResult | Field::Cv2Result => {
            MATCH_VALUES.get(raw).copied().map(FieldValue::Match)
        }
        Field::ThreeDSecureStatus => THREE_D_SECURE_VALUES
            .get(raw)
            .copied()
            .map(FieldValue::ThreeDSecure),
        _ => return Translation::Raw(FieldValue::Text(raw.to_string())),
    };

    mapped.map_or(Translation::Unmapped, Translation::Mapped)
}
