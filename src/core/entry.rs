//! The `Entry` record and the typed patches applied to it
//!
//! An `Entry` is one trip/billing line: who drove which vehicle on which date,
//! and the amounts to bill or pay for it. Every business field is optional at
//! the storage layer; only the identifier is guaranteed.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned identifier of an entry
///
/// Entries created here get a random UUID. Documents written by other clients
/// of the same collection carry a 12-byte MongoDB ObjectId instead; both forms
/// are accepted so such entries can still be listed, edited and deleted.
///
/// The textual form is a hyphenated UUID or 24 lowercase hex digits. JSON
/// bodies always carry that text under `_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryId {
    Uuid(Uuid),
    ObjectId([u8; 12]),
}

/// Text that is neither a UUID nor a 24-digit hex ObjectId
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid entry id '{value}'")]
pub struct ParseEntryIdError {
    pub value: String,
}

impl EntryId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self::Uuid(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EntryId {
    fn from(id: Uuid) -> Self {
        Self::Uuid(id)
    }
}

impl From<[u8; 12]> for EntryId {
    fn from(bytes: [u8; 12]) -> Self {
        Self::ObjectId(bytes)
    }
}

fn parse_object_id(s: &str) -> Option<[u8; 12]> {
    if s.len() != 24 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let mut bytes = [0u8; 12];
    for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks(2)) {
        let pair = std::str::from_utf8(pair).ok()?;
        *byte = u8::from_str_radix(pair, 16).ok()?;
    }
    Some(bytes)
}

impl FromStr for EntryId {
    type Err = ParseEntryIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(bytes) = parse_object_id(s) {
            return Ok(Self::ObjectId(bytes));
        }
        Uuid::parse_str(s)
            .map(Self::Uuid)
            .map_err(|_| ParseEntryIdError {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Uuid(id) => write!(f, "{}", id.hyphenated()),
            EntryId::ObjectId(bytes) => bytes.iter().try_for_each(|b| write!(f, "{:02x}", b)),
        }
    }
}

impl Serialize for EntryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// One trip/billing record
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: EntryId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,

    /// Free-form date text, never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cng_cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_salary: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl Entry {
    /// Create an empty entry with the given identifier
    pub fn new(id: EntryId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Build a new entry with a fresh identifier from a patch
    pub fn from_patch(patch: &EntryPatch) -> Self {
        let mut entry = Self::new(EntryId::new());
        entry.apply(patch);
        entry
    }

    /// Replace the fields named by the patch, leaving the rest untouched
    pub fn apply(&mut self, patch: &EntryPatch) {
        for (field, value) in patch.iter() {
            self.set(field, value);
        }
    }

    fn set(&mut self, field: EntryField, value: &FieldValue) {
        match value {
            FieldValue::Text(text) => {
                if let Some(slot) = self.text_slot(field) {
                    *slot = text.clone();
                }
            }
            FieldValue::Number(number) => {
                if let Some(slot) = self.number_slot(field) {
                    *slot = Some(*number);
                }
            }
            FieldValue::Flag(flag) => {
                if field == EntryField::Present {
                    self.present = Some(*flag);
                }
            }
        }
    }

    fn text_slot(&mut self, field: EntryField) -> Option<&mut Option<String>> {
        match field {
            EntryField::DriverName => Some(&mut self.driver_name),
            EntryField::VehicleNumber => Some(&mut self.vehicle_number),
            EntryField::Date => Some(&mut self.date),
            EntryField::ShiftTo => Some(&mut self.shift_to),
            EntryField::BillTo => Some(&mut self.bill_to),
            EntryField::Remark => Some(&mut self.remark),
            _ => None,
        }
    }

    fn number_slot(&mut self, field: EntryField) -> Option<&mut Option<f64>> {
        match field {
            EntryField::Advance => Some(&mut self.advance),
            EntryField::CngCost => Some(&mut self.cng_cost),
            EntryField::DriverSalary => Some(&mut self.driver_salary),
            EntryField::PartyRate => Some(&mut self.party_rate),
            EntryField::GstPercent => Some(&mut self.gst_percent),
            EntryField::VehicleRate => Some(&mut self.vehicle_rate),
            _ => None,
        }
    }
}

/// How a field is typed at the storage layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Flag,
}

/// The business fields of an [`Entry`], keyed by their wire names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryField {
    DriverName,
    VehicleNumber,
    Date,
    Present,
    Advance,
    CngCost,
    DriverSalary,
    ShiftTo,
    BillTo,
    PartyRate,
    GstPercent,
    VehicleRate,
    Remark,
}

impl EntryField {
    pub const ALL: [EntryField; 13] = [
        EntryField::DriverName,
        EntryField::VehicleNumber,
        EntryField::Date,
        EntryField::Present,
        EntryField::Advance,
        EntryField::CngCost,
        EntryField::DriverSalary,
        EntryField::ShiftTo,
        EntryField::BillTo,
        EntryField::PartyRate,
        EntryField::GstPercent,
        EntryField::VehicleRate,
        EntryField::Remark,
    ];

    /// Wire (JSON and document) key for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::DriverName => "driverName",
            EntryField::VehicleNumber => "vehicleNumber",
            EntryField::Date => "date",
            EntryField::Present => "present",
            EntryField::Advance => "advance",
            EntryField::CngCost => "cngCost",
            EntryField::DriverSalary => "driverSalary",
            EntryField::ShiftTo => "shiftTo",
            EntryField::BillTo => "billTo",
            EntryField::PartyRate => "partyRate",
            EntryField::GstPercent => "gstPercent",
            EntryField::VehicleRate => "vehicleRate",
            EntryField::Remark => "remark",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            EntryField::Present => FieldKind::Flag,
            EntryField::Advance
            | EntryField::CngCost
            | EntryField::DriverSalary
            | EntryField::PartyRate
            | EntryField::GstPercent
            | EntryField::VehicleRate => FieldKind::Number,
            _ => FieldKind::Text,
        }
    }

    /// Look a field up by its wire key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced value ready to be written into a field
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// `None` clears the field
    Text(Option<String>),
    /// May be NaN when the input could not be read as a number
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Flag(_) => FieldKind::Flag,
        }
    }
}

/// A set of field assignments produced by request coercion
///
/// Only fields present in the patch are written; everything else on the
/// target entry is left as it was.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryPatch {
    changes: BTreeMap<EntryField, FieldValue>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `field`, replacing any earlier assignment
    ///
    /// Values whose variant does not match the field's kind are ignored when
    /// the patch is applied.
    pub fn set(&mut self, field: EntryField, value: FieldValue) -> &mut Self {
        self.changes.insert(field, value);
        self
    }

    pub fn get(&self, field: EntryField) -> Option<&FieldValue> {
        self.changes.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryField, &FieldValue)> {
        self.changes.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Outcome of a bulk delete
///
/// Mirrors the document store's delete acknowledgement; there is no per-id
/// breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteSummary {
    pub fn deleted(count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count: count,
        }
    }
}
