//! Field declarations of the schedule override resource.
//!
//! Every field is set at creation time only. There is no update path: a
//! changed field means the override is destroyed and created again.

pub const FIELD_USER: &str = "user";
pub const FIELD_START: &str = "start";
pub const FIELD_END: &str = "end";
pub const FIELD_SCHEDULE: &str = "schedule";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub force_new: bool,
}

impl FieldSchema {
    const fn immutable_string(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            required: true,
            force_new: true,
        }
    }
}

pub const OVERRIDE_FIELDS: [FieldSchema; 4] = [
    FieldSchema::immutable_string(FIELD_USER),
    FieldSchema::immutable_string(FIELD_START),
    FieldSchema::immutable_string(FIELD_END),
    FieldSchema::immutable_string(FIELD_SCHEDULE),
];
