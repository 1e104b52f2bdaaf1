//! Filterable record attributes

use std::fmt;

use super::info::InfoRecord;

/// A secondary attribute records can be filtered by.
///
/// All three are lowercased at write time, so filtering is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// `InfoType`
    Category,
    /// `Uploader`
    Submitter,
    /// `Department`
    Group,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Category, Attribute::Submitter, Attribute::Group];

    /// Field name in the stored JSON document
    pub fn field_name(&self) -> &'static str {
        match self {
            Attribute::Category => "InfoType",
            Attribute::Submitter => "Uploader",
            Attribute::Group => "Department",
        }
    }

    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Category => "category",
            Attribute::Submitter => "submitter",
            Attribute::Group => "group",
        }
    }

    /// Reads this attribute from a record
    pub fn value_of<'r>(&self, record: &'r InfoRecord) -> &'r str {
        match self {
            Attribute::Category => &record.category,
            Attribute::Submitter => &record.submitter,
            Attribute::Group => &record.group,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
