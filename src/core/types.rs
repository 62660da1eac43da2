use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use strum::Display;

/// Identifier of a filter facet in the catalog (e.g. `status`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct FilterId(String);

/// Identifier of a concrete value of a filter facet (e.g. `active`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub struct SubItemId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(FilterId);
string_id!(SubItemId);

/// Comparison operator between a filter and its selected sub-items
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
pub enum FilterCondition {
    #[default]
    #[strum(serialize = "is")]
    Is,
    #[strum(serialize = "is not")]
    IsNot,
    #[strum(serialize = "is any of")]
    IsAnyOf,
}

impl FilterCondition {
    /// Every condition in picker order
    pub const ALL: [FilterCondition; 3] = [
        FilterCondition::Is,
        FilterCondition::IsNot,
        FilterCondition::IsAnyOf,
    ];

    /// True for the conditions that only make sense with one sub-item
    pub fn fits_single(&self) -> bool {
        !matches!(self, FilterCondition::IsAnyOf)
    }

    /// Condition picked automatically for a given number of selected sub-items
    pub fn derived_for(count: usize) -> Self {
        if count > 1 {
            FilterCondition::IsAnyOf
        } else {
            FilterCondition::Is
        }
    }
}

/// Coarse bucket of a sub-item count; an explicit condition survives only
/// while the bucket stays the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountClass {
    Empty,
    Single,
    Multiple,
}

impl CountClass {
    pub fn of(count: usize) -> Self {
        match count {
            0 => CountClass::Empty,
            1 => CountClass::Single,
            _ => CountClass::Multiple,
        }
    }
}
