// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Opaque identifier of a bookable resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Creates a new resource id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A bookable unit, usually a room, which owns one row of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resource {
    /// The unique identifier.
    pub id: ResourceId,

    /// Display number, e.g. `"101"`.
    pub number: String,

    /// Category or type label, e.g. `"Deluxe"`.
    #[serde(default)]
    pub category: String,

    /// Floor label.
    #[serde(default)]
    pub floor: String,
}

impl Resource {
    /// Creates a resource.
    pub fn new(
        id: impl Into<ResourceId>,
        number: impl Into<String>,
        category: impl Into<String>,
        floor: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            category: category.into(),
            floor: floor.into(),
        }
    }
}
