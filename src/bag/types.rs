//! Small value types shared by live bags, snapshots and bag type configs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Size classification of a bag.
///
/// Serialized by variant name (`"Small"`, `"Medium"`, ...), which is also
/// how saved data and bag type configs spell it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContainerSize {
    #[default]
    Small,
    Medium,
    Large,
    Giant,
    Massive,
}

impl ContainerSize {
    /// Every size, smallest first.
    pub const ALL: [Self; 5] = [
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Giant,
        Self::Massive,
    ];

    /// Canonical name, as written in saved data.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
            Self::Giant => "Giant",
            Self::Massive => "Massive",
        }
    }
}

impl fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a rucksack grabs picked-up items before or after other bags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutofillPriority {
    #[default]
    Low,
    High,
}

/// Property a rucksack sorts its contents by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortingProperty {
    Time,
    DisplayName,
    Category,
    Quantity,
    SingleValue,
    StackValue,
    #[default]
    Similarity,
}

/// Direction of a rucksack sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortingOrder {
    #[default]
    Ascending,
    Descending,
}

/// Rectangular region into the icon atlas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True for the zeroed placeholder rectangle.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.x == 0 && self.y == 0 && self.width == 0 && self.height == 0
    }
}
