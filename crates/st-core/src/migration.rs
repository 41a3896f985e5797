//! Migration definition

use crate::migration_name::MigrationName;
use serde::{Deserialize, Serialize};

/// A named pair of statement lists that moves the store one step.
///
/// Each statement is an opaque block of store-native SQL that is executed on
/// its own. A block may open and close its own transaction; nothing wraps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Migration {
    /// Unique name, also the sort key
    pub name: MigrationName,

    /// Statements run when applying, in order
    #[serde(default)]
    pub forward: Vec<String>,

    /// Statements run when reversing, in order
    #[serde(default)]
    pub backward: Vec<String>,
}

impl Migration {
    /// Create a migration from its name and statement lists.
    pub fn new(
        name: impl Into<MigrationName>,
        forward: Vec<String>,
        backward: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            forward,
            backward,
        }
    }

    /// Statements for the given direction.
    pub fn statements(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }
}

/// Which way a plan moves through the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Apply pending migrations in ascending order
    Forward,
    /// Reverse applied migrations in descending order
    Backward,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "Forward"),
            Direction::Backward => write!(f, "Backward"),
        }
    }
}
