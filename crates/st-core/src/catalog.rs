//! The ordered, immutable set of known migrations

use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use crate::migration_name::MigrationName;
use std::collections::HashMap;

/// Every migration known to the engine, sorted ascending by name.
///
/// Built once from loader output. Names are unique, so `index_of` is a total
/// function over the catalog's contents.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    migrations: Vec<Migration>,
    positions: HashMap<MigrationName, usize>,
}

impl Catalog {
    /// Build a catalog, sorting by name and rejecting duplicates.
    pub fn new(mut migrations: Vec<Migration>) -> CoreResult<Self> {
        migrations.sort_by(|a, b| a.name.cmp(&b.name));

        let mut positions = HashMap::with_capacity(migrations.len());
        for (idx, migration) in migrations.iter().enumerate() {
            if migration.name.is_empty() {
                return Err(CoreError::EmptyMigrationName);
            }
            if positions.insert(migration.name.clone(), idx).is_some() {
                return Err(CoreError::DuplicateMigration {
                    name: migration.name.to_string(),
                });
            }
        }

        Ok(Self {
            migrations,
            positions,
        })
    }

    /// Find a migration by name.
    pub fn lookup(&self, name: &str) -> Option<&Migration> {
        self.index_of(name).map(|idx| &self.migrations[idx])
    }

    /// Position of a migration in ascending order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// All migrations, ascending by name.
    pub fn ordered(&self) -> &[Migration] {
        &self.migrations
    }

    /// The last migration in the catalog, if any.
    pub fn latest(&self) -> Option<&Migration> {
        self.migrations.last()
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
