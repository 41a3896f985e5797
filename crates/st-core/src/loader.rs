//! Migration discovery from a directory-like hierarchy
//!
//! Each migration is a top-level directory whose name follows
//! [`crate::naming`]. Inside it, every `*.sql` file whose name contains
//! `forward` (or `backward`) contributes one statement, in file-name order:
//!
//! ```text
//! migrations/
//!   00001_init/forward.sql
//!   00001_init/backward.sql
//!   00002_users/forward_a.sql
//!   00002_users/forward_b.sql
//!   00002_users/backward.sql
//! ```

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::migration::Migration;
use crate::naming::is_migration_name;
use std::path::{Path, PathBuf};

/// A directory-like hierarchy of migration folders.
pub trait MigrationSource {
    /// Names of all top-level directories, in any order.
    fn directories(&self) -> CoreResult<Vec<String>>;

    /// Names of the files directly inside `dir`, in any order.
    fn files(&self, dir: &str) -> CoreResult<Vec<String>>;

    /// Contents of `dir/file`.
    fn read(&self, dir: &str, file: &str) -> CoreResult<String>;

    /// Human-readable location for log messages.
    fn describe(&self) -> String;
}

/// Sorted names of the directories in `source` that look like migrations.
pub fn migration_dirs(source: &impl MigrationSource) -> CoreResult<Vec<String>> {
    let mut names: Vec<String> = source
        .directories()?
        .into_iter()
        .filter(|name| {
            let keep = is_migration_name(name);
            if !keep {
                log::debug!("Skipping non-migration directory '{}'", name);
            }
            keep
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Read one migration directory into a [`Migration`].
pub fn load_migration(source: &impl MigrationSource, dir: &str) -> CoreResult<Migration> {
    let mut files: Vec<String> = source
        .files(dir)?
        .into_iter()
        .filter(|f| f.ends_with(".sql"))
        .collect();
    files.sort();

    let mut forward = Vec::new();
    let mut backward = Vec::new();
    for file in &files {
        if file.contains("forward") {
            forward.push(source.read(dir, file)?);
        } else if file.contains("backward") {
            backward.push(source.read(dir, file)?);
        } else {
            log::warn!("Ignoring '{}/{}': not a forward or backward file", dir, file);
        }
    }

    if forward.is_empty() {
        log::warn!("Migration '{}' has no forward statements", dir);
    }

    Ok(Migration::new(dir, forward, backward))
}

/// Load every migration in `source` into a [`Catalog`].
pub fn load_catalog(source: &impl MigrationSource) -> CoreResult<Catalog> {
    let dirs = migration_dirs(source)?;
    log::debug!(
        "Loading {} migrations from {}",
        dirs.len(),
        source.describe()
    );
    let migrations = dirs
        .iter()
        .map(|dir| load_migration(source, dir))
        .collect::<CoreResult<Vec<_>>>()?;
    Catalog::new(migrations)
}

fn io_err(path: &Path, source: std::io::Error) -> CoreError {
    CoreError::IoWithPath {
        path: path.display().to_string(),
        source,
    }
}

/// Migrations stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn list(&self, dir: &Path, want_dirs: bool) -> CoreResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
            let entry = entry.map_err(|e| io_err(dir, e))?;
            let path = entry.path();
            if path.is_dir() != want_dirs {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => log::warn!("Skipping non UTF-8 entry {:?}", raw),
            }
        }
        Ok(names)
    }
}

impl MigrationSource for DirSource {
    fn directories(&self) -> CoreResult<Vec<String>> {
        if !self.root.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: self.root.display().to_string(),
            });
        }
        self.list(&self.root, true)
    }

    fn files(&self, dir: &str) -> CoreResult<Vec<String>> {
        self.list(&self.root.join(dir), false)
    }

    fn read(&self, dir: &str, file: &str) -> CoreResult<String> {
        let path = self.root.join(dir).join(file);
        let bytes = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        String::from_utf8(bytes).map_err(|_| CoreError::InvalidSql {
            path: path.display().to_string(),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Migrations compiled into the binary with `rust-embed`.
///
/// ```ignore
/// #[derive(rust_embed::RustEmbed)]
/// #[folder = "migrations"]
/// struct Migrations;
///
/// let catalog = load_catalog(&EmbeddedSource::<Migrations>::new())?;
/// ```
#[cfg(feature = "embed")]
pub struct EmbeddedSource<E> {
    _embed: std::marker::PhantomData<E>,
}

#[cfg(feature = "embed")]
impl<E: rust_embed::RustEmbed> EmbeddedSource<E> {
    pub fn new() -> Self {
        Self {
            _embed: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "embed")]
impl<E: rust_embed::RustEmbed> Default for EmbeddedSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embed")]
impl<E: rust_embed::RustEmbed> MigrationSource for EmbeddedSource<E> {
    fn directories(&self) -> CoreResult<Vec<String>> {
        let mut dirs: Vec<String> = E::iter()
            .filter_map(|path| path.split_once('/').map(|(dir, _)| dir.to_string()))
            .collect();
        dirs.sort();
        dirs.dedup();
        Ok(dirs)
    }

    fn files(&self, dir: &str) -> CoreResult<Vec<String>> {
        let prefix = format!("{dir}/");
        Ok(E::iter()
            .filter_map(|path| {
                path.strip_prefix(prefix.as_str())
                    .filter(|rest| !rest.contains('/'))
                    .map(str::to_string)
            })
            .collect())
    }

    fn read(&self, dir: &str, file: &str) -> CoreResult<String> {
        let path = format!("{dir}/{file}");
        let embedded = E::get(&path).ok_or_else(|| CoreError::IoWithPath {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not embedded"),
        })?;
        String::from_utf8(embedded.data.into_owned()).map_err(|_| CoreError::InvalidSql { path })
    }

    fn describe(&self) -> String {
        format!("embedded {}", std::any::type_name::<E>())
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
