//! Locating class bytes: single `.class` files, exploded class directories and JARs.
//!
//! Nothing here parses classfiles; callers get `(entry name, bytes)` pairs and
//! decide what to do with unparsable ones.

use std::ffi::OsStr;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read zip {path}: {source}")]
    Zip {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// One class found in an input, keyed by its entry name relative to the root
/// (e.g. `com/example/Foo.class`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ClassEntry {
    /// Internal name implied by the entry path (`com/example/Foo`).
    pub fn internal_name(&self) -> Option<&str> {
        entry_to_internal_name(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    ClassFile,
    ClassDir,
    Jar,
}

#[derive(Clone, Debug)]
pub struct Archive {
    path: PathBuf,
}

impl Archive {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Anything that is neither a directory nor a `.class` file is opened as a zip.
    #[must_use]
    pub fn kind(&self) -> ArchiveKind {
        if self.path.is_dir() {
            ArchiveKind::ClassDir
        } else if self.path.extension() == Some(OsStr::new("class")) {
            ArchiveKind::ClassFile
        } else {
            ArchiveKind::Jar
        }
    }

    /// Read a single entry (e.g. `com/example/Foo.class`).
    ///
    /// Returns `Ok(None)` when the entry isn't present.
    pub fn read(&self, name: &str) -> Result<Option<Vec<u8>>, ArchiveError> {
        match self.kind() {
            ArchiveKind::ClassFile => {
                let matches = self
                    .path
                    .file_name()
                    .is_some_and(|file| Some(file) == Path::new(name).file_name());
                if !matches {
                    return Ok(None);
                }
                read_file(&self.path).map(Some)
            }
            ArchiveKind::ClassDir => {
                let candidate = self.path.join(name);
                if !candidate.is_file() {
                    return Ok(None);
                }
                read_file(&candidate).map(Some)
            }
            ArchiveKind::Jar => {
                let mut zip = self.open_zip()?;
                let mut entry = match zip.by_name(name) {
                    Ok(entry) => entry,
                    Err(zip::result::ZipError::FileNotFound) => return Ok(None),
                    Err(source) => {
                        return Err(ArchiveError::Zip {
                            path: self.path.display().to_string(),
                            source,
                        })
                    }
                };
                let mut bytes = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut bytes).map_err(|source| ArchiveError::Io {
                    path: format!("{}!/{name}", self.path.display()),
                    source,
                })?;
                Ok(Some(bytes))
            }
        }
    }

    /// All stub-worthy classes in this input, sorted by entry name.
    ///
    /// `module-info`, `package-info` and everything under `META-INF/` are skipped.
    pub fn class_entries(&self) -> Result<Vec<ClassEntry>, ArchiveError> {
        let mut entries = match self.kind() {
            ArchiveKind::ClassFile => {
                let name = self
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                vec![ClassEntry {
                    name,
                    bytes: read_file(&self.path)?,
                }]
            }
            ArchiveKind::ClassDir => self.dir_entries()?,
            ArchiveKind::Jar => self.jar_entries()?,
        };
        entries.retain(|entry| is_stub_candidate(&entry.name));
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(
            target: "jstub.archive",
            path = %self.path.display(),
            count = entries.len(),
            "collected class entries"
        );
        Ok(entries)
    }

    fn dir_entries(&self) -> Result<Vec<ClassEntry>, ArchiveError> {
        let mut out = Vec::new();
        for entry in walkdir::WalkDir::new(&self.path).follow_links(false) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension() != Some(OsStr::new("class")) {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.path)
                .unwrap_or(entry.path());
            let name = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push(ClassEntry {
                name,
                bytes: read_file(entry.path())?,
            });
        }
        Ok(out)
    }

    fn jar_entries(&self) -> Result<Vec<ClassEntry>, ArchiveError> {
        let mut zip = self.open_zip()?;
        let mut out = Vec::new();
        for i in 0..zip.len() {
            let mut file = zip.by_index(i).map_err(|source| ArchiveError::Zip {
                path: self.path.display().to_string(),
                source,
            })?;
            if !file.is_file() {
                continue;
            }
            let name = file.name().to_owned();
            if !name.ends_with(".class") || name.starts_with("META-INF/") {
                continue;
            }

            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes).map_err(|source| ArchiveError::Io {
                path: format!("{}!/{name}", self.path.display()),
                source,
            })?;
            out.push(ClassEntry { name, bytes });
        }
        Ok(out)
    }

    fn open_zip(&self) -> Result<ZipArchive<File>, ArchiveError> {
        let file = File::open(&self.path).map_err(|source| ArchiveError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        ZipArchive::new(file).map_err(|source| ArchiveError::Zip {
            path: self.path.display().to_string(),
            source,
        })
    }
}

pub fn entry_to_internal_name(entry_name: &str) -> Option<&str> {
    entry_name
        .strip_prefix('/')
        .unwrap_or(entry_name)
        .strip_suffix(".class")
}

fn is_stub_candidate(entry_name: &str) -> bool {
    match entry_to_internal_name(entry_name) {
        Some(internal) => {
            let simple = internal.rsplit('/').next().unwrap_or(internal);
            simple != "module-info" && simple != "package-info"
        }
        None => false,
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ArchiveError> {
    std::fs::read(path).map_err(|source| ArchiveError::Io {
        path: path.display().to_string(),
        source,
    })
}
