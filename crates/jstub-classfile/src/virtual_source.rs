use std::path::PathBuf;

use serde::Serialize;

use crate::builder::generate;

/// A stub registered as a synthetic source file under its package and class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualSource {
    /// Dotted package name; empty for the default package.
    pub package_name: String,
    /// Simple class name (nested classes keep their `$`).
    pub class_name: String,
    pub text: String,
}

impl VirtualSource {
    /// Returns `None` when `bytes` is not a parsable classfile.
    pub fn from_class_bytes(bytes: &[u8]) -> Option<Self> {
        let (class, text) = generate(bytes);
        let class = class?;
        Some(Self {
            package_name: class.package_name().unwrap_or_default(),
            class_name: class.simple_name().to_string(),
            text,
        })
    }

    /// Path of the synthetic `.java` file relative to a source root,
    /// e.g. `com/example/Foo.java`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package_name.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.java", self.class_name));
        path
    }
}
