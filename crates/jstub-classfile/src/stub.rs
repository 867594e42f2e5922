use serde::Serialize;

use crate::access::{AccessFlags, ClassKind};
use crate::classfile::{ClassFile, ClassMember};
use crate::descriptor::internal_to_binary;

/// The API surface of one compiled class, decoded from its classfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDescriptor {
    /// Internal name, e.g. `com/example/Foo$Bar`.
    pub internal_name: String,
    pub access: AccessFlags,
    /// `None` for `java/lang/Object` (and `module-info`).
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub access: AccessFlags,
    /// JVM field descriptor, e.g. `I` or `Ljava/lang/String;`.
    pub descriptor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub access: AccessFlags,
    /// JVM method descriptor, e.g. `(Ljava/lang/String;)V`.
    pub descriptor: String,
}

impl ClassDescriptor {
    pub fn from_classfile(class: ClassFile) -> Self {
        Self {
            internal_name: class.this_class,
            access: AccessFlags::from_bits(class.access_flags),
            super_class: class.super_class,
            interfaces: class.interfaces,
            fields: class.fields.into_iter().map(FieldDescriptor::from).collect(),
            methods: class.methods.into_iter().map(MethodDescriptor::from).collect(),
        }
    }

    pub fn kind(&self) -> ClassKind {
        self.access.class_kind()
    }

    /// Last path segment of the internal name. Nested classes keep their `$`.
    pub fn simple_name(&self) -> &str {
        self.internal_name
            .rsplit_once('/')
            .map(|(_, s)| s)
            .unwrap_or(&self.internal_name)
    }

    /// Dotted package name, or `None` for the default package.
    pub fn package_name(&self) -> Option<String> {
        self.internal_name
            .rsplit_once('/')
            .map(|(p, _)| internal_to_binary(p))
    }

    /// Dotted binary name, e.g. `com.example.Foo$Bar`.
    pub fn binary_name(&self) -> String {
        internal_to_binary(&self.internal_name)
    }
}

impl From<ClassMember> for FieldDescriptor {
    fn from(member: ClassMember) -> Self {
        Self {
            name: member.name,
            access: AccessFlags::from_bits(member.access_flags),
            descriptor: member.descriptor,
        }
    }
}

impl From<ClassMember> for MethodDescriptor {
    fn from(member: ClassMember) -> Self {
        Self {
            name: member.name,
            access: AccessFlags::from_bits(member.access_flags),
            descriptor: member.descriptor,
        }
    }
}

impl MethodDescriptor {
    pub fn is_constructor(&self) -> bool {
        self.name == "<init>"
    }

    pub fn is_class_initializer(&self) -> bool {
        self.name == "<clinit>"
    }
}

impl ClassFile {
    pub fn into_descriptor(self) -> ClassDescriptor {
        ClassDescriptor::from_classfile(self)
    }
}
