//! Java stubs from compiled classfiles.
//!
//! [`generate`] turns the bytes of one `.class` file into a body-less Java
//! declaration (package, header, fields, method signatures) that a Java front
//! end can parse for symbol resolution when no source is available.

#![forbid(unsafe_code)]

mod access;
mod builder;
mod classfile;
mod constant_pool;
mod descriptor;
mod error;
mod reader;
mod stub;
mod virtual_source;

pub use crate::access::{
    AccessFlags, ClassKind, Visibility, ACC_ABSTRACT, ACC_ENUM, ACC_FINAL, ACC_INTERFACE,
    ACC_PRIVATE, ACC_PROTECTED, ACC_PUBLIC, ACC_STATIC, ACC_SYNTHETIC,
};
pub use crate::builder::{generate, render, try_generate};
pub use crate::classfile::{ClassFile, ClassMember, MIN_MAJOR_VERSION};
pub use crate::descriptor::{
    decode_type, internal_to_binary, read_params, read_type, split_method_descriptor, JavaType,
    MethodSignature,
};
pub use crate::error::{Error, Result};
pub use crate::stub::{ClassDescriptor, FieldDescriptor, MethodDescriptor};
pub use crate::virtual_source::VirtualSource;
