//! Renders a [`ClassDescriptor`] as body-less Java source.
//!
//! The output is a package line, a class header, a field section, a method
//! section and a closing `}`. Every method body is `{}`.

use crate::access::ClassKind;
use crate::classfile::ClassFile;
use crate::descriptor::{internal_to_binary, read_type, split_method_descriptor};
use crate::error::Result;
use crate::stub::{ClassDescriptor, FieldDescriptor, MethodDescriptor};

/// Decodes `bytes` and renders its stub.
///
/// Parse failures are not errors at this layer: the result is `(None, "")`
/// and the caller decides whether to skip, log or surface it.
pub fn generate(bytes: &[u8]) -> (Option<ClassDescriptor>, String) {
    match try_generate(bytes) {
        Ok((class, text)) => (Some(class), text),
        Err(err) => {
            tracing::debug!(
                target: "jstub.classfile",
                error = %err,
                len = bytes.len(),
                "failed to parse classfile; no stub generated"
            );
            (None, String::new())
        }
    }
}

/// Like [`generate`] but reports why the input could not be parsed.
pub fn try_generate(bytes: &[u8]) -> Result<(ClassDescriptor, String)> {
    let class = ClassFile::parse(bytes)?.into_descriptor();
    let text = render(&class);
    Ok((class, text))
}

pub fn render(class: &ClassDescriptor) -> String {
    let mut out = String::new();
    if let Some(package) = class.package_name() {
        out.push_str(&format!("package {package};\n"));
    }
    out.push_str(&header(class));

    match class.kind() {
        ClassKind::Enum => out.push_str(&enum_constants(&class.fields)),
        ClassKind::Class | ClassKind::Interface => {
            for field in &class.fields {
                out.push_str(&field_line(field));
            }
        }
    }

    let simple_name = class.simple_name();
    for method in &class.methods {
        if method.is_class_initializer() {
            continue;
        }
        if class.kind() == ClassKind::Enum && method.is_constructor() {
            continue;
        }
        match method_line(simple_name, method) {
            Some(line) => out.push_str(&line),
            None => tracing::trace!(
                target: "jstub.classfile",
                class = %class.internal_name,
                method = %method.name,
                descriptor = %method.descriptor,
                "skipping method with malformed descriptor"
            ),
        }
    }

    out.push('}');
    out
}

fn header(class: &ClassDescriptor) -> String {
    let kind = class.kind();
    let mut tokens: Vec<&str> = class.access.modifiers();
    tokens.push(kind.keyword());
    tokens.push(class.simple_name());
    let mut line = tokens.join(" ");

    if kind == ClassKind::Class {
        if let Some(super_class) = &class.super_class {
            line.push_str(" extends ");
            line.push_str(&internal_to_binary(super_class));
        }
    }

    let interfaces_keyword = match kind {
        ClassKind::Interface => Some(" extends "),
        ClassKind::Class => Some(" implements "),
        ClassKind::Enum => None,
    };
    if let Some(keyword) = interfaces_keyword.filter(|_| !class.interfaces.is_empty()) {
        let names: Vec<String> = class
            .interfaces
            .iter()
            .map(|name| internal_to_binary(name))
            .collect();
        line.push_str(keyword);
        line.push_str(&names.join(","));
    }

    line.push_str("{\n");
    line
}

/// `A, B, C;` with types and modifiers left out. Only `ACC_ENUM` fields are
/// constants; `$VALUES` and ordinary fields are not listed.
fn enum_constants(fields: &[FieldDescriptor]) -> String {
    let names: Vec<&str> = fields
        .iter()
        .filter(|field| field.access.is_enum)
        .map(|field| field.name.as_str())
        .collect();
    format!("{};\n", names.join(", "))
}

fn field_line(field: &FieldDescriptor) -> String {
    let ty = read_type(&field.descriptor).0.to_string();
    let mut tokens: Vec<&str> = field.access.field_modifiers();
    tokens.push(&ty);
    tokens.push(&field.name);
    format!("{};\n", tokens.join(" "))
}

fn method_line(class_name: &str, method: &MethodDescriptor) -> Option<String> {
    let signature = split_method_descriptor(&method.descriptor)?;
    let return_type = signature.return_type.to_string();

    let mut tokens: Vec<&str> = method.access.modifiers();
    if method.is_constructor() {
        tokens.push(class_name);
    } else {
        tokens.push(&return_type);
        tokens.push(&method.name);
    }

    // Indices are positions in the descriptor, so a dropped `void` still consumes one.
    let params: Vec<String> = signature
        .params
        .iter()
        .enumerate()
        .filter(|(_, ty)| !ty.is_void())
        .map(|(idx, ty)| format!("{ty} a{idx}"))
        .collect();

    Some(format!("{}({}){{}}\n", tokens.join(" "), params.join(",")))
}
