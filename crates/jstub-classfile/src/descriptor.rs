//! Best-effort decoding of JVM field and method descriptors into Java type names.
//!
//! Decoding never fails: an unknown or truncated token decodes to `void` so a
//! single bad member cannot abort stub generation for a whole class.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Dotted binary name, e.g. `java.lang.String` or `com.example.Outer$Inner`.
    Object(String),
    /// `dims` levels of `[]` around a non-array element type.
    Array { dims: u8, element: Box<JavaType> },
}

impl JavaType {
    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Void)
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Void => f.write_str("void"),
            JavaType::Boolean => f.write_str("boolean"),
            JavaType::Byte => f.write_str("byte"),
            JavaType::Char => f.write_str("char"),
            JavaType::Short => f.write_str("short"),
            JavaType::Int => f.write_str("int"),
            JavaType::Long => f.write_str("long"),
            JavaType::Float => f.write_str("float"),
            JavaType::Double => f.write_str("double"),
            JavaType::Object(name) => f.write_str(name),
            JavaType::Array { dims, element } => {
                write!(f, "{element}")?;
                for _ in 0..*dims {
                    f.write_str("[]")?;
                }
                Ok(())
            }
        }
    }
}

/// Parameter and return types of a method descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub params: Vec<JavaType>,
    pub return_type: JavaType,
}

/// Decodes a single descriptor fragment such as `I`, `[Ljava/lang/String;` or `V`.
///
/// Only the leading token is decoded; anything after it is ignored.
pub fn decode_type(fragment: &str) -> String {
    read_type(fragment).0.to_string()
}

/// Consumes exactly one type token from the front of `input`.
///
/// Returns the decoded type and the unconsumed remainder. An unrecognised
/// leading character is consumed and decodes to [`JavaType::Void`]; an object
/// type missing its terminating `;` swallows the rest of the input. Arrays
/// deeper than the JVM's 255-dimension limit decode to [`JavaType::Void`].
pub fn read_type(input: &str) -> (JavaType, &str) {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return (JavaType::Void, input);
    };
    let rest = chars.as_str();
    let ty = match first {
        'Z' => JavaType::Boolean,
        'B' => JavaType::Byte,
        'C' => JavaType::Char,
        'S' => JavaType::Short,
        'I' => JavaType::Int,
        'J' => JavaType::Long,
        'F' => JavaType::Float,
        'D' => JavaType::Double,
        'V' => JavaType::Void,
        'L' => {
            let (path, rest) = match rest.find(';') {
                Some(end) => (&rest[..end], &rest[end + 1..]),
                None => (rest, ""),
            };
            return (JavaType::Object(internal_to_binary(path)), rest);
        }
        '[' => {
            let element_start = input.len() - input.trim_start_matches('[').len();
            let (element, rest) = read_type(&input[element_start..]);
            let ty = match u8::try_from(element_start) {
                Ok(dims) => JavaType::Array {
                    dims,
                    element: Box::new(element),
                },
                Err(_) => JavaType::Void,
            };
            return (ty, rest);
        }
        _ => JavaType::Void,
    };
    (ty, rest)
}

/// Tokenises a parameter list (the text between `(` and `)`) left to right.
///
/// Consecutive primitives carry no separator, so the list is consumed one
/// complete token at a time rather than split on `;`.
pub fn read_params(mut params: &str) -> Vec<JavaType> {
    let mut out = Vec::new();
    while !params.is_empty() {
        let (ty, rest) = read_type(params);
        out.push(ty);
        params = rest;
    }
    out
}

/// Splits a method descriptor `(Param*)Return` into decoded parts.
///
/// Returns `None` when the closing `)` is missing.
pub fn split_method_descriptor(desc: &str) -> Option<MethodSignature> {
    let close = desc.find(')')?;
    let params = &desc[..close];
    let params = params.strip_prefix('(').unwrap_or(params);
    Some(MethodSignature {
        params: read_params(params),
        return_type: read_type(&desc[close + 1..]).0,
    })
}

pub fn internal_to_binary(internal: &str) -> String {
    internal.replace('/', ".")
}
