use crate::error::{Error, Result};
use crate::reader::Reader;

/// A resolved constant pool entry.
///
/// Only the entries stub generation dereferences (`Utf8` and `Class`) keep
/// their payload; everything else is validated for size and recorded by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CpInfo {
    Utf8(String),
    Class { name_index: u16 },
    Opaque(&'static str),
    /// Second slot of a `Long` or `Double` entry.
    Unusable,
}

impl CpInfo {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            CpInfo::Utf8(_) => "Utf8",
            CpInfo::Class { .. } => "Class",
            CpInfo::Opaque(kind) => kind,
            CpInfo::Unusable => "Unusable",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ConstantPool {
    // Index 0 is never valid; it is stored as `Unusable` to keep indices 1-based.
    entries: Vec<CpInfo>,
}

impl ConstantPool {
    pub(crate) fn parse(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u2()?;
        if count == 0 {
            return Err(Error::Other("constant pool count must be at least 1"));
        }

        let mut entries = Vec::with_capacity(count as usize);
        entries.push(CpInfo::Unusable);

        while entries.len() < count as usize {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let len = reader.read_u2()? as usize;
                    CpInfo::Utf8(decode_modified_utf8(reader.read_bytes(len)?)?)
                }
                3 => {
                    reader.read_u4()?;
                    CpInfo::Opaque("Integer")
                }
                4 => {
                    reader.read_u4()?;
                    CpInfo::Opaque("Float")
                }
                5 | 6 => {
                    reader.read_u8()?;
                    entries.push(CpInfo::Opaque(if tag == 5 { "Long" } else { "Double" }));
                    if entries.len() >= count as usize {
                        return Err(Error::Other("8-byte constant overflows constant pool"));
                    }
                    CpInfo::Unusable
                }
                7 => CpInfo::Class {
                    name_index: reader.read_u2()?,
                },
                8 => {
                    reader.read_u2()?;
                    CpInfo::Opaque("String")
                }
                9 | 10 | 11 | 12 | 17 | 18 => {
                    reader.read_u4()?;
                    CpInfo::Opaque(match tag {
                        9 => "Fieldref",
                        10 => "Methodref",
                        11 => "InterfaceMethodref",
                        12 => "NameAndType",
                        17 => "Dynamic",
                        _ => "InvokeDynamic",
                    })
                }
                15 => {
                    reader.read_u1()?;
                    reader.read_u2()?;
                    CpInfo::Opaque("MethodHandle")
                }
                16 | 19 | 20 => {
                    reader.read_u2()?;
                    CpInfo::Opaque(match tag {
                        16 => "MethodType",
                        19 => "Module",
                        _ => "Package",
                    })
                }
                other => return Err(Error::InvalidConstantPoolTag(other)),
            };
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    pub(crate) fn get(&self, index: u16) -> Result<&CpInfo> {
        match self.entries.get(index as usize) {
            Some(CpInfo::Unusable) | None => Err(Error::InvalidConstantPoolIndex(index)),
            Some(entry) => Ok(entry),
        }
    }

    pub(crate) fn get_utf8(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            CpInfo::Utf8(value) => Ok(value),
            other => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Utf8",
                found: other.kind(),
            }),
        }
    }

    pub(crate) fn get_class_name(&self, index: u16) -> Result<String> {
        match self.get(index)? {
            CpInfo::Class { name_index } => Ok(self.get_utf8(*name_index)?.to_string()),
            other => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Class",
                found: other.kind(),
            }),
        }
    }
}

/// Decodes the JVM's "modified UTF-8" (`\0` as `C0 80`, supplementary
/// characters as surrogate pairs of 3-byte sequences).
fn decode_modified_utf8(bytes: &[u8]) -> Result<String> {
    if bytes.iter().all(|b| (0x01..0x80).contains(b)) {
        // Pure ASCII without NULs is identical in both encodings.
        return std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| Error::InvalidModifiedUtf8);
    }

    let mut units = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied();
    while let Some(b0) = iter.next() {
        let unit = match b0 {
            0x01..=0x7F => u16::from(b0),
            0xC0..=0xDF => {
                let b1 = continuation(iter.next())?;
                (u16::from(b0 & 0x1F) << 6) | b1
            }
            0xE0..=0xEF => {
                let b1 = continuation(iter.next())?;
                let b2 = continuation(iter.next())?;
                (u16::from(b0 & 0x0F) << 12) | (b1 << 6) | b2
            }
            _ => return Err(Error::InvalidModifiedUtf8),
        };
        units.push(unit);
    }

    Ok(String::from_utf16_lossy(&units))
}

fn continuation(byte: Option<u8>) -> Result<u16> {
    match byte {
        Some(b) if b & 0xC0 == 0x80 => Ok(u16::from(b & 0x3F)),
        _ => Err(Error::InvalidModifiedUtf8),
    }
}
