use serde::Serialize;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;
pub const ACC_SYNTHETIC: u16 = 0x1000;
pub const ACC_ENUM: u16 = 0x4000;

/// Access flags of a class, field or method, decoded once from the raw mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct AccessFlags {
    #[serde(skip)]
    bits: u16,
    pub is_public: bool,
    pub is_private: bool,
    pub is_protected: bool,
    pub is_final: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_interface: bool,
    pub is_enum: bool,
    pub is_synthetic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

/// The single classification of a class: the interface bit wins over the enum bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
        }
    }
}

impl AccessFlags {
    pub fn from_bits(bits: u16) -> Self {
        let has = |flag: u16| bits & flag == flag;
        Self {
            bits,
            is_public: has(ACC_PUBLIC),
            is_private: has(ACC_PRIVATE),
            is_protected: has(ACC_PROTECTED),
            is_final: has(ACC_FINAL),
            is_static: has(ACC_STATIC),
            is_abstract: has(ACC_ABSTRACT),
            is_interface: has(ACC_INTERFACE),
            is_enum: has(ACC_ENUM),
            is_synthetic: has(ACC_SYNTHETIC),
        }
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// At most one visibility is reported; if several bits are set the first
    /// of public, private, protected wins.
    pub fn visibility(&self) -> Option<Visibility> {
        if self.is_public {
            Some(Visibility::Public)
        } else if self.is_private {
            Some(Visibility::Private)
        } else if self.is_protected {
            Some(Visibility::Protected)
        } else {
            None
        }
    }

    pub fn class_kind(&self) -> ClassKind {
        if self.is_interface {
            ClassKind::Interface
        } else if self.is_enum {
            ClassKind::Enum
        } else {
            ClassKind::Class
        }
    }

    /// Modifier keywords in emission order: visibility, `final`, `static`, `abstract`.
    ///
    /// Slots whose flag is unset contribute nothing.
    pub fn modifiers(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(4);
        out.extend(self.visibility().map(Visibility::keyword));
        if self.is_final {
            out.push("final");
        }
        if self.is_static {
            out.push("static");
        }
        if self.is_abstract {
            out.push("abstract");
        }
        out
    }

    /// Field modifiers never include `abstract`.
    pub fn field_modifiers(&self) -> Vec<&'static str> {
        let mut out = self.modifiers();
        out.retain(|m| *m != "abstract");
        out
    }
}

impl From<u16> for AccessFlags {
    fn from(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}
