//! Parameter descriptors.
//!
//! A descriptor is a static, immutable declaration of one parameter: its
//! name (also the NVS key), its typed schema and its flags. The schema is
//! a closed tagged variant, so get/set dispatch is exhaustive and
//! "bounded" vs "unbounded" is an explicit per-field property instead of
//! a `min == max == 0` convention.

use bitflags::bitflags;

bitflags! {
    /// Presentation hints carried by a descriptor.
    ///
    /// The registry itself does not act on these; listing and transport
    /// layers do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Excluded from enumeration/listing surfaces
        const HIDDEN = 1 << 0;
        /// Never echoed back in plaintext by presentation layers
        const PASSWORD = 1 << 1;
    }
}

/// Parameter type tag. `None` marks the table sentinel only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    None,
    U8,
    U32,
    F32,
    Str20,
    Str64,
}

/// Typed schema: default plus validation rules, one variant per type tag.
///
/// Numeric bounds are inclusive. `bounds: None` means no bound is
/// enforced. String defaults are always the empty string; `min_len` is
/// checked against the original input length, before truncation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamSchema {
    /// Sentinel, terminates the table
    None,
    U8 { default: u8, bounds: Option<(u8, u8)> },
    U32 { default: u32, bounds: Option<(u32, u32)> },
    F32 { default: f32, bounds: Option<(f32, f32)> },
    Str20 { min_len: usize },
    Str64 { min_len: usize },
}

/// One named parameter. Created once in the static table, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct ParamDescriptor {
    /// Unique name, compared case-sensitively; also the store key
    pub name: &'static str,
    pub schema: ParamSchema,
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Table terminator: empty name, type `None`. Lookups never match it.
    pub const SENTINEL: Self = Self {
        name: "",
        schema: ParamSchema::None,
        flags: ParamFlags::empty(),
    };

    pub const fn u8(name: &'static str, default: u8, bounds: Option<(u8, u8)>) -> Self {
        Self {
            name,
            schema: ParamSchema::U8 { default, bounds },
            flags: ParamFlags::empty(),
        }
    }

    pub const fn u32(name: &'static str, default: u32, bounds: Option<(u32, u32)>) -> Self {
        Self {
            name,
            schema: ParamSchema::U32 { default, bounds },
            flags: ParamFlags::empty(),
        }
    }

    pub const fn f32(name: &'static str, default: f32, bounds: Option<(f32, f32)>) -> Self {
        Self {
            name,
            schema: ParamSchema::F32 { default, bounds },
            flags: ParamFlags::empty(),
        }
    }

    pub const fn str20(name: &'static str, min_len: usize) -> Self {
        Self {
            name,
            schema: ParamSchema::Str20 { min_len },
            flags: ParamFlags::empty(),
        }
    }

    pub const fn str64(name: &'static str, min_len: usize) -> Self {
        Self {
            name,
            schema: ParamSchema::Str64 { min_len },
            flags: ParamFlags::empty(),
        }
    }

    /// Mark as excluded from listings.
    pub const fn hidden(self) -> Self {
        Self {
            name: self.name,
            schema: self.schema,
            flags: self.flags.union(ParamFlags::HIDDEN),
        }
    }

    /// Mark as never echoed in plaintext.
    pub const fn password(self) -> Self {
        Self {
            name: self.name,
            schema: self.schema,
            flags: self.flags.union(ParamFlags::PASSWORD),
        }
    }

    /// Type tag for this descriptor.
    pub const fn param_type(&self) -> ParamType {
        match self.schema {
            ParamSchema::None => ParamType::None,
            ParamSchema::U8 { .. } => ParamType::U8,
            ParamSchema::U32 { .. } => ParamType::U32,
            ParamSchema::F32 { .. } => ParamType::F32,
            ParamSchema::Str20 { .. } => ParamType::Str20,
            ParamSchema::Str64 { .. } => ParamType::Str64,
        }
    }

    /// True for the table terminator.
    pub const fn is_sentinel(&self) -> bool {
        matches!(self.schema, ParamSchema::None)
    }
}
