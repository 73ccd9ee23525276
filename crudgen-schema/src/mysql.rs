//! Decoding of MySQL driver field metadata.
//!
//! The protocol reports each column as a type code plus a flag bit mask.
//! This module is the only place that looks at either; everything past it
//! works with [`ColumnMetadata`].

use crate::{ColumnMetadata, SemanticType};

/// Column flag bits reported by the MySQL protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldFlags(u32);

impl FieldFlags {
    pub const NOT_NULL: Self = Self(1);
    pub const PRI_KEY: Self = Self(2);
    pub const UNIQUE_KEY: Self = Self(4);
    pub const MULTIPLE_KEY: Self = Self(8);
    pub const BLOB: Self = Self(16);
    pub const UNSIGNED: Self = Self(32);
    pub const ZEROFILL: Self = Self(64);
    pub const BINARY: Self = Self(128);
    pub const ENUM: Self = Self(256);
    pub const AUTO_INCREMENT: Self = Self(512);
    pub const TIMESTAMP: Self = Self(1024);
    pub const SET: Self = Self(2048);
    pub const NO_DEFAULT_VALUE: Self = Self(4096);
    pub const ON_UPDATE_NOW: Self = Self(8192);
    pub const NUM: Self = Self(32768);

    const NAMES: &[(&str, FieldFlags)] = &[
        ("NOT_NULL", Self::NOT_NULL),
        ("PRI_KEY", Self::PRI_KEY),
        ("UNIQUE_KEY", Self::UNIQUE_KEY),
        ("MULTIPLE_KEY", Self::MULTIPLE_KEY),
        ("BLOB", Self::BLOB),
        ("UNSIGNED", Self::UNSIGNED),
        ("ZEROFILL", Self::ZEROFILL),
        ("BINARY", Self::BINARY),
        ("ENUM", Self::ENUM),
        ("AUTO_INCREMENT", Self::AUTO_INCREMENT),
        ("TIMESTAMP", Self::TIMESTAMP),
        ("SET", Self::SET),
        ("NO_DEFAULT_VALUE", Self::NO_DEFAULT_VALUE),
        ("ON_UPDATE_NOW", Self::ON_UPDATE_NOW),
        ("NUM", Self::NUM),
    ];

    /// Create flags from a raw bit mask.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Get the raw bit mask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Look up a single flag by its protocol name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, flag)| *flag)
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combine with another set of flags.
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// MySQL protocol column type codes.
pub mod types {
    pub const DECIMAL: u8 = 0;
    pub const TINY: u8 = 1;
    pub const SHORT: u8 = 2;
    pub const LONG: u8 = 3;
    pub const FLOAT: u8 = 4;
    pub const DOUBLE: u8 = 5;
    pub const NULL: u8 = 6;
    pub const TIMESTAMP: u8 = 7;
    pub const LONGLONG: u8 = 8;
    pub const INT24: u8 = 9;
    pub const DATE: u8 = 10;
    pub const TIME: u8 = 11;
    pub const DATETIME: u8 = 12;
    pub const YEAR: u8 = 13;
    pub const NEWDATE: u8 = 14;
    pub const VARCHAR: u8 = 15;
    pub const BIT: u8 = 16;
    pub const JSON: u8 = 245;
    pub const NEWDECIMAL: u8 = 246;
    pub const ENUM: u8 = 247;
    pub const SET: u8 = 248;
    pub const TINY_BLOB: u8 = 249;
    pub const MEDIUM_BLOB: u8 = 250;
    pub const LONG_BLOB: u8 = 251;
    pub const BLOB: u8 = 252;
    pub const VAR_STRING: u8 = 253;
    pub const STRING: u8 = 254;
    pub const GEOMETRY: u8 = 255;

    pub(crate) const NAMES: &[(&str, u8)] = &[
        ("DECIMAL", DECIMAL),
        ("TINY", TINY),
        ("SHORT", SHORT),
        ("LONG", LONG),
        ("FLOAT", FLOAT),
        ("DOUBLE", DOUBLE),
        ("NULL", NULL),
        ("TIMESTAMP", TIMESTAMP),
        ("LONGLONG", LONGLONG),
        ("INT24", INT24),
        ("DATE", DATE),
        ("TIME", TIME),
        ("DATETIME", DATETIME),
        ("YEAR", YEAR),
        ("NEWDATE", NEWDATE),
        ("VARCHAR", VARCHAR),
        ("BIT", BIT),
        ("JSON", JSON),
        ("NEWDECIMAL", NEWDECIMAL),
        ("ENUM", ENUM),
        ("SET", SET),
        ("TINY_BLOB", TINY_BLOB),
        ("MEDIUM_BLOB", MEDIUM_BLOB),
        ("LONG_BLOB", LONG_BLOB),
        ("BLOB", BLOB),
        ("VAR_STRING", VAR_STRING),
        ("STRING", STRING),
        ("GEOMETRY", GEOMETRY),
    ];
}

/// Look up a type code by its protocol name (case-insensitive).
pub fn type_code_from_name(name: &str) -> Option<u8> {
    types::NAMES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, code)| *code)
}

/// Map a type code to its semantic type, or `None` for an unknown code.
///
/// Only integer codes that fit a JavaScript number exactly are numeric.
/// `BIGINT`, `DECIMAL` and floating point columns travel as strings so that
/// large keys and exact decimals survive request validation.
///
/// Blob and fixed/variable string codes are split on the BINARY flag:
/// `TEXT`/`VARCHAR` columns are strings, `BLOB`/`VARBINARY` are binary.
pub fn semantic_type(type_code: u8, flags: FieldFlags) -> Option<SemanticType> {
    use types::*;

    let binary = flags.contains(FieldFlags::BINARY);
    let semantic = match type_code {
        TINY | SHORT | LONG | INT24 => SemanticType::Numeric,
        DECIMAL | NEWDECIMAL | LONGLONG | FLOAT | DOUBLE => SemanticType::String,
        TIMESTAMP | DATE | TIME | DATETIME | YEAR | NEWDATE => SemanticType::Temporal,
        VARCHAR | JSON | ENUM | SET => SemanticType::String,
        TINY_BLOB | MEDIUM_BLOB | LONG_BLOB | BLOB | VAR_STRING | STRING => {
            if binary {
                SemanticType::Binary
            } else {
                SemanticType::String
            }
        }
        BIT => SemanticType::Binary,
        NULL | GEOMETRY => SemanticType::Other,
        _ => return None,
    };
    Some(semantic)
}

/// One column as reported by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPacket {
    pub name: String,
    pub type_code: u8,
    pub flags: FieldFlags,
}

impl FieldPacket {
    pub fn new(name: impl Into<String>, type_code: u8, flags: FieldFlags) -> Self {
        Self {
            name: name.into(),
            type_code,
            flags,
        }
    }

    /// Decode into column metadata.
    ///
    /// An unknown type code degrades to [`SemanticType::Other`] so that the
    /// table stays generatable.
    pub fn to_column(&self) -> ColumnMetadata {
        let semantic_type = semantic_type(self.type_code, self.flags).unwrap_or_else(|| {
            tracing::warn!(
                column = %self.name,
                type_code = self.type_code,
                "unknown column type code, treating as 'other'"
            );
            SemanticType::Other
        });

        ColumnMetadata {
            name: self.name.clone(),
            semantic_type,
            is_primary_key: self.flags.contains(FieldFlags::PRI_KEY),
            is_auto_increment: self.flags.contains(FieldFlags::AUTO_INCREMENT),
            is_not_null: self.flags.contains(FieldFlags::NOT_NULL),
            has_no_default_value: self.flags.contains(FieldFlags::NO_DEFAULT_VALUE),
            is_on_update_now: self.flags.contains(FieldFlags::ON_UPDATE_NOW),
        }
    }
}
