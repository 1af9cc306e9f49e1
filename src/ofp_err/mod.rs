//! Error types and codes carried by the OpenFlow error message.
//!
//! Every code knows its wire value in two numbering tables: the legacy one
//! and the current one, selected per error type by `CURRENT_FROM`. A code
//! also knows the first version that defines it, and for the single removed
//! code the last version that still does. Decoding is a structural lookup
//! followed by [`VersionedCode::validate`], so a value can match and still be
//! rejected for the requested version.

use std::fmt;

use crate::err::*;
use crate::header::Version;

/// Declares a versioned code enum.
///
/// Rows read `Variant("LABEL") = [legacy, current] since V1_x`, optionally
/// followed by `until V1_x` (last version defining the code) and
/// `aka "LABEL"` (name used by the legacy numbering). `-1` marks a code
/// absent from a table.
macro_rules! error_codes {
    (@version) => {
        None
    };
    (@version $until:ident) => {
        Some($crate::header::Version::$until)
    };
    (@alias) => {
        None
    };
    (@alias $alias:expr) => {
        Some($alias)
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident in $parent:ident, current from $split:ident {
            $($body:tt)+
        }
    ) => {
        error_codes! {
            $(#[$meta])*
            pub enum $name, current from $split {
                $($body)+
            }
        }

        impl $crate::ofp_err::OfErrorCode for $name {
            const PARENT: ErrorType = ErrorType::$parent;
        }
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident, current from $split:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($label:expr) = [$legacy:expr, $current:expr]
                    since $since:ident $(until $until:ident)? $(aka $alias:expr)?,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];
        }

        impl $crate::ofp_err::VersionedCode for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const CURRENT_FROM: $crate::header::Version = $crate::header::Version::$split;

            fn all() -> &'static [Self] {
                $name::ALL
            }

            fn raw_codes(self) -> (i32, i32) {
                match self {
                    $($name::$variant => ($legacy, $current),)+
                }
            }

            fn since(self) -> $crate::header::Version {
                match self {
                    $($name::$variant => $crate::header::Version::$since,)+
                }
            }

            fn removed_after(self) -> Option<$crate::header::Version> {
                match self {
                    $($name::$variant => error_codes!(@version $($until)?),)+
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            fn alias(self) -> Option<&'static str> {
                match self {
                    $($name::$variant => error_codes!(@alias $($alias)?),)+
                }
            }
        }
    };
}

mod codes;

pub use self::codes::*;

/// Behaviour shared by the error type and every code enum.
pub trait VersionedCode: Sized + Copy + PartialEq + fmt::Debug + 'static {
    const TYPE_NAME: &'static str;
    /// First version numbered by the current table.
    const CURRENT_FROM: Version;

    fn all() -> &'static [Self];
    /// `(legacy, current)`, -1 where the table has no entry.
    fn raw_codes(self) -> (i32, i32);
    fn since(self) -> Version;
    fn removed_after(self) -> Option<Version>;
    fn name(self) -> &'static str;
    fn alias(self) -> Option<&'static str>;

    /// Wire value in the table `version` selects.
    fn code(self, version: Version) -> Option<u16> {
        let (legacy, current) = self.raw_codes();
        let raw = if version < Self::CURRENT_FROM {
            legacy
        } else {
            current
        };
        if raw < 0 {
            None
        } else {
            Some(raw as u16)
        }
    }

    /// Fails with `VersionMismatch` before `since` and after `removed_after`.
    fn validate(self, version: Version) -> Result<()> {
        if version < self.since() {
            warn!(
                "{}::{} requires {:?}, got {:?}",
                Self::TYPE_NAME,
                self.name(),
                self.since(),
                version
            );
            bail!(ErrorKind::VersionMismatch(version, self.since(), self.name()));
        }
        if let Some(last) = self.removed_after() {
            if version > last {
                warn!(
                    "{}::{} was removed after {:?}, got {:?}",
                    Self::TYPE_NAME,
                    self.name(),
                    last,
                    version
                );
                bail!(ErrorKind::VersionMismatch(version, last, self.name()));
            }
        }
        Ok(())
    }

    fn decode(code: u16, version: Version) -> Result<Self> {
        let found = Self::all()
            .iter()
            .copied()
            .find(|candidate| candidate.code(version) == Some(code))
            .ok_or_else(|| {
                debug!("No {} with code {} in {:?}", Self::TYPE_NAME, code, version);
                Error::from(ErrorKind::UnknownValue(code as u64, Self::TYPE_NAME))
            })?;
        found.validate(version)?;
        Ok(found)
    }

    /// Validated wire value for `version`.
    fn encode(self, version: Version) -> Result<u16> {
        self.validate(version)?;
        self.code(version).ok_or_else(|| {
            Error::from(ErrorKind::VersionMismatch(version, self.since(), self.name()))
        })
    }

    /// Name as used by `version`.
    fn label(self, version: Version) -> &'static str {
        match self.alias() {
            Some(alias) if version < Self::CURRENT_FROM => alias,
            _ => self.name(),
        }
    }
}

/// A code enum scoped to one error type.
pub trait OfErrorCode: VersionedCode {
    const PARENT: ErrorType;
}

macro_rules! error_code_union {
    ($($ttype:ident),+) => {
        /// An error code together with its type.
        #[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
        pub enum ErrorCode {
            $($ttype($ttype),)+
        }

        impl ErrorCode {
            pub fn error_type(&self) -> ErrorType {
                match *self {
                    $(ErrorCode::$ttype(_) => <$ttype as OfErrorCode>::PARENT,)+
                }
            }

            pub fn code(&self, version: Version) -> Option<u16> {
                match *self {
                    $(ErrorCode::$ttype(code) => code.code(version),)+
                }
            }

            pub fn label(&self, version: Version) -> &'static str {
                match *self {
                    $(ErrorCode::$ttype(code) => code.label(version),)+
                }
            }

            /// Both the type and the code must exist in `version`.
            pub fn validate(&self, version: Version) -> Result<()> {
                self.error_type().validate(version)?;
                match *self {
                    $(ErrorCode::$ttype(code) => code.validate(version),)+
                }
            }

            /// Wire `(type, code)` pair for `version`.
            pub fn encode(&self, version: Version) -> Result<(u16, u16)> {
                let ttype = self.error_type().encode(version)?;
                let code = match *self {
                    $(ErrorCode::$ttype(code) => code.encode(version)?,)+
                };
                Ok((ttype, code))
            }

            pub fn decode(ttype: u16, code: u16, version: Version) -> Result<Self> {
                match ErrorType::decode(ttype, version)? {
                    $(ErrorType::$ttype => Ok(ErrorCode::$ttype($ttype::decode(code, version)?)),)+
                    ErrorType::Experimenter => {
                        bail!(ErrorKind::UnsupportedValue(ttype as u64, "ErrorCode"))
                    }
                }
            }
        }

        $(
            impl From<$ttype> for ErrorCode {
                fn from(code: $ttype) -> Self {
                    ErrorCode::$ttype(code)
                }
            }
        )+
    };
}

error_code_union!(
    HelloFailed,
    BadRequest,
    BadAction,
    BadInstruction,
    BadMatch,
    FlowModFailed,
    GroupModFailed,
    PortModFailed,
    TableModFailed,
    QueueOpFailed,
    SwitchConfigFailed,
    RoleRequestFailed,
    MeterModFailed,
    TableFeaturesFailed
);
