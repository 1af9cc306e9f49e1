use crate::header::Version;
use crate::ofp_err::ErrorCode;

/// Hello element carrying the supported version bitmap.
pub const HELLO_ELEM_VERSIONBITMAP: u16 = 1;

/// Hello message. OpenFlow 1.0 hellos have no body; from 1.3 on the
/// supported versions may be advertised as a bitmap element.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Hello {
    pub elements: Vec<HelloElement>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum HelloElement {
    /// Bit n of the bitmaps is set when wire version n is supported.
    VersionBitmap(Vec<u32>),
}

impl Hello {
    /// Hello advertising exactly `versions`.
    pub fn with_versions(versions: &[Version]) -> Self {
        let bitmap = versions
            .iter()
            .fold(0u32, |acc, version| acc | 1 << version.wire());
        Hello {
            elements: vec![HelloElement::VersionBitmap(vec![bitmap])],
        }
    }
}

/// Error message body.
#[derive(Debug, PartialEq, Clone)]
pub enum ErrorMsg {
    Standard {
        code: ErrorCode,
        /// At least 64 bytes of the failed request, or an ASCII text for
        /// hello failures.
        data: Vec<u8>,
    },
    /// Experimenter error (1.2+).
    Experimenter {
        exp_type: u16,
        experimenter_id: u32,
        data: Vec<u8>,
    },
}

/// Error type code of experimenter errors.
pub const ERROR_TYPE_EXPERIMENTER: u16 = 0xffff;

/// Experimenter (1.3) or vendor (1.0) message. OpenFlow 1.0 has no
/// `exp_type` on the wire.
#[derive(Debug, PartialEq, Clone)]
pub struct ExperimenterMsg {
    pub experimenter_id: u32,
    pub exp_type: u32,
    pub data: Vec<u8>,
}
