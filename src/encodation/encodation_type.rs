use super::{ascii, DataEncodingError, EncodingContext};

/// Data encodation types.
///
/// Data Matrix can switch between different "codecs" in a symbol, each one
/// with its own strengths. ISO 16022 also specifies C40, Text, X12, EDIFACT
/// and Base256; these are not available here, so every symbol is encoded
/// in ASCII mode from start to end. Of the ASCII function codewords only
/// FNC1 (232) and Upper Shift (235) are produced, Structured Append (233),
/// Reader Programming (234), the Macro 05/06 headers (236, 237) and ECI (241)
/// are never written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EncodationType {
    Ascii,
}

impl EncodationType {
    /// Encode input characters from `ctx` with this mode.
    ///
    /// Returns once the input is exhausted or the mode wants to hand over.
    pub(super) fn encode<T: EncodingContext>(&self, ctx: &mut T) -> Result<(), DataEncodingError> {
        match self {
            Self::Ascii => ascii::encode(ctx),
        }
    }

    pub(super) fn is_ascii(&self) -> bool {
        matches!(self, EncodationType::Ascii)
    }
}

#[test]
fn test_ascii_is_default_mode() {
    assert!(EncodationType::Ascii.is_ascii());
}
