//! Data part encoding
//!
//! The bytes encoded into a Data Matrix symbol consist of two parts,
//! the first part is the actual information one wants to encode,
//! the second part are error correction bytes.
//!
//! The functions in this module produce the first part, the data part.
//! There is usually no reason to call them directly, but they can be
//! useful if one needs to work on a lower level.
use crate::config::EncodeConfig;
use crate::encodation::GenericDataEncoder;
pub use crate::encodation::{DataEncodingError, EncodationType};

use super::SymbolSize;

/// Encode input to data codewords, padded to fill the chosen symbol.
///
/// The smallest symbol of the configured [SymbolList](crate::SymbolList)
/// which can hold the codewords is returned alongside.
pub fn encode_data(
    data: &[u8],
    config: &EncodeConfig,
) -> Result<(Vec<u8>, SymbolSize), DataEncodingError> {
    GenericDataEncoder::with_config(data, config).into_codewords()
}

/// Encode input to data codewords without choosing a symbol or padding.
///
/// ```rust
/// # use ecc200::{data::encode_codewords, EncodeConfig};
/// let config = EncodeConfig::default();
/// assert_eq!(encode_codewords(b"123", &config), Ok(vec![142, 52]));
/// ```
pub fn encode_codewords(data: &[u8], config: &EncodeConfig) -> Result<Vec<u8>, DataEncodingError> {
    GenericDataEncoder::with_config(data, config).into_unpadded_codewords()
}

/// Pad the codewords to fill `capacity` data codewords.
///
/// Codewords which are already at or beyond capacity are left alone.
pub fn add_padding(mut codewords: Vec<u8>, capacity: usize) -> Vec<u8> {
    crate::encodation::add_padding(&mut codewords, capacity);
    codewords
}
