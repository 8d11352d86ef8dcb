//! Encoder settings.
use crate::symbol_size::SymbolList;

/// Input byte which is replaced by the FNC1 codeword by default.
///
/// With it a GS1 element string like `\x29` `01` `09501101530003` can be given
/// as plain bytes. Use [EncodeConfig::with_fnc1_sentinel] to pick
/// another byte, e.g. the ASCII group separator `0x1D`, or to turn the
/// replacement off.
pub const DEFAULT_FNC1_SENTINEL: u8 = 0x29;

/// Settings for [DataMatrix::encode_with](crate::DataMatrix::encode_with).
///
/// ```rust
/// # use ecc200::{DataMatrix, EncodeConfig, SymbolList};
/// let config = EncodeConfig::default()
///     .with_symbol_list(SymbolList::with_rectangles())
///     .with_fnc1_sentinel(None);
/// let code = DataMatrix::encode_with(b"(21)12345", &config).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeConfig {
    symbol_list: SymbolList,
    fnc1_sentinel: Option<u8>,
}

impl EncodeConfig {
    /// Restrict the symbol sizes the encoder may choose from.
    pub fn with_symbol_list(mut self, symbol_list: impl Into<SymbolList>) -> Self {
        self.symbol_list = symbol_list.into();
        self
    }

    /// Set the input byte which is encoded as FNC1, `None` disables it.
    pub fn with_fnc1_sentinel(mut self, sentinel: Option<u8>) -> Self {
        self.fnc1_sentinel = sentinel;
        self
    }

    pub fn symbol_list(&self) -> &SymbolList {
        &self.symbol_list
    }

    pub fn fnc1_sentinel(&self) -> Option<u8> {
        self.fnc1_sentinel
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            symbol_list: SymbolList::default(),
            fnc1_sentinel: Some(DEFAULT_FNC1_SENTINEL),
        }
    }
}

impl From<SymbolList> for EncodeConfig {
    fn from(symbol_list: SymbolList) -> Self {
        Self::default().with_symbol_list(symbol_list)
    }
}
