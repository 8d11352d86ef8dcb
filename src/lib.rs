//! Data Matrix (ECC 200) encoder.
//!
//! Turns a byte string into the module grid of a Data Matrix symbol as
//! specified in ISO/IEC 16022, with the rectangular extensions of
//! ISO/IEC 21471 available on request.
//!
//! ```rust
//! let code = ecc200::encode(b"Hello, World!").unwrap();
//! assert_eq!((code.columns(), code.rows()), (18, 18));
//! for (x, y) in code.bitmap().pixels() {
//!     // draw a dark square at (x, y)
//! }
//! ```
//!
//! The data is packed in ASCII encodation, protected by Reed-Solomon
//! error correction and placed into the smallest symbol of the
//! configured [SymbolList] which has enough room.
mod config;
mod encodation;
pub mod errorcode;
pub mod placement;
mod symbol_size;

pub mod data;

pub use config::{EncodeConfig, DEFAULT_FNC1_SENTINEL};
pub use encodation::DataEncodingError;
pub use symbol_size::{SymbolFamily, SymbolList, SymbolSize};

use placement::Bitmap;

/// An encoded Data Matrix symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMatrix {
    symbol_size: SymbolSize,
    data_codewords: Vec<u8>,
    bitmap: Bitmap<bool>,
}

impl DataMatrix {
    /// Encode the data using the smallest fitting size from `symbol_list`.
    ///
    /// A single [SymbolSize] can be given to force that size.
    ///
    /// ```rust
    /// # use ecc200::{DataMatrix, SymbolSize};
    /// let code = DataMatrix::encode(b"\x2901", SymbolSize::Square16).unwrap();
    /// assert_eq!(code.symbol_size(), SymbolSize::Square16);
    /// ```
    pub fn encode(
        data: &[u8],
        symbol_list: impl Into<SymbolList>,
    ) -> Result<Self, DataEncodingError> {
        Self::encode_with(data, &EncodeConfig::default().with_symbol_list(symbol_list))
    }

    /// Encode a string, i.e., its UTF-8 bytes.
    pub fn encode_str(
        text: &str,
        symbol_list: impl Into<SymbolList>,
    ) -> Result<Self, DataEncodingError> {
        Self::encode(text.as_bytes(), symbol_list)
    }

    /// Encode the data with full control over the encoder settings.
    pub fn encode_with(data: &[u8], config: &EncodeConfig) -> Result<Self, DataEncodingError> {
        let (data_codewords, symbol_size) = data::encode_data(data, config)?;
        let ecc = errorcode::encode_error(&data_codewords, symbol_size);

        let mut codewords = Vec::with_capacity(data_codewords.len() + ecc.len());
        codewords.extend_from_slice(&data_codewords);
        codewords.extend_from_slice(&ecc);

        Ok(Self {
            symbol_size,
            data_codewords,
            bitmap: placement::place(&codewords, symbol_size),
        })
    }

    /// Number of modules per row.
    pub fn columns(&self) -> usize {
        self.bitmap.width()
    }

    /// Number of modules per column.
    pub fn rows(&self) -> usize {
        self.bitmap.height()
    }

    /// Is the module in column `x` and row `y` dark?
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bitmap.get(x, y)
    }

    pub fn symbol_size(&self) -> SymbolSize {
        self.symbol_size
    }

    /// The padded data codewords, without error correction.
    pub fn data_codewords(&self) -> &[u8] {
        &self.data_codewords
    }

    pub fn bitmap(&self) -> &Bitmap<bool> {
        &self.bitmap
    }
}

/// Encode the data as a Data Matrix ECC200 with the default settings.
///
/// Only square symbols are considered, see [DataMatrix::encode_with]
/// to change that.
pub fn encode(data: &[u8]) -> Result<DataMatrix, DataEncodingError> {
    DataMatrix::encode_with(data, &EncodeConfig::default())
}
