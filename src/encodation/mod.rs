//! Data encodation, turning the input bytes into data codewords.
//!
//! Data Matrix knows several encodation modes. Only the ASCII mode is
//! implemented. Every mode works on an [EncodingContext], and the
//! [EncodationType] enum dispatches to the mode's `encode` function,
//! which is the place to hook in further modes.
use std::fmt;

use crate::config::EncodeConfig;
use crate::symbol_size::{SymbolList, SymbolSize};

pub(crate) mod ascii;
mod encodation_type;

#[cfg(test)]
mod tests;

pub use encodation_type::EncodationType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEncodingError {
    /// The encoded data needs more codewords than the biggest allowed symbol holds.
    PayloadTooLarge {
        /// Number of data codewords needed
        codewords: usize,
        /// Capacity of the biggest symbol in the symbol list
        capacity: usize,
    },
}

impl fmt::Display for DataEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::PayloadTooLarge {
                codewords,
                capacity,
            } => write!(
                f,
                "payload needs {} data codewords but the biggest symbol holds {}",
                codewords, capacity
            ),
        }
    }
}

impl std::error::Error for DataEncodingError {}

/// The state an encodation mode works on.
pub(crate) trait EncodingContext {
    /// Remove and return the next input character.
    fn eat(&mut self) -> Option<u8>;

    /// The input not yet encoded.
    fn rest(&self) -> &[u8];

    fn push(&mut self, ch: u8);

    /// Input byte which stands for the FNC1 function character, if any.
    fn fnc1_sentinel(&self) -> Option<u8>;

    fn peek(&self, n: usize) -> Option<u8> {
        self.rest().get(n).cloned()
    }

    /// Are there more characters to process?
    fn has_more_characters(&self) -> bool {
        !self.rest().is_empty()
    }
}

pub(crate) struct GenericDataEncoder<'a> {
    data: &'a [u8],
    encodation: EncodationType,
    symbol_list: &'a SymbolList,
    fnc1_sentinel: Option<u8>,
    codewords: Vec<u8>,
}

impl<'a> EncodingContext for GenericDataEncoder<'a> {
    fn eat(&mut self) -> Option<u8> {
        let (ch, rest) = self.data.split_first()?;
        self.data = rest;
        Some(*ch)
    }

    fn rest(&self) -> &[u8] {
        self.data
    }

    fn push(&mut self, ch: u8) {
        self.codewords.push(ch);
    }

    fn fnc1_sentinel(&self) -> Option<u8> {
        self.fnc1_sentinel
    }
}

impl<'a> GenericDataEncoder<'a> {
    pub(crate) fn with_config(data: &'a [u8], config: &'a EncodeConfig) -> Self {
        let fnc1_sentinel = config.fnc1_sentinel();
        Self {
            data,
            encodation: EncodationType::Ascii,
            symbol_list: config.symbol_list(),
            fnc1_sentinel,
            codewords: Vec::with_capacity(ascii::encoding_size(data, fnc1_sentinel)),
        }
    }

    /// Encode the input without padding.
    pub(crate) fn into_unpadded_codewords(mut self) -> Result<Vec<u8>, DataEncodingError> {
        while self.has_more_characters() {
            let before = self.data.len();
            let mode = self.encodation;
            mode.encode(&mut self)?;
            assert!(
                self.data.len() < before,
                "no progress in encoder, this is a bug"
            );
        }
        // padding codewords are only defined in ASCII mode
        debug_assert!(self.encodation.is_ascii());
        Ok(self.codewords)
    }

    /// Encode the input, pick the smallest fitting symbol, and pad.
    pub(crate) fn into_codewords(self) -> Result<(Vec<u8>, SymbolSize), DataEncodingError> {
        let symbol_list = self.symbol_list;
        let mut codewords = self.into_unpadded_codewords()?;
        let symbol_size = symbol_list.select_size(codewords.len())?;
        add_padding(&mut codewords, symbol_size.num_data_codewords());
        Ok((codewords, symbol_size))
    }
}

/// Fill `codewords` up to `capacity` with padding codewords.
///
/// The first pad is [PAD](ascii::PAD), the following ones are
/// scrambled with the "253-state" randomizing algorithm, seeded by the
/// one-based codeword position. Does nothing if `codewords` is full already.
pub(crate) fn add_padding(codewords: &mut Vec<u8>, capacity: usize) {
    if codewords.len() >= capacity {
        return;
    }
    codewords.reserve(capacity - codewords.len());
    codewords.push(ascii::PAD);
    while codewords.len() < capacity {
        let pos = codewords.len() + 1;
        codewords.push(randomize_253_state(ascii::PAD, pos));
    }
}

fn randomize_253_state(ch: u8, pos: usize) -> u8 {
    let pseudo_random = ((149 * pos) % 253) + 1;
    let tmp = ch as usize + pseudo_random;
    if tmp <= 254 {
        tmp as u8
    } else {
        (tmp - 254) as u8
    }
}
