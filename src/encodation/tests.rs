use pretty_assertions::assert_eq;

use super::{add_padding, ascii, EncodationType, EncodingContext, GenericDataEncoder};
use crate::config::EncodeConfig;
use crate::symbol_size::{SymbolList, SymbolSize};
use crate::DataEncodingError;

/// Minimal context to run an encodation mode in isolation.
struct TestEncodingContext {
    data: Vec<u8>,
    pos: usize,
    codewords: Vec<u8>,
    fnc1_sentinel: Option<u8>,
}

impl TestEncodingContext {
    fn new(data: &[u8], fnc1_sentinel: Option<u8>) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            codewords: Vec::new(),
            fnc1_sentinel,
        }
    }
}

impl EncodingContext for TestEncodingContext {
    fn eat(&mut self) -> Option<u8> {
        let ch = self.data.get(self.pos).cloned()?;
        self.pos += 1;
        Some(ch)
    }

    fn rest(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    fn push(&mut self, ch: u8) {
        self.codewords.push(ch);
    }

    fn fnc1_sentinel(&self) -> Option<u8> {
        self.fnc1_sentinel
    }
}

fn enc(data: &[u8]) -> Vec<u8> {
    let mut ctx = TestEncodingContext::new(data, Some(0x29));
    EncodationType::Ascii.encode(&mut ctx).unwrap();
    assert!(!ctx.has_more_characters());
    assert_eq!(
        ctx.codewords.len(),
        ascii::encoding_size(data, Some(0x29)),
        "size estimate for {:?}",
        data
    );
    ctx.codewords
}

fn enc_padded(data: &[u8]) -> (Vec<u8>, SymbolSize) {
    let config = EncodeConfig::default();
    GenericDataEncoder::with_config(data, &config)
        .into_codewords()
        .unwrap()
}

#[test]
fn test_digit_pairs() {
    assert_eq!(enc(b"12"), vec![142]);
    assert_eq!(enc(b"123"), vec![142, 52]);
    assert_eq!(enc(b"00"), vec![130]);
    assert_eq!(enc(b"99"), vec![229]);
    assert_eq!(enc(b"1ABC"), vec![50, 66, 67, 68]);
    assert_eq!(enc(b"A12B"), vec![66, 142, 67]);
}

#[test]
fn test_plain_ascii() {
    assert_eq!(enc(b"abc"), vec![98, 99, 100]);
    assert_eq!(enc(b"ABC"), vec![66, 67, 68]);
    assert_eq!(enc(b"A\r\nA"), vec![66, 14, 11, 66]);
    assert_eq!(enc(b"\x00\x7f"), vec![1, 128]);
    assert_eq!(enc(b""), Vec::<u8>::new());
}

#[test]
fn test_fnc1_sentinel() {
    assert_eq!(enc(b"\x2900"), vec![232, 130]);
    assert_eq!(enc(b"\x290112\x2910A"), vec![232, 131, 142, 232, 140, 66]);
}

#[test]
fn test_fnc1_sentinel_disabled() {
    let mut ctx = TestEncodingContext::new(b"\x2900", None);
    EncodationType::Ascii.encode(&mut ctx).unwrap();
    assert_eq!(ctx.codewords, vec![42, 130]);
}

#[test]
fn test_fnc1_custom_sentinel() {
    let config = EncodeConfig::default().with_fnc1_sentinel(Some(0x1D));
    let cw = GenericDataEncoder::with_config(b"\x1D01\x29", &config)
        .into_unpadded_codewords()
        .unwrap();
    assert_eq!(cw, vec![232, 131, 42]);
}

#[test]
fn test_upper_shift() {
    assert_eq!(enc(b"\x80"), vec![235, 1]);
    assert_eq!(enc(b"a\xe4b"), vec![98, 235, 101, 99]);
    assert_eq!(enc(b"\xff1"), vec![235, 128, 50]);
}

#[test]
fn test_no_unsupported_function_codewords() {
    let all: Vec<u8> = (0..=255).collect();
    let cw = enc(&all);
    for function in [233u8, 234, 236, 237, 241] {
        assert!(!cw.contains(&function), "codeword {} emitted", function);
    }
}

#[test]
fn test_padding_fixture() {
    let data = br#"{"po":12,"batchAction":"start_end"}"#;
    let (cw, size) = enc_padded(data);
    assert_eq!(size, SymbolSize::Square24);
    assert_eq!(
        cw,
        vec![
            124, 35, 113, 112, 35, 59, 142, 45, 35, 99, 98, 117, 100, 105, 66, 100, 117, 106,
            112, 111, 35, 59, 35, 116, 117, 98, 115, 117, 96, 102, 111, 101, 35, 126, 129, 181
        ]
    );
}

#[test]
fn test_padding_sequence() {
    let mut cw = vec![66];
    add_padding(&mut cw, 8);
    // position 3: 129 + (149 * 3 % 253 + 1) = 324 -> 70
    assert_eq!(cw, vec![66, 129, 70, 220, 115, 11, 161, 56]);
}

#[test]
fn test_padding_full_symbol_untouched() {
    let mut cw = vec![1, 2, 3];
    add_padding(&mut cw, 3);
    assert_eq!(cw, vec![1, 2, 3]);
    add_padding(&mut cw, 2);
    assert_eq!(cw, vec![1, 2, 3]);
}

#[test]
fn test_padding_single_pad() {
    let mut cw = vec![1, 2];
    add_padding(&mut cw, 3);
    assert_eq!(cw, vec![1, 2, 129]);
}

#[test]
fn test_padding_is_distinct_from_data_range() {
    let mut cw = vec![];
    add_padding(&mut cw, 1558);
    assert_eq!(cw[0], 129);
    assert!(cw.iter().all(|c| (1..=254).contains(c)));
}

#[test]
fn test_smallest_symbol_chosen() {
    assert_eq!(enc_padded(b"").1, SymbolSize::Square10);
    assert_eq!(enc_padded(b"abc").1, SymbolSize::Square10);
    assert_eq!(enc_padded(b"abcd").1, SymbolSize::Square12);
    assert_eq!(enc_padded(b"123456").1, SymbolSize::Square10);
    assert_eq!(enc_padded(b"1234567").1, SymbolSize::Square12);
}

#[test]
fn test_empty_input_is_padded() {
    let (cw, _) = enc_padded(b"");
    assert_eq!(cw, vec![129, 175, 70]);
}

#[test]
fn test_restricted_symbol_list() {
    let config = EncodeConfig::default().with_symbol_list(SymbolSize::Square16);
    let (cw, size) = GenericDataEncoder::with_config(b"A", &config)
        .into_codewords()
        .unwrap();
    assert_eq!(size, SymbolSize::Square16);
    assert_eq!(cw.len(), 12);
}

#[test]
fn test_too_large() {
    let data = vec![b'a'; 1559];
    let config = EncodeConfig::default();
    assert_eq!(
        GenericDataEncoder::with_config(&data, &config).into_codewords(),
        Err(DataEncodingError::PayloadTooLarge {
            codewords: 1559,
            capacity: 1558
        })
    );
    // digits pack two per codeword
    let digits = vec![b'7'; 3116];
    assert!(GenericDataEncoder::with_config(&digits, &config)
        .into_codewords()
        .is_ok());
}

#[test]
fn test_too_large_for_restricted_list() {
    let config = EncodeConfig::default().with_symbol_list(SymbolList::with_whitelist([
        SymbolSize::Square10,
        SymbolSize::Square12,
    ]));
    assert_eq!(
        GenericDataEncoder::with_config(b"abcdef", &config).into_codewords(),
        Err(DataEncodingError::PayloadTooLarge {
            codewords: 6,
            capacity: 5
        })
    );
}
