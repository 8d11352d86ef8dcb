use super::{DataEncodingError, EncodingContext};

pub(super) const PAD: u8 = 129;
pub(super) const FNC1: u8 = 232;

const DIGIT_PAIR_OFFSET: u8 = 130;
const UPPER_SHIFT: u8 = 235;

fn two_digits_coming<T: EncodingContext>(ctx: &T) -> Option<(u8, u8)> {
    match (ctx.peek(0), ctx.peek(1)) {
        (Some(a), Some(b)) if a.is_ascii_digit() && b.is_ascii_digit() => Some((a, b)),
        _ => None,
    }
}

/// Encode everything left in `ctx` in ASCII mode.
///
/// - two digits are packed into one codeword `130 + 10 * d1 + d2`,
/// - the FNC1 sentinel becomes the codeword 232,
/// - other characters up to 127 are written as `ch + 1`,
/// - characters from 128 are prefixed with an Upper Shift.
pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), DataEncodingError> {
    while ctx.has_more_characters() {
        if let Some((a, b)) = two_digits_coming(ctx) {
            ctx.eat();
            ctx.eat();
            ctx.push((a - b'0') * 10 + (b - b'0') + DIGIT_PAIR_OFFSET);
            continue;
        }
        match ctx.eat() {
            Some(ch) if Some(ch) == ctx.fnc1_sentinel() => ctx.push(FNC1),
            Some(ch @ 0..=127) => ctx.push(ch + 1),
            Some(ch @ 128..=255) => {
                ctx.push(UPPER_SHIFT);
                ctx.push(ch - 127);
            }
            None => break,
        }
    }
    Ok(())
}

/// Number of codewords needed to encode `rest` in ASCII mode.
pub(crate) fn encoding_size(mut rest: &[u8], fnc1_sentinel: Option<u8>) -> usize {
    let mut count = 0;
    while let Some((ch, tail)) = rest.split_first() {
        match tail.first() {
            Some(next) if ch.is_ascii_digit() && next.is_ascii_digit() => {
                count += 1;
                rest = &tail[1..];
                continue;
            }
            _ => {}
        }
        count += if *ch >= 128 && Some(*ch) != fnc1_sentinel {
            2
        } else {
            1
        };
        rest = tail;
    }
    count
}
