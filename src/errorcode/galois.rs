//! Arithmetic in GF(256) as used by the Data Matrix Reed-Solomon code.
//!
//! An element is stored as a `u8` whose bits are the coefficients of a
//! polynomial of degree at most 7, the least significant bit being the
//! constant term. Addition is coefficient-wise, hence a XOR.
//!
//! Multiplication is done modulo the primitive polynomial
//! x^8 + x^5 + x^3 + x^2 + 1 (0x12D, or 301 as the standard writes it).
//! Because x (the element 2) generates the multiplicative group, every
//! non-zero element is some power x^i. Products are then computed by adding
//! exponents, looked up in the tables `LOG` and `ANTI_LOG`.
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign};

/// The primitive polynomial defining the field.
const PRIMITIVE: u16 = 0x12D;

/// Compute the two lookup tables for GF(256).
const fn compute_alog_log() -> ([u8; 255], [u8; 256]) {
    let mut alog = [0u8; 255];
    let mut log = [0u8; 256];
    let mut p: u16 = 1;
    let mut i: u8 = 0;
    while i < 255 {
        alog[i as usize] = p as u8;
        log[p as usize] = i;
        // multiply by x and reduce
        p <<= 1;
        if p >= 256 {
            p ^= PRIMITIVE;
        }
        i += 1;
    }
    (alog, log)
}

/// Power i of the generator to polynomial representation.
const ANTI_LOG: [u8; 255] = compute_alog_log().0;

/// Polynomial representation to power i of the generator. `LOG[0]` is unused.
const LOG: [u8; 256] = compute_alog_log().1;

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GF(pub u8);

impl GF {
    /// Get x^i where x is the primitive element 2.
    pub fn primitive_power(i: usize) -> Self {
        GF(ANTI_LOG[i % 255])
    }
}

impl fmt::Debug for GF {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}₂₅₆", self.0)
    }
}

impl Add<GF> for GF {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self {
        GF(self.0 ^ rhs.0)
    }
}

impl AddAssign<GF> for GF {
    fn add_assign(&mut self, rhs: GF) {
        *self = *self + rhs;
    }
}

impl Mul<GF> for GF {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return GF(0);
        }
        let ia = LOG[self.0 as usize] as usize;
        let ib = LOG[rhs.0 as usize] as usize;
        GF(ANTI_LOG[(ia + ib) % 255])
    }
}

impl MulAssign<GF> for GF {
    fn mul_assign(&mut self, rhs: GF) {
        *self = *self * rhs;
    }
}

impl From<GF> for u8 {
    fn from(a: GF) -> u8 {
        a.0
    }
}

impl From<u8> for GF {
    fn from(i: u8) -> Self {
        GF(i)
    }
}

#[test]
fn sanity_check_tables() {
    use std::collections::HashSet;

    let anti_log: HashSet<u8> = ANTI_LOG.iter().cloned().collect();
    assert_eq!(anti_log.len(), ANTI_LOG.len());
    assert!(!anti_log.contains(&0));

    for i in 0..255 {
        assert_eq!(i, LOG[ANTI_LOG[i] as usize] as usize);
        assert_eq!(i + 1, ANTI_LOG[LOG[i + 1] as usize] as usize);
    }
}

#[test]
fn gf256_mul() {
    assert_eq!(GF(123) * GF(1), GF(123));
    assert_eq!(GF(234) * GF(0), GF(0));
    assert_eq!(GF(0) * GF(23), GF(0));
    assert_eq!(GF(2) * GF(4) * GF(8) * GF(16) * GF(32), GF(228));
    // x^8 reduces to x^5 + x^3 + x^2 + 1
    assert_eq!(GF(128) * GF(2), GF(0b0010_1101));
}

#[test]
fn gf256_distributive() {
    for a in (0..=255).step_by(7) {
        for b in (0..=255).step_by(11) {
            for c in (0..=255).step_by(13) {
                let (a, b, c) = (GF(a), GF(b), GF(c));
                assert_eq!(a * (b + c), a * b + a * c);
                assert_eq!(a * b, b * a);
            }
        }
    }
}

#[test]
fn test_primitive_power() {
    let mut a = GF(1);
    for i in 0..500 {
        assert_eq!(GF::primitive_power(i), a);
        a *= GF(2);
    }
}
