//! Reed-Solomon error correction codes.
//!
//! The error correction in a Data Matrix is done using Reed-Solomon codes
//! over GF(256). The data codewords are read as the coefficients of a
//! polynomial d(x), highest power first. With a generator polynomial g(x)
//! of degree k the error code is the remainder r(x) of d(x) * x^k divided
//! by g(x). The final codeword d(x) * x^k + r(x) is then divisible by g(x),
//! which is what a decoder checks.
//!
//! For the Data Matrix code the generator is
//!
//! > g(x) = (x - a^1) (x - a^2) ... (x - a^k)
//!
//! where a = 2 is the primitive element of the field.
//!
//! Bigger symbols split their data into several interleaved blocks,
//! each one protected by its own error code.
mod galois;

use arrayvec::ArrayVec;

use super::symbol_size::SymbolSize;
use galois::GF;

/// Maximal number of error correction codewords in one block.
const MAX_ECC_PER_BLOCK: usize = 68;

/// Polynomial with coefficients ordered by descending powers.
type Poly = ArrayVec<u8, { MAX_ECC_PER_BLOCK + 1 }>;

/// Compute the generator polynomial of degree `len`.
///
/// The leading coefficient (always 1) is included.
fn generator(len: usize) -> Poly {
    assert!(
        len <= MAX_ECC_PER_BLOCK,
        "no symbol size uses {} error codewords per block, this is a bug",
        len
    );
    let mut g = Poly::new();
    g.push(1);
    for i in 1..=len {
        // multiply by (x + a^i), the sign does not matter in characteristic 2
        let root = GF::primitive_power(i);
        g.push(0);
        for j in (1..g.len()).rev() {
            g[j] = (GF(g[j]) + GF(g[j - 1]) * root).into();
        }
    }
    g
}

/// Compute the Reed-Solomon code used by Data Matrix for error correction.
///
/// `data` must contain exactly the number of data codewords of `size`,
/// padding included.
///
/// Depending on the symbol size, the data is first split up into
/// interleaved blocks, codeword `i` going to block `i % blocks`.
/// For each block an error code is computed and the resulting
/// error codes are returned interleaved in the same way.
pub fn encode_error(data: &[u8], size: SymbolSize) -> Vec<u8> {
    let setup = size.block_setup();
    assert_eq!(
        data.len(),
        setup.num_data,
        "data codewords do not fill the symbol, pad them first"
    );
    let k = setup.num_ecc_per_block;
    let gen = generator(k);
    let stride = setup.num_ecc_blocks;

    let mut ecc = Poly::new();
    let mut full_ecc = vec![0; setup.num_error_codes()];
    for block in 0..stride {
        ecc.clear();
        ecc.extend(std::iter::repeat(0).take(k + 1));
        let strided_data_input = data.iter().skip(block).step_by(stride).copied();
        ecc_block(strided_data_input, &gen, &mut ecc);

        for (result, ecc_i) in full_ecc
            .iter_mut()
            .skip(block)
            .step_by(stride)
            .zip(&ecc[..k])
        {
            debug_assert_eq!(*result, 0);
            *result = *ecc_i;
        }
    }
    full_ecc
}

/// Polynomial division of `data(x) * x^k` by `g`, keeping only the remainder.
///
/// `ecc` must have `g.len()` zeroed entries. Afterwards the first `k`
/// entries hold the remainder, highest power first. This is the usual
/// linear feedback shift register formulation, the quotient is never stored.
fn ecc_block<T: Iterator<Item = u8>>(data: T, g: &[u8], ecc: &mut [u8]) {
    let ecc_len = g.len() - 1;
    for a in data {
        let k = GF(ecc[0]) + GF(a);
        for j in 0..ecc_len {
            ecc[j] = (GF(ecc[j + 1]) + k * GF(g[j + 1])).into();
        }
    }
}
