//! Arrangement of bits in a Data Matrix symbol.
//!
//! The module contains the struct [MatrixMap] which can be used
//! to iterate over the bit positions of each codeword in the final symbol,
//! i.e., how the black squares are mapped to the encoded data as bytes.
//! The positions are looked up in a [PlacementTable] which is computed
//! once per symbol size.
//!
//! An abstract bitmap struct [Bitmap] is the final output of encoding.
//! It also contains helpers for rendering.
use std::fmt;

use crate::symbol_size::{BlockSetup, SymbolSize};

mod table;

pub use table::PlacementTable;

/// Trait for a visitor to the symbol's bits.
///
/// A bit is called "module" in ISO 16022. Each codeword consists
/// of eight bits (modules).
///
/// During traversal the visitor is called with the codeword's bits,
/// most significant bit first. It can either read or write them.
pub trait Visitor<B: Bit> {
    /// Visit the next codeword's bits.
    fn visit(&mut self, codeword_index: usize, bits: &mut [B; 8]);
}

/// Abstract "bit" type used in [MatrixMap].
pub trait Bit: Clone + PartialEq + fmt::Debug {
    const LOW: Self;
    const HIGH: Self;
}

impl Bit for bool {
    const LOW: bool = false;
    const HIGH: bool = true;
}

struct CodewordPlacer<'a>(&'a [u8]);

impl Visitor<bool> for CodewordPlacer<'_> {
    fn visit(&mut self, idx: usize, bits: &mut [bool; 8]) {
        let codeword = self.0[idx];
        for (i, bit) in bits.iter_mut().enumerate() {
            // 0 = MSB
            // 7 = LSB
            *bit = ((codeword >> (7 - i)) & 1) == 1;
        }
    }
}

/// Place data and error correction codewords into a symbol.
///
/// Panics if the number of codewords does not match the symbol size.
pub fn place(codewords: &[u8], size: SymbolSize) -> Bitmap<bool> {
    assert_eq!(
        codewords.len(),
        size.num_data_codewords() + size.num_ecc_codewords(),
        "wrong number of codewords for {:?}",
        size
    );
    let mut map = MatrixMap::new(size);
    map.traverse(&mut CodewordPlacer(codewords));
    map.bitmap()
}

/// Representation of the bits in a Data Matrix symbol without alignment patterns.
pub struct MatrixMap<B: Bit> {
    entries: Vec<B>,
    table: &'static PlacementTable,
    setup: BlockSetup,
    has_padding: bool,
}

impl<M: Bit> MatrixMap<M> {
    /// Create a new, empty matrix for the given symbol size.
    pub fn new(size: SymbolSize) -> Self {
        let table = PlacementTable::for_size(size);
        let len = table.width() * table.height();
        Self {
            entries: vec![M::LOW; len],
            table,
            setup: size.block_setup(),
            has_padding: size.has_padding_modules(),
        }
    }

    // Write the fixed pattern into the spare 2x2 corner if needed.
    fn write_padding(&mut self) {
        if !self.has_padding {
            return;
        }
        let (h, w) = (self.table.height(), self.table.width());
        *self.bit_mut(h - 2, w - 2) = M::HIGH;
        *self.bit_mut(h - 2, w - 1) = M::LOW;
        *self.bit_mut(h - 1, w - 2) = M::LOW;
        *self.bit_mut(h - 1, w - 1) = M::HIGH;
    }

    /// Traverse the symbol in codeword order and call the visitor.
    pub fn traverse<V: Visitor<M>>(&mut self, visitor: &mut V) {
        let table = self.table;
        for (codeword_idx, cells) in table.iter().enumerate() {
            let mut bits = cells.map(|c| self.entries[c as usize].clone());
            visitor.visit(codeword_idx, &mut bits);
            for (c, bit) in cells.iter().zip(bits) {
                self.entries[*c as usize] = bit;
            }
        }
        self.write_padding();
    }

    /// Get the content of the matrix as a bitmap with alignment patterns added.
    ///
    /// Every data region gets its own frame: a solid line on the left and
    /// bottom edge, alternating modules on the top and right edge.
    pub fn bitmap(&self) -> Bitmap<M> {
        let BlockSetup { width: w, height: h, .. } = self.setup;
        let (content_h, content_w) = (
            self.setup.region_content_height(),
            self.setup.region_content_width(),
        );
        let (region_h, region_w) = (content_h + 2, content_w + 2);

        let mut bits = Vec::with_capacity(h * w);
        for i in 0..h {
            let (region_i, local_i) = (i / region_h, i % region_h);
            for j in 0..w {
                let (region_j, local_j) = (j / region_w, j % region_w);
                let bit = if local_j == 0 || local_i == region_h - 1 {
                    M::HIGH
                } else if local_i == 0 {
                    if local_j % 2 == 0 {
                        M::HIGH
                    } else {
                        M::LOW
                    }
                } else if local_j == region_w - 1 {
                    if local_i % 2 == 1 {
                        M::HIGH
                    } else {
                        M::LOW
                    }
                } else {
                    let row = region_i * content_h + local_i - 1;
                    let col = region_j * content_w + local_j - 1;
                    self.entries[row * self.table.width() + col].clone()
                };
                bits.push(bit);
            }
        }

        Bitmap { width: w, bits }
    }

    fn bit_mut(&mut self, i: usize, j: usize) -> &mut M {
        &mut self.entries[self.table.width() * i + j]
    }
}

/// An abstract bitmap.
///
/// Contains helpers for rendering the content. For rendering targets which
/// use something similar to pixels try [pixels()](Self::pixels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap<M> {
    width: usize,
    bits: Vec<M>,
}

impl<B: Bit> Bitmap<B> {
    /// Return the width of the bitmap (no quiet zone included).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the height of the bitmap (no quiet zone included).
    pub fn height(&self) -> usize {
        self.bits.len() / self.width
    }

    /// Get the bits row by row, starting in the top left corner.
    pub fn bits(&self) -> &[B] {
        &self.bits
    }

    /// Get an iterator over the "black" pixels' coordinates `(x, y)`.
    ///
    /// A black pixel refers to one of the tiny black squares a Data Matrix
    /// is usually made of. Depending on your target, such a pixel
    /// may be rendered using multiple image pixels, or whatever you use
    /// to visualize the Data Matrix.
    ///
    /// The coordinate system is centered in the top left corner starting
    /// in `(0, 0)` with a horizontal x-axis and vertical y-axis.
    /// The pixels are returned in order, incrementing x before y.
    ///
    /// A quiet zone is not included in the coordinates but one must
    /// be added when rendering: The minimum free space required around the Data Matrix
    /// has to have the width/height of one "black" pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// let code = ecc200::encode(b"Foo").unwrap();
    /// for (x, y) in code.bitmap().pixels() {
    ///     // place square/circle at (x, y) to render this Data Matrix
    /// }
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width();
        self.bits
            .iter()
            .enumerate()
            .filter(|(_i, b)| **b == B::HIGH)
            .map(move |(i, _b)| (i % w, i / w))
    }
}

impl Bitmap<bool> {
    /// Is the module in column `x` and row `y` dark?
    ///
    /// Panics if the coordinate is outside of the symbol.
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.width, "x out of range");
        assert!(y < self.height(), "y out of range");
        self.bits[y * self.width + x]
    }
}

/// Dark modules as `#`, light modules as `.`, one line per row.
impl fmt::Display for Bitmap<bool> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.bits.chunks(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for dark in row {
                f.write_str(if *dark { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{place, Bit, Bitmap, MatrixMap, Visitor};
    use crate::symbol_size::{SymbolList, SymbolSize};

    impl Bit for (u16, u8) {
        const LOW: Self = (0, 0);
        const HIGH: Self = (0, 1);
    }

    struct LogVisitor;

    impl Visitor<(u16, u8)> for LogVisitor {
        fn visit(&mut self, cw: usize, bits: &mut [(u16, u8); 8]) {
            for (i, bit) in bits.iter_mut().enumerate() {
                *bit = ((cw + 1) as u16, (i + 1) as u8);
            }
        }
    }

    fn log(s: SymbolSize) -> Vec<(u16, u8)> {
        let mut m = MatrixMap::<(u16, u8)>::new(s);
        m.traverse(&mut LogVisitor);
        m.entries
    }

    struct Fill(bool);

    impl Visitor<bool> for Fill {
        fn visit(&mut self, _cw: usize, bits: &mut [bool; 8]) {
            *bits = [self.0; 8];
        }
    }

    fn filled_bitmap(size: SymbolSize, dark: bool) -> Bitmap<bool> {
        let mut m = MatrixMap::new(size);
        m.traverse(&mut Fill(dark));
        m.bitmap()
    }

    #[test]
    fn test_12x12() {
        let log = log(SymbolSize::Square12);
        #[rustfmt::skip]
        let should = [
            (2,1), (2,2), (3,6), (3,7), (3,8), (4,3), (4,4), (4,5), (1,1), (1,2),
            (2,3), (2,4), (2,5), (5,1), (5,2), (4,6), (4,7), (4,8), (1,3), (1,4),
            (2,6), (2,7), (2,8), (5,3), (5,4), (5,5), (10,1), (10,2), (1,6), (1,7),
            (1,5), (6,1), (6,2), (5,6), (5,7), (5,8), (10,3), (10,4), (10,5), (7,1),
            (1,8), (6,3), (6,4), (6,5), (9,1), (9,2), (10,6), (10,7), (10,8), (7,3),
            (7,2), (6,6), (6,7), (6,8), (9,3), (9,4), (9,5), (11,1), (11,2), (7,6),
            (7,4), (7,5), (8,1), (8,2), (9,6), (9,7), (9,8), (11,3), (11,4), (11,5),
            (7,7), (7,8), (8,3), (8,4), (8,5), (12,1), (12,2), (11,6), (11,7), (11,8),
            (3,1), (3,2), (8,6), (8,7), (8,8), (12,3), (12,4), (12,5), (0,1), (0,0),
            (3,3), (3,4), (3,5), (4,1), (4,2), (12,6), (12,7), (12,8), (0,0), (0,1)
        ];
        assert_eq!(&log, &should);
    }

    #[test]
    fn test_10x10() {
        let log = log(SymbolSize::Square10);
        #[rustfmt::skip]
        let should = [
            (2,1), (2,2), (3,6), (3,7), (3,8), (4,3), (4,4), (4,5),
            (2,3), (2,4), (2,5), (5,1), (5,2), (4,6), (4,7), (4,8),
            (2,6), (2,7), (2,8), (5,3), (5,4), (5,5), (1,1), (1,2),
            (1,5), (6,1), (6,2), (5,6), (5,7), (5,8), (1,3), (1,4),
            (1,8), (6,3), (6,4), (6,5), (8,1), (8,2), (1,6), (1,7),
            (7,2), (6,6), (6,7), (6,8), (8,3), (8,4), (8,5), (7,1),
            (7,4), (7,5), (3,1), (3,2), (8,6), (8,7), (8,8), (7,3),
            (7,7), (7,8), (3,3), (3,4), (3,5), (4,1), (4,2), (7,6),
        ];
        assert_eq!(&log, &should);
    }

    #[test]
    fn test_8x32() {
        let log = log(SymbolSize::Rect8x32);
        #[rustfmt::skip]
        let should = [
            (2,1), (2,2), (3,6), (3,7), (3,8), (4,3), (4,4), (4,5), (8,1), (8,2), (9,6), (9,7), (9,8), (10,3), (10,4), (10,5), (14,1), (14,2), (15,6), (15,7), (15,8), (16,3), (16,4), (16,5), (20,1), (20,2), (1,4), (1,5),
            (2,3), (2,4), (2,5), (5,1), (5,2), (4,6), (4,7), (4,8), (8,3), (8,4), (8,5), (11,1), (11,2), (10,6), (10,7), (10,8), (14,3), (14,4), (14,5), (17,1), (17,2), (16,6), (16,7), (16,8), (20,3), (20,4), (20,5), (1,6),
            (2,6), (2,7), (2,8), (5,3), (5,4), (5,5), (7,1), (7,2), (8,6), (8,7), (8,8), (11,3), (11,4), (11,5), (13,1), (13,2), (14,6), (14,7), (14,8), (17,3), (17,4), (17,5), (19,1), (19,2), (20,6), (20,7), (20,8), (1,7),
            (1,1), (6,1), (6,2), (5,6), (5,7), (5,8), (7,3), (7,4), (7,5), (12,1), (12,2), (11,6), (11,7), (11,8), (13,3), (13,4), (13,5), (18,1), (18,2), (17,6), (17,7), (17,8), (19,3), (19,4), (19,5), (21,1), (21,2), (1,8),
            (1,2), (6,3), (6,4), (6,5), (3,1), (3,2), (7,6), (7,7), (7,8), (12,3), (12,4), (12,5), (9,1), (9,2), (13,6), (13,7), (13,8), (18,3), (18,4), (18,5), (15,1), (15,2), (19,6), (19,7), (19,8), (21,3), (21,4), (21,5),
            (1,3), (6,6), (6,7), (6,8), (3,3), (3,4), (3,5), (4,1), (4,2), (12,6), (12,7), (12,8), (9,3), (9,4), (9,5), (10,1), (10,2), (18,6), (18,7), (18,8), (15,3), (15,4), (15,5), (16,1), (16,2), (21,6), (21,7), (21,8),
        ];
        assert_eq!(&log, &should);
    }

    #[test]
    fn test_visitor_can_read_back() {
        struct Collect(Vec<u8>);

        impl Visitor<bool> for Collect {
            fn visit(&mut self, _cw: usize, bits: &mut [bool; 8]) {
                let byte = bits.iter().fold(0u8, |acc, b| (acc << 1) | *b as u8);
                self.0.push(byte);
            }
        }

        struct Write;

        impl Visitor<bool> for Write {
            fn visit(&mut self, cw: usize, bits: &mut [bool; 8]) {
                let byte = cw as u8;
                for (i, bit) in bits.iter_mut().enumerate() {
                    *bit = (byte >> (7 - i)) & 1 == 1;
                }
            }
        }

        let mut m = MatrixMap::new(SymbolSize::Rect16x36);
        m.traverse(&mut Write);
        let mut read = Collect(vec![]);
        m.traverse(&mut read);
        let expected: Vec<u8> = (0..(32 + 24)).map(|i| i as u8).collect();
        assert_eq!(read.0, expected);
    }

    #[test]
    #[should_panic]
    fn test_place_checks_length() {
        place(&[1, 2, 3], SymbolSize::Square10);
    }

    #[test]
    fn test_place_writes_msb_first() {
        // codeword 0 of 10x10 starts at data area (2, 6), i.e. module (7, 3)
        let mut codewords = vec![0; 8];
        codewords[0] = 0b1000_0000;
        let bitmap = place(&codewords, SymbolSize::Square10);
        assert!(bitmap.get(7, 3));
        assert_eq!(bitmap.pixels().count(), 10 + 9 + 4 + 4 + 1);
    }

    #[test]
    #[should_panic(expected = "x out of range")]
    fn test_get_checks_x() {
        filled_bitmap(SymbolSize::Rect8x18, false).get(18, 0);
    }

    #[test]
    #[should_panic(expected = "y out of range")]
    fn test_get_checks_y() {
        filled_bitmap(SymbolSize::Rect8x18, false).get(0, 8);
    }

    #[test]
    fn test_frame_single_region() {
        let bitmap = filled_bitmap(SymbolSize::Square10, false);
        #[rustfmt::skip]
        let should = [
            "#.#.#.#.#.",
            "#........#",
            "#.........",
            "#........#",
            "#.........",
            "#........#",
            "#.........",
            "#........#",
            "#.........",
            "##########",
        ].join("\n");
        assert_eq!(bitmap.to_string(), should);
    }

    #[test]
    fn test_padding_modules() {
        let bitmap = filled_bitmap(SymbolSize::Square12, false);
        // data area is 10x10, spare corner at data rows/columns 8 and 9
        assert!(bitmap.get(9, 9));
        assert!(!bitmap.get(10, 9));
        assert!(!bitmap.get(9, 10));
        assert!(bitmap.get(10, 10));
    }

    #[test]
    fn test_frame_multiple_regions() {
        // 32x32 has 2x2 regions of 16x16 modules
        let bitmap = filled_bitmap(SymbolSize::Square32, false);
        for x in 0..32 {
            assert!(bitmap.get(x, 15), "bottom of upper regions at x={}", x);
            assert!(bitmap.get(x, 31), "bottom edge at x={}", x);
            assert_eq!(bitmap.get(x, 16), x % 2 == 0, "top of lower regions");
        }
        for y in 0..32 {
            assert!(bitmap.get(0, y));
            assert!(bitmap.get(16, y), "left of right regions at y={}", y);
            if y != 15 && y != 31 {
                assert_eq!(bitmap.get(15, y), y % 2 == 1, "right of left regions");
            }
        }
        assert!(!bitmap.get(5, 5));
    }

    #[test]
    fn test_frame_rectangle() {
        // 8x32 has two regions of 8x16 modules side by side
        let bitmap = filled_bitmap(SymbolSize::Rect8x32, true);
        let row0: String = (0..32).map(|x| if bitmap.get(x, 0) { '#' } else { '.' }).collect();
        assert_eq!(row0, "#.#.#.#.#.#.#.#.#.#.#.#.#.#.#.#.");
        for y in 1..7 {
            assert_eq!(bitmap.get(15, y), y % 2 == 1);
            assert!(bitmap.get(16, y));
            assert!(bitmap.get(8, y), "data module");
        }
    }

    #[test]
    fn test_bitmap_dimensions() {
        for size in SymbolList::all() {
            let bitmap = filled_bitmap(size, true);
            assert_eq!(bitmap.width(), size.columns());
            assert_eq!(bitmap.height(), size.rows());
            let dark = bitmap.pixels().count();
            let (rows, cols) = size.data_regions();
            let (rh, rw) = (size.rows() / rows, size.columns() / cols);
            // frame per region: left + bottom solid, top + right alternating
            let frame = rh + rw - 1 + rw / 2 - 1 + rh / 2 - 1;
            let data = (rh - 2) * (rw - 2) * rows * cols;
            let spare_light = if size.has_padding_modules() { 2 } else { 0 };
            assert_eq!(dark, rows * cols * frame + data - spare_light, "{:?}", size);
        }
    }

    #[test]
    fn test_pixels_order() {
        let bitmap = filled_bitmap(SymbolSize::Square10, false);
        let pixels: Vec<_> = bitmap.pixels().take(6).collect();
        assert_eq!(pixels, vec![(0, 0), (2, 0), (4, 0), (6, 0), (8, 0), (0, 1)]);
    }
}
