use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::RangeBounds;

use flagset::{flags, FlagSet};

use crate::encodation::DataEncodingError;

#[cfg(test)]
use enum_iterator::Sequence;

#[cfg(test)]
use pretty_assertions::assert_eq;

type SymbolCollection = BTreeSet<SymbolSize>;

flags! {
    /// Families of symbol sizes found in the catalog.
    ///
    /// ISO 16022 defines square symbols and a handful of rectangles.
    /// ISO 21471 adds more rectangles, the DMRE sizes.
    pub enum SymbolFamily: u8 {
        Square            = 0b001,
        Rectangle         = 0b010,
        ExtendedRectangle = 0b100,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Set of [symbol sizes](SymbolSize) the encoder is allowed to use.
///
/// The encoder picks the smallest symbol in the list which can hold the
/// data codewords.
///
/// The [default](SymbolList::default) contains the square sizes of ISO 16022.
/// Rectangles can be opted into, and the selection can be restricted further
/// by size range or by giving an explicit list.
///
/// ## Examples
///
/// ```rust
/// # use ecc200::{DataMatrix, SymbolList};
/// let code = DataMatrix::encode(
///     b"Hello, World!",
///     SymbolList::with_rectangles()
///         .enforce_rectangular()
///         .enforce_height_in(..=12),
/// );
/// ```
///
/// Because [SymbolSize] and `[SymbolSize; N]` implement `Into<SymbolList>`
/// one can also write
///
/// ```rust
/// # use ecc200::{DataMatrix, SymbolSize};
/// let code = DataMatrix::encode(b"content", SymbolSize::Square22);
/// let code = DataMatrix::encode(b"content", [SymbolSize::Square22, SymbolSize::Square26]);
/// ```
pub struct SymbolList {
    symbols: SymbolCollection,
}

impl SymbolList {
    /// Get all sizes belonging to one of the given families.
    pub fn with_families(families: impl Into<FlagSet<SymbolFamily>>) -> Self {
        let families = families.into();
        SYMBOL_SIZES
            .iter()
            .copied()
            .filter(|s| families.contains(s.family()))
            .collect()
    }

    /// Get the square and rectangular sizes of ISO 16022.
    pub fn with_rectangles() -> Self {
        Self::with_families(SymbolFamily::Square | SymbolFamily::Rectangle)
    }

    /// Get all sizes, including the [DMRE rectangles](https://e-d-c.info/projekte/dmre.html).
    ///
    /// Be aware that your decoder might not recognize the extended rectangles.
    pub fn with_extended_rectangles() -> Self {
        Self::with_families(FlagSet::full())
    }

    /// Get a list with all supported symbol sizes.
    pub fn all() -> Self {
        Self::with_extended_rectangles()
    }

    /// Remove all non-square symbols from the current selection.
    pub fn enforce_square(mut self) -> Self {
        self.symbols.retain(|s| s.is_square());
        self
    }

    /// Remove all square symbols from the current selection.
    pub fn enforce_rectangular(mut self) -> Self {
        self.symbols.retain(|s| !s.is_square());
        self
    }

    /// Only keep symbols with width in the given range.
    pub fn enforce_width_in<R: RangeBounds<usize>>(mut self, bounds: R) -> Self {
        self.symbols.retain(|s| bounds.contains(&s.columns()));
        self
    }

    /// Only keep symbols with height in the given range.
    pub fn enforce_height_in<R: RangeBounds<usize>>(mut self, bounds: R) -> Self {
        self.symbols.retain(|s| bounds.contains(&s.rows()));
        self
    }

    /// Create a symbol list containing only the given symbols.
    ///
    /// The list does not need to be sorted.
    pub fn with_whitelist<I>(whitelist: I) -> Self
    where
        I: IntoIterator<Item = SymbolSize>,
    {
        whitelist.into_iter().collect()
    }

    /// Iterate over the sizes in ascending order of capacity.
    pub fn iter(&self) -> impl Iterator<Item = SymbolSize> + '_ {
        self.symbols.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check if a symbol size is in this symbol list.
    pub fn contains(&self, symbol_size: &SymbolSize) -> bool {
        self.symbols.contains(symbol_size)
    }

    /// Number of data codewords the biggest symbol in the list can hold.
    pub fn max_data_codewords(&self) -> usize {
        self.symbols
            .iter()
            .map(|s| s.num_data_codewords())
            .max()
            .unwrap_or(0)
    }

    /// Find the smallest symbol which holds `required` data codewords.
    ///
    /// The search is linear in ascending order, so no smaller symbol of
    /// the list would fit.
    pub fn select_size(&self, required: usize) -> Result<SymbolSize, DataEncodingError> {
        self.symbols
            .iter()
            .find(|s| s.num_data_codewords() >= required)
            .copied()
            .ok_or(DataEncodingError::PayloadTooLarge {
                codewords: required,
                capacity: self.max_data_codewords(),
            })
    }
}

impl IntoIterator for SymbolList {
    type Item = SymbolSize;
    type IntoIter = <SymbolCollection as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.into_iter()
    }
}

impl FromIterator<SymbolSize> for SymbolList {
    fn from_iter<T: IntoIterator<Item = SymbolSize>>(iter: T) -> Self {
        Self {
            symbols: SymbolCollection::from_iter(iter),
        }
    }
}

impl Extend<SymbolSize> for SymbolList {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = SymbolSize>,
    {
        self.symbols.extend(iter);
    }
}

impl Default for SymbolList {
    fn default() -> Self {
        Self::with_families(SymbolFamily::Square)
    }
}

impl From<SymbolSize> for SymbolList {
    fn from(size: SymbolSize) -> SymbolList {
        SymbolList::with_whitelist([size])
    }
}

impl<const N: usize> From<[SymbolSize; N]> for SymbolList {
    fn from(other: [SymbolSize; N]) -> SymbolList {
        SymbolList::with_whitelist(other)
    }
}

/// Geometry and error correction layout of a symbol size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockSetup {
    /// Total height including alignment patterns, no quiet zone
    pub(crate) height: usize,
    /// Total width including alignment patterns, no quiet zone
    pub(crate) width: usize,
    /// Number of data regions stacked on top of each other
    pub(crate) region_rows: usize,
    /// Number of data regions side by side
    pub(crate) region_columns: usize,
    pub(crate) num_data: usize,
    /// Number of interleaved error correction blocks
    pub(crate) num_ecc_blocks: usize,
    /// Number of error correction codewords per block
    pub(crate) num_ecc_per_block: usize,
}

impl BlockSetup {
    pub(crate) fn num_error_codes(&self) -> usize {
        self.num_ecc_blocks * self.num_ecc_per_block
    }

    /// Height of the data area inside one region's frame.
    pub(crate) fn region_content_height(&self) -> usize {
        self.height / self.region_rows - 2
    }

    /// Width of the data area inside one region's frame.
    pub(crate) fn region_content_width(&self) -> usize {
        self.width / self.region_columns - 2
    }

    /// Height of all data areas glued together.
    pub(crate) fn content_height(&self) -> usize {
        self.height - 2 * self.region_rows
    }

    /// Width of all data areas glued together.
    pub(crate) fn content_width(&self) -> usize {
        self.width - 2 * self.region_columns
    }
}

/// The symbol sizes supported by Data Matrix.
///
/// The numbers behind a variant, e.g., [Rect8x18](SymbolSize::Rect8x18),
/// give the number of modules (the tiny black squares) the symbol is
/// tall and wide.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Sequence))]
pub enum SymbolSize {
    Square10,
    Square12,
    Square14,
    Square16,
    Square18,
    Square20,
    Square22,
    Square24,
    Square26,
    Square32,
    Square36,
    Square40,
    Square44,
    Square48,
    Square52,
    Square64,
    Square72,
    Square80,
    Square88,
    Square96,
    Square104,
    Square120,
    Square132,
    Square144,
    Rect8x18,
    Rect8x32,
    Rect12x26,
    Rect12x36,
    Rect16x36,
    Rect16x48,

    /// DMRE 8x48 variant
    Rect8x48,
    /// DMRE 8x64 variant
    Rect8x64,
    /// DMRE 8x80 variant
    Rect8x80,
    /// DMRE 8x96 variant
    Rect8x96,
    /// DMRE 8x120 variant
    Rect8x120,
    /// DMRE 8x144 variant
    Rect8x144,
    /// DMRE 12x64 variant
    Rect12x64,
    /// DMRE 12x88 variant
    Rect12x88,
    /// DMRE 16x64 variant
    Rect16x64,
    /// DMRE 20x36 variant
    Rect20x36,
    /// DMRE 20x44 variant
    Rect20x44,
    /// DMRE 20x64 variant
    Rect20x64,
    /// DMRE 22x48 variant
    Rect22x48,
    /// DMRE 24x48 variant
    Rect24x48,
    /// DMRE 24x64 variant
    Rect24x64,
    /// DMRE 26x40 variant
    Rect26x40,
    /// DMRE 26x48 variant
    Rect26x48,
    /// DMRE 26x64 variant
    Rect26x64,
}

/// Number of symbol sizes in the catalog.
pub(crate) const NUM_SYMBOL_SIZES: usize = 48;

/// The catalog, ascending by number of data codewords.
#[rustfmt::skip]
pub(crate) const SYMBOL_SIZES: &[SymbolSize; NUM_SYMBOL_SIZES] = &[
    SymbolSize::Square10, SymbolSize::Square12, SymbolSize::Rect8x18, SymbolSize::Square14,
    SymbolSize::Rect8x32, SymbolSize::Square16, SymbolSize::Rect12x26, SymbolSize::Square18,
    SymbolSize::Rect8x48, SymbolSize::Square20, SymbolSize::Rect12x36, SymbolSize::Rect8x64,
    SymbolSize::Square22, SymbolSize::Rect16x36, SymbolSize::Rect8x80, SymbolSize::Square24,
    SymbolSize::Rect8x96, SymbolSize::Rect12x64, SymbolSize::Square26, SymbolSize::Rect20x36,
    SymbolSize::Rect16x48, SymbolSize::Rect8x120, SymbolSize::Rect20x44, SymbolSize::Square32,
    SymbolSize::Rect16x64, SymbolSize::Rect8x144, SymbolSize::Rect12x88, SymbolSize::Rect26x40,
    SymbolSize::Rect22x48, SymbolSize::Rect24x48, SymbolSize::Rect20x64, SymbolSize::Square36,
    SymbolSize::Rect26x48, SymbolSize::Rect24x64, SymbolSize::Square40, SymbolSize::Rect26x64,
    SymbolSize::Square44, SymbolSize::Square48, SymbolSize::Square52, SymbolSize::Square64,
    SymbolSize::Square72, SymbolSize::Square80, SymbolSize::Square88, SymbolSize::Square96,
    SymbolSize::Square104, SymbolSize::Square120, SymbolSize::Square132, SymbolSize::Square144,
];

impl SymbolSize {
    #[rustfmt::skip]
    pub(crate) fn block_setup(&self) -> BlockSetup {
        // (height, width, region rows, region columns, data, ecc blocks, ecc per block)
        let (height, width, region_rows, region_columns, num_data, num_ecc_blocks, num_ecc_per_block) =
            match self {
                Self::Square10  => (10,  10,  1, 1, 3,    1,  5),
                Self::Square12  => (12,  12,  1, 1, 5,    1,  7),
                Self::Square14  => (14,  14,  1, 1, 8,    1,  10),
                Self::Square16  => (16,  16,  1, 1, 12,   1,  12),
                Self::Square18  => (18,  18,  1, 1, 18,   1,  14),
                Self::Square20  => (20,  20,  1, 1, 22,   1,  18),
                Self::Square22  => (22,  22,  1, 1, 30,   1,  20),
                Self::Square24  => (24,  24,  1, 1, 36,   1,  24),
                Self::Square26  => (26,  26,  1, 1, 44,   1,  28),
                Self::Square32  => (32,  32,  2, 2, 62,   1,  36),
                Self::Square36  => (36,  36,  2, 2, 86,   1,  42),
                Self::Square40  => (40,  40,  2, 2, 114,  1,  48),
                Self::Square44  => (44,  44,  2, 2, 144,  1,  56),
                Self::Square48  => (48,  48,  2, 2, 174,  1,  68),
                Self::Square52  => (52,  52,  2, 2, 204,  2,  42),
                Self::Square64  => (64,  64,  4, 4, 280,  2,  56),
                Self::Square72  => (72,  72,  4, 4, 368,  4,  36),
                Self::Square80  => (80,  80,  4, 4, 456,  4,  48),
                Self::Square88  => (88,  88,  4, 4, 576,  4,  56),
                Self::Square96  => (96,  96,  4, 4, 696,  4,  68),
                Self::Square104 => (104, 104, 4, 4, 816,  6,  56),
                Self::Square120 => (120, 120, 6, 6, 1050, 6,  68),
                Self::Square132 => (132, 132, 6, 6, 1304, 8,  62),
                Self::Square144 => (144, 144, 6, 6, 1558, 10, 62),
                Self::Rect8x18  => (8,   18,  1, 1, 5,    1,  7),
                Self::Rect8x32  => (8,   32,  1, 2, 10,   1,  11),
                Self::Rect12x26 => (12,  26,  1, 1, 16,   1,  14),
                Self::Rect12x36 => (12,  36,  1, 2, 22,   1,  18),
                Self::Rect16x36 => (16,  36,  1, 2, 32,   1,  24),
                Self::Rect16x48 => (16,  48,  1, 2, 49,   1,  28),
                // DMRE
                Self::Rect8x48  => (8,   48,  1, 2, 18,   1,  15),
                Self::Rect8x64  => (8,   64,  1, 4, 24,   1,  18),
                Self::Rect8x80  => (8,   80,  1, 4, 32,   1,  22),
                Self::Rect8x96  => (8,   96,  1, 4, 38,   1,  28),
                Self::Rect8x120 => (8,   120, 1, 6, 49,   1,  32),
                Self::Rect8x144 => (8,   144, 1, 6, 63,   1,  36),
                Self::Rect12x64 => (12,  64,  1, 4, 43,   1,  27),
                Self::Rect12x88 => (12,  88,  1, 4, 64,   1,  36),
                Self::Rect16x64 => (16,  64,  1, 4, 62,   1,  36),
                Self::Rect20x36 => (20,  36,  1, 2, 44,   1,  28),
                Self::Rect20x44 => (20,  44,  1, 2, 56,   1,  34),
                Self::Rect20x64 => (20,  64,  1, 4, 84,   1,  42),
                Self::Rect22x48 => (22,  48,  1, 2, 72,   1,  38),
                Self::Rect24x48 => (24,  48,  1, 2, 80,   1,  41),
                Self::Rect24x64 => (24,  64,  1, 4, 108,  1,  46),
                Self::Rect26x40 => (26,  40,  1, 2, 70,   1,  38),
                Self::Rect26x48 => (26,  48,  1, 2, 90,   1,  42),
                Self::Rect26x64 => (26,  64,  1, 4, 118,  1,  50),
            };
        BlockSetup {
            height,
            width,
            region_rows,
            region_columns,
            num_data,
            num_ecc_blocks,
            num_ecc_per_block,
        }
    }

    /// Total number of module rows, alignment patterns included.
    pub fn rows(&self) -> usize {
        self.block_setup().height
    }

    /// Total number of module columns, alignment patterns included.
    pub fn columns(&self) -> usize {
        self.block_setup().width
    }

    /// Arrangement of the data regions as `(rows, columns)`.
    pub fn data_regions(&self) -> (usize, usize) {
        let setup = self.block_setup();
        (setup.region_rows, setup.region_columns)
    }

    /// Number of data codewords the symbol holds.
    pub fn num_data_codewords(&self) -> usize {
        self.block_setup().num_data
    }

    /// Total number of error correction codewords over all blocks.
    pub fn num_ecc_codewords(&self) -> usize {
        self.block_setup().num_error_codes()
    }

    /// Number of interleaved Reed-Solomon blocks.
    pub fn num_ecc_blocks(&self) -> usize {
        self.block_setup().num_ecc_blocks
    }

    pub fn family(&self) -> SymbolFamily {
        if self.is_square() {
            SymbolFamily::Square
        } else if self.is_dmre() {
            SymbolFamily::ExtendedRectangle
        } else {
            SymbolFamily::Rectangle
        }
    }

    pub fn is_square(&self) -> bool {
        let setup = self.block_setup();
        setup.width == setup.height
    }

    /// Symbol is part of the rectangular extension (ISO 21471 DMRE).
    pub fn is_dmre(&self) -> bool {
        (*self as usize) > (Self::Rect16x48 as usize)
    }

    /// Position in the catalog enum, used to index per-size caches.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// The data area of a few sizes is four modules bigger than needed.
    ///
    /// Those modules are filled with a fixed pattern in the lower right corner.
    pub(crate) fn has_padding_modules(&self) -> bool {
        matches!(
            self,
            Self::Square12 | Self::Square16 | Self::Square20 | Self::Square24
        )
    }
}

impl PartialOrd for SymbolSize {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SymbolSize {
    fn cmp(&self, other: &Self) -> Ordering {
        fn key(obj: &SymbolSize) -> (usize, usize) {
            let bs = obj.block_setup();
            (bs.num_data, bs.width.pow(2) + bs.height.pow(2))
        }
        key(self).cmp(&key(other))
    }
}

#[test]
fn test_partial_ord_symbol_size() {
    for a in SYMBOL_SIZES {
        for b in SYMBOL_SIZES {
            assert_eq!(
                a.partial_cmp(b) == Some(Ordering::Equal),
                a == b,
                "a = {:?}, b = {:?}",
                a,
                b,
            );
        }
    }
}

#[test]
fn test_catalog_is_sorted() {
    let mut all: Vec<SymbolSize> = SYMBOL_SIZES.to_vec();
    all.sort_unstable();
    assert_eq!(&all[..], &SYMBOL_SIZES[..]);
}

#[test]
fn test_catalog_has_every_variant() {
    let mut all: Vec<SymbolSize> = enum_iterator::all::<SymbolSize>().collect();
    assert_eq!(all.len(), NUM_SYMBOL_SIZES);
    all.sort_unstable();
    assert_eq!(&all[..], &SYMBOL_SIZES[..]);
    for (i, size) in enum_iterator::all::<SymbolSize>().enumerate() {
        assert_eq!(size.index(), i);
    }
}

#[test]
fn test_default_is_square_catalog() {
    let all: Vec<SymbolSize> = SymbolList::default().iter().collect();
    let expected: Vec<SymbolSize> = SYMBOL_SIZES
        .iter()
        .copied()
        .filter(|s| s.is_square())
        .collect();
    assert_eq!(all.len(), 24);
    assert_eq!(all, expected);
}

#[test]
fn test_with_rectangles() {
    let all: Vec<SymbolSize> = SymbolList::with_rectangles()
        .enforce_rectangular()
        .iter()
        .collect();
    let expected = vec![
        SymbolSize::Rect8x18,
        SymbolSize::Rect8x32,
        SymbolSize::Rect12x26,
        SymbolSize::Rect12x36,
        SymbolSize::Rect16x36,
        SymbolSize::Rect16x48,
    ];
    assert_eq!(all, expected);
}

#[test]
fn test_families() {
    let dmre = SymbolList::with_families(SymbolFamily::ExtendedRectangle);
    assert_eq!(dmre.iter().count(), 18);
    assert!(dmre.iter().all(|s| s.is_dmre() && !s.is_square()));
    assert_eq!(SymbolList::all().iter().count(), NUM_SYMBOL_SIZES);
    assert_eq!(SymbolSize::Rect12x26.family(), SymbolFamily::Rectangle);
    assert_eq!(SymbolSize::Square144.family(), SymbolFamily::Square);
}

#[test]
fn test_height_range() {
    let symbols = SymbolList::all().enforce_height_in(0..21);
    assert!(!symbols.is_empty());
    for sym in symbols {
        assert!(sym.rows() <= 20);
    }
}

#[test]
fn test_width_range() {
    let symbols = SymbolList::all().enforce_width_in(9..=10);
    assert_eq!(symbols.iter().collect::<Vec<_>>(), vec![SymbolSize::Square10]);
}

#[test]
fn test_distinguishable_by_size() {
    let sizes: BTreeSet<(usize, usize)> = SYMBOL_SIZES
        .iter()
        .map(|s| (s.rows(), s.columns()))
        .collect();
    assert_eq!(sizes.len(), NUM_SYMBOL_SIZES);
}

#[test]
fn test_content_sizes_consistency() {
    for size in SymbolList::all() {
        let setup = size.block_setup();
        let codewords = size.num_data_codewords() + size.num_ecc_codewords();
        let padding = if size.has_padding_modules() { 4 } else { 0 };
        assert_eq!(
            codewords * 8 + padding,
            setup.content_width() * setup.content_height(),
            "{:?}",
            size
        );
        assert_eq!(
            setup.content_width(),
            setup.region_content_width() * setup.region_columns
        );
        assert_eq!(
            setup.content_height(),
            setup.region_content_height() * setup.region_rows
        );
    }
}

#[test]
fn test_select_size_smallest() {
    let list = SymbolList::default();
    assert_eq!(list.select_size(0), Ok(SymbolSize::Square10));
    assert_eq!(list.select_size(3), Ok(SymbolSize::Square10));
    assert_eq!(list.select_size(4), Ok(SymbolSize::Square12));
    assert_eq!(list.select_size(36), Ok(SymbolSize::Square24));
    assert_eq!(list.select_size(1558), Ok(SymbolSize::Square144));
    for required in 0..=1558 {
        let size = list.select_size(required).unwrap();
        assert!(size.num_data_codewords() >= required);
        assert!(list
            .iter()
            .take_while(|s| *s != size)
            .all(|s| s.num_data_codewords() < required));
    }
}

#[test]
fn test_select_size_with_rectangles() {
    let list = SymbolList::with_rectangles();
    assert_eq!(list.select_size(5), Ok(SymbolSize::Square12));
    assert_eq!(list.select_size(9), Ok(SymbolSize::Rect8x32));
}

#[test]
fn test_select_size_too_large() {
    assert_eq!(
        SymbolList::default().select_size(1559),
        Err(DataEncodingError::PayloadTooLarge {
            codewords: 1559,
            capacity: 1558,
        })
    );
    assert_eq!(
        SymbolList::with_whitelist(Vec::<SymbolSize>::new()).select_size(1),
        Err(DataEncodingError::PayloadTooLarge {
            codewords: 1,
            capacity: 0,
        })
    );
}
