use std::sync::OnceLock;

use crate::symbol_size::{SymbolSize, NUM_SYMBOL_SIZES};

/// Cell index into the data area, row major.
type Cell = u16;

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY: OnceLock<PlacementTable> = OnceLock::new();

static TABLES: [OnceLock<PlacementTable>; NUM_SYMBOL_SIZES] = [EMPTY; NUM_SYMBOL_SIZES];

/// Precomputed position of every codeword bit in the data area.
///
/// The data area is the symbol without its finder and alignment patterns,
/// all data regions glued together. The position of a bit only depends
/// on the symbol size, so the table is built once per size and shared,
/// see [for_size()](Self::for_size).
#[derive(Debug, PartialEq, Eq)]
pub struct PlacementTable {
    width: usize,
    height: usize,
    cells: Vec<[Cell; 8]>,
}

impl PlacementTable {
    /// Get the table for a symbol size, building it on first use.
    pub fn for_size(size: SymbolSize) -> &'static PlacementTable {
        TABLES[size.index()].get_or_init(|| {
            let setup = size.block_setup();
            let table = Self::new(setup.content_width(), setup.content_height());
            debug_assert_eq!(
                table.num_codewords(),
                size.num_data_codewords() + size.num_ecc_codewords()
            );
            table
        })
    }

    /// Trace the diagonal "utah" placement through a data area of the given size.
    ///
    /// The codewords are written in diagonal sweeps starting at the
    /// upper left. Near the borders the utah shape wraps around, and four
    /// corner shapes are used for the places where it does not fit at all.
    fn new(width: usize, height: usize) -> Self {
        assert!(
            width * height <= Cell::MAX as usize + 1,
            "data area too big for the cell index type"
        );
        let mut tracer = Tracer {
            nrow: height as i32,
            ncol: width as i32,
            visited: vec![false; width * height],
            cells: Vec::with_capacity(width * height / 8),
        };
        tracer.run();
        Self {
            width,
            height,
            cells: tracer.cells,
        }
    }

    /// Width of the data area.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the data area.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn num_codewords(&self) -> usize {
        self.cells.len()
    }

    /// Data area coordinates `(row, column)` of a codeword's bits, MSB first.
    pub fn codeword_positions(&self, codeword_index: usize) -> [(usize, usize); 8] {
        self.cells[codeword_index].map(|c| (c as usize / self.width, c as usize % self.width))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &[Cell; 8]> + '_ {
        self.cells.iter()
    }
}

struct Tracer {
    nrow: i32,
    ncol: i32,
    visited: Vec<bool>,
    cells: Vec<[Cell; 8]>,
}

impl Tracer {
    fn run(&mut self) {
        let (nrow, ncol) = (self.nrow, self.ncol);

        // starting in the correct location for first character, bit 8
        let mut i = 4;
        let mut j = 0;

        loop {
            // repeatedly first check for one of the special corner cases
            if i == nrow && j == 0 {
                self.corner1();
            }
            if i == nrow - 2 && j == 0 && ncol % 4 != 0 {
                self.corner2();
            }
            if i == nrow - 2 && j == 0 && ncol % 8 == 4 {
                self.corner3();
            }
            if i == nrow + 4 && j == 2 && ncol % 8 == 0 {
                self.corner4();
            }
            // sweep upward diagonally
            loop {
                if i < nrow && j >= 0 && !self.visited[(i * ncol + j) as usize] {
                    self.utah(i, j);
                }
                i -= 2;
                j += 2;
                if !(i >= 0 && j < ncol) {
                    break;
                }
            }
            i += 1;
            j += 3;

            // sweep downward diagonally
            loop {
                if i >= 0 && j < ncol && !self.visited[(i * ncol + j) as usize] {
                    self.utah(i, j);
                }
                i += 2;
                j -= 2;
                if !(i < nrow && j >= 0) {
                    break;
                }
            }
            i += 3;
            j += 1;

            // until entire map is traversed
            if !(i < nrow || j < ncol) {
                break;
            }
        }
    }

    /// Index of a module, wrapping coordinates outside of the data area.
    fn idx(&self, mut i: i32, mut j: i32) -> Cell {
        let (h, w) = (self.nrow, self.ncol);
        if i < 0 {
            i += h;
            j += 4 - ((h + 4) % 8);
        }
        if j < 0 {
            j += w;
            i += 4 - ((w + 4) % 8);
        }
        // only reached by some DMRE sizes (ISO 21471)
        if i >= h {
            i -= h;
        }
        debug_assert!((0..h).contains(&i) && (0..w).contains(&j));
        (i * w + j) as Cell
    }

    fn record(&mut self, cells: [Cell; 8]) {
        for c in cells {
            debug_assert!(!self.visited[c as usize], "module placed twice");
            self.visited[c as usize] = true;
        }
        self.cells.push(cells);
    }

    // the standard, utah-shaped codeword
    fn utah(&mut self, i: i32, j: i32) {
        self.record([
            self.idx(i - 2, j - 2),
            self.idx(i - 2, j - 1),
            self.idx(i - 1, j - 2),
            self.idx(i - 1, j - 1),
            self.idx(i - 1, j),
            self.idx(i, j - 2),
            self.idx(i, j - 1),
            self.idx(i, j),
        ]);
    }

    fn corner1(&mut self) {
        let (h, w) = (self.nrow, self.ncol);
        self.record([
            self.idx(h - 1, 0),
            self.idx(h - 1, 1),
            self.idx(h - 1, 2),
            self.idx(0, w - 2),
            self.idx(0, w - 1),
            self.idx(1, w - 1),
            self.idx(2, w - 1),
            self.idx(3, w - 1),
        ]);
    }

    fn corner2(&mut self) {
        let (h, w) = (self.nrow, self.ncol);
        self.record([
            self.idx(h - 3, 0),
            self.idx(h - 2, 0),
            self.idx(h - 1, 0),
            self.idx(0, w - 4),
            self.idx(0, w - 3),
            self.idx(0, w - 2),
            self.idx(0, w - 1),
            self.idx(1, w - 1),
        ]);
    }

    fn corner3(&mut self) {
        let (h, w) = (self.nrow, self.ncol);
        self.record([
            self.idx(h - 3, 0),
            self.idx(h - 2, 0),
            self.idx(h - 1, 0),
            self.idx(0, w - 2),
            self.idx(0, w - 1),
            self.idx(1, w - 1),
            self.idx(2, w - 1),
            self.idx(3, w - 1),
        ]);
    }

    fn corner4(&mut self) {
        let (h, w) = (self.nrow, self.ncol);
        self.record([
            self.idx(h - 1, 0),
            self.idx(h - 1, w - 1),
            self.idx(0, w - 3),
            self.idx(0, w - 2),
            self.idx(0, w - 1),
            self.idx(1, w - 3),
            self.idx(1, w - 2),
            self.idx(1, w - 1),
        ]);
    }
}
