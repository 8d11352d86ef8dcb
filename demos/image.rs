use ecc200::{DataMatrix, SymbolList};
use image::{GrayImage, Luma};

/// Generate image which only contains a Data Matrix
fn main() {
    // Width and height in pixels of one module in the image.
    const N: usize = 5;

    // A GS1 element string, 0x29 is turned into FNC1
    let code = DataMatrix::encode(b"\x290109501101530003", SymbolList::with_rectangles()).unwrap();
    let bitmap = code.bitmap();

    // Leave a quiet zone of one module around the symbol
    let width = ((bitmap.width() + 2) * N) as u32;
    let height = ((bitmap.height() + 2) * N) as u32;
    let mut image = GrayImage::from_pixel(width, height, Luma([255]));
    for (x, y) in bitmap.pixels() {
        for i in 0..N {
            for j in 0..N {
                let x_i = (x + 1) * N + j;
                let y_j = (y + 1) * N + i;
                image.put_pixel(x_i as u32, y_j as u32, Luma([0]));
            }
        }
    }

    image.save("data_matrix.png").unwrap();
}
