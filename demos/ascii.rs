use std::io::{self, Read};

/// Print the Data Matrix for stdin, `#` for dark and `.` for light modules.
fn main() -> io::Result<()> {
    let mut buffer = vec![];
    io::stdin().read_to_end(&mut buffer)?;

    match ecc200::encode(&buffer) {
        Ok(code) => println!("{}", code.bitmap()),
        Err(err) => eprintln!("{}", err),
    }
    Ok(())
}
