//! Clipboard writes through the OSC 52 terminal escape, which works over SSH
//! and without a display server.

use std::io::{self, Write};

use base64::{engine::general_purpose::STANDARD, Engine as _};

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

pub fn copy<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}
