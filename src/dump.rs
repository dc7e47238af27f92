use std::fmt;

/// Diagnostic table of a tape: one row per cell with its index, numeric value
/// and character.
///
/// ```text
/// Cell	Val	Char
/// 0:	72	'H'
/// 1:	0	'\u{0}'
/// ```
pub struct TapeDump<'a> {
    cells: &'a [u8],
}

impl<'a> TapeDump<'a> {
    pub fn new(cells: &'a [u8]) -> Self {
        Self { cells }
    }
}

impl fmt::Display for TapeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cell\tVal\tChar")?;
        for (index, &value) in self.cells.iter().enumerate() {
            writeln!(f, "{index}:\t{value}\t'{}'", CellChar(value))?;
        }
        Ok(())
    }
}

struct CellChar(u8);

impl fmt::Display for CellChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = char::from(self.0);
        // Printable ASCII as-is, anything else escaped so the dump stays one row per cell.
        if ch == ' ' || ch.is_ascii_graphic() {
            write!(f, "{ch}")
        } else {
            write!(f, "{}", ch.escape_default())
        }
    }
}
