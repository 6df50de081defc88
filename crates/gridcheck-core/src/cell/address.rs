//! Cell address and range types

use std::fmt;
use std::str::FromStr;

use lazy_regex::regex_captures;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A cell address (e.g., "A1", "AA27")
///
/// Rows and columns are 1-based, matching what a user sees in a spreadsheet.
/// Column letters use bijective base-26: A=1 ... Z=26, AA=27.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based, A=1)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address from 1-based row and column numbers
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use gridcheck_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3").unwrap();
    /// assert_eq!(addr.row, 3);
    /// assert_eq!(addr.col, 2);
    ///
    /// assert!(CellAddress::parse("b3").is_err());
    /// assert!(CellAddress::parse("B0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (_, letters, digits) = regex_captures!(r"^([A-Z]+)([1-9][0-9]*)$", s)
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;

        let col = Self::letters_to_column(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(s.to_string()))?;

        Ok(Self { row, col })
    }

    /// Convert a column number to letters (1 = A, 26 = Z, 27 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to a column number (A = 1, Z = 26, AA = 27, etc.)
    ///
    /// Only uppercase ASCII letters are accepted.
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_uppercase() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col
                .checked_mul(26)
                .and_then(|v| v.checked_add(c as u32 - 'A' as u32 + 1))
                .ok_or_else(|| Error::InvalidAddress(format!("column {} out of range", letters)))?;
        }

        Ok(col)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row)
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Locator for an entire row, e.g. `6:6`
pub fn row_locator(row: u32) -> String {
    format!("{row}:{row}")
}

/// Locator for an entire column, e.g. `J:J`
pub fn column_locator(col: u32) -> String {
    let letters = CellAddress::column_to_letters(col);
    format!("{letters}:{letters}")
}

/// A rectangular range of cells (e.g., "A2:B3")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    /// Top-left address
    pub start: CellAddress,
    /// Bottom-right address
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range, normalized so `start` is the top-left corner
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Create a range from 1-based row/column numbers
    pub fn from_coords(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Parse a range from `A1:B10` notation (a bare address is a single-cell range)
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((start, end)) => {
                let start = CellAddress::parse(start)
                    .map_err(|_| Error::InvalidRange(s.to_string()))?;
                let end =
                    CellAddress::parse(end).map_err(|_| Error::InvalidRange(s.to_string()))?;
                Ok(Self::new(start, end))
            }
            None => {
                let addr = CellAddress::parse(s)?;
                Ok(Self::new(addr, addr))
            }
        }
    }

    /// Top-left cell of the range
    pub fn top_left(&self) -> CellAddress {
        self.start
    }

    /// Check whether the range covers exactly one cell
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.col - self.start.col + 1
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && self.end.row >= other.start.row
            && self.start.col <= other.end.col
            && self.end.col >= other.start.col
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            next: Some(self.start),
        }
    }

    /// Format as `A1:B10` string
    pub fn to_a1_string(&self) -> String {
        if self.is_single_cell() {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    /// Next address to yield, `None` once the range is exhausted
    next: Option<CellAddress>,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        let addr = self.next?;

        // Ranges may end at u32::MAX, so never step past the last cell
        self.next = if addr.col < self.range.end.col {
            Some(CellAddress::new(addr.row, addr.col + 1))
        } else if addr.row < self.range.end.row {
            Some(CellAddress::new(addr.row + 1, self.range.start.col))
        } else {
            None
        };

        Some(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(1), "A");
        assert_eq!(CellAddress::column_to_letters(2), "B");
        assert_eq!(CellAddress::column_to_letters(26), "Z");
        assert_eq!(CellAddress::column_to_letters(27), "AA");
        assert_eq!(CellAddress::column_to_letters(28), "AB");
        assert_eq!(CellAddress::column_to_letters(702), "ZZ");
        assert_eq!(CellAddress::column_to_letters(703), "AAA");
        assert_eq!(CellAddress::column_to_letters(16384), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 1);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 27);
        assert_eq!(CellAddress::letters_to_column("ZZ").unwrap(), 702);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16384);

        assert!(CellAddress::letters_to_column("a").is_err());
        assert!(CellAddress::letters_to_column("").is_err());
        assert!(CellAddress::letters_to_column("ZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(1, 1));
        assert_eq!(CellAddress::parse("J10").unwrap(), CellAddress::new(10, 10));
        assert_eq!(CellAddress::parse("AA27").unwrap(), CellAddress::new(27, 27));
    }

    #[test]
    fn test_cell_address_parse_errors() {
        for bad in ["", "A", "1", "A0", "A01", "a1", "$A$1", " A1", "A1 ", "1A", "A-1", "A99999999999"] {
            assert!(
                matches!(CellAddress::parse(bad), Err(Error::InvalidAddress(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new(1, 1).to_string(), "A1");
        assert_eq!(CellAddress::new(100, 3).to_string(), "C100");
    }

    #[test]
    fn test_locators() {
        assert_eq!(row_locator(6), "6:6");
        assert_eq!(column_locator(10), "J:J");
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("A2:B3").unwrap();
        assert_eq!(range.start, CellAddress::new(2, 1));
        assert_eq!(range.end, CellAddress::new(3, 2));
        assert_eq!(range.to_string(), "A2:B3");

        // Reversed corners normalize
        let range = CellRange::parse("B3:A2").unwrap();
        assert_eq!(range.start, CellAddress::new(2, 1));

        let range = CellRange::parse("C3").unwrap();
        assert!(range.is_single_cell());

        assert!(matches!(CellRange::parse("A1:"), Err(Error::InvalidRange(_))));
    }

    #[test]
    fn test_cell_range_overlaps() {
        let a = CellRange::parse("A1:B2").unwrap();
        assert!(a.overlaps(&CellRange::parse("B2:C3").unwrap()));
        assert!(!a.overlaps(&CellRange::parse("C1:D2").unwrap()));
        assert!(!a.overlaps(&CellRange::parse("A3:B4").unwrap()));
    }

    #[test]
    fn test_cell_range_iterator() {
        let cells: Vec<_> = CellRange::parse("A2:B3").unwrap().cells().collect();

        assert_eq!(
            cells,
            vec![
                CellAddress::new(2, 1),
                CellAddress::new(2, 2),
                CellAddress::new(3, 1),
                CellAddress::new(3, 2),
            ]
        );
    }

    #[test]
    fn test_cell_range_iterator_at_max_address() {
        let range = CellRange::parse("A4294967295:B4294967295").unwrap();
        assert_eq!(
            range.cells().collect::<Vec<_>>(),
            vec![
                CellAddress::new(u32::MAX, 1),
                CellAddress::new(u32::MAX, 2),
            ]
        );

        let corner = CellRange::from_coords(u32::MAX - 1, u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(corner.cells().count(), 2);
        assert_eq!(corner.cells().last(), Some(CellAddress::new(u32::MAX, u32::MAX)));
    }

    proptest! {
        #[test]
        fn address_round_trips(row in 1u32..=1_048_576, col in 1u32..=100_000) {
            let text = CellAddress::new(row, col).to_a1_string();
            prop_assert_eq!(CellAddress::parse(&text).unwrap(), CellAddress::new(row, col));
        }
    }
}
