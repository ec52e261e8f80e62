use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxSheetError;

/// Highest worksheet row addressable in the wire format.
pub const MAX_ROW: u16 = 160;

/// Export/PSEB-registration flag cell (Yes/No).
pub const PSEB_FLAG: CellId = CellId {
    column: Column::D,
    row: 6,
};

/// Startup-regime flag cell (Yes/No).
pub const STARTUP_FLAG: CellId = CellId {
    column: Column::C,
    row: 142,
};

/// The three logical columns of the worksheet: gross figure, exempt
/// portion, taxable portion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    C,
    D,
    E,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::C, Column::D, Column::E];

    fn letter(self) -> char {
        match self {
            Column::C => 'C',
            Column::D => 'D',
            Column::E => 'E',
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single worksheet location, e.g. `C126`. The wire format is the column
/// letter followed by the row number (1..=160).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub column: Column,
    pub row: u16,
}

impl CellId {
    /// Row must be in 1..=160; parsing via `FromStr` enforces this for
    /// caller-supplied references.
    pub const fn new(column: Column, row: u16) -> Self {
        CellId { column, row }
    }

    /// Whether this is one of the two Yes/No flag cells.
    pub fn is_flag(self) -> bool {
        self == PSEB_FLAG || self == STARTUP_FLAG
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for CellId {
    type Err = TaxSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let column = match chars.next() {
            Some(c) => match c.to_ascii_uppercase() {
                'C' => Column::C,
                'D' => Column::D,
                'E' => Column::E,
                _ => return Err(invalid(s, "column must be C, D, or E")),
            },
            None => return Err(invalid(s, "empty cell reference")),
        };
        let row: u16 = chars
            .as_str()
            .parse()
            .map_err(|_| invalid(s, "row must be a number"))?;
        if row == 0 || row > MAX_ROW {
            return Err(invalid(s, "row out of range 1-160"));
        }
        Ok(CellId { column, row })
    }
}

fn invalid(cell: &str, reason: &str) -> TaxSheetError {
    TaxSheetError::InvalidCell {
        cell: cell.to_string(),
        reason: reason.to_string(),
    }
}

/// Yes/No state of the two enumerated flag cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

impl From<bool> for YesNo {
    fn from(b: bool) -> Self {
        if b {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNo::Yes => write!(f, "Yes"),
            YesNo::No => write!(f, "No"),
        }
    }
}

/// A cell read over the wire: numeric everywhere except the two flag cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Amount(f64),
    Flag(YesNo),
}

impl CellValue {
    pub fn as_amount(self) -> Option<f64> {
        match self {
            CellValue::Amount(a) => Some(a),
            CellValue::Flag(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_valid_references() {
        let id: CellId = "C126".parse().unwrap();
        assert_eq!(id, CellId::new(Column::C, 126));
        assert_eq!(id.to_string(), "C126");

        let id: CellId = "e153".parse().unwrap();
        assert_eq!(id, CellId::new(Column::E, 153));

        let id: CellId = " D7 ".parse().unwrap();
        assert_eq!(id, CellId::new(Column::D, 7));
    }

    #[test]
    fn rejects_bad_column() {
        assert!("B4".parse::<CellId>().is_err());
        assert!("4".parse::<CellId>().is_err());
        assert!("".parse::<CellId>().is_err());
    }

    #[test]
    fn rejects_out_of_range_rows() {
        assert!("C0".parse::<CellId>().is_err());
        assert!("C161".parse::<CellId>().is_err());
        assert!("Cxyz".parse::<CellId>().is_err());
        assert!("C1".parse::<CellId>().is_ok());
        assert!("C160".parse::<CellId>().is_ok());
    }

    #[test]
    fn flag_cells_are_recognised() {
        assert!("D6".parse::<CellId>().unwrap().is_flag());
        assert!("C142".parse::<CellId>().unwrap().is_flag());
        assert!(!"C141".parse::<CellId>().unwrap().is_flag());
        assert!(!"D7".parse::<CellId>().unwrap().is_flag());
    }

    #[test]
    fn cell_values_serialize_to_wire_shapes() {
        let amount = serde_json::to_value(CellValue::Amount(1500000.0)).unwrap();
        assert_eq!(amount, serde_json::json!(1500000.0));

        let flag = serde_json::to_value(CellValue::Flag(YesNo::Yes)).unwrap();
        assert_eq!(flag, serde_json::json!("Yes"));
    }
}
