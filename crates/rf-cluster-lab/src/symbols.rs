//! Symbol definitions and grid cells

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Symbol class classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SymbolClass {
    /// Wild / bonus symbol (highest paying)
    Wild = 0,
    /// Premium paying symbol
    Premium = 1,
    /// Medium paying symbol
    Medium = 2,
    /// Low paying symbol
    Low = 3,
    /// Scatter - counted anywhere on the grid, never paid as a cluster
    Scatter = 4,
}

/// A grid symbol
///
/// Symbols carry no payload; identity is the only attribute. Serialized with
/// the short wire names used by clients (`"ZEUS"`, `"A"`, `"SCATTER"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "ZEUS")]
    Zeus,
    #[serde(rename = "CROWN")]
    Crown,
    #[serde(rename = "TRIDENT")]
    Trident,
    #[serde(rename = "EAGLE")]
    Eagle,
    #[serde(rename = "VASE")]
    Vase,
    #[serde(rename = "FIRE")]
    Fire,
    #[serde(rename = "GEM")]
    Gem,
    #[serde(rename = "SWORD")]
    Sword,
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "SCATTER")]
    Scatter,
}

impl Symbol {
    /// Every symbol, highest paying first
    pub const ALL: [Symbol; 13] = [
        Symbol::Zeus,
        Symbol::Crown,
        Symbol::Trident,
        Symbol::Eagle,
        Symbol::Vase,
        Symbol::Fire,
        Symbol::Gem,
        Symbol::Sword,
        Symbol::Ace,
        Symbol::King,
        Symbol::Queen,
        Symbol::Jack,
        Symbol::Scatter,
    ];

    /// Wire name (e.g. "ZEUS", "A", "SCATTER")
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Zeus => "ZEUS",
            Symbol::Crown => "CROWN",
            Symbol::Trident => "TRIDENT",
            Symbol::Eagle => "EAGLE",
            Symbol::Vase => "VASE",
            Symbol::Fire => "FIRE",
            Symbol::Gem => "GEM",
            Symbol::Sword => "SWORD",
            Symbol::Ace => "A",
            Symbol::King => "K",
            Symbol::Queen => "Q",
            Symbol::Jack => "J",
            Symbol::Scatter => "SCATTER",
        }
    }

    /// Symbol class
    pub fn class(self) -> SymbolClass {
        match self {
            Symbol::Zeus => SymbolClass::Wild,
            Symbol::Crown | Symbol::Trident | Symbol::Eagle | Symbol::Vase => SymbolClass::Premium,
            Symbol::Fire | Symbol::Gem | Symbol::Sword => SymbolClass::Medium,
            Symbol::Ace | Symbol::King | Symbol::Queen | Symbol::Jack => SymbolClass::Low,
            Symbol::Scatter => SymbolClass::Scatter,
        }
    }

    /// Check if this is the scatter symbol
    pub fn is_scatter(self) -> bool {
        self.class() == SymbolClass::Scatter
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::ALL
            .iter()
            .copied()
            .find(|sym| sym.name() == s)
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

/// Unrecognised symbol name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol: {0}")]
pub struct UnknownSymbol(pub String);

/// Wire name of the empty cell
pub const EMPTY_NAME: &str = "EMPTY";

/// A single grid cell
///
/// `Empty` only exists between removing a cluster and refilling the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Cell {
    #[default]
    Empty,
    Filled(Symbol),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Symbol held by this cell, if any
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Filled(symbol) => Some(symbol),
        }
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        Cell::Filled(symbol)
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => EMPTY_NAME.to_string(),
            Cell::Filled(symbol) => symbol.name().to_string(),
        }
    }
}

impl TryFrom<String> for Cell {
    type Error = UnknownSymbol;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == EMPTY_NAME {
            return Ok(Cell::Empty);
        }
        value.parse().map(Cell::Filled)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => f.write_str(EMPTY_NAME),
            Cell::Filled(symbol) => symbol.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_classes() {
        assert_eq!(Symbol::Zeus.class(), SymbolClass::Wild);
        assert_eq!(Symbol::Vase.class(), SymbolClass::Premium);
        assert_eq!(Symbol::Sword.class(), SymbolClass::Medium);
        assert_eq!(Symbol::Jack.class(), SymbolClass::Low);
        assert!(Symbol::Scatter.is_scatter());
        assert!(!Symbol::Zeus.is_scatter());
    }

    #[test]
    fn test_symbol_names_parse_back() {
        for symbol in Symbol::ALL {
            assert_eq!(symbol.name().parse::<Symbol>(), Ok(symbol));
        }
        assert!("EMPTY".parse::<Symbol>().is_err());
        assert!("zeus".parse::<Symbol>().is_err());
    }

    #[test]
    fn test_cell_wire_format() {
        let cells = vec![Cell::Filled(Symbol::Ace), Cell::Empty, Cell::Filled(Symbol::Scatter)];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"["A","EMPTY","SCATTER"]"#);

        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cells);

        assert!(serde_json::from_str::<Cell>(r#""BOGUS""#).is_err());
    }
}
