use std::fmt::Display;
use std::str::FromStr;

use crate::models::Base;

/// One character of the SLAC alphabet.
///
/// Variants are listed in encoder priority order, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    /// Hit base with no genomic counterpart (`^`).
    Insertion,
    /// Genomic base missing from the hit inside an exon (`=`).
    CodingDeletion,
    /// Genomic base missing from the hit outside exons (`_`).
    NonCodingDeletion,
    /// Differing bases inside an exon (`X`).
    CodingMismatch,
    /// Differing bases outside exons (`.`).
    NonCodingMismatch,
    /// Identical bases inside an exon, rendered upper case.
    CodingMatch(Base),
    /// Identical bases outside exons, rendered lower case.
    NonCodingMatch(Base),
}

/// The class a symbol belongs to when runs are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolClass {
    MatchCoding,
    MatchNonCoding,
    MismatchCoding,
    MismatchNonCoding,
    GapHit,
    GapGenomic,
}

/// How match columns of a full SLAC are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderMode {
    /// Base letters, upper case in exons (the canonical SLAC).
    #[default]
    Bases,
    /// `|` for coding matches, `O` for non-coding matches.
    Glyphs,
}

impl Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Bases => write!(f, "bases"),
            RenderMode::Glyphs => write!(f, "glyphs"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bases" | "hits" => Ok(RenderMode::Bases),
            "glyphs" | "full" => Ok(RenderMode::Glyphs),
            _ => Err(format!("Unknown render mode: {}", s)),
        }
    }
}

pub const CODING_MATCH_GLYPH: char = '|';
pub const NON_CODING_MATCH_GLYPH: char = 'O';

impl Symbol {
    pub fn to_char(self) -> char {
        match self {
            Symbol::Insertion => '^',
            Symbol::CodingDeletion => '=',
            Symbol::NonCodingDeletion => '_',
            Symbol::CodingMismatch => 'X',
            Symbol::NonCodingMismatch => '.',
            Symbol::CodingMatch(base) => base.to_upper(),
            Symbol::NonCodingMatch(base) => base.to_lower(),
        }
    }

    pub fn from_char(c: char) -> Option<Symbol> {
        let symbol = match c {
            '^' => Symbol::Insertion,
            '=' => Symbol::CodingDeletion,
            '_' => Symbol::NonCodingDeletion,
            'X' => Symbol::CodingMismatch,
            '.' => Symbol::NonCodingMismatch,
            'A' => Symbol::CodingMatch(Base::A),
            'C' => Symbol::CodingMatch(Base::C),
            'G' => Symbol::CodingMatch(Base::G),
            'T' => Symbol::CodingMatch(Base::T),
            'N' => Symbol::CodingMatch(Base::N),
            'a' => Symbol::NonCodingMatch(Base::A),
            'c' => Symbol::NonCodingMatch(Base::C),
            'g' => Symbol::NonCodingMatch(Base::G),
            't' => Symbol::NonCodingMatch(Base::T),
            'n' => Symbol::NonCodingMatch(Base::N),
            _ => return None,
        };
        Some(symbol)
    }

    pub fn class(self) -> SymbolClass {
        match self {
            Symbol::Insertion => SymbolClass::GapGenomic,
            Symbol::CodingDeletion | Symbol::NonCodingDeletion => SymbolClass::GapHit,
            Symbol::CodingMismatch => SymbolClass::MismatchCoding,
            Symbol::NonCodingMismatch => SymbolClass::MismatchNonCoding,
            Symbol::CodingMatch(_) => SymbolClass::MatchCoding,
            Symbol::NonCodingMatch(_) => SymbolClass::MatchNonCoding,
        }
    }

    /// Mismatches and gaps. Boundaries are notable too but are not a symbol property.
    pub fn is_notable(self) -> bool {
        !matches!(self, Symbol::CodingMatch(_) | Symbol::NonCodingMatch(_))
    }

    /// Render under the given mode.
    pub fn render(self, mode: RenderMode) -> char {
        match mode {
            RenderMode::Bases => self.to_char(),
            RenderMode::Glyphs => self.run_glyph(),
        }
    }

    /// Character used for a collapsed run of this symbol.
    pub fn run_glyph(self) -> char {
        match self {
            Symbol::CodingMatch(_) => CODING_MATCH_GLYPH,
            Symbol::NonCodingMatch(_) => NON_CODING_MATCH_GLYPH,
            other => other.to_char(),
        }
    }

    /// Character marking a truncated or mixed run of this symbol.
    pub fn ellipsis_glyph(self) -> char {
        ellipsis_for_glyph(self.run_glyph())
    }
}

/// Ellipsis counterpart of a run glyph. Unknown glyphs map to `?`.
pub fn ellipsis_for_glyph(glyph: char) -> char {
    GLYPHS
        .iter()
        .find(|g| g.run == glyph)
        .map(|g| g.ellipsis)
        .unwrap_or('?')
}

/// One row of the published legend.
#[derive(Debug, Clone, Copy)]
pub struct LegendEntry {
    pub symbol: char,
    pub class: SymbolClass,
    pub description: &'static str,
}

/// Every character a SLAC string may contain.
pub static LEGEND: [LegendEntry; 15] = [
    LegendEntry {
        symbol: '^',
        class: SymbolClass::GapGenomic,
        description: "insertion in the hit (gap in genomic)",
    },
    LegendEntry {
        symbol: '=',
        class: SymbolClass::GapHit,
        description: "coding base missing from the hit",
    },
    LegendEntry {
        symbol: '_',
        class: SymbolClass::GapHit,
        description: "non-coding base missing from the hit",
    },
    LegendEntry {
        symbol: 'X',
        class: SymbolClass::MismatchCoding,
        description: "mismatch within an exon",
    },
    LegendEntry {
        symbol: '.',
        class: SymbolClass::MismatchNonCoding,
        description: "mismatch outside exons",
    },
    LegendEntry {
        symbol: 'A',
        class: SymbolClass::MatchCoding,
        description: "coding match, base A",
    },
    LegendEntry {
        symbol: 'C',
        class: SymbolClass::MatchCoding,
        description: "coding match, base C",
    },
    LegendEntry {
        symbol: 'G',
        class: SymbolClass::MatchCoding,
        description: "coding match, base G",
    },
    LegendEntry {
        symbol: 'T',
        class: SymbolClass::MatchCoding,
        description: "coding match, base T",
    },
    LegendEntry {
        symbol: 'N',
        class: SymbolClass::MatchCoding,
        description: "coding match, base N",
    },
    LegendEntry {
        symbol: 'a',
        class: SymbolClass::MatchNonCoding,
        description: "non-coding match, base A",
    },
    LegendEntry {
        symbol: 'c',
        class: SymbolClass::MatchNonCoding,
        description: "non-coding match, base C",
    },
    LegendEntry {
        symbol: 'g',
        class: SymbolClass::MatchNonCoding,
        description: "non-coding match, base G",
    },
    LegendEntry {
        symbol: 't',
        class: SymbolClass::MatchNonCoding,
        description: "non-coding match, base T",
    },
    LegendEntry {
        symbol: 'n',
        class: SymbolClass::MatchNonCoding,
        description: "non-coding match, base N",
    },
];

/// Run and ellipsis glyphs used in abbreviated output.
#[derive(Debug, Clone, Copy)]
pub struct GlyphEntry {
    pub run: char,
    pub ellipsis: char,
    pub description: &'static str,
}

pub static GLYPHS: [GlyphEntry; 7] = [
    GlyphEntry {
        run: CODING_MATCH_GLYPH,
        ellipsis: '!',
        description: "coding matches",
    },
    GlyphEntry {
        run: NON_CODING_MATCH_GLYPH,
        ellipsis: 'o',
        description: "non-coding matches",
    },
    GlyphEntry {
        run: 'X',
        ellipsis: 'x',
        description: "coding mismatches",
    },
    GlyphEntry {
        run: '.',
        ellipsis: ',',
        description: "non-coding mismatches",
    },
    GlyphEntry {
        run: '=',
        ellipsis: ':',
        description: "coding bases missing from the hit",
    },
    GlyphEntry {
        run: '_',
        ellipsis: '-',
        description: "non-coding bases missing from the hit",
    },
    GlyphEntry {
        run: '^',
        ellipsis: '`',
        description: "insertions in the hit",
    },
];

/// True if `c` is in the SLAC alphabet.
pub fn is_slac_char(c: char) -> bool {
    LEGEND.iter().any(|entry| entry.symbol == c)
}

/// True if `c` is a run or ellipsis glyph.
pub fn is_glyph_char(c: char) -> bool {
    GLYPHS.iter().any(|g| g.run == c || g.ellipsis == c)
}

/// Every `(base, coding)` match symbol, for exhaustive checks.
pub fn match_symbols() -> impl Iterator<Item = Symbol> {
    Base::ALL
        .into_iter()
        .flat_map(|b| [Symbol::CodingMatch(b), Symbol::NonCodingMatch(b)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_legend_round_trips_symbols() {
        for entry in LEGEND.iter() {
            let symbol = Symbol::from_char(entry.symbol).unwrap();
            assert_eq!(symbol.to_char(), entry.symbol);
            assert_eq!(symbol.class(), entry.class);
        }
    }

    #[test]
    fn test_legend_is_closed() {
        for c in (0u8..=127).map(|b| b as char) {
            assert_eq!(Symbol::from_char(c).is_some(), is_slac_char(c), "char {:?}", c);
        }
        for symbol in match_symbols() {
            assert!(is_slac_char(symbol.to_char()));
        }
    }

    #[test]
    fn test_ellipsis_glyphs_are_outside_alphabet() {
        for glyph in GLYPHS.iter() {
            assert!(!is_slac_char(glyph.ellipsis), "{}", glyph.ellipsis);
            assert_ne!(glyph.run, glyph.ellipsis);
        }
    }

    #[test]
    fn test_render_modes() {
        let symbol = Symbol::NonCodingMatch(Base::G);
        assert_eq!(symbol.render(RenderMode::Bases), 'g');
        assert_eq!(symbol.render(RenderMode::Glyphs), 'O');
        assert_eq!(Symbol::CodingMismatch.render(RenderMode::Glyphs), 'X');
        assert_eq!(Symbol::CodingMatch(Base::A).ellipsis_glyph(), '!');
        assert_eq!(Symbol::NonCodingDeletion.ellipsis_glyph(), '-');
    }
}
