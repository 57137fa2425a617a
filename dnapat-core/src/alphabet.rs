use bit_set::BitSet;
use std::borrow::Borrow;

/// Set of admissible symbols, backed by a bit set over byte values.
#[derive(Default, Clone, Eq, PartialEq, Debug)]
pub struct Alphabet {
    symbols: BitSet,
}

impl Alphabet {
    pub fn new<C, T>(symbols: T) -> Self
    where
        C: Borrow<u8>,
        T: IntoIterator<Item = C>,
    {
        let mut s = BitSet::new();
        s.extend(symbols.into_iter().map(|c| *c.borrow() as usize));
        Alphabet { symbols: s }
    }

    pub fn contains(&self, a: u8) -> bool {
        self.symbols.contains(a as usize)
    }

    pub fn is_word<C, T>(&self, text: T) -> bool
    where
        C: Borrow<u8>,
        T: IntoIterator<Item = C>,
    {
        text.into_iter()
            .all(|c| self.symbols.contains(*c.borrow() as usize))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Strict uppercase DNA alphabet. Pattern windows are validated against
/// this set; anything outside it disqualifies the whole window.
pub fn dna_strict() -> Alphabet {
    Alphabet::new(b"ACGT")
}

/// Strict uppercase RNA alphabet, used for codon keys.
pub fn rna_strict() -> Alphabet {
    Alphabet::new(b"ACGU")
}
