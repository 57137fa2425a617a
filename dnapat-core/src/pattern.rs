use std::fmt;

/// One distinct triplet observed in a sequence: its bases, how often it
/// occurred at the fixed window offsets, and the start offset of every
/// occurrence in discovery order.
///
/// Identity is the sequence alone; frequency and positions are scan
/// state. `frequency == positions.len()` holds at all times because both
/// are advanced together on every sighting, the first included.
#[derive(Clone, Debug)]
pub struct PatternRecord {
    sequence: Box<str>,
    frequency: usize,
    positions: Vec<usize>,
}

impl PatternRecord {
    pub fn new(sequence: &str) -> Self {
        Self {
            sequence: sequence.into(),
            frequency: 0,
            positions: Vec::new(),
        }
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn frequency(&self) -> usize {
        self.frequency
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Records one sighting at `offset`.
    pub fn record_occurrence(&mut self, offset: usize) {
        self.frequency += 1;
        self.positions.push(offset);
    }
}

impl PartialEq for PatternRecord {
    fn eq(&self, other: &Self) -> bool {
        self.sequence == other.sequence
    }
}

impl Eq for PatternRecord {}

impl fmt::Display for PatternRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pattern: {}, frequency: {}, positions: [",
            self.sequence, self.frequency
        )?;
        for (i, pos) in self.positions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pos}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_tracks_positions() {
        let mut rec = PatternRecord::new("ATG");
        assert_eq!(rec.frequency(), 0);
        rec.record_occurrence(0);
        rec.record_occurrence(9);
        assert_eq!(rec.frequency(), 2);
        assert_eq!(rec.positions(), &[0, 9]);
    }

    #[test]
    fn equality_is_by_sequence_only() {
        let mut a = PatternRecord::new("ATG");
        let b = PatternRecord::new("ATG");
        a.record_occurrence(3);
        assert_eq!(a, b);
        assert_ne!(PatternRecord::new("ATG"), PatternRecord::new("CGT"));
    }

    #[test]
    fn display_lists_positions() {
        let mut rec = PatternRecord::new("CGT");
        rec.record_occurrence(3);
        rec.record_occurrence(12);
        assert_eq!(
            rec.to_string(),
            "Pattern: CGT, frequency: 2, positions: [3, 12]"
        );
    }
}
