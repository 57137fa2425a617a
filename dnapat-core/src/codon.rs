use crate::error::{AnalysisError, AnalysisResult};
use std::sync::LazyLock;

/// Classification of a translation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodonRole {
    Start,
    Stop,
    Normal,
}

/// One translation target of the genetic code: an amino acid (or the
/// STOP marker) together with every RNA codon that encodes it.
#[derive(Clone, Debug)]
pub struct AminoAcid {
    name: &'static str,
    abbrev3: &'static str,
    abbrev1: char,
    role: CodonRole,
    codons: Vec<&'static str>,
}

impl AminoAcid {
    fn new(name: &'static str, abbrev3: &'static str, abbrev1: char) -> Self {
        let role = match name {
            "STOP" => CodonRole::Stop,
            "Methionine" => CodonRole::Start,
            _ => CodonRole::Normal,
        };
        Self {
            name,
            abbrev3,
            abbrev1,
            role,
            codons: Vec::new(),
        }
    }

    fn add_codon(&mut self, codon: &'static str) {
        if !self.codons.contains(&codon) {
            self.codons.push(codon);
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn abbrev3(&self) -> &'static str {
        self.abbrev3
    }

    pub fn abbrev1(&self) -> char {
        self.abbrev1
    }

    pub fn role(&self) -> CodonRole {
        self.role
    }

    pub fn codons(&self) -> &[&'static str] {
        &self.codons
    }
}

/// The standard genetic code: full name, 3-letter and 1-letter
/// abbreviations, and every RNA codon per translation target. 64 codons
/// across 20 amino acids plus the STOP marker.
const GENETIC_CODE: &[(&str, &str, char, &[&str])] = &[
    ("Phenylalanine", "Phe", 'F', &["UUU", "UUC"]),
    ("Leucine", "Leu", 'L', &["UUA", "UUG", "CUU", "CUC", "CUA", "CUG"]),
    ("Isoleucine", "Ile", 'I', &["AUU", "AUC", "AUA"]),
    ("Methionine", "Met", 'M', &["AUG"]),
    ("Valine", "Val", 'V', &["GUU", "GUC", "GUA", "GUG"]),
    ("Serine", "Ser", 'S', &["UCU", "UCC", "UCA", "UCG", "AGU", "AGC"]),
    ("Proline", "Pro", 'P', &["CCU", "CCC", "CCA", "CCG"]),
    ("Threonine", "Thr", 'T', &["ACU", "ACC", "ACA", "ACG"]),
    ("Alanine", "Ala", 'A', &["GCU", "GCC", "GCA", "GCG"]),
    ("Tyrosine", "Tyr", 'Y', &["UAU", "UAC"]),
    ("Histidine", "His", 'H', &["CAU", "CAC"]),
    ("Glutamine", "Gln", 'Q', &["CAA", "CAG"]),
    ("Asparagine", "Asn", 'N', &["AAU", "AAC"]),
    ("Lysine", "Lys", 'K', &["AAA", "AAG"]),
    ("Aspartic acid", "Asp", 'D', &["GAU", "GAC"]),
    ("Glutamic acid", "Glu", 'E', &["GAA", "GAG"]),
    ("Cysteine", "Cys", 'C', &["UGU", "UGC"]),
    ("Tryptophan", "Trp", 'W', &["UGG"]),
    ("Arginine", "Arg", 'R', &["CGU", "CGC", "CGA", "CGG", "AGA", "AGG"]),
    ("Glycine", "Gly", 'G', &["GGU", "GGC", "GGA", "GGG"]),
    ("STOP", "STOP", '-', &["UAA", "UAG", "UGA"]),
];

/// Read-only codon lookup table, assembled once per process.
#[derive(Debug)]
pub struct CodonTable {
    acids: Vec<AminoAcid>,
    // Codon packed into 6 bits (2 per base) -> index into `acids`.
    by_codon: [Option<u8>; 64],
}

#[inline]
fn base_index(b: u8) -> Option<usize> {
    match b {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'U' => Some(3),
        _ => None,
    }
}

fn codon_index(codon: &str) -> Option<usize> {
    let bytes = codon.as_bytes();
    if bytes.len() != 3 {
        return None;
    }
    let i1 = base_index(bytes[0])?;
    let i2 = base_index(bytes[1])?;
    let i3 = base_index(bytes[2])?;
    Some((i1 << 4) | (i2 << 2) | i3)
}

impl CodonTable {
    fn build() -> Self {
        let mut acids = Vec::with_capacity(GENETIC_CODE.len());
        let mut by_codon = [None; 64];
        for &(name, abbrev3, abbrev1, codons) in GENETIC_CODE {
            let mut acid = AminoAcid::new(name, abbrev3, abbrev1);
            let acid_idx = acids.len() as u8;
            for &codon in codons {
                acid.add_codon(codon);
                let idx = codon_index(codon).expect("genetic code data holds valid RNA codons");
                debug_assert!(by_codon[idx].is_none(), "codon mapped twice");
                by_codon[idx] = Some(acid_idx);
            }
            acids.push(acid);
        }
        Self { acids, by_codon }
    }

    /// Looks up the translation target of an RNA codon. `None` for
    /// anything that is not a valid 3-base RNA codon.
    pub fn amino_acid(&self, codon: &str) -> Option<&AminoAcid> {
        let idx = codon_index(codon)?;
        self.by_codon[idx].map(|i| &self.acids[i as usize])
    }

    pub fn acids(&self) -> &[AminoAcid] {
        &self.acids
    }
}

static TABLE: LazyLock<CodonTable> = LazyLock::new(CodonTable::build);

/// Process-wide genetic code table.
pub fn codon_table() -> &'static CodonTable {
    &TABLE
}

/// Converts a DNA triplet to its RNA codon by the T -> U substitution.
/// Upstream window filtering guarantees length 3; anything else is
/// rejected defensively.
pub fn dna_to_rna(triplet: &str) -> AnalysisResult<String> {
    if triplet.len() != 3 {
        return Err(AnalysisError::MalformedTriplet {
            len: triplet.len(),
        });
    }
    Ok(triplet.replace('T', "U"))
}
