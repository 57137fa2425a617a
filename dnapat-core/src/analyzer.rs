use crate::alphabet;
use crate::codon;
use crate::error::{AnalysisError, AnalysisResult};
use crate::index::HashIndex;
use crate::io;
use crate::pattern::PatternRecord;
use crate::tree::FrequencyTree;
use std::collections::BTreeMap;
use std::path::Path;

/// One analysis session over a single DNA sequence.
///
/// Loading a sequence tokenizes it into non-overlapping triplets, counts
/// them in the hash index, then rebuilds the frequency tree wholesale
/// from the index contents. Both structures are discarded and rebuilt on
/// every load; nothing survives across loads.
#[derive(Debug, Default)]
pub struct SequenceAnalyzer {
    sequence: String,
    index: HashIndex,
    tree: FrequencyTree,
}

impl SequenceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The normalized sequence of the current session.
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Reads the file at `path` and loads its content as the session
    /// sequence. A read failure propagates and leaves the prior model
    /// untouched.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> AnalysisResult<()> {
        let text = io::read_sequence_from_path(path)?;
        self.load_sequence(&text)
    }

    /// Replaces the session sequence and reprocesses it from scratch.
    ///
    /// The text is normalized (whitespace stripped, uppercased) and
    /// scanned in windows of exactly 3 bytes at offsets 0, 3, 6, ...;
    /// 1-2 trailing leftover bytes are dropped. Windows outside the
    /// strict ACGT alphabet are skipped without being counted. A
    /// normalized length below 3 resets the model to empty and reports
    /// `SequenceTooShort`.
    pub fn load_sequence(&mut self, text: &str) -> AnalysisResult<()> {
        self.sequence = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if self.sequence.len() < 3 {
            self.index = HashIndex::new();
            self.tree = FrequencyTree::new();
            return Err(AnalysisError::SequenceTooShort {
                len: self.sequence.len(),
            });
        }

        let dna = alphabet::dna_strict();
        let mut index = HashIndex::new();
        for (i, window) in self.sequence.as_bytes().chunks_exact(3).enumerate() {
            if !dna.is_word(window) {
                continue;
            }
            // An ACGT window is ASCII, so the byte chunk is valid UTF-8.
            let Ok(key) = std::str::from_utf8(window) else {
                continue;
            };
            index.insert_or_get(key).record_occurrence(i * 3);
        }

        // Sole population path for the tree: a full rebuild once every
        // frequency is final. Frequencies drift during the scan, so the
        // tree is never patched incrementally.
        let mut tree = FrequencyTree::new();
        for record in index.records() {
            tree.insert(record.clone());
        }

        self.index = index;
        self.tree = tree;
        Ok(())
    }

    /// All distinct patterns, most frequent first; ties order by
    /// ascending sequence.
    pub fn ranked_by_frequency(&self) -> Vec<&PatternRecord> {
        self.tree.ordered_descending()
    }

    /// Looks up one pattern by sequence, case-insensitively.
    pub fn lookup(&self, sequence: &str) -> Option<&PatternRecord> {
        self.index.find(&sequence.to_uppercase())
    }

    pub fn most_frequent(&self) -> Option<&PatternRecord> {
        self.tree.max_frequency_record()
    }

    pub fn least_frequent(&self) -> Option<&PatternRecord> {
        self.tree.min_frequency_record()
    }

    /// Number of distinct patterns in the current session.
    pub fn distinct_patterns(&self) -> usize {
        self.tree.len()
    }

    pub fn collision_report(&self) -> String {
        self.index.collision_report()
    }

    /// Ranked listing of every pattern with frequency and positions.
    pub fn frequency_report(&self) -> String {
        let ranked = self.ranked_by_frequency();
        if ranked.is_empty() {
            return String::from("No DNA patterns have been processed.\n");
        }
        let mut report = String::from("Frequency ranking:\n--------\n");
        for record in ranked {
            report.push_str(&record.to_string());
            report.push('\n');
        }
        report
    }

    /// Per-amino-acid totals: each distinct pattern is converted to its
    /// RNA codon and translated; the pattern's whole frequency is added
    /// to its amino acid, and the codon joins that acid's deduplicated
    /// codon set. Patterns whose codon has no translation are left out
    /// of this report only.
    pub fn amino_acid_report(&self) -> String {
        if self.index.is_empty() {
            return String::from("No DNA patterns have been processed.\n");
        }

        struct Tally {
            abbrev3: &'static str,
            abbrev1: char,
            total: usize,
            codons: Vec<String>,
        }

        let table = codon::codon_table();
        let mut tallies: BTreeMap<&'static str, Tally> = BTreeMap::new();

        for record in self.index.records() {
            let rna = match codon::dna_to_rna(record.sequence()) {
                Ok(rna) => rna,
                Err(_) => continue,
            };
            let Some(acid) = table.amino_acid(&rna) else {
                continue;
            };
            let tally = tallies.entry(acid.name()).or_insert_with(|| Tally {
                abbrev3: acid.abbrev3(),
                abbrev1: acid.abbrev1(),
                total: 0,
                codons: Vec::new(),
            });
            tally.total += record.frequency();
            if !tally.codons.contains(&rna) {
                tally.codons.push(rna);
            }
        }

        let mut report = String::from("Amino acid report:\n");
        report.push_str("----------------------------------------------------------------\n");
        for (name, tally) in &tallies {
            report.push_str(&format!(
                "Amino acid: {name} ({} / {})\n",
                tally.abbrev3, tally.abbrev1
            ));
            report.push_str(&format!("  Total frequency: {}\n", tally.total));
            report.push_str(&format!(
                "  Associated codons (RNA): {}\n",
                tally.codons.join(", ")
            ));
            report.push_str("----------------------------------------------------------------\n");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn loaded(text: &str) -> SequenceAnalyzer {
        let mut analyzer = SequenceAnalyzer::new();
        analyzer.load_sequence(text).unwrap();
        analyzer
    }

    // Count of windows the scan should accept, computed independently.
    fn valid_windows(text: &str) -> usize {
        let normalized: String = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        normalized
            .as_bytes()
            .chunks_exact(3)
            .filter(|w| w.iter().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')))
            .count()
    }

    #[test]
    fn single_repeated_triplet() {
        let analyzer = loaded("ATGATGATG");
        let ranked = analyzer.ranked_by_frequency();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].sequence(), "ATG");
        assert_eq!(ranked[0].frequency(), 3);
        assert_eq!(ranked[0].positions(), &[0, 3, 6]);
        assert_eq!(
            analyzer.most_frequent().unwrap().sequence(),
            analyzer.least_frequent().unwrap().sequence()
        );

        let report = analyzer.amino_acid_report();
        assert!(report.contains("Amino acid: Methionine (Met / M)"));
        assert!(report.contains("Total frequency: 3"));
        assert!(report.contains("Associated codons (RNA): AUG"));
    }

    #[test]
    fn two_distinct_triplets_rank_by_frequency() {
        let analyzer = loaded("ATGCGTATG");
        let ranked = analyzer.ranked_by_frequency();
        let seqs: Vec<&str> = ranked.iter().map(|r| r.sequence()).collect();
        assert_eq!(seqs, ["ATG", "CGT"]);
        assert_eq!(ranked[0].frequency(), 2);
        assert_eq!(ranked[1].frequency(), 1);
        assert_eq!(ranked[1].positions(), &[3]);
    }

    #[test]
    fn too_short_input_resets_the_model() {
        let mut analyzer = loaded("ATGATG");
        let err = analyzer.load_sequence("AT").unwrap_err();
        assert!(matches!(err, AnalysisError::SequenceTooShort { len: 2 }));
        assert!(analyzer.ranked_by_frequency().is_empty());
        assert!(analyzer.most_frequent().is_none());
        assert!(analyzer.least_frequent().is_none());
        assert!(analyzer.lookup("ATG").is_none());
        assert_eq!(analyzer.distinct_patterns(), 0);
    }

    #[test]
    fn invalid_window_is_skipped_entirely() {
        let analyzer = loaded("ATGXYZCGT");
        let seqs: Vec<&str> = analyzer
            .ranked_by_frequency()
            .iter()
            .map(|r| r.sequence())
            .collect();
        assert_eq!(seqs, ["ATG", "CGT"]);
        assert!(analyzer.lookup("XYZ").is_none());
        assert!(!analyzer.frequency_report().contains("XYZ"));
        assert!(!analyzer.collision_report().contains("XYZ"));
    }

    #[test]
    fn trailing_leftover_bytes_are_dropped() {
        let analyzer = loaded("ATGCG");
        let ranked = analyzer.ranked_by_frequency();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].sequence(), "ATG");
    }

    #[test]
    fn normalization_strips_whitespace_and_uppercases() {
        let analyzer = loaded("  atg\ncgt atg  ");
        assert_eq!(analyzer.sequence(), "ATGCGTATG");
        assert_eq!(analyzer.lookup("atg").unwrap().frequency(), 2);
    }

    #[test]
    fn reload_discards_previous_session() {
        let mut analyzer = loaded("ATGATGATG");
        analyzer.load_sequence("CCCGGG").unwrap();
        assert!(analyzer.lookup("ATG").is_none());
        let seqs: Vec<&str> = analyzer
            .ranked_by_frequency()
            .iter()
            .map(|r| r.sequence())
            .collect();
        assert_eq!(seqs, ["CCC", "GGG"]);
    }

    #[test]
    fn empty_session_reports() {
        let analyzer = SequenceAnalyzer::new();
        assert_eq!(
            analyzer.frequency_report(),
            "No DNA patterns have been processed.\n"
        );
        assert_eq!(
            analyzer.amino_acid_report(),
            "No DNA patterns have been processed.\n"
        );
        assert!(analyzer.ranked_by_frequency().is_empty());
    }

    #[test]
    fn amino_acids_accumulate_across_synonymous_codons() {
        // CTT, CTC and TTA all encode Leucine.
        let analyzer = loaded("CTTCTCCTTTTA");
        let report = analyzer.amino_acid_report();
        assert!(report.contains("Amino acid: Leucine (Leu / L)"));
        assert!(report.contains("Total frequency: 4"));
        assert!(report.contains("CUU"));
        assert!(report.contains("CUC"));
        assert!(report.contains("UUA"));
    }

    #[test]
    fn stop_codons_report_under_the_stop_marker() {
        let analyzer = loaded("TAATAGTGA");
        let report = analyzer.amino_acid_report();
        assert!(report.contains("Amino acid: STOP (STOP / -)"));
        assert!(report.contains("Total frequency: 3"));
    }

    #[test]
    fn load_from_path_reads_and_processes() {
        let path = std::env::temp_dir().join("dnapat_analyzer_load_test.txt");
        std::fs::write(&path, "atg\ncgt\natg\n").unwrap();
        let mut analyzer = SequenceAnalyzer::new();
        analyzer.load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(analyzer.sequence(), "ATGCGTATG");
        assert_eq!(analyzer.lookup("ATG").unwrap().frequency(), 2);
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut analyzer = loaded("ATGATG");
        assert!(analyzer.load_from_path("/no/such/dnapat.txt").is_err());
        assert_eq!(analyzer.lookup("ATG").unwrap().frequency(), 2);
        assert_eq!(analyzer.distinct_patterns(), 1);
    }

    #[test]
    fn extremal_queries_match_ranked_list_ends() {
        let analyzer = loaded("ATGATGCGTCGTCGTGGG");
        let ranked = analyzer.ranked_by_frequency();
        assert_eq!(
            analyzer.most_frequent().unwrap().sequence(),
            ranked[0].sequence()
        );
        assert_eq!(
            analyzer.least_frequent().unwrap().sequence(),
            ranked[ranked.len() - 1].sequence()
        );
    }

    proptest! {
        #[test]
        fn repeated_loads_are_deterministic(text in "[ACGTacgt xyz]{3,90}") {
            let mut first = SequenceAnalyzer::new();
            let mut second = SequenceAnalyzer::new();
            let a = first.load_sequence(&text).is_ok();
            let b = second.load_sequence(&text).is_ok();
            prop_assert_eq!(a, b);

            let ranked_a: Vec<(String, usize)> = first
                .ranked_by_frequency()
                .iter()
                .map(|r| (r.sequence().to_string(), r.frequency()))
                .collect();
            let ranked_b: Vec<(String, usize)> = second
                .ranked_by_frequency()
                .iter()
                .map(|r| (r.sequence().to_string(), r.frequency()))
                .collect();
            prop_assert_eq!(ranked_a, ranked_b);
            prop_assert_eq!(first.collision_report(), second.collision_report());
        }

        #[test]
        fn frequencies_sum_to_valid_window_count(text in "[ACGTacgt xyz]{3,90}") {
            let mut analyzer = SequenceAnalyzer::new();
            if analyzer.load_sequence(&text).is_err() {
                return Ok(());
            }
            let total: usize = analyzer
                .ranked_by_frequency()
                .iter()
                .map(|r| r.frequency())
                .sum();
            prop_assert_eq!(total, valid_windows(&text));
        }

        #[test]
        fn ranking_invariant_holds(text in "[ACGT]{3,120}") {
            let mut analyzer = SequenceAnalyzer::new();
            analyzer.load_sequence(&text).unwrap();
            let ranked = analyzer.ranked_by_frequency();
            for pair in ranked.windows(2) {
                let ok = pair[0].frequency() > pair[1].frequency()
                    || (pair[0].frequency() == pair[1].frequency()
                        && pair[0].sequence() < pair[1].sequence());
                prop_assert!(ok, "out of order: {} then {}", pair[0], pair[1]);
            }
        }

        #[test]
        fn lookup_round_trips_every_record(text in "[ACGT]{3,120}") {
            let mut analyzer = SequenceAnalyzer::new();
            analyzer.load_sequence(&text).unwrap();
            for record in analyzer.ranked_by_frequency() {
                let found = analyzer.lookup(record.sequence()).unwrap();
                prop_assert_eq!(found.sequence(), record.sequence());
                prop_assert_eq!(found.frequency(), record.frequency());
                prop_assert_eq!(found.positions(), record.positions());
            }
        }
    }
}
