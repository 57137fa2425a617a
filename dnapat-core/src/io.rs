use crate::error::{AnalysisError, AnalysisResult};
use crate::pattern::PatternRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Reads raw sequence text: every line is trimmed, uppercased and
/// concatenated. No format beyond "readable as text" is assumed; base
/// validation happens per window during the scan, not here.
pub fn read_sequence_from_reader<R: BufRead>(reader: R) -> AnalysisResult<String> {
    let mut out = String::new();
    for line in reader.lines() {
        let line = line?;
        for c in line.trim().chars() {
            out.push(c.to_ascii_uppercase());
        }
    }
    Ok(out)
}

pub fn read_sequence_from_path(path: impl AsRef<Path>) -> AnalysisResult<String> {
    let file = File::open(path)?;
    read_sequence_from_reader(BufReader::new(file))
}

/// Writes a ranked pattern view as CSV rows: sequence, frequency, and
/// the occurrence offsets joined by ';'.
pub fn write_ranked_csv<W: Write>(writer: W, records: &[&PatternRecord]) -> AnalysisResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["sequence", "frequency", "positions"])
        .map_err(|e| AnalysisError::CsvExport { source: e })?;
    for record in records {
        let positions = record
            .positions()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";");
        csv_writer
            .write_record([
                record.sequence(),
                &record.frequency().to_string(),
                &positions,
            ])
            .map_err(|e| AnalysisError::CsvExport { source: e })?;
    }
    csv_writer
        .flush()
        .map_err(AnalysisError::SequenceIo)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reader_trims_and_uppercases() {
        let text = "  atgcgt  \nATG\n\n  ccc\n";
        let seq = read_sequence_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(seq, "ATGCGTATGCCC");
    }

    #[test]
    fn reader_keeps_foreign_characters() {
        // Non-ACGT characters pass through; the scan skips their window.
        let seq = read_sequence_from_reader(Cursor::new("atgXyZ\n")).unwrap();
        assert_eq!(seq, "ATGXYZ");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_sequence_from_path("/no/such/file.txt").unwrap_err();
        assert!(matches!(err, AnalysisError::SequenceIo(_)));
    }

    #[test]
    fn csv_export_rows() {
        let mut atg = PatternRecord::new("ATG");
        atg.record_occurrence(0);
        atg.record_occurrence(6);
        let mut cgt = PatternRecord::new("CGT");
        cgt.record_occurrence(3);

        let mut buf = Vec::new();
        write_ranked_csv(&mut buf, &[&atg, &cgt]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "sequence,frequency,positions");
        assert_eq!(lines[1], "ATG,2,0;6");
        assert_eq!(lines[2], "CGT,1,3");
    }
}
