//! Static term corpora and on-disk dataset helpers used across harnesses.

use std::io::Write;
use tempfile::NamedTempFile;

/// A small German/English dictionary in dataset format, annotations included.
pub const CORPUS_DICT: &[&str] = &[
    "Haus {n};house",
    "Maus {f};mouse",
    "Baum {m};tree",
    "Hausmaus {f};house mouse",
    "Rathaus {n};town hall",
    "Haustür {f};front door",
    "Laus {f};louse",
    "Haube {f};bonnet",
    "Bär {m};bear",
    "Straße {f} [Verkehr];street",
];

/// Terms that share prefixes, suffixes and near-spellings. Good for tier
/// interaction tests.
pub const CORPUS_NEAR: &[&str] = &[
    "Kind", "Kinder", "Rind", "Wind", "Kinn", "Kindergarten", "Kino", "kind", "Kindl", "Bind",
];

/// Lines the loader must reject or skip, paired with what it should do.
pub const CORPUS_BROKEN: &[&str] = &["", "# comment", "Haus;house", "no separator here"];

/// Write `lines` joined by `\n` into a fresh temporary file.
pub fn dataset_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp dataset");
    for line in lines {
        writeln!(file, "{line}").expect("write temp dataset");
    }
    file.flush().expect("flush temp dataset");
    file
}

/// Generate `n` synthetic `(source, target)` pairs. Every tenth source is
/// "Haus" so exact and fuzzy tiers have something to do.
pub fn synthetic_pairs(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| {
            let source = match i % 10 {
                0 => "Haus".to_string(),
                1 => format!("Haus{i}"),
                2 => "Maus".to_string(),
                _ => format!("Wort{i}"),
            };
            (source, format!("word{i}"))
        })
        .collect()
}
