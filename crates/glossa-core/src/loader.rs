//! Loader: parses `source;target` dataset files into a [`TermStore`].
//!
//! Each non-blank line holds a German term and its English translation,
//! separated by `;`. Bracketed annotations such as `[ugs.]`, `(Pl.)` or
//! `{f}` are stripped from the German side, together with one leading space,
//! and the result is trimmed. The English side is stored verbatim. Lines
//! starting with `#` are comments. A line whose German side is empty once
//! annotations are gone is skipped with a warning.
//!
//! Ids are handed out sequentially from 0 over accepted lines, so the id of a
//! record is stable for a given file.

use crate::{
    error::LoadError,
    progress::{Monotonic, ProgressSink},
    store::TermStore,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Field separator used by the bundled dataset.
pub const DEFAULT_SEPARATOR: char = ';';

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" ?[\{\[\(].*?[\}\]\)]").expect("annotation pattern is a valid regex")
});

/// Remove bracketed annotations from a source term and trim it.
///
/// ```
/// use glossa_core::loader::strip_annotations;
/// assert_eq!(strip_annotations("Haus {n} [Gebäude]"), "Haus");
/// ```
pub fn strip_annotations(term: &str) -> String {
    ANNOTATION.replace_all(term, "").trim().to_string()
}

/// Dataset parser. Cheap to construct; holds only the separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loader {
    separator: char,
}

impl Default for Loader {
    fn default() -> Self {
        Self { separator: DEFAULT_SEPARATOR }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Read and parse the file at `path`.
    ///
    /// The whole file is read up front so load progress can be reported as a
    /// fraction of the total line count.
    pub fn load_path<P>(&self, path: impl AsRef<Path>, progress: &P) -> Result<TermStore, LoadError>
    where
        P: ProgressSink + ?Sized,
    {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "loading dataset");
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = self.parse_str_with_progress(&text, progress)?;
        tracing::info!(path = %path.display(), entries = store.len(), "dataset loaded");
        Ok(store)
    }

    /// Parse dataset text already in memory.
    pub fn parse_str(&self, text: &str) -> Result<TermStore, LoadError> {
        self.parse_str_with_progress(text, &crate::progress::NoProgress)
    }

    pub fn parse_str_with_progress<P>(&self, text: &str, progress: &P) -> Result<TermStore, LoadError>
    where
        P: ProgressSink + ?Sized,
    {
        let mut progress = Monotonic::new(progress);
        progress.report(0);

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let lines: Vec<&str> = text.lines().collect();
        let total = lines.len();
        let mut pairs = Vec::with_capacity(total);

        for (i, line) in lines.iter().enumerate() {
            if let Some(pair) = self.parse_line(line, i + 1)? {
                pairs.push(pair);
            }
            // u8 fits: (i + 1) <= total
            progress.report(((i + 1) * 100 / total) as u8);
        }

        let store = TermStore::from_pairs(pairs)?;
        progress.report(100);
        Ok(store)
    }

    /// Parse one line. `Ok(None)` for blank and comment lines and for lines
    /// with no German term; `line_no` is 1-based and only used for messages.
    pub fn parse_line(&self, line: &str, line_no: usize) -> Result<Option<(String, String)>, LoadError> {
        if line.trim().is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut fields = line.split(self.separator);
        let source = fields.next().unwrap_or_default();
        let Some(target) = fields.next() else {
            tracing::warn!(line = line_no, "dataset line without separator");
            return Err(LoadError::MalformedLine {
                line: line_no,
                content: line.to_string(),
            });
        };

        let source = strip_annotations(source);
        if source.is_empty() {
            tracing::warn!(line = line_no, "dataset line without a source term, skipped");
            return Ok(None);
        }
        Ok(Some((source, target.to_string())))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
