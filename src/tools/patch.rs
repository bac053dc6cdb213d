//! Line-based edits applied to note content.

use serde::Deserialize;
use std::cmp::Reverse;

/// Lines to insert before a 0-based line index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineInsertion {
    /// Index the content is inserted at.
    pub line: usize,
    /// Content to insert; may span several lines.
    pub content: String,
}

/// Inclusive 0-based line range to delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDeletion {
    /// First line removed.
    pub start_line: usize,
    /// Last line removed.
    pub end_line: usize,
}

/// Inclusive 0-based line range replaced by new content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineReplacement {
    /// First line replaced.
    pub start_line: usize,
    /// Last line replaced.
    pub end_line: usize,
    /// Replacement content; may span several lines.
    pub content: String,
}

/// A set of line edits.
///
/// Edits apply in three passes: deletions, then replacements, then
/// insertions. Each pass runs from the highest start line down so earlier
/// edits in a pass do not shift later ones. Indices past the end of the
/// content are clamped to it, and a range whose end precedes its start
/// removes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LinePatch {
    /// Lines to insert.
    #[serde(default)]
    pub insertions: Vec<LineInsertion>,
    /// Ranges to delete.
    #[serde(default)]
    pub deletions: Vec<LineDeletion>,
    /// Ranges to replace.
    #[serde(default)]
    pub replacements: Vec<LineReplacement>,
}

impl LinePatch {
    /// Applies the edits to `content`, which is split on `\n`.
    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        let mut lines: Vec<String> = content.split('\n').map(str::to_owned).collect();

        let mut deletions: Vec<&LineDeletion> = self.deletions.iter().collect();
        deletions.sort_by_key(|deletion| Reverse(deletion.start_line));
        for deletion in deletions {
            splice(&mut lines, deletion.start_line, deletion.end_line, Vec::new());
        }

        let mut replacements: Vec<&LineReplacement> = self.replacements.iter().collect();
        replacements.sort_by_key(|replacement| Reverse(replacement.start_line));
        for replacement in replacements {
            splice(
                &mut lines,
                replacement.start_line,
                replacement.end_line,
                split_lines(&replacement.content),
            );
        }

        let mut insertions: Vec<&LineInsertion> = self.insertions.iter().collect();
        insertions.sort_by_key(|insertion| Reverse(insertion.line));
        for insertion in insertions {
            let at = insertion.line.min(lines.len());
            lines.splice(at..at, split_lines(&insertion.content));
        }

        lines.join("\n")
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_owned).collect()
}

fn splice(lines: &mut Vec<String>, start: usize, end_inclusive: usize, replacement: Vec<String>) {
    let from = start.min(lines.len());
    let to = end_inclusive.saturating_add(1).min(lines.len()).max(from);
    lines.splice(from..to, replacement);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NOTE: &str = "zero\none\ntwo\nthree\nfour";

    fn deletion(start_line: usize, end_line: usize) -> LineDeletion {
        LineDeletion {
            start_line,
            end_line,
        }
    }

    #[rstest]
    fn empty_patch_keeps_content() {
        assert_eq!(LinePatch::default().apply(NOTE), NOTE);
    }

    #[rstest]
    fn deletions_run_from_the_bottom_up() {
        let patch = LinePatch {
            deletions: vec![deletion(0, 0), deletion(3, 4)],
            ..LinePatch::default()
        };

        assert_eq!(patch.apply(NOTE), "one\ntwo");
    }

    #[rstest]
    fn replacement_may_change_line_count() {
        let patch = LinePatch {
            replacements: vec![LineReplacement {
                start_line: 1,
                end_line: 2,
                content: "uno".to_owned(),
            }],
            ..LinePatch::default()
        };

        assert_eq!(patch.apply(NOTE), "zero\nuno\nthree\nfour");
    }

    #[rstest]
    fn insertions_apply_after_deletions_and_replacements() {
        let patch = LinePatch {
            insertions: vec![
                LineInsertion {
                    line: 0,
                    content: "# Title".to_owned(),
                },
                LineInsertion {
                    line: 2,
                    content: "a\nb".to_owned(),
                },
            ],
            deletions: vec![deletion(4, 4)],
            replacements: vec![LineReplacement {
                start_line: 0,
                end_line: 0,
                content: "ZERO".to_owned(),
            }],
        };

        assert_eq!(patch.apply(NOTE), "# Title\nZERO\none\na\nb\ntwo\nthree");
    }

    #[rstest]
    #[case::past_the_end(deletion(10, 12), NOTE)]
    #[case::end_clamped(deletion(3, 99), "zero\none\ntwo")]
    #[case::inverted_range(deletion(3, 1), NOTE)]
    fn out_of_range_deletions_are_clamped(#[case] range: LineDeletion, #[case] expected: &str) {
        let patch = LinePatch {
            deletions: vec![range],
            ..LinePatch::default()
        };

        assert_eq!(patch.apply(NOTE), expected);
    }

    #[rstest]
    fn insertion_past_the_end_appends() {
        let patch = LinePatch {
            insertions: vec![LineInsertion {
                line: 42,
                content: "tail".to_owned(),
            }],
            ..LinePatch::default()
        };

        assert_eq!(patch.apply("a\nb"), "a\nb\ntail");
    }
}
