//! Static reference documents offered alongside the tools.

use serde::Serialize;

/// MIME type of every bundled document.
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// URI of the Dataview query examples.
pub const DATAVIEW_EXAMPLES_URI: &str = "obsidian://dataview-examples";

/// URI of the Templater quick reference.
pub const TEMPLATER_EXAMPLES_URI: &str = "obsidian://templater-examples";

/// Descriptor of one bundled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    /// Stable resource URI.
    pub uri: &'static str,
    /// Short human-readable name.
    pub name: &'static str,
    /// What the document covers.
    pub description: &'static str,
    /// MIME type of the document text.
    pub mime_type: &'static str,
}

struct Bundled {
    descriptor: ResourceDescriptor,
    text: &'static str,
}

const BUNDLED: [Bundled; 2] = [
    Bundled {
        descriptor: ResourceDescriptor {
            uri: DATAVIEW_EXAMPLES_URI,
            name: "Dataview Query Examples",
            description: "Examples of Dataview TABLE queries for the search_vault tool",
            mime_type: MARKDOWN_MIME_TYPE,
        },
        text: include_str!("dataview_examples.md"),
    },
    Bundled {
        descriptor: ResourceDescriptor {
            uri: TEMPLATER_EXAMPLES_URI,
            name: "Templater Quick Reference",
            description: "Quick reference and examples for the Obsidian Templater plugin",
            mime_type: MARKDOWN_MIME_TYPE,
        },
        text: include_str!("templater_examples.md"),
    },
];

/// Lists the bundled documents.
#[must_use]
pub fn catalog() -> Vec<ResourceDescriptor> {
    BUNDLED.iter().map(|bundled| bundled.descriptor).collect()
}

/// Returns the text of the document at `uri`, or `None` when unknown.
#[must_use]
pub fn read(uri: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|bundled| bundled.descriptor.uri == uri)
        .map(|bundled| bundled.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn every_catalogued_resource_is_readable_markdown() {
        let entries = catalog();
        assert_eq!(entries.len(), 2);
        for entry in entries {
            assert_eq!(entry.mime_type, MARKDOWN_MIME_TYPE);
            let text = read(entry.uri).expect("catalogued resource is readable");
            assert!(text.starts_with("# "), "{} should be a markdown document", entry.uri);
        }
    }

    #[rstest]
    #[case::dataview(DATAVIEW_EXAMPLES_URI, "TABLE")]
    #[case::templater(TEMPLATER_EXAMPLES_URI, "tp.date.now")]
    fn resources_carry_their_subject(#[case] uri: &str, #[case] needle: &str) {
        assert!(read(uri).is_some_and(|text| text.contains(needle)));
    }

    #[rstest]
    fn unknown_uri_reads_nothing() {
        assert_eq!(read("obsidian://missing"), None);
    }
}
