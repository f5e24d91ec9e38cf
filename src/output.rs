//! Output types: the result record returned to callers and stored in caches.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata extracted from a document's frontmatter block.
///
/// Keyed by the top-level YAML field names; values keep their YAML types
/// (strings, numbers, booleans, sequences, nested mappings). A `BTreeMap`
/// keeps iteration and serialisation order deterministic.
pub type Metadata = BTreeMap<String, serde_yaml::Value>;

/// The result of one conversion: rendered HTML plus any frontmatter fields.
///
/// This is the value both the caller and the cache observe. Metadata fields
/// sit at the top level of the serialised form, alongside `content`:
///
/// ```json
/// {
///   "title": "Team post: The new database",
///   "author": "HashimotoYT",
///   "date": "2018-09-12",
///   "content": "<h1>…</h1>"
/// }
/// ```
///
/// `content` is mandatory and always wins a key collision: a frontmatter
/// field named `content` is dropped during construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    /// Frontmatter fields, empty unless frontmatter extraction was enabled
    /// and the document carried a block.
    #[serde(flatten)]
    pub metadata: Metadata,

    /// The rendered HTML.
    pub content: String,
}

impl Rendered {
    /// A record with rendered HTML and no metadata.
    pub fn new(content: String) -> Self {
        Self {
            metadata: Metadata::new(),
            content,
        }
    }

    /// A record with rendered HTML and frontmatter metadata.
    ///
    /// Discards any metadata key named `content` — the rendered HTML owns
    /// that slot unconditionally.
    pub fn with_metadata(content: String, mut metadata: Metadata) -> Self {
        metadata.remove("content");
        Self { metadata, content }
    }

    /// Look up a metadata field by name.
    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.metadata.get(key)
    }
}
