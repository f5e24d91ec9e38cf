//! Fingerprinting: derive the cache key for a (document, options) pair.
//!
//! The fingerprint is a SHA-256 digest over the document text concatenated
//! with a canonical serialisation of the options. Two invocations with the
//! same document and the same effective options must produce the same key
//! no matter how the options value was constructed, so the canonical form:
//!
//! * excludes the cache reference entirely (two configs that differ only in
//!   which cache they point at must share a key);
//! * contains only non-default fields, serialised as a JSON object whose
//!   keys are emitted in sorted order;
//! * is the **empty string** when every field is at its default, so a
//!   default options value and an explicitly-all-defaults value hash the
//!   same bytes as the bare document.
//!
//! Pass identity enters the key through the ordered list of extra-pass
//! names. Pass *versions* do not: if a pass changes behaviour under the
//! same name, existing cache entries go stale and must be invalidated
//! externally.

use crate::config::RenderOptions;
use sha2::{Digest, Sha256};

/// Compute the cache key for a document and its effective options.
///
/// Pure and deterministic: equal inputs always produce the same 64-char
/// lowercase-hex string.
pub fn fingerprint(document: &str, options: &RenderOptions) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.as_bytes());
    hasher.update(canonical_options(options).as_bytes());
    hex::encode(hasher.finalize())
}

/// Canonical, key-order-independent serialisation of the non-default,
/// non-cache option fields. All-defaults serialises to the empty string,
/// not `"{}"`.
fn canonical_options(options: &RenderOptions) -> String {
    // serde_json::Map is BTreeMap-backed, so Display emits sorted keys.
    let mut fields = serde_json::Map::new();

    if !options.extra_passes.is_empty() {
        let names: Vec<serde_json::Value> = options
            .extra_passes
            .iter()
            .map(|p| serde_json::Value::String(p.name().to_string()))
            .collect();
        fields.insert("extra_passes".to_string(), serde_json::Value::Array(names));
    }
    if options.frontmatter {
        fields.insert("frontmatter".to_string(), serde_json::Value::Bool(true));
    }
    if options.table_of_contents {
        fields.insert(
            "table_of_contents".to_string(),
            serde_json::Value::Bool(true),
        );
    }

    if fields.is_empty() {
        String::new()
    } else {
        serde_json::Value::Object(fields).to_string()
    }
}
