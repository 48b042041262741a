use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::debug;

use super::error::DocumentError;
use super::key_path::KeyPath;
use super::merge::{MergeSummary, deep_merge, summarize};

/// One language's translations as a tree of sections and leaves.
///
/// A `Value::Object` node is a section; every other JSON value is a leaf.
/// Key order is preserved from the source file, and new keys are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationDocument {
    data: Map<String, Value>,
}

impl TranslationDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.data
    }

    /// Load a document from a JSON file. The root must be an object.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::parse(&content, path)?;
        debug!(path = %path.display(), keys = doc.leaf_count(), "loaded document");
        Ok(doc)
    }

    /// Load a document, or start an empty one if the file does not exist yet.
    pub fn load_or_empty(path: &Path) -> Result<Self, DocumentError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "document does not exist, starting empty");
            Ok(Self::new())
        }
    }

    /// Parse document text. `origin` is only used in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(content).map_err(|source| DocumentError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        match value {
            Value::Object(data) => Ok(Self { data }),
            _ => Err(DocumentError::RootNotObject {
                path: origin.to_path_buf(),
            }),
        }
    }

    /// Serialize with 2-space indentation and a trailing newline.
    ///
    /// Non-ASCII text is written as-is, never `\u`-escaped.
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        let content = serde_json::to_string_pretty(&self.data).map_err(DocumentError::Serialize)?;
        Ok(format!("{}\n", content))
    }

    /// Write the document to `path`, replacing any existing file atomically.
    ///
    /// The content goes to a temporary file next to the destination first and is
    /// then renamed over it, so a failed save never leaves a truncated file behind.
    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let content = self.to_json_string()?;
        let write_err = |source: std::io::Error| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_err)?;

        let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
        file.write_all(content.as_bytes()).map_err(write_err)?;
        if let Ok(metadata) = fs::metadata(path) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(path).map_err(|err| write_err(err.error))?;

        debug!(path = %path.display(), bytes = content.len(), "saved document");
        Ok(())
    }

    /// Look up the node at `path`, section or leaf.
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.data.get(first)?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn contains(&self, path: &KeyPath) -> bool {
        self.get(path).is_some()
    }

    /// Insert `value` at `path` unless something is already there.
    ///
    /// Missing sections along the path are created. Returns `Ok(true)` when the
    /// value was inserted and `Ok(false)` when the key already existed, in which
    /// case the document is unchanged. If a section along the path is already a
    /// leaf, fails with [`DocumentError::StructuralConflict`] and changes nothing.
    pub fn insert_if_absent(&mut self, path: &KeyPath, value: Value) -> Result<bool, DocumentError> {
        let (last, parents) = path
            .segments()
            .split_last()
            .ok_or(DocumentError::EmptyKeyPath)?;

        // Validate the whole path before creating any section.
        let mut current = Some(&self.data);
        for (depth, segment) in parents.iter().enumerate() {
            let Some(map) = current else { break };
            current = match map.get(segment) {
                None => None,
                Some(Value::Object(child)) => Some(child),
                Some(_) => {
                    return Err(DocumentError::StructuralConflict {
                        path: path.to_string(),
                        prefix: path.prefix(depth + 1),
                    });
                }
            };
        }

        if let Some(map) = current
            && map.contains_key(last)
        {
            debug!(key = %path, "key already present, keeping existing value");
            return Ok(false);
        }

        insert_nested(&mut self.data, parents, last, value);
        debug!(key = %path, "inserted key");
        Ok(true)
    }

    /// Deep-merge `overlay` into this document; overlay values win on conflicts.
    pub fn merge(&mut self, overlay: &Map<String, Value>) -> MergeSummary {
        let merged = deep_merge(&self.data, overlay);
        let summary = summarize(&self.data, &merged);
        self.data = merged;
        summary
    }

    /// Deep-merge `subtree` at `at`, as if it had been supplied nested under that path.
    ///
    /// Sections along the path are created as needed; a leaf on the way is
    /// replaced by a section, following the same overlay-wins rule as [`Self::merge`].
    pub fn merge_at(&mut self, at: Option<&KeyPath>, subtree: Value) -> MergeSummary {
        let overlay = match at {
            None => match subtree {
                Value::Object(map) => map,
                // A non-object at the root has no key to live under.
                _ => return MergeSummary::default(),
            },
            Some(path) => nest(path, subtree),
        };
        self.merge(&overlay)
    }

    /// Put `value` at `at`, discarding whatever was there before.
    ///
    /// Unlike [`Self::merge_at`], keys under `at` that `value` does not carry are
    /// removed. Sections along the path are created as needed and a leaf on the
    /// way is replaced by a section.
    pub fn replace_at(&mut self, at: &KeyPath, value: Value) -> MergeSummary {
        let Some((last, parents)) = at.segments().split_last() else {
            return MergeSummary::default();
        };
        let before = self.data.clone();
        replace_nested(&mut self.data, parents, last, value);
        let summary = summarize(&before, &self.data);
        debug!(key = %at, removed = summary.removed.len(), "replaced section");
        summary
    }

    /// Every leaf with its key path, in document order.
    pub fn leaves(&self) -> Vec<(KeyPath, &Value)> {
        let mut leaves = Vec::new();
        collect_leaves(&self.data, &mut Vec::new(), &mut leaves);
        leaves
    }

    /// Every leaf as `(dotted key, value)`, in document order.
    pub fn leaf_paths(&self) -> Vec<(String, &Value)> {
        self.leaves()
            .into_iter()
            .map(|(path, value)| (path.to_string(), value))
            .collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_paths().len()
    }

    /// Dotted keys whose value is blank text or an empty section.
    pub fn blank_entries(&self) -> Vec<String> {
        let mut blanks = Vec::new();
        collect_blanks(&self.data, "", &mut blanks);
        blanks
    }
}

fn insert_nested(root: &mut Map<String, Value>, parents: &[String], key: &str, value: Value) {
    match parents.split_first() {
        None => {
            root.insert(key.to_string(), value);
        }
        Some((head, rest)) => {
            let next = root
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = next {
                insert_nested(inner, rest, key, value);
            }
        }
    }
}

fn replace_nested(root: &mut Map<String, Value>, parents: &[String], key: &str, value: Value) {
    match parents.split_first() {
        None => {
            root.insert(key.to_string(), value);
        }
        Some((head, rest)) => {
            let next = root
                .entry(head.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !next.is_object() {
                *next = Value::Object(Map::new());
            }
            if let Value::Object(inner) = next {
                replace_nested(inner, rest, key, value);
            }
        }
    }
}

/// Wrap `value` in one single-key object per segment of `path`.
fn nest(path: &KeyPath, value: Value) -> Map<String, Value> {
    let mut current = value;
    for segment in path.segments().iter().rev() {
        let mut map = Map::new();
        map.insert(segment.clone(), current);
        current = Value::Object(map);
    }
    match current {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn collect_leaves<'a>(
    map: &'a Map<String, Value>,
    segments: &mut Vec<String>,
    out: &mut Vec<(KeyPath, &'a Value)>,
) {
    for (key, value) in map {
        segments.push(key.clone());
        match value {
            Value::Object(child) => collect_leaves(child, segments, out),
            leaf => out.push((KeyPath::from_document(segments.clone()), leaf)),
        }
        segments.pop();
    }
}

fn collect_blanks(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = join_key(prefix, key);
        match value {
            Value::Object(child) if child.is_empty() => out.push(path),
            Value::Object(child) => collect_blanks(child, &path, out),
            Value::String(s) if s.trim().is_empty() => out.push(path),
            Value::Null => out.push(path),
            _ => {}
        }
    }
}
