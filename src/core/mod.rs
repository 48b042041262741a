//! Core document engine.
//!
//! - `document`: load, edit and atomically save one translation document
//! - `merge`: pure deep merge of two document trees
//! - `key_path`: dotted key addressing
//! - `entries`: batches of keys or subtrees read from input files
//! - `locales`: the set of locale documents under a messages directory
//! - `placeholder`: readable placeholder values for untranslated keys

mod document;
mod entries;
mod error;
mod key_path;
mod locales;
mod merge;
mod placeholder;

pub use document::TranslationDocument;
pub use entries::{InsertReport, NewEntry, NewEntrySet, SubtreeSet, insert_missing};
pub use error::DocumentError;
pub use key_path::KeyPath;
pub use locales::{
    LocaleDocument, LocaleSet, discover_locales, locale_file_path, validate_locale_name,
};
pub use merge::{MergeSummary, deep_merge, deep_merge_values, summarize};
pub use placeholder::{DEFAULT_PLACEHOLDER_PREFIX, humanize_key, placeholder_for};
