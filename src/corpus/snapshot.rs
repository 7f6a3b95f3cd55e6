//! Corpus data exported ahead of time into a JSON document.
//!
//! A snapshot stores, per structure, the inclusive token ranges of every
//! instance and, per structural attribute `X.Y`, one value for each instance
//! of structure `X`.
//!
//! ```json
//! {
//!   "structures": { "doc": [[0, 40]], "s": [[0, 9], [10, 40]] },
//!   "attributes": { "s.id": ["en:1:1", "en:1:2"] }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AttributeHandle, CorpusError, CorpusHandle, CorpusProvider, StructureHandle};

/// Raw snapshot contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    /// Inclusive token ranges per structure name.
    #[serde(default)]
    pub structures: BTreeMap<String, Vec<[u32; 2]>>,
    /// Values per structural attribute name (`<structure>.<attr>`).
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl CorpusSnapshot {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a structure.
    pub fn with_structure(mut self, name: impl Into<String>, ranges: Vec<[u32; 2]>) -> Self {
        self.structures.insert(name.into(), ranges);
        self
    }

    /// Add or replace a structural attribute.
    pub fn with_attribute<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.attributes
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Check that ranges are well formed and every attribute matches its
    /// owning structure.
    pub fn validate(&self) -> Result<(), CorpusError> {
        for (name, ranges) in &self.structures {
            if let Some([first, last]) = ranges.iter().find(|[first, last]| first > last) {
                return Err(CorpusError::InvalidSnapshot(format!(
                    "structure '{name}' has reversed range {first},{last}"
                )));
            }
        }
        for (name, values) in &self.attributes {
            let owner = owning_structure(name)?;
            let ranges = self.structures.get(owner).ok_or_else(|| {
                CorpusError::InvalidSnapshot(format!(
                    "attribute '{name}' refers to missing structure '{owner}'"
                ))
            })?;
            if ranges.len() != values.len() {
                return Err(CorpusError::InvalidSnapshot(format!(
                    "attribute '{name}' has {} values for {} '{owner}' structures",
                    values.len(),
                    ranges.len()
                )));
            }
        }
        Ok(())
    }
}

fn owning_structure(attribute: &str) -> Result<&str, CorpusError> {
    match attribute.split_once('.') {
        Some((owner, attr)) if !owner.is_empty() && !attr.is_empty() => Ok(owner),
        _ => Err(CorpusError::UnknownAttribute(attribute.to_string())),
    }
}

/// Opened, validated snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotCorpus {
    name: String,
    data: Arc<CorpusSnapshot>,
}

impl SnapshotCorpus {
    /// Validate `snapshot` and wrap it as a corpus handle.
    pub fn new(name: impl Into<String>, snapshot: CorpusSnapshot) -> Result<Self, CorpusError> {
        snapshot.validate()?;
        Ok(Self {
            name: name.into(),
            data: Arc::new(snapshot),
        })
    }

    /// Load a snapshot file.
    pub fn load<P: AsRef<Path>>(name: impl Into<String>, path: P) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CorpusError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = serde_json::from_str(&raw).map_err(|source| CorpusError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded corpus snapshot");
        Self::new(name, snapshot)
    }

    fn ranges(&self, structure: &str) -> Result<&[[u32; 2]], CorpusError> {
        self.data
            .structures
            .get(structure)
            .map(Vec::as_slice)
            .ok_or_else(|| CorpusError::UnknownStructure(structure.to_string()))
    }

    fn values(&self, attribute: &str) -> Result<&[String], CorpusError> {
        self.data
            .attributes
            .get(attribute)
            .map(Vec::as_slice)
            .ok_or_else(|| CorpusError::UnknownAttribute(attribute.to_string()))
    }
}

impl CorpusHandle for SnapshotCorpus {
    type Attribute = SnapshotAttribute;
    type Structure = SnapshotStructure;

    fn name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Result<Self::Attribute, CorpusError> {
        let values: Arc<[String]> = Arc::from(self.values(name)?);
        let mut lexicon = HashMap::with_capacity(values.len());
        for (id, value) in values.iter().enumerate() {
            lexicon.entry(value.clone()).or_insert(id as u32);
        }
        Ok(SnapshotAttribute { values, lexicon })
    }

    fn structure(&self, name: &str) -> Result<Self::Structure, CorpusError> {
        Ok(SnapshotStructure {
            size: self.ranges(name)?.len(),
        })
    }

    fn boundary_refs(
        &self,
        structure: &str,
        index: usize,
        refs: &str,
    ) -> Result<Vec<String>, CorpusError> {
        let Some([token, _]) = self.ranges(structure)?.get(index).copied() else {
            return Ok(Vec::new());
        };
        let values = self.values(refs)?;
        let owner = self.ranges(owning_structure(refs)?)?;

        let idx = owner.partition_point(|[_, last]| *last < token);
        let value = match owner.get(idx) {
            Some([first, _]) if *first <= token => values[idx].as_str(),
            _ => "",
        };
        Ok(vec![format!("{refs}={value},#{token}")])
    }
}

/// Attribute lexicon backed by a snapshot value list.
#[derive(Debug, Clone)]
pub struct SnapshotAttribute {
    values: Arc<[String]>,
    lexicon: HashMap<String, u32>,
}

impl AttributeHandle for SnapshotAttribute {
    fn str_to_id(&self, value: &str) -> Option<u32> {
        self.lexicon.get(value).copied()
    }

    fn id_to_str(&self, id: u32) -> Option<String> {
        self.values.get(id as usize).cloned()
    }
}

/// Structure backed by snapshot ranges.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotStructure {
    size: usize,
}

impl StructureHandle for SnapshotStructure {
    fn size(&self) -> usize {
        self.size
    }
}

/// Resolves corpus identifiers to snapshot files under a registry directory.
///
/// Absolute identifiers are used as they are.
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    registry: PathBuf,
}

impl SnapshotProvider {
    /// Provider rooted at `registry`.
    pub fn new(registry: impl Into<PathBuf>) -> Self {
        Self {
            registry: registry.into(),
        }
    }

    /// Location `ident` resolves to.
    pub fn resolve(&self, ident: &str) -> PathBuf {
        self.registry.join(ident)
    }
}

impl CorpusProvider for SnapshotProvider {
    type Corpus = SnapshotCorpus;

    fn open_corpus(&self, ident: &str) -> Result<Self::Corpus, CorpusError> {
        SnapshotCorpus::load(ident, self.resolve(ident))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> SnapshotCorpus {
        let snapshot = CorpusSnapshot::new()
            .with_structure("doc", vec![[0, 14], [15, 29]])
            .with_structure("s", vec![[0, 4], [5, 14], [15, 29]])
            .with_attribute("s.id", ["a:1", "a:2", "b:1"]);
        SnapshotCorpus::new("en", snapshot).expect("snapshot is valid")
    }

    #[test]
    fn boundary_refs_name_the_covering_sentence() {
        let corpus = corpus();
        assert_eq!(
            corpus.boundary_refs("doc", 1, "s.id").unwrap(),
            vec!["s.id=b:1,#15".to_string()]
        );
        assert!(corpus.boundary_refs("doc", 2, "s.id").unwrap().is_empty());
    }

    #[test]
    fn attribute_maps_both_ways() {
        let attr = corpus().attribute("s.id").unwrap();
        assert_eq!(attr.str_to_id("a:2"), Some(1));
        assert_eq!(attr.id_to_str(2).as_deref(), Some("b:1"));
        assert_eq!(attr.str_to_id("zz"), None);
    }

    #[test]
    fn mismatched_attribute_is_rejected() {
        let snapshot = CorpusSnapshot::new()
            .with_structure("s", vec![[0, 1]])
            .with_attribute("s.id", ["x", "y"]);
        assert!(matches!(
            SnapshotCorpus::new("bad", snapshot),
            Err(CorpusError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn unknown_names_are_errors() {
        let corpus = corpus();
        assert!(matches!(
            corpus.structure("p"),
            Err(CorpusError::UnknownStructure(_))
        ));
        assert!(matches!(
            corpus.attribute("doc.id"),
            Err(CorpusError::UnknownAttribute(_))
        ));
    }
}
