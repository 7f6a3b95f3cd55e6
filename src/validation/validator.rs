use tracing::{debug, info, warn};

use crate::aligndef::AlignmentIndex;
use crate::corpus::{AttributeHandle, CorpusError, CorpusHandle, StructureHandle};

use super::report::{BoundaryOutcome, BoundaryReport, ValidationSummary};
use super::{ValidationError, ValidatorConfig};

/// Reference extracted from a boundary query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceRef {
    /// Attribute value (the sentence identifier).
    pub value: String,
    /// Token position of the match.
    pub token: u32,
}

/// Parse a `<attr>=<value>,#<token>` reference string.
pub fn parse_reference(raw: &str) -> Result<SentenceRef, ValidationError> {
    let malformed = || ValidationError::MalformedReference(raw.to_string());
    let (head, token) = raw.trim().rsplit_once(",#").ok_or_else(malformed)?;
    let (_, value) = head.split_once('=').ok_or_else(malformed)?;
    let token = token.parse::<u32>().map_err(|_| malformed())?;
    Ok(SentenceRef {
        value: value.to_string(),
        token,
    })
}

/// Checks every structural boundary of corpus A against an alignment index.
pub struct Validator<'a, C: CorpusHandle> {
    corpus: &'a C,
    index: &'a AlignmentIndex,
    sentences: C::Attribute,
    counterpart: Option<C::Attribute>,
    config: ValidatorConfig,
}

impl<C: CorpusHandle> std::fmt::Debug for Validator<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("corpus", &self.corpus.name())
            .field("entries", &self.index.len())
            .field("counterpart", &self.counterpart.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl<'a, C> Validator<'a, C>
where
    C: CorpusHandle,
{
    /// Create a validator over `corpus` (corpus A).
    ///
    /// Fails when the configured sentence attribute does not exist.
    pub fn new(
        corpus: &'a C,
        index: &'a AlignmentIndex,
        config: ValidatorConfig,
    ) -> Result<Self, CorpusError> {
        let sentences = corpus.attribute(&config.sentence_attr)?;
        Ok(Self {
            corpus,
            index,
            sentences,
            counterpart: None,
            config,
        })
    }

    /// Resolve corpus B sentence identifiers for matched alignments.
    pub fn with_counterpart(mut self, corpus_b: &C) -> Result<Self, CorpusError> {
        self.counterpart = Some(corpus_b.attribute(&self.config.sentence_attr)?);
        Ok(self)
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate boundary number `boundary`.
    pub fn validate_boundary(&self, boundary: usize) -> Result<BoundaryReport, ValidationError> {
        let structure = &self.config.structure;
        let refs = self
            .corpus
            .boundary_refs(structure, boundary, &self.config.sentence_attr)?;
        let raw = match refs.as_slice() {
            [single] => single,
            _ => {
                return Err(ValidationError::BoundaryNotFound {
                    structure: structure.clone(),
                    index: boundary,
                    matches: refs.len(),
                })
            }
        };

        let reference = parse_reference(raw)?;
        let sentence_order = self
            .sentences
            .str_to_id(&reference.value)
            .ok_or_else(|| ValidationError::UnknownSentence(reference.value.clone()))?;
        let alignment = self.index.lookup(sentence_order).copied();
        let counterpart = match (&self.counterpart, alignment.and_then(|entry| entry.right)) {
            (Some(attr), Some(right)) => attr.id_to_str(right.first),
            _ => None,
        };

        debug!(
            boundary,
            sentence = %reference.value,
            sentence_order,
            matched = alignment.is_some(),
            "boundary resolved"
        );
        Ok(BoundaryReport {
            boundary,
            sentence_id: reference.value,
            token: reference.token,
            sentence_order,
            alignment,
            counterpart,
        })
    }

    /// Validate every boundary and collect the outcomes.
    pub fn run(&self) -> Result<Vec<BoundaryOutcome>, CorpusError> {
        let mut outcomes = Vec::new();
        self.run_with(|outcome| outcomes.push(outcome))?;
        Ok(outcomes)
    }

    /// Validate every boundary, handing each outcome to `on_outcome`.
    ///
    /// Per-boundary failures are passed on and the run continues; a collaborator
    /// failure stops the run.
    pub fn run_with<F>(&self, mut on_outcome: F) -> Result<ValidationSummary, CorpusError>
    where
        F: FnMut(BoundaryOutcome),
    {
        let total = self.corpus.structure(&self.config.structure)?.size();
        info!(
            corpus = self.corpus.name(),
            structure = %self.config.structure,
            total,
            "validating structure boundaries"
        );

        let mut summary = ValidationSummary::default();
        for boundary in 0..total {
            let outcome = match self.validate_boundary(boundary) {
                Err(ValidationError::Collaborator(err)) => return Err(err),
                Err(err) => {
                    warn!(boundary, error = %err, "boundary validation failed");
                    Err(err)
                }
                Ok(report) => Ok(report),
            };
            summary.record(&outcome);
            on_outcome(outcome);
        }

        info!(%summary, "validation finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_strings() {
        assert_eq!(
            parse_reference("s.id=en:1:4,#312").unwrap(),
            SentenceRef {
                value: "en:1:4".to_string(),
                token: 312
            }
        );
    }

    #[test]
    fn rejects_malformed_references() {
        for raw in ["s.id=en:1:4", "en:1:4,#3", "s.id=x,#abc"] {
            assert!(
                matches!(parse_reference(raw), Err(ValidationError::MalformedReference(_))),
                "{raw} should be rejected"
            );
        }
    }
}
