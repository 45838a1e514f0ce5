use std::collections::HashSet;

use crate::model::QuestionId;

/// Snapshot of the question identifiers a learner has finished.
///
/// The owning store lives outside the core. A `CompletionSet` is built once
/// per computation and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    ids: HashSet<QuestionId>,
}

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Completed identifiers missing from `known`, sorted.
    ///
    /// These have no effect on any status; callers use this for diagnostics.
    #[must_use]
    pub fn unknown_to<'a>(&self, known: impl IntoIterator<Item = &'a QuestionId>) -> Vec<&QuestionId> {
        let known: HashSet<&QuestionId> = known.into_iter().collect();
        let mut unknown: Vec<&QuestionId> =
            self.ids.iter().filter(|id| !known.contains(id)).collect();
        unknown.sort();
        unknown
    }
}

impl<I: Into<QuestionId>> FromIterator<I> for CompletionSet {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
