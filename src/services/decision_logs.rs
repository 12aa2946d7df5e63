//! Offset-paginated decision log retrieval.
//!
//! The decision endpoint returns one page per call; an empty page ends the
//! sequence. The offset of the next call is the number of entries received so
//! far. Entries written to the log stream while a fetch is in progress can be
//! skipped or seen twice, since offsets are not stable across writes.

use crate::domain::models::{DecisionLogEntry, DecisionQueryRequest};
use crate::services::policy::{PolicyApi, PolicyError};

/// Lazily fetches pages of decision logs, advancing the offset by each page's length.
pub struct DecisionLogPages<'a, C: PolicyApi + ?Sized> {
    client: &'a C,
    owner_id: &'a str,
    request: DecisionQueryRequest,
    done: bool,
}

impl<'a, C: PolicyApi + ?Sized> DecisionLogPages<'a, C> {
    pub fn new(client: &'a C, owner_id: &'a str, mut request: DecisionQueryRequest) -> Self {
        request.offset = 0;
        Self {
            client,
            owner_id,
            request,
            done: false,
        }
    }
}

impl<C: PolicyApi + ?Sized> Iterator for DecisionLogPages<'_, C> {
    type Item = Result<Vec<DecisionLogEntry>, PolicyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.client.get_decision_logs(self.owner_id, &self.request) {
            Ok(page) if page.is_empty() => {
                self.done = true;
                None
            }
            Ok(page) => {
                self.request.offset += page.len();
                tracing::debug!(
                    page = page.len(),
                    offset = self.request.offset,
                    "fetched decision log page"
                );
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<C: PolicyApi + ?Sized> std::iter::FusedIterator for DecisionLogPages<'_, C> {}

/// Drains every page into one ordered list, reporting the running total after each page.
/// Any failed call discards what was collected so far.
pub fn fetch_all<C: PolicyApi + ?Sized>(
    client: &C,
    owner_id: &str,
    request: DecisionQueryRequest,
    mut on_progress: impl FnMut(usize),
) -> Result<Vec<DecisionLogEntry>, PolicyError> {
    let mut all = Vec::new();
    for page in DecisionLogPages::new(client, owner_id, request) {
        all.extend(page?);
        on_progress(all.len());
    }
    Ok(all)
}
