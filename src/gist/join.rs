// src/gist/join.rs
// =============================================================================
// Fan-out/fan-in join for truncated files.
//
// How it works:
// 1. The inline files are already in the result set
// 2. The caller turns every truncated file into a fetch future and streams
//    the results, in completion order, into join_all()
// 3. Each success fills in one file and decrements the outstanding count
// 4. The first failure, or the count reaching zero, settles the join
// 5. join_all() returns the outcome and drops whatever is still in flight
//
// Everything runs inside the one future that awaits the operation, so the
// join state needs no lock and no particular async runtime.
// =============================================================================

use futures::stream::{Stream, StreamExt};

use super::files::FileSet;
use crate::error::{Error, Result};

/// Where the join is in its life. The only transition is out of `Pending`.
pub(crate) enum Completion {
    Pending,
    Settled(Result<FileSet>),
    Delivered,
}

impl Completion {
    fn is_pending(&self) -> bool {
        matches!(self, Completion::Pending)
    }

    // Stores `outcome` if still pending; a no-op once settled.
    fn settle(&mut self, outcome: Result<FileSet>) {
        if self.is_pending() {
            *self = Completion::Settled(outcome);
        }
    }

    // Hands out the outcome the first time it is asked for after settling.
    fn take(&mut self) -> Option<Result<FileSet>> {
        match std::mem::replace(self, Completion::Delivered) {
            Completion::Settled(outcome) => Some(outcome),
            other => {
                *self = other;
                None
            }
        }
    }
}

pub(crate) struct FanIn {
    outstanding: usize,
    files: FileSet,
    completion: Completion,
}

impl FanIn {
    /// Starts a join waiting on `outstanding` files on top of `files`.
    ///
    /// `outstanding` must be at least one; with nothing to wait for the
    /// caller returns the inline set directly.
    pub(crate) fn new(files: FileSet, outstanding: usize) -> Self {
        FanIn {
            outstanding,
            files,
            completion: Completion::Pending,
        }
    }

    /// Reports one truncated file's fetch.
    pub(crate) fn record(&mut self, filename: String, result: Result<String>) {
        if !self.completion.is_pending() {
            tracing::trace!(filename = %filename, "join already settled, discarding result");
            return;
        }

        match result {
            Err(error) => {
                tracing::warn!(filename = %filename, error = %error, "truncated file fetch failed");
                self.completion.settle(Err(error));
            }
            Ok(content) => {
                self.files.insert(filename, content);
                self.outstanding = self.outstanding.saturating_sub(1);

                // Last one in: the set is complete
                if self.outstanding == 0 {
                    let files = std::mem::take(&mut self.files);
                    self.completion.settle(Ok(files));
                }
            }
        }
    }

    /// The outcome, once, as soon as the join has settled.
    pub(crate) fn take_outcome(&mut self) -> Option<Result<FileSet>> {
        self.completion.take()
    }

    #[cfg(test)]
    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding
    }
}

/// Feeds fetch results into `fan_in` until it settles.
///
/// Parameters:
///   fan_in: the join, holding the inline files and the outstanding count
///   results: (filename, fetch result) pairs in completion order
///
/// Returns: the merged set, or the first failure. A stream that ends before
/// every file reported gives `Error::Interrupted`.
pub(crate) async fn join_all<S>(mut fan_in: FanIn, results: S) -> Result<FileSet>
where
    S: Stream<Item = (String, Result<String>)>,
{
    let mut results = std::pin::pin!(results);

    while let Some((filename, result)) = results.next().await {
        fan_in.record(filename, result);
        if let Some(outcome) = fan_in.take_outcome() {
            return outcome;
        }
    }

    fan_in.take_outcome().unwrap_or(Err(Error::Interrupted))
}
