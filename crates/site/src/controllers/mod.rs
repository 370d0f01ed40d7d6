//! Page controllers.
//!
//! Each page drives its own fetches and ends in one [`ViewState`]. The
//! loading state exists only while the request is in flight; there are no
//! retries and no timers.
//!
//! Parallel fetches are joined per task: whatever succeeded is rendered, and
//! a failure only turns the whole section into an error when nothing usable
//! came back.

pub mod detail;
pub mod home;
pub mod search;
pub mod sequencer;
#[cfg(test)]
mod testing;

pub use detail::{RecipeView, load_detail};
pub use home::{HomeSections, load_home};
pub use search::{SearchResults, run_search};
pub use sequencer::{SearchSequencer, Ticket};

/// Terminal state of a page or page section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    /// Nothing was requested (no query, no id).
    Idle,
    /// Something to show. `partial` is set when some fetches failed.
    Success { value: T, partial: bool },
    /// Every fetch succeeded and none had results.
    Empty,
    /// Nothing to show because fetches failed.
    Error,
}

impl<T> ViewState<T> {
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Success { partial: true, .. })
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Transform the success value, keeping the state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            Self::Idle => ViewState::Idle,
            Self::Success { value, partial } => ViewState::Success {
                value: f(value),
                partial,
            },
            Self::Empty => ViewState::Empty,
            Self::Error => ViewState::Error,
        }
    }
}

impl<T> ViewState<Vec<T>> {
    /// Settle a joined batch: `items` gathered from the tasks that succeeded,
    /// `failures` the number of tasks that failed.
    ///
    /// No items and at least one failure is an error, since the failed task
    /// might have had results.
    #[must_use]
    pub fn from_batch(items: Vec<T>, failures: usize) -> Self {
        match (items.is_empty(), failures) {
            (true, 0) => Self::Empty,
            (true, _) => Self::Error,
            (false, failures) => Self::Success {
                value: items,
                partial: failures > 0,
            },
        }
    }

    /// Items to render; empty unless the state is `Success`.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.value().map_or(&[], Vec::as_slice)
    }
}
