//! Render chain used for cycle detection.

use serde::{Deserialize, Serialize};

/// Ordered list of request ids already sent during one top-level render.
///
/// A chain is never mutated in place. Sending a dependency produces a new,
/// longer chain that is handed to the nested evaluation, so sibling tags in
/// the same render keep seeing the chain they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderChain(Vec<String>);

impl RenderChain {
    /// Creates an empty chain for a top-level render.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Checks whether `request_id` has already been visited.
    pub fn contains(&self, request_id: &str) -> bool {
        self.0.iter().any(|id| id == request_id)
    }

    /// Returns a copy of this chain with `request_id` appended.
    ///
    /// The id is not appended twice; callers consult [`contains`](Self::contains)
    /// before deciding to send, so this only matters for hand-built chains.
    pub fn extended(&self, request_id: &str) -> Self {
        let mut ids = self.0.clone();
        if !self.contains(request_id) {
            ids.push(request_id.to_string());
        }
        Self(ids)
    }

    /// Request ids in visiting order.
    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RenderChain {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut chain = RenderChain::new();
        for id in iter {
            let id = id.into();
            if !chain.contains(&id) {
                chain.0.push(id);
            }
        }
        chain
    }
}
