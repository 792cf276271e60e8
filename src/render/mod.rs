//! Per-render state threaded explicitly through every tag evaluation.
//!
//! A render pass is either the one that is about to send a request
//! ([`RenderPurpose::Send`]) or a passive one (previews, autocomplete). Only
//! send renders are allowed to execute dependencies.

pub mod chain;

pub use chain::RenderChain;

use serde::{Deserialize, Serialize};

/// Why a template is being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPurpose {
    /// The rendered request is about to be sent.
    Send,
    /// Rendering for a live preview in the editor.
    Preview,
    /// Any other passive render.
    #[default]
    General,
}

impl RenderPurpose {
    pub fn is_send(&self) -> bool {
        matches!(self, RenderPurpose::Send)
    }
}

/// Context of one tag evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Why this render is happening.
    pub purpose: RenderPurpose,

    /// Requests already sent earlier in this render.
    pub chain: RenderChain,
}

impl RenderContext {
    /// Context for a top-level render with an empty chain.
    pub fn new(purpose: RenderPurpose) -> Self {
        Self {
            purpose,
            chain: RenderChain::new(),
        }
    }

    /// Context for a top-level send render.
    pub fn send() -> Self {
        Self::new(RenderPurpose::Send)
    }

    /// Context for a preview render.
    pub fn preview() -> Self {
        Self::new(RenderPurpose::Preview)
    }

    /// Replaces the chain, typically with the one a host received alongside
    /// a request it was asked to execute.
    pub fn with_chain(mut self, chain: RenderChain) -> Self {
        self.chain = chain;
        self
    }
}
