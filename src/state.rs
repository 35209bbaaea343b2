//! Shared transition mode.
//!
//! One writer (the toggle control), many readers (every animated component,
//! once per frame). The handle is cheap to clone and backed by an atomic so a
//! toggle from another thread is visible to the next frame.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Which configuration the scene is heading towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionMode {
    /// Disassembled cloud.
    Scattered,
    /// Assembled cone.
    #[default]
    TreeShape,
}

impl TransitionMode {
    /// The other mode.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            TransitionMode::Scattered => TransitionMode::TreeShape,
            TransitionMode::TreeShape => TransitionMode::Scattered,
        }
    }

    /// Animation target for progress scalars: 1 for the tree, 0 for the cloud.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            TransitionMode::Scattered => 0.0,
            TransitionMode::TreeShape => 1.0,
        }
    }

    /// Label of the toggle control while in this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            TransitionMode::Scattered => "Assemble",
            TransitionMode::TreeShape => "Deconstruct",
        }
    }
}

impl fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionMode::Scattered => write!(f, "scattered"),
            TransitionMode::TreeShape => write!(f, "tree"),
        }
    }
}

/// Cloneable handle to the scene's transition mode.
///
/// Starts in [`TransitionMode::TreeShape`], like every fresh start of the scene.
#[derive(Debug, Clone)]
pub struct TransitionState {
    tree: Arc<AtomicBool>,
}

impl TransitionState {
    /// New state in the tree shape.
    pub fn new() -> Self {
        Self::with_mode(TransitionMode::TreeShape)
    }

    /// New state starting in `mode`.
    pub fn with_mode(mode: TransitionMode) -> Self {
        Self {
            tree: Arc::new(AtomicBool::new(mode == TransitionMode::TreeShape)),
        }
    }

    /// Current mode.
    #[inline]
    pub fn mode(&self) -> TransitionMode {
        if self.tree.load(Ordering::Acquire) {
            TransitionMode::TreeShape
        } else {
            TransitionMode::Scattered
        }
    }

    /// Flip the mode and return the new value.
    pub fn toggle(&self) -> TransitionMode {
        let was_tree = self.tree.fetch_xor(true, Ordering::AcqRel);
        let mode = if was_tree {
            TransitionMode::Scattered
        } else {
            TransitionMode::TreeShape
        };
        debug!(%mode, label = mode.toggle_label(), "transition toggled");
        mode
    }

    /// Label the toggle control should currently show.
    pub fn toggle_label(&self) -> &'static str {
        self.mode().toggle_label()
    }
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::new()
    }
}
