//! Engine state shared between the input thread and the render worker.
//!
//! Every operation takes the single state lock for its whole duration, so a
//! frame never observes a half-applied drag and a drag never lands on a
//! layout that is being replaced.

use std::sync::Arc;

use abacus_core::{AbacusConfig, AbacusEngine, AbacusError, AbacusResult, Reading};
use abacus_ui::{paint, Palette, Renderer};
use parking_lot::Mutex;
use tracing::debug;

/// A bead resolved by a hit-test, valid for the layout it was resolved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeadRef {
    /// Layout generation the reference belongs to.
    pub epoch: u64,
    /// Row index, 0 being the most significant.
    pub row: usize,
    /// Bead index within the row.
    pub bead: usize,
}

/// State guarded by the lock.
#[derive(Debug)]
pub struct AbacusState {
    /// Current layout, `None` until the first usable surface size.
    engine: Option<AbacusEngine>,
    /// Bumped on every resize.
    epoch: u64,
    /// Active configuration.
    config: AbacusConfig,
}

impl AbacusState {
    fn check(&self, bead: BeadRef) -> AbacusResult<()> {
        if bead.epoch != self.epoch {
            return Err(AbacusError::StaleGesture {
                held: bead.epoch,
                current: self.epoch,
            });
        }
        Ok(())
    }
}

/// Cloneable handle to the locked abacus state.
#[derive(Debug, Clone)]
pub struct SharedAbacus {
    inner: Arc<Mutex<AbacusState>>,
}

impl SharedAbacus {
    /// Creates an unlaid-out abacus with the given configuration.
    #[must_use]
    pub fn new(config: AbacusConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AbacusState {
                engine: None,
                epoch: 0,
                config,
            })),
        }
    }

    /// Returns the current layout generation.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.inner.lock().epoch
    }

    /// Returns true once a usable layout exists.
    #[must_use]
    pub fn is_laid_out(&self) -> bool {
        self.inner.lock().engine.is_some()
    }

    /// Rebuilds the layout for a new surface size.
    ///
    /// Every row restarts at rest and every outstanding [`BeadRef`] becomes
    /// stale. On a degenerate size the abacus is left without a layout.
    ///
    /// # Errors
    ///
    /// Propagates the layout error from [`AbacusEngine::layout_with`].
    pub fn resize(&self, width: f32, height: f32) -> AbacusResult<()> {
        let mut state = self.inner.lock();
        state.epoch += 1;
        let config = state.config;
        match AbacusEngine::layout_with(width, height, &config.layout, config.decode) {
            Ok(engine) => {
                state.engine = Some(engine);
                debug!(epoch = state.epoch, width, height, "layout rebuilt");
                Ok(())
            }
            Err(e) => {
                state.engine = None;
                Err(e)
            }
        }
    }

    /// Resolves a point to a bead together with the bead's current leading
    /// edge in device space.
    #[must_use]
    pub fn grab(&self, x: f32, y: f32) -> Option<(BeadRef, f32)> {
        let state = self.inner.lock();
        let engine = state.engine.as_ref()?;
        let (row, bead) = engine.hit_test(x, y)?;
        let edge = engine.row(row)?.bead_rect(bead)?.x;
        Some((
            BeadRef {
                epoch: state.epoch,
                row,
                bead,
            },
            edge,
        ))
    }

    /// Resolves a point to a bead.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<BeadRef> {
        self.grab(x, y).map(|(bead, _)| bead)
    }

    /// Drags a bead so its leading edge follows device-space `x`.
    ///
    /// # Errors
    ///
    /// - [`AbacusError::NotLaidOut`] before the first usable layout
    /// - [`AbacusError::StaleGesture`] if the layout changed since the hit-test;
    ///   nothing is moved
    pub fn drag(&self, bead: BeadRef, x: f32) -> AbacusResult<f32> {
        let mut state = self.inner.lock();
        state.check(bead)?;
        state
            .engine
            .as_mut()
            .ok_or(AbacusError::NotLaidOut)?
            .drag_bead(bead.row, bead.bead, x)
    }

    /// Decodes the whole abacus; indeterminate until laid out.
    #[must_use]
    pub fn value(&self) -> Reading {
        self.inner
            .lock()
            .engine
            .as_ref()
            .map_or(Reading::Indeterminate, AbacusEngine::value)
    }

    /// Returns every row to rest. Outstanding references stay valid.
    pub fn reset(&self) {
        if let Some(engine) = self.inner.lock().engine.as_mut() {
            engine.reset();
        }
    }

    /// Paints one frame. Returns false if there is no layout to paint.
    pub fn render(&self, renderer: &mut dyn Renderer, palette: &Palette) -> bool {
        let state = self.inner.lock();
        match state.engine.as_ref() {
            Some(engine) => {
                paint(engine, renderer, palette);
                true
            }
            None => false,
        }
    }

    /// Runs `f` against the current layout under the lock.
    pub fn with_engine<R>(&self, f: impl FnOnce(&AbacusEngine) -> R) -> Option<R> {
        self.inner.lock().engine.as_ref().map(f)
    }
}
