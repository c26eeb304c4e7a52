//! Hooks into the coverage loop.
//!
//! The loop reports each step to a [`CoverageObserver`] instead of printing.
//! All methods default to doing nothing, so an observer only overrides the
//! events it cares about.

use crate::maxrect::MaximalRectangle;
use crate::rect::Rectangle;

/// Callbacks invoked by the coverage loop, in this order per iteration:
/// `on_candidate`, `on_trim`, then exactly one of `on_commit` / `on_discard`.
pub trait CoverageObserver {
    fn on_candidate(&mut self, _iteration: u64, _candidate: &Rectangle) {}

    fn on_trim(&mut self, _candidate: &Rectangle, _result: &MaximalRectangle) {}

    /// `tower` is the 1-based index of the committed tower, `covered` the
    /// running covered area including it.
    fn on_commit(&mut self, _tower: usize, _trimmed: &Rectangle, _covered: usize) {}

    fn on_discard(&mut self, _candidate: &Rectangle) {}
}

impl<O: CoverageObserver + ?Sized> CoverageObserver for &mut O {
    fn on_candidate(&mut self, iteration: u64, candidate: &Rectangle) {
        (**self).on_candidate(iteration, candidate);
    }

    fn on_trim(&mut self, candidate: &Rectangle, result: &MaximalRectangle) {
        (**self).on_trim(candidate, result);
    }

    fn on_commit(&mut self, tower: usize, trimmed: &Rectangle, covered: usize) {
        (**self).on_commit(tower, trimmed, covered);
    }

    fn on_discard(&mut self, candidate: &Rectangle) {
        (**self).on_discard(candidate);
    }
}

/// Ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CoverageObserver for NoopObserver {}

/// Forwards events to the `log` facade (`trace` for candidates, `debug` for
/// the rest).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CoverageObserver for LogObserver {
    fn on_candidate(&mut self, iteration: u64, candidate: &Rectangle) {
        log::trace!("iteration {}: candidate {}", iteration, candidate);
    }

    fn on_trim(&mut self, candidate: &Rectangle, result: &MaximalRectangle) {
        match result.rectangle {
            Some(rect) => log::debug!(
                "trimmed {} -> {} (area {} of {})",
                candidate,
                rect,
                result.area,
                candidate.area()
            ),
            None => log::debug!("trimmed {} -> nothing free", candidate),
        }
    }

    fn on_commit(&mut self, tower: usize, trimmed: &Rectangle, covered: usize) {
        log::debug!("tower #{} committed at {}, covered {}", tower, trimmed, covered);
    }

    fn on_discard(&mut self, candidate: &Rectangle) {
        log::debug!("candidate {} discarded", candidate);
    }
}
