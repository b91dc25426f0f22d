//! Ordered post-processing chain.
//!
//! A chain is rebuilt per frame from whichever effects are enabled, so
//! turning an effect off is just leaving it out. Effects hold no state
//! between frames besides their parameters.

use lumen_core::Frame;
use tracing::trace;

use crate::OpsResult;

/// A full-frame post-processing stage.
pub trait PostEffect {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Produces a processed copy of `frame`.
    fn process(&self, frame: &Frame) -> OpsResult<Frame>;
}

/// Borrowed effects run in insertion order.
#[derive(Default)]
pub struct EffectChain<'a> {
    effects: Vec<&'a dyn PostEffect>,
}

impl<'a> EffectChain<'a> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an effect (builder form).
    pub fn with(mut self, effect: &'a dyn PostEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Appends an effect.
    pub fn push(&mut self, effect: &'a dyn PostEffect) {
        self.effects.push(effect);
    }

    /// Number of effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns `true` if the chain has no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effect names in run order.
    pub fn names(&self) -> Vec<&str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    /// Runs every effect in order. An empty chain returns a copy of `frame`.
    pub fn run(&self, frame: &Frame) -> OpsResult<Frame> {
        let mut current = frame.clone();
        for effect in &self.effects {
            trace!(effect = effect.name(), "running effect");
            current = effect.process(&current)?;
        }
        Ok(current)
    }
}

impl std::fmt::Debug for EffectChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectChain")
            .field("effects", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scale(f32);

    impl PostEffect for Scale {
        fn name(&self) -> &str {
            "scale"
        }

        fn process(&self, frame: &Frame) -> OpsResult<Frame> {
            let mut out = frame.clone();
            let k = self.0;
            out.map_pixels(|[r, g, b, a]| [r * k, g * k, b * k, a]);
            Ok(out)
        }
    }

    struct Offset(f32);

    impl PostEffect for Offset {
        fn name(&self) -> &str {
            "offset"
        }

        fn process(&self, frame: &Frame) -> OpsResult<Frame> {
            let mut out = frame.clone();
            let d = self.0;
            out.map_pixels(|[r, g, b, a]| [r + d, g + d, b + d, a]);
            Ok(out)
        }
    }

    #[test]
    fn empty_chain_copies_input() {
        let frame = Frame::filled(3, 3, [0.2, 0.4, 0.6, 1.0]);
        let chain = EffectChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.run(&frame).unwrap(), frame);
    }

    #[test]
    fn effects_run_in_order() {
        let frame = Frame::filled(2, 2, [0.25, 0.25, 0.25, 1.0]);
        let (scale, offset) = (Scale(2.0), Offset(0.25));

        let a = EffectChain::new().with(&scale).with(&offset);
        let b = EffectChain::new().with(&offset).with(&scale);
        assert_eq!(a.names(), vec!["scale", "offset"]);
        assert_eq!(a.run(&frame).unwrap().pixel(0, 0), [0.75, 0.75, 0.75, 1.0]);
        assert_eq!(b.run(&frame).unwrap().pixel(0, 0), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn push_matches_builder() {
        let scale = Scale(0.5);
        let mut chain = EffectChain::new();
        chain.push(&scale);
        assert_eq!(chain.len(), 1);
        let out = chain.run(&Frame::filled(1, 1, [1.0; 4])).unwrap();
        assert_eq!(out.pixel(0, 0), [0.5, 0.5, 0.5, 1.0]);
    }
}
