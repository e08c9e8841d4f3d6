//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! Composites are reactive: they keep no record of which child was running
//! last frame and re-evaluate from the first child every tick.

use crate::{Behavior, Status};

/// Type alias for a scored behavior option in utility-based decision making.
///
/// Each option consists of:
/// - A behavior to execute
/// - A scoring function that evaluates desirability (0-100)
pub type ScoredOption<C> = (Box<dyn Behavior<C>>, Box<dyn Fn(&C) -> u32 + Send + Sync>);

/// Pairs a behavior with its scoring function.
pub fn scored<C>(
    behavior: Box<dyn Behavior<C>>,
    scorer: impl Fn(&C) -> u32 + Send + Sync + 'static,
) -> ScoredOption<C> {
    (behavior, Box::new(scorer))
}

/// Executes child behaviors in order until one does not succeed.
///
/// # Semantics
///
/// - `Failure` from a child stops the sequence and returns `Failure`
/// - `Running` from a child stops the sequence and returns `Running`
/// - `Success` moves on to the next child
/// - If all children succeed, the sequence returns `Success`
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Success => continue,
                other => return other,
            }
        }
        Status::Success
    }
}

/// Executes child behaviors in order until one does not fail.
///
/// # Semantics
///
/// - `Success` or `Running` from a child stops the selector and is returned
/// - `Failure` moves on to the next child
/// - If all children fail, the selector returns `Failure`
///
/// Children are listed in priority order, so a higher-priority branch that
/// becomes viable pre-empts a lower one that was running.
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            match child.tick(ctx) {
                Status::Failure => continue,
                other => return other,
            }
        }
        Status::Failure
    }
}

/// Executes the child with the highest utility score.
///
/// # Semantics
///
/// - Each child has an associated scoring function that returns a score (0-100)
/// - All scoring functions are evaluated before execution
/// - The child with the highest score is executed; ties go to the earlier option
/// - If all scores are 0, the selector returns `Failure`
pub struct UtilitySelector<C> {
    options: Vec<ScoredOption<C>>,
}

impl<C> UtilitySelector<C> {
    /// Creates a new utility selector with the given options.
    ///
    /// # Panics
    ///
    /// Panics if `options` is empty.
    pub fn new(options: Vec<ScoredOption<C>>) -> Self {
        assert!(
            !options.is_empty(),
            "UtilitySelector must have at least one option"
        );
        Self { options }
    }
}

impl<C> Behavior<C> for UtilitySelector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let mut best: Option<(usize, u32)> = None;
        for (index, (_, scorer)) in self.options.iter().enumerate() {
            let score = scorer(ctx);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, _)) => self.options[index].0.tick(ctx),
            // All options scored 0 (all impossible/undesirable)
            None => Status::Failure,
        }
    }
}
