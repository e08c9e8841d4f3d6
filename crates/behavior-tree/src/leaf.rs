//! Closure-backed leaf nodes.

use std::fmt;
use std::marker::PhantomData;

use crate::{Behavior, Status};

/// Succeeds when the predicate holds, fails otherwise.
pub struct Condition<C, F> {
    name: &'static str,
    predicate: F,
    _ctx: PhantomData<fn(&C)>,
}

impl<C, F> Condition<C, F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    pub fn new(name: &'static str, predicate: F) -> Self {
        Self {
            name,
            predicate,
            _ctx: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C, F> Behavior<C> for Condition<C, F>
where
    F: Fn(&C) -> bool + Send + Sync,
{
    fn tick(&self, ctx: &mut C) -> Status {
        (self.predicate)(ctx).into()
    }
}

impl<C, F> fmt::Debug for Condition<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Condition").field(&self.name).finish()
    }
}

/// Runs a closure against the context and returns its status.
pub struct Action<C, F> {
    name: &'static str,
    run: F,
    _ctx: PhantomData<fn(&mut C)>,
}

impl<C, F> Action<C, F>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    pub fn new(name: &'static str, run: F) -> Self {
        Self {
            name,
            run,
            _ctx: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<C, F> Behavior<C> for Action<C, F>
where
    F: Fn(&mut C) -> Status + Send + Sync,
{
    fn tick(&self, ctx: &mut C) -> Status {
        (self.run)(ctx)
    }
}

impl<C, F> fmt::Debug for Action<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&self.name).finish()
    }
}
