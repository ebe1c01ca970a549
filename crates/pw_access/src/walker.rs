//! Walking a path over a live value.
//!
//! A walk moves through [`WalkState`]s, one per container it passes,
//! and ends at a leaf or in an error. Steps come from a [`StepSource`]:
//! either resolved on the fly against the runtime type of each value,
//! or taken from a compiled [`PathDescriptor`](crate::PathDescriptor).

use core::fmt;
use core::ops::Deref;

use pw_reflect::Reflect;
use pw_reflect::info::TypeInfo;

use crate::accessor::{self, Resolved};
use crate::coercer::{PropertyValue, ValueCoercer};
use crate::error::{AccessError, AccessErrorKind};
use crate::path::PathExpression;
use crate::step::{ContainerKind, ResolvedStep};

// -----------------------------------------------------------------------------
// WalkState

/// Where a walk currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkState {
    AtRoot,
    InRecord,
    InList,
    InSet,
    InMap,
    InArray,
    InProperties,
    AtLeaf,
    Error,
}

impl WalkState {
    /// The state while a step is applied to its container.
    fn applying(step: &ResolvedStep) -> Self {
        match step.kind {
            ContainerKind::Record => Self::InRecord,
            ContainerKind::OrderedList => Self::InList,
            ContainerKind::UnorderedSet => Self::InSet,
            ContainerKind::Mapping => Self::InMap,
            ContainerKind::Array => Self::InArray,
            ContainerKind::Properties => Self::InProperties,
            ContainerKind::PseudoLength => Self::AtLeaf,
        }
    }
}

impl fmt::Display for WalkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Tracks the state of one walk and traces its transitions.
struct Trace<'p> {
    path: &'p str,
    state: WalkState,
}

impl<'p> Trace<'p> {
    #[inline]
    fn new(path: &'p str) -> Self {
        Self {
            path,
            state: WalkState::AtRoot,
        }
    }

    fn enter(&mut self, next: WalkState, index: usize) {
        log::trace!("`{}` element {index}: {} -> {next}", self.path, self.state);
        self.state = next;
    }

    fn fail(&mut self, kind: AccessErrorKind, index: usize) -> AccessError {
        self.enter(WalkState::Error, index);
        AccessError::new(kind, self.path, Some(index))
    }
}

// -----------------------------------------------------------------------------
// StepSource

/// A step that is either shared or resolved for a single use.
pub(crate) enum StepRef<'a> {
    Borrowed(&'a ResolvedStep),
    Owned(ResolvedStep),
}

impl Deref for StepRef<'_> {
    type Target = ResolvedStep;

    #[inline]
    fn deref(&self) -> &ResolvedStep {
        match self {
            Self::Borrowed(step) => step,
            Self::Owned(step) => step,
        }
    }
}

/// Supplies the steps of a walk.
pub(crate) trait StepSource {
    fn path(&self) -> &str;

    /// Number of steps, zero for the root path.
    fn len(&self) -> usize;

    /// The step at `index`, applied to a value of type `container`.
    fn step(
        &self,
        index: usize,
        container: &'static TypeInfo,
    ) -> Result<StepRef<'_>, AccessErrorKind>;
}

/// Resolves each step against the runtime type of the current value.
pub(crate) struct DynamicSteps<'p, 'r> {
    pub expression: &'p PathExpression,
    pub coercer: &'p ValueCoercer<'r>,
}

impl StepSource for DynamicSteps<'_, '_> {
    #[inline]
    fn path(&self) -> &str {
        self.expression.source()
    }

    #[inline]
    fn len(&self) -> usize {
        if self.expression.is_root() {
            0
        } else {
            self.expression.len()
        }
    }

    fn step(
        &self,
        index: usize,
        container: &'static TypeInfo,
    ) -> Result<StepRef<'_>, AccessErrorKind> {
        let element = &self.expression.elements()[index].element;
        let is_last = index + 1 == self.len();
        ResolvedStep::resolve(element, container, self.coercer, is_last).map(StepRef::Owned)
    }
}

// -----------------------------------------------------------------------------
// Read

/// Reads the value a path addresses.
///
/// Returns `Ok(None)` when an element on the way is absent, names no
/// property of its value, or has a key that does not convert.
pub(crate) fn read<'a>(
    source: &impl StepSource,
    root: &'a dyn Reflect,
) -> Result<Option<Resolved<'a>>, AccessError> {
    let mut trace = Trace::new(source.path());
    let mut cursor = root;

    for index in 0..source.len() {
        let step = match source.step(index, cursor.reflect_type_info()) {
            Ok(step) => step,
            Err(
                kind @ (AccessErrorKind::PropertyNotFound { .. }
                | AccessErrorKind::TypeConversionFailure(_)),
            ) => {
                log::debug!("`{}` element {index} reads as absent: {kind}", source.path());
                return Ok(None);
            }
            Err(kind) => return Err(trace.fail(kind, index)),
        };
        trace.enter(WalkState::applying(&step), index);

        match accessor::read(&step, cursor) {
            Some(Resolved::Borrowed(next)) => cursor = next,
            Some(owned) => return Ok(Some(owned)),
            None => {
                log::trace!("`{}` element {index} is absent", source.path());
                return Ok(None);
            }
        }
    }

    trace.enter(WalkState::AtLeaf, source.len());
    Ok(Some(Resolved::Borrowed(cursor)))
}

// -----------------------------------------------------------------------------
// Write

/// Converts `value` and stores it at the end of a path, creating
/// missing intermediate values.
pub(crate) fn write(
    source: &impl StepSource,
    root: &mut dyn Reflect,
    value: &PropertyValue,
    coercer: &ValueCoercer<'_>,
) -> Result<(), AccessError> {
    if source.len() == 0 {
        log::debug!("ignoring assignment of `{value}` to the root value");
        return Ok(());
    }
    let mut trace = Trace::new(source.path());
    write_from(source, 0, root, value, coercer, &mut trace)
}

fn write_from(
    source: &impl StepSource,
    start: usize,
    container: &mut dyn Reflect,
    value: &PropertyValue,
    coercer: &ValueCoercer<'_>,
    trace: &mut Trace<'_>,
) -> Result<(), AccessError> {
    let len = source.len();
    let mut cursor = container;

    for index in start..len {
        let step = source
            .step(index, cursor.reflect_type_info())
            .map_err(|kind| trace.fail(kind, index))?;
        trace.enter(WalkState::applying(&step), index);

        if index + 1 == len {
            let converted = coercer
                .coerce_value(value, step.target)
                .map_err(|kind| trace.fail(kind, index))?;
            accessor::write(&step, cursor, converted, coercer)
                .map_err(|kind| trace.fail(kind, index))?;
            trace.enter(WalkState::AtLeaf, len);
            return Ok(());
        }

        if step.kind == ContainerKind::UnorderedSet {
            // Set members can not be borrowed mutably. Build the member
            // detached, then insert it.
            let mut member = coercer
                .create_missing(step.target)
                .map_err(|kind| trace.fail(kind, index))?;
            let inner = accessor::present_mut(&mut *member, coercer)
                .map_err(|kind| trace.fail(kind, index))?;
            write_from(source, index + 1, inner, value, coercer, trace)?;
            return accessor::write(&step, cursor, member, coercer)
                .map_err(|kind| trace.fail(kind, index));
        }

        cursor = accessor::descend_mut(&step, cursor, coercer)
            .map_err(|kind| trace.fail(kind, index))?;
    }

    Ok(())
}
