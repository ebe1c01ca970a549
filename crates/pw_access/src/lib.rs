#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod coercer;
mod descriptor;
mod error;
mod options;
mod properties;
mod resolver;
mod step;
mod walker;

pub mod path;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use accessor::Resolved;
pub use coercer::{PropertyValue, ValueCoercer};
pub use descriptor::{DescriptorCache, PathDescriptor};
pub use error::{AccessError, AccessErrorKind, ApplyPropertiesError};
pub use options::AccessOptions;
pub use properties::PropertyAccess;
pub use resolver::{ElementType, unwrap_optional};
pub use step::{ContainerKind, ResolvedStep, StepKey};
pub use walker::WalkState;
