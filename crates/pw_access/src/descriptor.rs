//! Compiled paths and their cache.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock};

use pw_reflect::Reflect;
use pw_reflect::info::TypeInfo;
use pw_utils::TypeIdMap;
use pw_utils::hash::HashMap;

use crate::accessor::Resolved;
use crate::coercer::{PropertyValue, ValueCoercer};
use crate::error::{AccessError, AccessErrorKind};
use crate::path::PathExpression;
use crate::properties::PropertyAccess;
use crate::resolver::ElementType;
use crate::step::ResolvedStep;
use crate::walker::{self, StepRef, StepSource};

// -----------------------------------------------------------------------------
// PathDescriptor

/// A path resolved once against a root type.
///
/// Field lookups, index parsing and key conversion happen at compile
/// time. Applying the descriptor only walks the value.
///
/// Compilation fails where the runtime walk could only decide with a
/// live value, e.g. when navigating through elements of a container
/// that declares no element type.
#[derive(Debug)]
pub struct PathDescriptor {
    root: &'static TypeInfo,
    expression: PathExpression,
    steps: Box<[ResolvedStep]>,
}

impl PathDescriptor {
    pub(crate) fn compile(
        root: &'static TypeInfo,
        path: &str,
        coercer: &ValueCoercer<'_>,
    ) -> Result<Self, AccessError> {
        let expression = PathExpression::parse(path).map_err(AccessError::parse)?;
        let elements = if expression.is_root() {
            &[][..]
        } else {
            expression.elements()
        };

        let mut steps = Vec::with_capacity(elements.len());
        let mut cursor = root;
        for (index, element) in elements.iter().enumerate() {
            let is_last = index + 1 == elements.len();
            let fail = |kind: AccessErrorKind| AccessError::new(kind, path, Some(index));

            let step = ResolvedStep::resolve(&element.element, cursor, coercer, is_last)
                .map_err(fail)?;
            match step.target {
                ElementType::Typed(info) => cursor = info,
                ElementType::Raw if !is_last => {
                    return Err(fail(AccessErrorKind::unsupported(
                        step.kind,
                        step.container.type_path(),
                        "navigating through untyped elements",
                    )));
                }
                ElementType::Raw => {}
            }
            steps.push(step);
        }

        log::debug!(
            "compiled `{path}` for `{}` into {} steps",
            root.type_path(),
            steps.len()
        );
        Ok(Self {
            root,
            expression,
            steps: steps.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn root(&self) -> &'static TypeInfo {
        self.root
    }

    #[inline]
    pub fn path(&self) -> &str {
        self.expression.source()
    }

    #[inline]
    pub fn steps(&self) -> &[ResolvedStep] {
        &self.steps
    }

    fn check_root(&self, value: &dyn Reflect) -> Result<(), AccessError> {
        if value.ty_id() == self.root.ty_id() {
            return Ok(());
        }
        Err(AccessError::new(
            AccessErrorKind::MismatchedRoot {
                expected: self.root.type_path(),
                actual: value.reflect_type_path(),
            },
            self.path(),
            None,
        ))
    }

    /// Reads the addressed value of `root`, see
    /// [`PropertyAccess::get_property`].
    pub fn read<'a>(&self, root: &'a dyn Reflect) -> Result<Option<Resolved<'a>>, AccessError> {
        self.check_root(root)?;
        walker::read(self, root)
    }

    /// Assigns `value` to the addressed property of `root`, see
    /// [`PropertyAccess::set_property`].
    pub fn write(
        &self,
        access: &PropertyAccess<'_>,
        root: &mut dyn Reflect,
        value: impl Into<PropertyValue>,
    ) -> Result<(), AccessError> {
        self.check_root(root)?;
        walker::write(self, root, &value.into(), access.coercer())
    }
}

impl StepSource for PathDescriptor {
    #[inline]
    fn path(&self) -> &str {
        self.expression.source()
    }

    #[inline]
    fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    fn step(&self, index: usize, _: &'static TypeInfo) -> Result<StepRef<'_>, AccessErrorKind> {
        Ok(StepRef::Borrowed(&self.steps[index]))
    }
}

// -----------------------------------------------------------------------------
// DescriptorCache

type PathMap = HashMap<Box<str>, Arc<PathDescriptor>>;

/// Compiled descriptors by root type and path.
///
/// Compilation runs outside the lock. When two threads compile the same
/// path, the first inserted descriptor is kept and returned to both.
///
/// ```
/// use pw_access::{DescriptorCache, PropertyAccess};
/// use pw_reflect::info::Typed;
/// use pw_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
/// let access = PropertyAccess::new(&registry);
/// let cache = DescriptorCache::new();
///
/// let a = cache.get_or_compile(&access, Vec::<u8>::type_info(), "[0]").unwrap();
/// let b = cache.get_or_compile(&access, Vec::<u8>::type_info(), "[0]").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: RwLock<TypeIdMap<PathMap>>,
}

impl DescriptorCache {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(TypeIdMap::new()),
        }
    }

    fn lookup(&self, root: TypeId, path: &str) -> Option<Arc<PathDescriptor>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&root)?.get(path).cloned()
    }

    /// Returns the cached descriptor or compiles a new one.
    ///
    /// Entries are keyed by root type and path only. Options such as
    /// [`AccessOptions::strict_generics`](crate::AccessOptions::strict_generics)
    /// shape compilation, so a cache should serve a single
    /// [`PropertyAccess`] configuration. Failed compilations are not cached.
    pub fn get_or_compile(
        &self,
        access: &PropertyAccess<'_>,
        root: &'static TypeInfo,
        path: &str,
    ) -> Result<Arc<PathDescriptor>, AccessError> {
        if let Some(found) = self.lookup(root.ty_id(), path) {
            return Ok(found);
        }

        let compiled = Arc::new(access.compile(root, path)?);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let paths = entries.get_or_insert(root.ty_id(), PathMap::default);
        Ok(Arc::clone(paths.entry(path.into()).or_insert(compiled)))
    }

    /// Number of cached descriptors over all root types.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.values().map(|paths| paths.len()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use alloc::collections::BTreeMap;

    use pw_reflect::impl_record;
    use pw_reflect::info::Typed;
    use pw_reflect::ops::DynamicList;
    use pw_reflect::registry::TypeRegistry;

    use super::DescriptorCache;
    use crate::step::ContainerKind;
    use crate::{AccessErrorKind, PropertyAccess};

    #[derive(Debug, Default, PartialEq)]
    struct Port {
        number: u16,
    }

    impl_record! {
        #[reflect(default)]
        Port { number: u16 }
    }

    #[derive(Default)]
    struct Node {
        ports: Vec<Port>,
        labels: Option<BTreeMap<String, String>>,
        extra: DynamicList,
    }

    impl_record! {
        #[reflect(default)]
        Node {
            ports: Vec<Port>,
            labels: Option<BTreeMap<String, String>>,
            extra: DynamicList,
        }
    }

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register::<Node>();
        registry
    }

    #[test]
    fn compiled_steps() {
        let registry = registry();
        let access = PropertyAccess::new(&registry);

        let descriptor = access.compile_for::<Node>("ports[2].number").unwrap();
        let kinds: Vec<_> = descriptor.steps().iter().map(|step| step.kind).collect();
        assert_eq!(
            kinds,
            [ContainerKind::Record, ContainerKind::OrderedList, ContainerKind::Record]
        );
        assert!(descriptor.root().type_is::<Node>());
        assert_eq!(descriptor.path(), "ports[2].number");

        let root = access.compile_for::<Node>("").unwrap();
        assert!(root.steps().is_empty());
    }

    #[test]
    fn compiled_read_and_write() {
        let registry = registry();
        let access = PropertyAccess::new(&registry);
        let mut node = Node::default();

        let port = access.compile_for::<Node>("ports[1].number").unwrap();
        port.write(&access, &mut node, "443").unwrap();
        port.write(&access, &mut node, "8443").unwrap();
        assert_eq!(node.ports, [Port::default(), Port { number: 8443 }]);

        let found = port.read(&node).unwrap().unwrap();
        assert_eq!(found.downcast_ref::<u16>(), Some(&8443));

        let label = access.compile_for::<Node>("labels[zone]").unwrap();
        assert!(label.read(&node).unwrap().is_none());
        label.write(&access, &mut node, "eu").unwrap();
        assert_eq!(
            node.labels.as_ref().and_then(|labels| labels.get("zone")).map(String::as_str),
            Some("eu")
        );
    }

    #[test]
    fn compile_errors() {
        let registry = registry();
        let access = PropertyAccess::new(&registry);

        let err = access.compile_for::<Node>("ports[0].name").unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::PropertyNotFound { .. }));
        assert_eq!(err.step(), Some(2));

        let err = access.compile_for::<Node>("ports[").unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::MalformedPath(_)));

        assert!(access.compile_for::<Node>("extra[0]").is_ok());
        let err = access.compile_for::<Node>("extra[0].x").unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::UnsupportedContainerOperation { .. }));
    }

    #[test]
    fn mismatched_root() {
        let registry = registry();
        let access = PropertyAccess::new(&registry);
        let descriptor = access.compile_for::<Node>("ports.length").unwrap();

        let mut port = Port::default();
        let err = descriptor.read(&port).unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::MismatchedRoot { .. }));
        let err = descriptor.write(&access, &mut port, "1").unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::MismatchedRoot { .. }));

        let node = Node::default();
        let len = descriptor.read(&node).unwrap().unwrap();
        assert_eq!(len.downcast_ref::<usize>(), Some(&0));
    }

    #[test]
    fn cache_shares_descriptors() {
        let registry = registry();
        let access = PropertyAccess::new(&registry);
        let cache = DescriptorCache::new();
        assert!(cache.is_empty());

        let a = cache.get_or_compile(&access, Node::type_info(), "ports[0].number").unwrap();
        let b = cache.get_or_compile(&access, Node::type_info(), "ports[0].number").unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        cache.get_or_compile(&access, Port::type_info(), "number").unwrap();
        assert!(cache.get_or_compile(&access, Port::type_info(), "name").is_err());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        let c = cache.get_or_compile(&access, Node::type_info(), "ports[0].number").unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn cache_is_shared_across_threads() {
        let registry = registry();
        let access = PropertyAccess::new(&registry);
        let cache = DescriptorCache::new();

        let compiled: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        cache
                            .get_or_compile(&access, Node::type_info(), "labels[a]")
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), 1);
        assert!(compiled.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    }
}
