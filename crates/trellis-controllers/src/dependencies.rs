//! Dependency providers, the dependency map and consumer slots.
//!
//! # Providers
//!
//! A [`Provider`] wraps a zero-argument factory. Its return type is the key
//! the value is injected under; every provider runs exactly once, when the
//! [`ControllerManager`](crate::ControllerManager) is built, and the value is
//! shared by every controller that asks for it.
//!
//! ```rust
//! use std::cell::RefCell;
//! use trellis_controllers::{DependencyMap, Provider};
//!
//! struct Database { url: String }
//! struct Session { user: RefCell<Option<String>> }
//!
//! let map = DependencyMap::build(&[
//!     Provider::new(|| Database { url: "sqlite://app.db".into() }),
//!     Provider::new(|| Session { user: RefCell::new(None) }),
//! ]).unwrap();
//!
//! assert_eq!(map.get::<Database>().unwrap().url, "sqlite://app.db");
//! ```
//!
//! Values are stored as `Rc<T>`. Wrap the provided value in a `RefCell` when
//! controllers need to mutate it.
//!
//! # Consumers
//!
//! Controllers declare what they need through [`DependencySlots`]; the manager
//! looks every slot up by exact type and fills it.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{BoxError, DependencyError};

type FactoryResult = Result<Option<Rc<dyn Any>>, BoxError>;
type Factory = Box<dyn Fn() -> FactoryResult>;

/// Declared visibility of a provider function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Restricted,
}

/// Whether a provider function needs a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Receiver {
    #[default]
    Static,
    Instance,
}

/// The declared shape of a provider function.
///
/// Closures built with [`Provider::new`] are always public, static and
/// zero-argument. Generated manifests describe the functions they reference
/// with [`Provider::with_signature`], and only that shape is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProviderSignature {
    pub visibility: Visibility,
    pub receiver: Receiver,
    pub arity: usize,
}

/// A zero-argument factory for one injectable value.
pub struct Provider {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    signature: ProviderSignature,
    factory: Factory,
}

impl Provider {
    /// Creates a provider from an infallible factory.
    pub fn new<T, F>(factory: F) -> Self
    where
        T: 'static,
        F: Fn() -> T + 'static,
    {
        Self::from_factory::<T, F>(Box::new(move || -> FactoryResult {
            Ok(Some(Rc::new(factory()) as Rc<dyn Any>))
        }))
    }

    /// Creates a provider whose factory may produce no value.
    ///
    /// An absent value is still registered: slots for `T` are filled with
    /// `None`.
    pub fn optional<T, F>(factory: F) -> Self
    where
        T: 'static,
        F: Fn() -> Option<T> + 'static,
    {
        Self::from_factory::<T, F>(Box::new(move || -> FactoryResult {
            Ok(factory().map(|value| Rc::new(value) as Rc<dyn Any>))
        }))
    }

    /// Creates a provider from a fallible factory.
    pub fn fallible<T, E, F>(factory: F) -> Self
    where
        T: 'static,
        E: Into<BoxError>,
        F: Fn() -> Result<T, E> + 'static,
    {
        Self::from_factory::<T, F>(Box::new(move || -> FactoryResult {
            factory()
                .map(|value| Some(Rc::new(value) as Rc<dyn Any>))
                .map_err(Into::into)
        }))
    }

    fn from_factory<T: 'static, F>(factory: Factory) -> Self {
        Self {
            name: type_name::<F>().to_string(),
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            signature: ProviderSignature::default(),
            factory,
        }
    }

    /// Replaces the provider's name, used for scoping and error messages.
    ///
    /// Defaults to the factory's Rust path.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the declared signature of the function behind this provider.
    pub fn with_signature(mut self, signature: ProviderSignature) -> Self {
        self.signature = signature;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Name of the provided type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn signature(&self) -> ProviderSignature {
        self.signature
    }

    fn validate(&self) -> Result<(), DependencyError> {
        if self.signature.visibility != Visibility::Public {
            return Err(DependencyError::NotPublic {
                provider: self.name.clone(),
            });
        }
        if self.signature.receiver != Receiver::Static {
            return Err(DependencyError::NotStatic {
                provider: self.name.clone(),
            });
        }
        if self.signature.arity != 0 {
            return Err(DependencyError::HasParameters {
                provider: self.name.clone(),
                arity: self.signature.arity,
            });
        }
        Ok(())
    }

    fn invoke(&self) -> Result<Option<Rc<dyn Any>>, DependencyError> {
        (self.factory)().map_err(|source| DependencyError::Invocation {
            provider: self.name.clone(),
            source,
        })
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// One resolved dependency.
pub struct DependencyEntry {
    value: Option<Rc<dyn Any>>,
    provider: String,
    type_name: &'static str,
}

impl DependencyEntry {
    /// The provided value; `None` if the provider produced nothing.
    pub fn value(&self) -> Option<&Rc<dyn Any>> {
        self.value.as_ref()
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// Provided values keyed by type. Immutable once built.
#[derive(Default)]
pub struct DependencyMap {
    entries: HashMap<TypeId, DependencyEntry>,
}

impl DependencyMap {
    /// Validates and invokes every provider.
    ///
    /// # Errors
    ///
    /// Fails on the first provider with an invalid signature, the first
    /// failing factory, or the first type provided twice.
    pub fn build(providers: &[Provider]) -> Result<Self, DependencyError> {
        let mut entries: HashMap<TypeId, DependencyEntry> = HashMap::new();

        for provider in providers {
            provider.validate()?;
            if let Some(existing) = entries.get(&provider.type_id) {
                return Err(DependencyError::DuplicateProvider {
                    type_name: provider.type_name,
                    first: existing.provider.clone(),
                    second: provider.name.clone(),
                });
            }

            let value = provider.invoke()?;
            if value.is_none() {
                log::warn!(
                    "Provider \"{}\" returned no instance for {}; consumers receive None",
                    provider.name,
                    provider.type_name
                );
            }

            entries.insert(
                provider.type_id,
                DependencyEntry {
                    value,
                    provider: provider.name.clone(),
                    type_name: provider.type_name,
                },
            );
        }

        log::debug!("Resolved {} dependency provider(s)", entries.len());
        Ok(Self { entries })
    }

    /// Returns the value provided for `T`.
    ///
    /// `None` both when `T` has no provider and when its provider produced
    /// nothing; use [`contains`](Self::contains) to tell them apart.
    pub fn get<T: 'static>(&self) -> Option<Rc<T>> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.value.clone())
            .and_then(|value| value.downcast::<T>().ok())
    }

    pub fn entry(&self, type_id: TypeId) -> Option<&DependencyEntry> {
        self.entries.get(&type_id)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for DependencyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&str> = self.entries.values().map(|e| e.type_name).collect();
        types.sort_unstable();
        f.debug_struct("DependencyMap")
            .field("types", &types)
            .finish()
    }
}

type Assign<'a> = Box<dyn FnMut(Option<&Rc<dyn Any>>) -> bool + 'a>;

/// A declared dependency of a controller.
pub struct Slot<'a> {
    field: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    assign: Assign<'a>,
}

impl<'a> Slot<'a> {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Stores a provided value into the slot.
    ///
    /// Returns false if the value is not of the slot's type.
    pub fn assign(&mut self, value: Option<&Rc<dyn Any>>) -> bool {
        (self.assign)(value)
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("field", &self.field)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// The ordered list of slots a controller declares.
#[derive(Default)]
pub struct DependencySlots<'a> {
    slots: Vec<Slot<'a>>,
}

impl<'a> DependencySlots<'a> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Declares a slot filled with the value provided for `T`.
    pub fn slot<T: 'static>(&mut self, field: &'static str, target: &'a mut Option<Rc<T>>) {
        self.slots.push(Slot {
            field,
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            assign: Box::new(move |value| match value {
                None => {
                    *target = None;
                    true
                }
                Some(value) => match Rc::clone(value).downcast::<T>() {
                    Ok(value) => {
                        *target = Some(value);
                        true
                    }
                    Err(_) => false,
                },
            }),
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|slot| slot.field)
    }
}

impl<'a> IntoIterator for DependencySlots<'a> {
    type Item = Slot<'a>;
    type IntoIter = std::vec::IntoIter<Slot<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter()
    }
}

impl fmt::Debug for DependencySlots<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.slots.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    struct Config {
        name: &'static str,
    }

    struct Counter(RefCell<u32>);

    fn config_provider() -> Config {
        Config { name: "app" }
    }

    #[test]
    fn test_build_and_get() {
        let map = DependencyMap::build(&[
            Provider::new(config_provider),
            Provider::new(|| Counter(RefCell::new(0))),
        ])
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get::<Config>().unwrap().name, "app");
        assert!(map.contains::<Counter>());
        assert!(map.get::<String>().is_none());
    }

    #[test]
    fn test_values_are_shared() {
        let map = DependencyMap::build(&[Provider::new(|| Counter(RefCell::new(0)))]).unwrap();
        let a = map.get::<Counter>().unwrap();
        let b = map.get::<Counter>().unwrap();

        *a.0.borrow_mut() += 1;
        assert_eq!(*b.0.borrow(), 1);
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_provider_name_is_rust_path() {
        let provider = Provider::new(config_provider);
        assert!(provider.name().ends_with("config_provider"));
        assert!(provider.type_name().ends_with("Config"));
    }

    #[test]
    fn test_duplicate_provider_fails() {
        let result = DependencyMap::build(&[
            Provider::new(config_provider).named("first"),
            Provider::new(|| Config { name: "other" }).named("second"),
        ]);

        match result {
            Err(DependencyError::DuplicateProvider { first, second, .. }) => {
                assert_eq!(first, "first");
                assert_eq!(second, "second");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_signature_checked_before_duplicates() {
        let restricted = || {
            Provider::new(config_provider).with_signature(ProviderSignature {
                visibility: Visibility::Restricted,
                ..Default::default()
            })
        };
        assert!(matches!(
            DependencyMap::build(&[restricted(), restricted()]),
            Err(DependencyError::NotPublic { .. })
        ));

        let arity = Provider::new(|| Config { name: "late" }).with_signature(ProviderSignature {
            arity: 1,
            ..Default::default()
        });
        assert!(matches!(
            DependencyMap::build(&[Provider::new(config_provider), arity]),
            Err(DependencyError::HasParameters { arity: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_signatures_rejected() {
        let restricted = Provider::new(config_provider).with_signature(ProviderSignature {
            visibility: Visibility::Restricted,
            ..Default::default()
        });
        assert!(matches!(
            DependencyMap::build(&[restricted]),
            Err(DependencyError::NotPublic { .. })
        ));

        let instance = Provider::new(config_provider).with_signature(ProviderSignature {
            receiver: Receiver::Instance,
            ..Default::default()
        });
        assert!(matches!(
            DependencyMap::build(&[instance]),
            Err(DependencyError::NotStatic { .. })
        ));

        let arity = Provider::new(config_provider).with_signature(ProviderSignature {
            arity: 2,
            ..Default::default()
        });
        assert!(matches!(
            DependencyMap::build(&[arity]),
            Err(DependencyError::HasParameters { arity: 2, .. })
        ));
    }

    #[test]
    fn test_fallible_provider_error() {
        let provider = Provider::fallible(|| -> Result<Config, String> { Err("offline".into()) });
        match DependencyMap::build(&[provider]) {
            Err(DependencyError::Invocation { source, .. }) => {
                assert_eq!(source.to_string(), "offline")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_optional_provider_registers_absent_value() {
        let map = DependencyMap::build(&[Provider::optional(|| None::<Config>)]).unwrap();
        assert!(map.contains::<Config>());
        assert!(map.get::<Config>().is_none());
        assert!(map
            .entry(TypeId::of::<Config>())
            .unwrap()
            .value()
            .is_none());
    }

    #[test]
    fn test_slots_assign_by_type() {
        let map = DependencyMap::build(&[Provider::new(config_provider)]).unwrap();
        let mut config: Option<Rc<Config>> = None;

        {
            let mut slots = DependencySlots::new();
            slots.slot("config", &mut config);
            assert_eq!(slots.fields().collect::<Vec<_>>(), vec!["config"]);

            for mut slot in slots {
                let entry = map.entry(slot.type_id()).unwrap();
                assert!(slot.assign(entry.value()));
            }
        }

        assert_eq!(config.unwrap().name, "app");
    }

    #[test]
    fn test_slot_rejects_wrong_type() {
        let mut config: Option<Rc<Config>> = None;
        let wrong: Rc<dyn Any> = Rc::new(42u8);

        let mut slots = DependencySlots::new();
        slots.slot("config", &mut config);
        let mut slot = slots.into_iter().next().unwrap();
        assert!(!slot.assign(Some(&wrong)));
    }

    #[test]
    fn test_slot_accepts_absent_value() {
        let mut config = Some(Rc::new(Config { name: "stale" }));
        {
            let mut slots = DependencySlots::new();
            slots.slot("config", &mut config);
            let mut slot = slots.into_iter().next().unwrap();
            assert!(slot.assign(None));
        }
        assert!(config.is_none());
    }
}
