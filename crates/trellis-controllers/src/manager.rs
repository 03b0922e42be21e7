//! The controller manager.
//!
//! Building a [`ControllerManager`] does all the wiring up front:
//!
//! 1. the manifest is narrowed to the configured [`ScanScope`]
//! 2. every provider is validated and invoked into the [`DependencyMap`]
//! 3. every registered controller is constructed once, so construction and
//!    wiring errors surface at startup; cacheable instances are kept
//!
//! Construction of a single controller runs the same sequence every time:
//! create, bind the manager, load the view (the controller is the binding
//! target), bind the root, then fill the declared dependency slots. The
//! dependency notification that completes readiness is sent when the
//! controller is first handed out, not during startup.
//!
//! The manager is a cheap handle (`Clone` shares the same state). Controllers
//! keep a weak [`ManagerRef`] back to it.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::ManagerConfig;
use crate::controller::{Controller, ControllerRef, Managed};
use crate::dependencies::{DependencyMap, DependencySlots};
use crate::error::{ControllerError, ControllerResult, LifecycleError};
use crate::lifecycle::Notification;
use crate::manifest::Manifest;
use crate::toolkit::{Toolkit, ViewRequest};

struct ManagerInner<T: Toolkit> {
    toolkit: T,
    config: ManagerConfig<T>,
    dependencies: DependencyMap,
    controllers: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
    scenes: RefCell<HashMap<TypeId, T::Scene>>,
}

/// Builds, wires and caches controllers.
pub struct ControllerManager<T: Toolkit> {
    inner: Rc<ManagerInner<T>>,
}

impl<T: Toolkit> ControllerManager<T> {
    /// Builds the dependency map and constructs every registered controller.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Dependency`] for provider failures and the
    /// construction errors of the first controller that fails.
    pub fn new(toolkit: T, config: ManagerConfig<T>, manifest: Manifest<T>) -> ControllerResult<Self> {
        let (providers, registrations) = manifest.scoped(config.scan_scope());
        let dependencies = DependencyMap::build(&providers)?;

        let manager = Self {
            inner: Rc::new(ManagerInner {
                toolkit,
                config,
                dependencies,
                controllers: RefCell::new(HashMap::new()),
                scenes: RefCell::new(HashMap::new()),
            }),
        };

        for registration in &registrations {
            log::debug!("Constructing controller {}", registration.type_name);
            (registration.scan)(&manager)?;
        }

        log::debug!(
            "Controller manager ready: {} provider(s), {} controller(s), {} cached",
            manager.inner.dependencies.len(),
            registrations.len(),
            manager.inner.controllers.borrow().len()
        );
        Ok(manager)
    }

    /// Builds a new, uncached instance and completes its readiness.
    pub fn create_instance<C>(&self) -> ControllerResult<ControllerRef<C>>
    where
        C: Controller<Toolkit = T>,
    {
        let controller = Rc::new(RefCell::new(self.construct::<C>()?));
        resolve_dependencies(&controller)?;
        Ok(controller)
    }

    /// Returns the cached instance of `C`.
    ///
    /// `None` if `C` is not registered, outside the scan scope, or not
    /// cacheable. An instance that is not ready yet receives its dependency
    /// notification first.
    pub fn get_cached<C>(&self) -> ControllerResult<Option<ControllerRef<C>>>
    where
        C: Controller<Toolkit = T>,
    {
        let cached = self.inner.controllers.borrow().get(&TypeId::of::<C>()).cloned();
        let Some(controller) = cached.and_then(|any| any.downcast::<RefCell<Managed<C>>>().ok())
        else {
            return Ok(None);
        };

        let ready = controller
            .try_borrow()
            .map_err(|_| busy::<C>())?
            .is_ready();
        if !ready {
            resolve_dependencies(&controller)?;
        }
        Ok(Some(controller))
    }

    /// Returns the scene of the cached instance of `C`, creating it on first
    /// request.
    pub fn get_cached_scene<C>(&self) -> ControllerResult<Option<T::Scene>>
    where
        C: Controller<Toolkit = T>,
    {
        let type_id = TypeId::of::<C>();
        if let Some(scene) = self.inner.scenes.borrow().get(&type_id) {
            return Ok(Some(scene.clone()));
        }

        let Some(controller) = self.get_cached::<C>()? else {
            return Ok(None);
        };
        let scene = self.create_scene(&controller)?;
        self.inner
            .scenes
            .borrow_mut()
            .insert(type_id, scene.clone());
        Ok(Some(scene))
    }

    /// Wraps a controller's root into a new, uncached scene.
    pub fn create_scene<C>(&self, controller: &ControllerRef<C>) -> ControllerResult<T::Scene>
    where
        C: Controller<Toolkit = T>,
    {
        let managed = controller.try_borrow().map_err(|_| busy::<C>())?;
        let root = managed
            .root()
            .ok_or_else(|| ControllerError::lifecycle(type_name::<C>(), LifecycleError::MissingRootView))?;
        Ok(self.inner.toolkit.create_scene(root))
    }

    pub fn primary_stage(&self) -> &T::Stage {
        self.inner.config.primary_stage()
    }

    pub fn config(&self) -> &ManagerConfig<T> {
        &self.inner.config
    }

    pub fn toolkit(&self) -> &T {
        &self.inner.toolkit
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.inner.dependencies
    }

    /// Shortcut for `dependencies().get::<D>()`.
    pub fn dependency<D: 'static>(&self) -> Option<Rc<D>> {
        self.inner.dependencies.get::<D>()
    }

    /// Returns true if an instance of `C` is cached.
    pub fn is_cached<C: Controller<Toolkit = T>>(&self) -> bool {
        self.inner
            .controllers
            .borrow()
            .contains_key(&TypeId::of::<C>())
    }

    pub fn downgrade(&self) -> ManagerRef<T> {
        ManagerRef(Rc::downgrade(&self.inner))
    }

    pub(crate) fn scan_controller<C>(&self) -> ControllerResult<()>
    where
        C: Controller<Toolkit = T>,
    {
        let managed = self.construct::<C>()?;
        if managed.controller().is_cacheable() {
            let controller: Rc<dyn Any> = Rc::new(RefCell::new(managed));
            self.inner
                .controllers
                .borrow_mut()
                .insert(TypeId::of::<C>(), controller);
        }
        Ok(())
    }

    fn construct<C>(&self) -> ControllerResult<Managed<C>>
    where
        C: Controller<Toolkit = T>,
    {
        let name = type_name::<C>();

        let controller = C::create().map_err(|source| ControllerError::Construction {
            controller: name,
            source,
        })?;
        let mut managed = Managed::new(controller);

        managed.set_manager(self.downgrade()).map_err(|source| {
            log::error!("Manager bound twice to a fresh controller {}", name);
            ControllerError::lifecycle(name, source)
        })?;

        let view_path = managed.controller().view_path().to_string();
        let request = ViewRequest {
            view_path: &view_path,
            resources: self.inner.config.resources(),
        };
        let root = self
            .inner
            .toolkit
            .load_view(&request, &mut managed)
            .map_err(|source| ControllerError::ViewLoad {
                controller: name,
                view_path: view_path.clone(),
                source,
            })?;

        managed
            .set_root(root)
            .map_err(|source| ControllerError::lifecycle(name, source))?;

        self.inject(&mut managed)?;
        Ok(managed)
    }

    fn inject<C>(&self, managed: &mut Managed<C>) -> ControllerResult<()>
    where
        C: Controller<Toolkit = T>,
    {
        let name = type_name::<C>();
        let mut slots = DependencySlots::new();
        managed.controller_mut().declare_dependencies(&mut slots);

        for mut slot in slots {
            let entry = self
                .inner
                .dependencies
                .entry(slot.type_id())
                .ok_or(ControllerError::MissingDependency {
                    field: slot.field(),
                    type_name: slot.type_name(),
                    controller: name,
                })?;

            if !slot.assign(entry.value()) {
                return Err(ControllerError::DependencyAssignment {
                    field: slot.field(),
                    expected: slot.type_name(),
                    controller: name,
                });
            }
        }
        Ok(())
    }
}

fn resolve_dependencies<C: Controller>(controller: &ControllerRef<C>) -> ControllerResult<()> {
    let mut managed = controller.try_borrow_mut().map_err(|_| busy::<C>())?;
    match managed.notify_dependencies_resolved() {
        Notification::Accepted => Ok(()),
        Notification::AlreadyNotified => {
            log::error!(
                "Controller {} was already notified of its dependencies but is not ready",
                type_name::<C>()
            );
            Err(ControllerError::DependencyNotification {
                controller: type_name::<C>(),
            })
        }
    }
}

fn busy<C>() -> ControllerError {
    ControllerError::Busy {
        controller: type_name::<C>(),
    }
}

impl<T: Toolkit> Clone for ControllerManager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Toolkit> fmt::Debug for ControllerManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerManager")
            .field("config", &self.inner.config)
            .field("dependencies", &self.inner.dependencies)
            .field("cached_controllers", &self.inner.controllers.borrow().len())
            .field("cached_scenes", &self.inner.scenes.borrow().len())
            .finish()
    }
}

/// Weak handle to a [`ControllerManager`].
pub struct ManagerRef<T: Toolkit>(Weak<ManagerInner<T>>);

impl<T: Toolkit> ManagerRef<T> {
    /// A handle that never upgrades, for controllers built by hand.
    pub fn detached() -> Self {
        ManagerRef(Weak::new())
    }

    pub fn upgrade(&self) -> Option<ControllerManager<T>> {
        self.0.upgrade().map(|inner| ControllerManager { inner })
    }
}

impl<T: Toolkit> Clone for ManagerRef<T> {
    fn clone(&self) -> Self {
        ManagerRef(Weak::clone(&self.0))
    }
}

impl<T: Toolkit> fmt::Debug for ManagerRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ManagerRef")
            .field(&(self.0.strong_count() > 0))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ReadyContext;
    use crate::dependencies::Provider;
    use crate::error::{BoxError, DependencyError};
    use crate::lifecycle::LifecycleState;
    use crate::testing::{Blank, TestToolkit};
    use std::cell::Cell;

    fn build(manifest: Manifest<TestToolkit>) -> ControllerResult<ControllerManager<TestToolkit>> {
        ControllerManager::new(
            TestToolkit::default(),
            ManagerConfig::new("primary".to_string()),
            manifest,
        )
    }

    struct Greeting(String);

    #[derive(Default)]
    struct Home {
        greeting: Option<Rc<Greeting>>,
        ready_calls: usize,
    }

    impl Controller for Home {
        type Toolkit = TestToolkit;

        fn create() -> Result<Self, BoxError> {
            Ok(Self::default())
        }

        fn view_path(&self) -> &str {
            "home.view"
        }

        fn is_cacheable(&self) -> bool {
            true
        }

        fn declare_dependencies<'a>(&'a mut self, slots: &mut DependencySlots<'a>) {
            slots.slot("greeting", &mut self.greeting);
        }

        fn on_ready(&mut self, _ctx: &ReadyContext<'_, TestToolkit>) {
            self.ready_calls += 1;
        }
    }

    #[derive(Default)]
    struct Dialog {
        ready_calls: usize,
    }

    impl Controller for Dialog {
        type Toolkit = TestToolkit;

        fn create() -> Result<Self, BoxError> {
            Ok(Self::default())
        }

        fn view_path(&self) -> &str {
            "dialog.view"
        }

        fn is_cacheable(&self) -> bool {
            false
        }

        fn on_ready(&mut self, _ctx: &ReadyContext<'_, TestToolkit>) {
            self.ready_calls += 1;
        }
    }

    fn greeting() -> Greeting {
        Greeting("hello".into())
    }

    fn app() -> Manifest<TestToolkit> {
        Manifest::new()
            .provider(Provider::new(greeting))
            .controller::<Home>()
            .controller::<Dialog>()
    }

    #[test]
    fn test_scanned_controller_waits_for_first_request() {
        let manager = build(app()).unwrap();
        assert!(manager.is_cached::<Home>());

        let stored = manager.inner.controllers.borrow().get(&TypeId::of::<Home>()).cloned();
        let home = stored
            .unwrap()
            .downcast::<RefCell<Managed<Home>>>()
            .ok()
            .unwrap();
        assert_eq!(home.borrow().state(), LifecycleState::AwaitingReadiness);
        assert_eq!(home.borrow().controller().ready_calls, 0);
    }

    #[test]
    fn test_get_cached_is_reference_stable_and_ready() {
        let manager = build(app()).unwrap();

        let first = manager.get_cached::<Home>().unwrap().unwrap();
        let second = manager.get_cached::<Home>().unwrap().unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert!(first.borrow().is_ready());
        assert_eq!(first.borrow().controller().ready_calls, 1);
        assert_eq!(
            first.borrow().controller().greeting.as_ref().unwrap().0,
            "hello"
        );
    }

    #[test]
    fn test_non_cacheable_never_cached() {
        let manager = build(app()).unwrap();
        assert!(manager.get_cached::<Dialog>().unwrap().is_none());
        assert!(manager.get_cached_scene::<Dialog>().unwrap().is_none());
    }

    #[test]
    fn test_unregistered_not_cached() {
        let manager = build(app()).unwrap();
        assert!(manager.get_cached::<Blank>().unwrap().is_none());
    }

    #[test]
    fn test_create_instance_is_fresh_and_ready() {
        let manager = build(app()).unwrap();

        let a = manager.create_instance::<Dialog>().unwrap();
        let b = manager.create_instance::<Dialog>().unwrap();
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(a.borrow().controller().ready_calls, 1);

        let home = manager.create_instance::<Home>().unwrap();
        let cached = manager.get_cached::<Home>().unwrap().unwrap();
        assert!(!Rc::ptr_eq(&home, &cached));
    }

    #[test]
    fn test_scene_is_memoized() {
        let manager = build(app()).unwrap();

        let first = manager.get_cached_scene::<Home>().unwrap().unwrap();
        let second = manager.get_cached_scene::<Home>().unwrap().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.root.name(), "home.view");

        let fresh = manager
            .create_scene(&manager.get_cached::<Home>().unwrap().unwrap())
            .unwrap();
        assert!(!Rc::ptr_eq(&first, &fresh));
    }

    #[test]
    fn test_missing_dependency_names_field() {
        let manifest = Manifest::new().controller::<Home>();
        match build(manifest) {
            Err(ControllerError::MissingDependency {
                field, controller, ..
            }) => {
                assert_eq!(field, "greeting");
                assert!(controller.ends_with("Home"));
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_duplicate_provider_fails_construction() {
        let manifest = app().provider(Provider::new(|| Greeting("again".into())));
        assert!(matches!(
            build(manifest),
            Err(ControllerError::Dependency(
                DependencyError::DuplicateProvider { .. }
            ))
        ));
    }

    #[test]
    fn test_absent_provider_value_injected_as_none() {
        let manifest = Manifest::new()
            .provider(Provider::optional(|| None::<Greeting>))
            .controller::<Home>();
        let manager = build(manifest).unwrap();

        let home = manager.get_cached::<Home>().unwrap().unwrap();
        assert!(home.borrow().controller().greeting.is_none());
        assert!(home.borrow().is_ready());
    }

    #[test]
    fn test_primary_stage() {
        let manager = build(app()).unwrap();
        assert_eq!(manager.primary_stage(), "primary");
    }

    #[test]
    fn test_resources_reach_loader() {
        let toolkit = TestToolkit::default();
        let seen = toolkit.seen_resources.clone();
        let config = ManagerConfig::new("primary".to_string())
            .with_resources(crate::ResourceBundle::new().with("title", "Hi"));

        ControllerManager::new(toolkit, config, Manifest::new().controller::<Blank>()).unwrap();
        assert_eq!(seen.get(), 1);
    }

    struct SelfSeeking {
        result: Rc<Cell<Option<bool>>>,
    }

    thread_local! {
        static BUSY_SEEN: Rc<Cell<Option<bool>>> = Rc::new(Cell::new(None));
    }

    impl Controller for SelfSeeking {
        type Toolkit = TestToolkit;

        fn create() -> Result<Self, BoxError> {
            Ok(Self {
                result: BUSY_SEEN.with(Rc::clone),
            })
        }

        fn view_path(&self) -> &str {
            "self.view"
        }

        fn is_cacheable(&self) -> bool {
            true
        }

        fn on_ready(&mut self, ctx: &ReadyContext<'_, TestToolkit>) {
            let manager = ctx.manager().unwrap();
            let busy = matches!(
                manager.get_cached::<SelfSeeking>(),
                Err(ControllerError::Busy { .. })
            );
            self.result.set(Some(busy));
        }
    }

    #[test]
    fn test_reentrant_request_reports_busy() {
        let manager = build(Manifest::new().controller::<SelfSeeking>()).unwrap();
        manager.get_cached::<SelfSeeking>().unwrap().unwrap();
        assert_eq!(BUSY_SEEN.with(|seen| seen.get()), Some(true));
    }

    #[test]
    fn test_view_load_failure() {
        struct Broken;

        impl Controller for Broken {
            type Toolkit = TestToolkit;

            fn create() -> Result<Self, BoxError> {
                Ok(Broken)
            }

            fn view_path(&self) -> &str {
                "missing.view"
            }

            fn is_cacheable(&self) -> bool {
                true
            }

            fn on_ready(&mut self, _ctx: &ReadyContext<'_, TestToolkit>) {}
        }

        match build(Manifest::new().controller::<Broken>()) {
            Err(ControllerError::ViewLoad { view_path, .. }) => assert_eq!(view_path, "missing.view"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_construction_failure() {
        struct Failing;

        impl Controller for Failing {
            type Toolkit = TestToolkit;

            fn create() -> Result<Self, BoxError> {
                Err("no display".into())
            }

            fn view_path(&self) -> &str {
                "failing.view"
            }

            fn is_cacheable(&self) -> bool {
                false
            }

            fn on_ready(&mut self, _ctx: &ReadyContext<'_, TestToolkit>) {}
        }

        let manager = build(Manifest::new()).unwrap();
        assert!(matches!(
            manager.create_instance::<Failing>(),
            Err(ControllerError::Construction { .. })
        ));
    }

    #[test]
    fn test_empty_root_rejected() {
        struct Rootless;

        impl Controller for Rootless {
            type Toolkit = TestToolkit;

            fn create() -> Result<Self, BoxError> {
                Ok(Rootless)
            }

            fn view_path(&self) -> &str {
                "empty.view"
            }

            fn is_cacheable(&self) -> bool {
                false
            }

            fn on_ready(&mut self, _ctx: &ReadyContext<'_, TestToolkit>) {}
        }

        let manager = build(Manifest::new()).unwrap();
        assert!(matches!(
            manager.create_instance::<Rootless>(),
            Err(ControllerError::Lifecycle {
                source: LifecycleError::MissingRootView,
                ..
            })
        ));
    }

    #[test]
    fn test_manager_ref_is_weak() {
        let manager = build(app()).unwrap();
        let weak = manager.downgrade();
        assert!(weak.upgrade().is_some());

        let home = manager.get_cached::<Home>().unwrap().unwrap();
        drop(manager);
        assert!(weak.upgrade().is_none());
        assert!(home.borrow().manager().is_none());
    }
}
