//! Property tests for the readiness state machine.
//!
//! Whatever order the three readiness signals arrive in, and however often
//! each is repeated, `on_ready` runs exactly once and only after all three.

use proptest::prelude::*;
use trellis_controllers::{
    BoxError, Controller, LifecycleError, LifecycleState, Managed, Notification, ReadyContext,
    Toolkit, ViewRequest, ViewTarget,
};

struct Headless;

impl Toolkit for Headless {
    type Root = u32;
    type Scene = u32;
    type Stage = ();

    fn load_view(
        &self,
        _request: &ViewRequest<'_>,
        target: &mut dyn ViewTarget,
    ) -> Result<Option<u32>, BoxError> {
        target.view_loaded();
        Ok(Some(1))
    }

    fn create_scene(&self, root: &u32) -> u32 {
        *root
    }
}

#[derive(Default)]
struct Tracker {
    ready_calls: usize,
    root: Option<u32>,
}

impl Controller for Tracker {
    type Toolkit = Headless;

    fn create() -> Result<Self, BoxError> {
        Ok(Self::default())
    }

    fn view_path(&self) -> &str {
        "tracker"
    }

    fn is_cacheable(&self) -> bool {
        false
    }

    fn on_ready(&mut self, ctx: &ReadyContext<'_, Headless>) {
        self.ready_calls += 1;
        self.root = Some(*ctx.root());
    }
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    ViewLoaded,
    DependenciesResolved,
    Root(u32),
}

fn signal() -> impl Strategy<Value = Signal> {
    prop_oneof![
        Just(Signal::ViewLoaded),
        Just(Signal::DependenciesResolved),
        (1u32..100).prop_map(Signal::Root),
    ]
}

proptest! {
    #[test]
    fn test_on_ready_fires_exactly_once(signals in prop::collection::vec(signal(), 0..16)) {
        let mut managed = Managed::new(Tracker::default());
        let mut view = false;
        let mut deps = false;
        let mut first_root = None;

        for signal in signals {
            match signal {
                Signal::ViewLoaded => {
                    let expected = if view { Notification::AlreadyNotified } else { Notification::Accepted };
                    prop_assert_eq!(managed.notify_view_loaded(), expected);
                    view = true;
                }
                Signal::DependenciesResolved => {
                    let expected = if deps { Notification::AlreadyNotified } else { Notification::Accepted };
                    prop_assert_eq!(managed.notify_dependencies_resolved(), expected);
                    deps = true;
                }
                Signal::Root(id) => {
                    let result = managed.set_root(Some(id));
                    if first_root.is_some() {
                        prop_assert_eq!(result, Err(LifecycleError::RootAlreadyAssigned));
                    } else {
                        prop_assert!(result.is_ok());
                        first_root = Some(id);
                    }
                }
            }

            let complete = view && deps && first_root.is_some();
            prop_assert_eq!(managed.is_ready(), complete);
            prop_assert_eq!(managed.controller().ready_calls, usize::from(complete));
        }

        let complete = view && deps && first_root.is_some();
        if complete {
            prop_assert_eq!(managed.state(), LifecycleState::Ready);
            prop_assert_eq!(managed.controller().root, first_root);
        } else if !view && !deps && first_root.is_none() {
            prop_assert_eq!(managed.state(), LifecycleState::Created);
        } else {
            prop_assert_eq!(managed.state(), LifecycleState::AwaitingReadiness);
        }
    }
}
