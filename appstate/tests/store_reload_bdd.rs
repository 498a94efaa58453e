//! Behaviour tests for store rehydration across application reloads.
//!
//! A reload disposes the current registry and builds a new one over the same
//! in-memory storage handle, mirroring a page refresh.

use std::cell::RefCell;
use std::sync::Arc;

use appstate::domain::ports::{FixtureAuthenticator, TracingThemeApplier};
use appstate::domain::{Theme, UseCase};
use appstate::outbound::storage::InMemoryStateStorage;
use appstate::store::{StoreRegistry, Stores};
use appstate::use_cases::{SignInRequest, SignInUseCase, SignOutUseCase};
use futures::executor::block_on;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct ReloadWorld {
    storage: InMemoryStateStorage,
    registry: RefCell<Option<StoreRegistry>>,
    stores: RefCell<Option<Stores>>,
    last_error: RefCell<Option<String>>,
}

impl ReloadWorld {
    fn new() -> Self {
        Self {
            storage: InMemoryStateStorage::new(),
            registry: RefCell::new(None),
            stores: RefCell::new(None),
            last_error: RefCell::new(None),
        }
    }

    fn boot(&self) {
        let registry = StoreRegistry::new(
            Arc::new(self.storage.clone()),
            Arc::new(TracingThemeApplier),
            "1.0.0",
        );
        let stores = registry.initialize().expect("registry should initialize");
        *self.stores.borrow_mut() = Some(stores);
        *self.registry.borrow_mut() = Some(registry);
    }

    fn reload(&self) {
        if let Some(registry) = self.registry.borrow_mut().take() {
            registry.dispose();
        }
        self.boot();
    }

    fn stores(&self) -> Stores {
        self.stores
            .borrow()
            .clone()
            .expect("registry should be initialised first")
    }
}

#[fixture]
fn world() -> ReloadWorld {
    ReloadWorld::new()
}

#[given("an initialised store registry")]
fn an_initialised_store_registry(world: &ReloadWorld) {
    world.boot();
}

#[when("the theme is toggled")]
fn the_theme_is_toggled(world: &ReloadWorld) {
    world.stores().ui().toggle_theme();
}

#[when("the loading flag is raised")]
fn the_loading_flag_is_raised(world: &ReloadWorld) {
    world.stores().ui().set_loading(true);
}

#[when("the application reloads")]
fn the_application_reloads(world: &ReloadWorld) {
    world.reload();
}

#[when("the user signs in as {username} with password {password}")]
fn the_user_signs_in(world: &ReloadWorld, username: String, password: String) {
    let use_case = SignInUseCase::new(Arc::new(FixtureAuthenticator), world.stores());
    let outcome = block_on(use_case.execute(SignInRequest { username, password }))
        .expect("fixture authenticator never fails");
    *world.last_error.borrow_mut() = outcome.error().map(str::to_owned);
}

#[when("the user signs out")]
fn the_user_signs_out(world: &ReloadWorld) {
    let outcome = block_on(SignOutUseCase::new(world.stores()).execute(()))
        .expect("sign-out never fails");
    assert!(outcome.is_success(), "sign-out should succeed");
}

#[then("the theme is dark")]
fn the_theme_is_dark(world: &ReloadWorld) {
    assert_eq!(world.stores().ui().theme(), Theme::Dark);
}

#[then("the loading flag is lowered")]
fn the_loading_flag_is_lowered(world: &ReloadWorld) {
    assert!(!world.stores().ui().loading());
}

#[then("the session is authenticated")]
fn the_session_is_authenticated(world: &ReloadWorld) {
    let stores = world.stores();
    assert!(stores.auth().is_authenticated());
    assert!(stores.auth().token().is_some());
}

#[then("the session is not authenticated")]
fn the_session_is_not_authenticated(world: &ReloadWorld) {
    let stores = world.stores();
    assert!(!stores.auth().is_authenticated());
    assert!(stores.auth().token().is_none());
}

#[then("no user profile is loaded")]
fn no_user_profile_is_loaded(world: &ReloadWorld) {
    assert!(world.stores().auth().user().is_none());
}

#[then("the last outcome failed with {message}")]
fn the_last_outcome_failed_with(world: &ReloadWorld, message: String) {
    assert_eq!(world.last_error.borrow().as_deref(), Some(message.as_str()));
}

#[scenario(path = "tests/features/store_reload.feature")]
fn store_reload_scenarios(world: ReloadWorld) {
    drop(world);
}
