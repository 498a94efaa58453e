//! UI preferences store module.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ports::{StateStorage, ThemeApplier};
use crate::domain::{Error, Theme};

use super::slice::{ModulePhase, ModuleState, StoreSlice};

/// Observable UI state.
///
/// `theme` and `sidebarCollapsed` are persisted; `loading` always starts
/// `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Active colour scheme.
    pub theme: Theme,
    /// Whether the navigation sidebar is collapsed.
    pub sidebar_collapsed: bool,
    /// Whether a blocking operation is in progress.
    pub loading: bool,
}

impl ModuleState for UiState {
    const MODULE: &'static str = "ui";
    const PERSISTED: &'static [&'static str] = &["theme", "sidebarCollapsed"];
}

/// Store module owning [`UiState`].
pub struct UiStore {
    slice: StoreSlice<UiState>,
    theme_applier: Arc<dyn ThemeApplier>,
}

impl UiStore {
    pub(crate) fn hydrate(
        storage: Arc<dyn StateStorage>,
        theme_applier: Arc<dyn ThemeApplier>,
    ) -> Result<Self, Error> {
        Ok(Self {
            slice: StoreSlice::hydrate(UiState::default(), storage)?,
            theme_applier,
        })
    }

    /// Apply the rehydrated theme and activate the module.
    pub(crate) fn initialize(&self) -> Result<(), Error> {
        let theme = self.theme();
        self.theme_applier.apply(theme);
        self.slice.activate()?;
        info!(theme = %theme, "ui store initialized");
        Ok(())
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let applier = &self.theme_applier;
        self.slice.mutate("toggle_theme", |state| {
            state.theme = state.theme.toggled();
            applier.apply(state.theme);
            state.theme
        })
    }

    /// Select a theme explicitly.
    pub fn set_theme(&self, theme: Theme) {
        let applier = &self.theme_applier;
        self.slice.mutate("set_theme", |state| {
            state.theme = theme;
            applier.apply(theme);
        });
    }

    /// Flip the sidebar, returning the new collapsed flag.
    pub fn toggle_sidebar(&self) -> bool {
        self.slice.mutate("toggle_sidebar", |state| {
            state.sidebar_collapsed = !state.sidebar_collapsed;
            state.sidebar_collapsed
        })
    }

    /// Set the loading indicator.
    pub fn set_loading(&self, loading: bool) {
        self.slice.mutate("set_loading", |state| state.loading = loading);
    }

    /// Active colour scheme.
    pub fn theme(&self) -> Theme {
        self.slice.read(|state| state.theme)
    }

    /// Whether the sidebar is collapsed.
    pub fn sidebar_collapsed(&self) -> bool {
        self.slice.read(|state| state.sidebar_collapsed)
    }

    /// Whether a blocking operation is in progress.
    pub fn loading(&self) -> bool {
        self.slice.read(|state| state.loading)
    }

    /// Clone of the module state.
    pub fn snapshot(&self) -> UiState {
        self.slice.snapshot()
    }

    /// Lifecycle phase of the module.
    pub fn phase(&self) -> ModulePhase {
        self.slice.phase()
    }

    pub(crate) fn dispose(&self) {
        self.slice.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockThemeApplier, StateStorage as _, TracingThemeApplier};
    use crate::outbound::storage::InMemoryStateStorage;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::sync::Mutex;
    use std::thread;

    #[derive(Default)]
    struct RecordingApplier {
        applied: Mutex<Vec<Theme>>,
    }

    impl ThemeApplier for RecordingApplier {
        fn apply(&self, theme: Theme) {
            self.applied.lock().expect("applied lock").push(theme);
        }
    }

    #[fixture]
    fn storage() -> InMemoryStateStorage {
        InMemoryStateStorage::new()
    }

    fn ui_store(storage: &InMemoryStateStorage) -> UiStore {
        UiStore::hydrate(Arc::new(storage.clone()), Arc::new(TracingThemeApplier)).expect("ui")
    }

    #[rstest]
    fn toggles_report_the_new_values(storage: InMemoryStateStorage) {
        let ui = ui_store(&storage);

        assert_eq!(ui.toggle_theme(), Theme::Dark);
        assert_eq!(ui.toggle_theme(), Theme::Light);
        assert!(ui.toggle_sidebar());
        assert!(!ui.toggle_sidebar());
    }

    #[rstest]
    fn loading_is_not_persisted(storage: InMemoryStateStorage) {
        let ui = ui_store(&storage);
        ui.toggle_theme();
        ui.toggle_sidebar();
        ui.set_loading(true);

        assert_eq!(
            storage.fields("ui"),
            vec!["sidebarCollapsed".to_owned(), "theme".to_owned()]
        );
        let reloaded = ui_store(&storage).snapshot();
        assert_eq!(
            reloaded,
            UiState {
                theme: Theme::Dark,
                sidebar_collapsed: true,
                loading: false,
            }
        );
    }

    #[rstest]
    fn initialize_applies_the_rehydrated_theme(storage: InMemoryStateStorage) {
        storage.write("ui", "theme", &json!("dark")).expect("seed");
        let mut applier = MockThemeApplier::new();
        applier
            .expect_apply()
            .withf(|theme| *theme == Theme::Dark)
            .times(1)
            .return_const(());

        let ui = UiStore::hydrate(Arc::new(storage), Arc::new(applier)).expect("ui");
        ui.initialize().expect("initialize");

        assert_eq!(ui.phase(), ModulePhase::Active);
    }

    #[rstest]
    fn theme_changes_reach_the_applier(storage: InMemoryStateStorage) {
        let mut applier = MockThemeApplier::new();
        applier.expect_apply().times(2).return_const(());

        let ui = UiStore::hydrate(Arc::new(storage), Arc::new(applier)).expect("ui");
        ui.toggle_theme();
        ui.set_theme(Theme::Light);

        assert_eq!(ui.theme(), Theme::Light);
    }

    #[rstest]
    fn concurrent_toggles_apply_themes_in_state_order(storage: InMemoryStateStorage) {
        let applier = Arc::new(RecordingApplier::default());
        let ui = Arc::new(
            UiStore::hydrate(Arc::new(storage), Arc::clone(&applier) as Arc<dyn ThemeApplier>)
                .expect("ui"),
        );

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let ui = Arc::clone(&ui);
                thread::spawn(move || {
                    for _ in 0..25 {
                        ui.toggle_theme();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("toggle thread");
        }

        let applied = applier.applied.lock().expect("applied lock").clone();
        assert_eq!(applied.len(), 200);
        assert_eq!(applied.last().copied(), Some(ui.theme()));
        assert!(applied.windows(2).all(|pair| pair[0] != pair[1]));
    }
}
