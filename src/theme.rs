//! Process-wide light/dark theme with persistence and change notification.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::preferences::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted value. Anything but `light`/`dark` is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Source of the operating system's colour-scheme preference.
pub trait SystemScheme {
    fn preferred(&self) -> Option<Theme>;
}

/// Queries the desktop environment through `dark-light`.
pub struct DetectedScheme;

impl SystemScheme for DetectedScheme {
    fn preferred(&self) -> Option<Theme> {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Some(Theme::Light),
            Ok(dark_light::Mode::Dark) => Some(Theme::Dark),
            Ok(_) => None,
            Err(e) => {
                debug!("System colour scheme unavailable: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
pub struct FixedScheme(pub Option<Theme>);

#[cfg(test)]
impl SystemScheme for FixedScheme {
    fn preferred(&self) -> Option<Theme> {
        self.0
    }
}

/// The root visual surface that must follow the theme outside of any view
/// (terminal default colours).
pub trait ThemeRoot {
    fn apply(&mut self, theme: Theme);
}

/// Root that ignores theme changes.
#[cfg(test)]
pub struct DetachedRoot;

#[cfg(test)]
impl ThemeRoot for DetachedRoot {
    fn apply(&mut self, _theme: Theme) {}
}

/// Single owner of the active theme.
///
/// Views never hold a copy of the theme across frames: they read it from a
/// [`watch::Receiver`] obtained through [`ThemeStore::subscribe`]. Dropping
/// the receiver unsubscribes.
pub struct ThemeStore {
    sender: watch::Sender<Theme>,
    preferences: Box<dyn PreferenceStore>,
    root: Box<dyn ThemeRoot>,
}

impl ThemeStore {
    pub const KEY: &'static str = "theme";

    /// Resolve the initial theme: persisted value, then system preference,
    /// then dark.
    pub fn new(
        preferences: Box<dyn PreferenceStore>,
        system: &dyn SystemScheme,
        root: Box<dyn ThemeRoot>,
    ) -> Self {
        let initial = resolve_initial(preferences.as_ref(), system);
        Self::with_theme(initial, preferences, root)
    }

    /// Start from an explicit theme, bypassing resolution.
    pub fn with_theme(
        theme: Theme,
        preferences: Box<dyn PreferenceStore>,
        mut root: Box<dyn ThemeRoot>,
    ) -> Self {
        root.apply(theme);
        let (sender, _) = watch::channel(theme);
        debug!(?theme, "Theme initialized");
        Self {
            sender,
            preferences,
            root,
        }
    }

    pub fn theme(&self) -> Theme {
        *self.sender.borrow()
    }

    /// Flip the theme, apply it to the root surface, notify subscribers and
    /// persist it. Returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        let theme = self.theme().toggled();
        self.root.apply(theme);
        self.sender.send_replace(theme);
        debug!(?theme, "Theme toggled");

        if let Err(e) = self.preferences.set(Self::KEY, theme.as_str()) {
            warn!("Could not persist theme: {e}");
        }
        theme
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.sender.subscribe()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

fn resolve_initial(preferences: &dyn PreferenceStore, system: &dyn SystemScheme) -> Theme {
    match preferences.get(ThemeStore::KEY) {
        Ok(Some(value)) => {
            if let Some(theme) = Theme::parse(&value) {
                return theme;
            }
            debug!(value, "Ignoring invalid persisted theme");
        }
        Ok(None) => {}
        Err(e) => warn!("Could not read persisted theme: {e}"),
    }
    system.preferred().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::preferences::{MemoryPreferenceStore, PreferenceError};

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
            Err(PreferenceError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
            Err(PreferenceError::Unavailable)
        }
    }

    /// Shares its log so the test can inspect it after handing the root over.
    #[derive(Clone, Default)]
    struct RecordingRoot(Rc<RefCell<Vec<Theme>>>);

    impl ThemeRoot for RecordingRoot {
        fn apply(&mut self, theme: Theme) {
            self.0.borrow_mut().push(theme);
        }
    }

    fn store(prefs: MemoryPreferenceStore, system: Option<Theme>) -> ThemeStore {
        ThemeStore::new(Box::new(prefs), &FixedScheme(system), Box::new(DetachedRoot))
    }

    #[test]
    fn test_persisted_value_wins() {
        let s = store(MemoryPreferenceStore::with("theme", "light"), Some(Theme::Dark));
        assert_eq!(s.theme(), Theme::Light);
    }

    #[test]
    fn test_invalid_persisted_value_falls_back_to_system() {
        let s = store(MemoryPreferenceStore::with("theme", "sepia"), Some(Theme::Light));
        assert_eq!(s.theme(), Theme::Light);
    }

    #[test]
    fn test_default_is_dark() {
        let s = store(MemoryPreferenceStore::default(), None);
        assert_eq!(s.theme(), Theme::Dark);
    }

    #[test]
    fn test_broken_storage_is_not_fatal() {
        let mut s = ThemeStore::new(
            Box::new(BrokenStore),
            &FixedScheme(Some(Theme::Light)),
            Box::new(DetachedRoot),
        );
        assert_eq!(s.theme(), Theme::Light);
        assert_eq!(s.toggle(), Theme::Dark);
    }

    #[test]
    fn test_toggle_parity() {
        for n in 0..7 {
            let mut s = store(MemoryPreferenceStore::default(), None);
            let initial = s.theme();
            for _ in 0..n {
                s.toggle();
            }
            let expected = if n % 2 == 0 { initial } else { initial.toggled() };
            assert_eq!(s.theme(), expected, "after {n} toggles");
        }
    }

    #[test]
    fn test_toggle_persists_new_value() {
        let mut s = store(MemoryPreferenceStore::default(), None);
        s.toggle();
        assert_eq!(s.preferences.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_subscribers_see_change_and_can_unsubscribe() {
        let mut s = store(MemoryPreferenceStore::default(), None);
        let mut rx = s.subscribe();
        assert_eq!(s.subscriber_count(), 1);

        s.toggle();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Theme::Light);

        drop(rx);
        assert_eq!(s.subscriber_count(), 0);
        s.toggle();
    }

    #[test]
    fn test_root_follows_every_change() {
        let root = RecordingRoot::default();
        let mut s = ThemeStore::new(
            Box::new(MemoryPreferenceStore::default()),
            &FixedScheme(None),
            Box::new(root.clone()),
        );
        s.toggle();
        s.toggle();
        assert_eq!(*root.0.borrow(), vec![Theme::Dark, Theme::Light, Theme::Dark]);
    }
}
