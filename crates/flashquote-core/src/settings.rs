//! Persisted user settings abstraction and WPM validation.

/// Smallest accepted words-per-minute value.
pub const WPM_MIN: u16 = 50;
/// Largest accepted words-per-minute value.
pub const WPM_MAX: u16 = 1000;
/// Accepted values are multiples of this step.
pub const WPM_STEP: u16 = 50;
/// Hard fallback when neither the candidate nor a stored value is usable.
pub const WPM_DEFAULT: u16 = 100;

/// User-tunable settings that should survive restarts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
}

impl PersistedSettings {
    pub const fn new(wpm: u16) -> Self {
        Self { wpm }
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}

/// Whether `candidate` is an acceptable words-per-minute value: a positive
/// multiple of [`WPM_STEP`] no larger than [`WPM_MAX`].
pub fn is_valid_wpm(candidate: i64) -> bool {
    candidate > 0 && candidate <= i64::from(WPM_MAX) && candidate % i64::from(WPM_STEP) == 0
}

/// Resolve a requested value against the fallback chain: the candidate when
/// valid, otherwise the stored value when that is valid, otherwise
/// [`WPM_DEFAULT`]. Invalid input is never surfaced as an error.
pub fn resolve_wpm(candidate: i64, stored: Option<u16>) -> u16 {
    if is_valid_wpm(candidate) {
        return candidate as u16;
    }

    stored
        .filter(|wpm| is_valid_wpm(i64::from(*wpm)))
        .unwrap_or(WPM_DEFAULT)
}
