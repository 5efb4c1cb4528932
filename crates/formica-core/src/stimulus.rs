//! Stimulus types — the chemical vocabulary of the colony.
//!
//! Ants never talk to each other directly. They mark cells with
//! pheromone, and the marks fade. A [`StimulusType`] names one kind of
//! mark and fixes how fast it fades (`decay_factor`) and how far it is
//! meant to spread (`radius`). Types are plain immutable values, so new
//! kinds can come from configuration without touching this crate.

use crate::error::{FormicaError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Trail laid by foragers between food and nest.
pub const FORAGE: StimulusType = StimulusType {
    name: Cow::Borrowed("ant:env:stimulus:forage"),
    decay_factor: 0.1,
    radius: 0,
};

/// Descriptor of one kind of chemical signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStimulus")]
pub struct StimulusType {
    name: Cow<'static, str>,
    decay_factor: f64,
    radius: u32,
}

impl StimulusType {
    /// Define a new stimulus kind.
    ///
    /// The name must be non-empty and `decay_factor` must lie in `[0, 1)`.
    pub fn new(name: impl Into<String>, decay_factor: f64, radius: u32) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FormicaError::invalid_stimulus("name must not be empty"));
        }
        if !decay_factor.is_finite() || !(0.0..1.0).contains(&decay_factor) {
            return Err(FormicaError::InvalidDecayFactor(decay_factor));
        }
        Ok(Self {
            name: Cow::Owned(name),
            decay_factor,
            radius,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fraction of concentration lost per tick.
    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }

    /// Intended diffusion extent in cells. `0` keeps the signal on its own cell.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Concentration left after one tick of decay.
    pub fn decayed(&self, concentration: f64) -> f64 {
        (concentration * (1.0 - self.decay_factor)).max(0.0)
    }

    /// Whether the signal never fades.
    pub fn is_permanent(&self) -> bool {
        self.decay_factor == 0.0
    }
}

/// Unvalidated form used when reading stimulus definitions from config.
#[derive(Debug, Clone, Deserialize)]
struct RawStimulus {
    name: String,
    decay_factor: f64,
    #[serde(default)]
    radius: u32,
}

impl TryFrom<RawStimulus> for StimulusType {
    type Error = FormicaError;

    fn try_from(raw: RawStimulus) -> Result<Self> {
        StimulusType::new(raw.name, raw.decay_factor, raw.radius)
    }
}

/// Every stimulus type shipped with the crate.
pub fn builtin_stimuli() -> Vec<StimulusType> {
    vec![FORAGE]
}

/// Open registry of stimulus kinds, keyed by name.
///
/// Entries are shared as `Arc`s so cells and scheduler threads can hold
/// them without copying. Once registered a kind is never replaced.
#[derive(Debug, Clone)]
pub struct StimulusRegistry {
    kinds: BTreeMap<String, Arc<StimulusType>>,
}

impl StimulusRegistry {
    /// Registry pre-seeded with the built-in kinds.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for kind in builtin_stimuli() {
            registry
                .kinds
                .insert(kind.name().to_string(), Arc::new(kind));
        }
        registry
    }

    /// Registry with no kinds at all.
    pub fn empty() -> Self {
        Self {
            kinds: BTreeMap::new(),
        }
    }

    /// Add a new kind. Fails if the name is taken.
    pub fn register(&mut self, kind: StimulusType) -> Result<Arc<StimulusType>> {
        if self.kinds.contains_key(kind.name()) {
            return Err(FormicaError::DuplicateStimulus(kind.name().to_string()));
        }
        let kind = Arc::new(kind);
        self.kinds.insert(kind.name().to_string(), Arc::clone(&kind));
        tracing::debug!(
            stimulus = kind.name(),
            decay_factor = kind.decay_factor(),
            radius = kind.radius(),
            "registered stimulus type"
        );
        Ok(kind)
    }

    pub fn get(&self, name: &str) -> Option<Arc<StimulusType>> {
        self.kinds.get(name).cloned()
    }

    /// Like [`get`](Self::get) but reports a missing name as an error.
    pub fn resolve(&self, name: &str) -> Result<Arc<StimulusType>> {
        self.get(name)
            .ok_or_else(|| FormicaError::UnknownStimulus(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// Kinds in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<StimulusType>> {
        self.kinds.values()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for StimulusRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forage_constant_matches_published_values() {
        assert_eq!(FORAGE.name(), "ant:env:stimulus:forage");
        assert_eq!(FORAGE.decay_factor(), 0.1);
        assert_eq!(FORAGE.radius(), 0);
    }

    #[test]
    fn decay_factor_must_be_in_unit_interval() {
        assert!(StimulusType::new("a", 0.0, 0).is_ok());
        assert!(StimulusType::new("a", 0.99, 2).is_ok());
        assert_eq!(
            StimulusType::new("a", 1.0, 0),
            Err(FormicaError::InvalidDecayFactor(1.0))
        );
        assert_eq!(
            StimulusType::new("a", -0.1, 0),
            Err(FormicaError::InvalidDecayFactor(-0.1))
        );
        assert!(StimulusType::new("a", f64::NAN, 0).is_err());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(matches!(
            StimulusType::new("  ", 0.5, 0),
            Err(FormicaError::InvalidStimulus(_))
        ));
    }

    #[test]
    fn decayed_applies_one_tick() {
        let alarm = StimulusType::new("alarm", 0.5, 1).unwrap();
        assert_eq!(alarm.decayed(8.0), 4.0);
        assert_eq!(alarm.decayed(0.0), 0.0);
        assert!(!alarm.is_permanent());

        let marker = StimulusType::new("marker", 0.0, 0).unwrap();
        assert_eq!(marker.decayed(3.5), 3.5);
        assert!(marker.is_permanent());
    }

    #[test]
    fn registry_starts_with_builtins() {
        let registry = StimulusRegistry::new();
        assert_eq!(registry.len(), 1);
        let forage = registry.resolve(FORAGE.name()).unwrap();
        assert_eq!(*forage, FORAGE);
        assert!(StimulusRegistry::empty().is_empty());
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = StimulusRegistry::new();
        let err = registry.register(FORAGE).unwrap_err();
        assert_eq!(err, FormicaError::DuplicateStimulus(FORAGE.name().into()));

        let alarm = StimulusType::new("ant:env:stimulus:alarm", 0.3, 2).unwrap();
        registry.register(alarm).unwrap();
        assert!(registry.contains("ant:env:stimulus:alarm"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unknown_stimulus_is_an_error() {
        let registry = StimulusRegistry::new();
        assert_eq!(
            registry.resolve("nope").unwrap_err(),
            FormicaError::UnknownStimulus("nope".into())
        );
    }

    #[test]
    fn deserialization_validates() {
        let ok: StimulusType =
            serde_json::from_str(r#"{"name":"trail","decay_factor":0.2}"#).unwrap();
        assert_eq!(ok.radius(), 0);

        let bad = serde_json::from_str::<StimulusType>(r#"{"name":"trail","decay_factor":1.5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn stimulus_types_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StimulusType>();
        assert_send_sync::<StimulusRegistry>();
    }
}
