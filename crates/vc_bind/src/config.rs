//! Resolver configuration.
//!
//! [`BindConfig`] holds the global switches consulted while resolving codecs
//! plus per-type [`ConfigOverride`]s. It implements `serde`'s traits, so an
//! application can keep it in whatever format it already loads settings from.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::hash::{FixedHashState, HashMap};
use crate::info::TypeKey;

// -----------------------------------------------------------------------------
// IgnoredProperties

/// Property names to leave out of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoredProperties {
    pub names: Vec<String>,
    /// Names are ignored on input only; they are still written.
    pub allow_getters: bool,
}

impl IgnoredProperties {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            allow_getters: false,
        }
    }

    #[inline]
    pub fn with_allow_getters(mut self, allow_getters: bool) -> Self {
        self.allow_getters = allow_getters;
        self
    }

    /// The names that must not be written.
    pub fn for_serialization(&self) -> &[String] {
        if self.allow_getters {
            &[]
        } else {
            &self.names
        }
    }

    /// Combines `self` with higher-priority `overrides`.
    ///
    /// Names are merged; `allow_getters` is taken from the overrides.
    pub fn with_overrides(&self, overrides: &IgnoredProperties) -> IgnoredProperties {
        let mut names = self.names.clone();
        for name in &overrides.names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        IgnoredProperties {
            names,
            allow_getters: overrides.allow_getters,
        }
    }
}

// -----------------------------------------------------------------------------
// ConfigOverride

/// Settings applied to one type, taking priority over its annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverride {
    /// Forces properties whose value is of this type to be dropped (or kept).
    pub ignored_type: Option<bool>,
    pub ignored_properties: Option<IgnoredProperties>,
}

impl ConfigOverride {
    #[inline]
    pub fn ignored_type(ignored: bool) -> Self {
        Self {
            ignored_type: Some(ignored),
            ignored_properties: None,
        }
    }

    #[inline]
    pub fn with_ignored_properties(mut self, ignored: IgnoredProperties) -> Self {
        self.ignored_properties = Some(ignored);
        self
    }
}

// -----------------------------------------------------------------------------
// BindConfig

/// Configuration of codec resolution.
///
/// # Examples
///
/// ```
/// use vc_bind::config::{BindConfig, ConfigOverride};
///
/// let config = BindConfig::new()
///     .with_default_view_inclusion(false)
///     .with_override("app::Secret", ConfigOverride::ignored_type(true));
///
/// assert!(!config.default_view_inclusion);
/// assert!(config.overrides.contains_key("app::Secret"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Whether properties without view membership are written when a view is active.
    pub default_view_inclusion: bool,
    /// Drop implicitly discovered properties that cannot be written back.
    pub require_setters_for_getters: bool,
    /// Use declared types instead of runtime types for all values.
    pub use_static_typing: bool,
    /// Per-type overrides, keyed by raw type path.
    pub overrides: HashMap<String, ConfigOverride>,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            default_view_inclusion: true,
            require_setters_for_getters: false,
            use_static_typing: false,
            overrides: HashMap::with_hasher(FixedHashState),
        }
    }
}

impl BindConfig {
    /// Creates a config with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_default_view_inclusion(mut self, enabled: bool) -> Self {
        self.default_view_inclusion = enabled;
        self
    }

    #[inline]
    pub fn with_require_setters_for_getters(mut self, enabled: bool) -> Self {
        self.require_setters_for_getters = enabled;
        self
    }

    #[inline]
    pub fn with_static_typing(mut self, enabled: bool) -> Self {
        self.use_static_typing = enabled;
        self
    }

    /// Adds or replaces the override of the type with raw path `type_path`.
    pub fn with_override(mut self, type_path: impl Into<String>, value: ConfigOverride) -> Self {
        self.overrides.insert(type_path.into(), value);
        self
    }

    /// Returns the override registered for `key`, if any.
    #[inline]
    pub fn override_for(&self, key: &TypeKey) -> Option<&ConfigOverride> {
        self.overrides.get(key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{BindConfig, ConfigOverride, IgnoredProperties};
    use crate::info::TypeKey;

    #[test]
    fn defaults() {
        let config = BindConfig::default();
        assert!(config.default_view_inclusion);
        assert!(!config.require_setters_for_getters);
        assert!(!config.use_static_typing);
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn ignored_properties() {
        let base = IgnoredProperties::new(["a", "b"]);
        assert_eq!(base.for_serialization(), ["a", "b"]);

        let merged = base.with_overrides(&IgnoredProperties::new(["b", "c"]));
        assert_eq!(merged.names, ["a", "b", "c"]);

        let allowed = merged.with_overrides(&IgnoredProperties::new(["d"]).with_allow_getters(true));
        assert!(allowed.for_serialization().is_empty());
    }

    #[test]
    fn serde_round_trip() {
        let config = BindConfig::new()
            .with_static_typing(true)
            .with_override("app::Token", ConfigOverride::ignored_type(true));

        let text = serde_json::to_string(&config).unwrap();
        let back: BindConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
        assert_eq!(
            back.override_for(&TypeKey::new("app::Token")),
            Some(&ConfigOverride::ignored_type(true))
        );
    }

    #[test]
    fn partial_document() {
        let config: BindConfig =
            serde_json::from_str(r#"{ "require_setters_for_getters": true }"#).unwrap();
        assert!(config.require_setters_for_getters);
        assert!(config.default_view_inclusion);
    }
}
