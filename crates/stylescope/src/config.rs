//! Registry configuration.
//!
//! A [`RegistryConfig`] carries the defaults every binding minted by a
//! registry inherits: the placeholder token, id prefix, memoization and
//! deferral flags, plus the registry-wide processing profile (store mode,
//! id scheme, whitespace handling, substitution policy).
//!
//! Configs can be built in code with the `with_*` setters or loaded from YAML:
//!
//! ```rust
//! use stylescope::{IdScheme, RegistryConfig, StoreMode};
//!
//! let config = RegistryConfig::from_yaml(r##"
//! placeholder: "#x"
//! prefix: "app-"
//! defer: true
//! store: append_only
//! id_scheme: counted
//! "##).unwrap();
//!
//! assert_eq!(config.placeholder, "#x");
//! assert_eq!(config.store, StoreMode::AppendOnly);
//! assert_eq!(config.id_scheme, IdScheme::Counted);
//! // Unspecified fields keep their defaults
//! assert_eq!(config.default_scope, "component");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Scope name used when a binding is minted without one.
pub const DEFAULT_SCOPE: &str = "component";

/// Placeholder token replaced by `#<id>` in style templates.
pub const DEFAULT_PLACEHOLDER: &str = "##";

/// How the registry stores registered style text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    /// Map keyed by binding id: re-registering overwrites, and entries can be
    /// removed individually or cleared.
    #[default]
    Addressable,
    /// Plain list: every registration appends, nothing is addressable by id.
    AppendOnly,
}

/// How binding ids are derived from a scope name and its counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScheme {
    /// `box`, `box__2`, `box__3`, ...
    #[default]
    Readable,
    /// `box__1`, `box__2`, `box__3`, ...
    Counted,
}

impl IdScheme {
    /// Derives the id for the `count`-th binding of `scope`.
    pub fn derive(self, prefix: &str, scope: &str, count: u64) -> String {
        match self {
            IdScheme::Readable if count <= 1 => format!("{}{}", prefix, scope),
            _ => format!("{}{}__{}", prefix, scope, count),
        }
    }
}

/// How whitespace runs in processed style text are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhitespaceMode {
    /// Every run of whitespace becomes a single space.
    #[default]
    Collapse,
    /// All whitespace is removed.
    ///
    /// Produces the smallest output but joins multi-token values such as
    /// `1px solid black`.
    Strip,
}

/// Which substitution values are written into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionPolicy {
    /// Omit falsy values: numeric zero, NaN and the empty string.
    ///
    /// A literal `0` used as a property value vanishes from the output.
    /// Callers that need zeros should pass `"0"` or use [`Always`](Self::Always).
    #[default]
    SkipFalsy,
    /// Stringify every value, including zero and the empty string.
    Always,
}

/// Defaults and processing profile for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Scope used by [`Registry::mint_default`](crate::Registry::mint_default).
    pub default_scope: String,
    /// Token replaced by `#<id>` in templates.
    pub placeholder: String,
    /// Prepended to every minted id.
    pub prefix: String,
    /// Bindings compute their text once and reuse it.
    pub once: bool,
    /// Bindings register their text instead of returning it.
    pub defer: bool,
    pub store: StoreMode,
    pub id_scheme: IdScheme,
    pub whitespace: WhitespaceMode,
    /// Trim leading and trailing whitespace after collapsing.
    pub trim: bool,
    pub substitutions: SubstitutionPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_scope: DEFAULT_SCOPE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            prefix: String::new(),
            once: false,
            defer: false,
            store: StoreMode::default(),
            id_scheme: IdScheme::default(),
            whitespace: WhitespaceMode::default(),
            trim: true,
            substitutions: SubstitutionPolicy::default(),
        }
    }
}

impl RegistryConfig {
    /// Creates a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from YAML. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML or unknown enum
    /// values, and a validation error if the result is unusable.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the file cannot be read, otherwise
    /// the same errors as [`from_yaml`](Self::from_yaml) with the path attached.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Checks that the config can mint usable bindings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder.is_empty() {
            return Err(ConfigError::EmptyPlaceholder);
        }
        if self.default_scope.is_empty() {
            return Err(ConfigError::EmptyScope);
        }
        Ok(())
    }

    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = scope.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn with_defer(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }

    pub fn with_store(mut self, store: StoreMode) -> Self {
        self.store = store;
        self
    }

    pub fn with_id_scheme(mut self, scheme: IdScheme) -> Self {
        self.id_scheme = scheme;
        self
    }

    pub fn with_whitespace(mut self, mode: WhitespaceMode) -> Self {
        self.whitespace = mode;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_substitutions(mut self, policy: SubstitutionPolicy) -> Self {
        self.substitutions = policy;
        self
    }
}
