use config::{Config, ConfigBuilder, File, Map, Source, Value, ValueKind, builder::DefaultState};
use dbx_domain::config::DubboxProperties;
use dbx_domain::constants::{ENV_PREFIX, ENV_SEPARATOR, ROOT_PREFIX};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Custom error type for configuration loading.
#[dbx_derive::dbx_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid override{}: {message}", format_context(.context))]
    InvalidOverride { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug, Clone)]
struct FileLayer {
    path: PathBuf,
    required: bool,
}

impl FileLayer {
    /// Leaf values of the file below `spring.dubbo`, keyed by dotted path.
    fn entries(&self) -> Result<Vec<(String, Value)>, ConfigError> {
        info!("Loading config from {}", self.path.display());
        let file = Config::builder()
            .add_source(File::from(self.path.as_path()).required(self.required))
            .build()
            .context(format!("Failed to read {}", self.path.display()))?;
        let table = file.collect().context(format!("Failed to read {}", self.path.display()))?;

        let mut entries = Vec::new();
        flatten("", table, &mut entries);
        entries.retain(|(key, _)| in_namespace(key));
        Ok(entries)
    }
}

fn flatten(prefix: &str, table: Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in table {
        let path = if prefix.is_empty() { key } else { format!("{prefix}.{key}") };
        if matches!(value.kind, ValueKind::Table(_)) {
            if let Ok(inner) = value.into_table() {
                flatten(&path, inner, out);
            }
        } else {
            out.push((path, value));
        }
    }
}

#[derive(Debug, Default)]
enum EnvLayer {
    #[default]
    Process,
    Vars(Vec<(String, String)>),
    Disabled,
}

impl EnvLayer {
    /// `SPRING__DUBBO__<SECTION>__<FIELD>` variables as canonical dotted keys, sorted by key.
    fn entries(self) -> Vec<(String, String)> {
        let vars = match self {
            Self::Process => std::env::vars_os()
                .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
            Self::Vars(vars) => vars,
            Self::Disabled => Vec::new(),
        };

        let prefix = format!("{ENV_PREFIX}{ENV_SEPARATOR}");
        let mut entries: Vec<_> = vars
            .into_iter()
            .filter_map(|(name, value)| {
                let head = name.get(..prefix.len())?;
                if !head.eq_ignore_ascii_case(&prefix) {
                    return None;
                }
                let segments: Vec<_> = name.split(ENV_SEPARATOR).map(str::to_ascii_lowercase).collect();
                if segments.iter().any(String::is_empty) {
                    return None;
                }
                Some((canonical_key(&segments.join(".")), value))
            })
            .filter(|(key, _)| in_namespace(key))
            .collect();
        entries.sort();
        entries
    }
}

/// Layered loader for the `spring.dubbo` namespace.
///
/// Layers are merged in this order, later layers overriding earlier ones:
/// 1. **Files**: every file added with [`file`](Self::file) or
///    [`optional_file`](Self::optional_file), in insertion order. The format follows the
///    extension (TOML, YAML, JSON, INI); a path without extension tries each of them.
/// 2. **Environment**: variables such as `SPRING__DUBBO__PROTOCOL__PORT`
///    (double underscore separated, case-insensitive).
/// 3. **Overrides**: explicit key/value pairs, typically from the command line.
///    Keys without the `spring.dubbo` prefix are relative to it.
///
/// Every key is rewritten to the spelling its section declares (see
/// [`canonical_key`]), so `isdefault` from the environment replaces `isDefault` from a
/// file instead of clashing with it. String values from the environment and overrides
/// coerce to integer and boolean fields. When no layer mentions `spring.dubbo` at all
/// the result is [`DubboxProperties::default`], with every field unset.
///
/// # Example
/// ```rust
/// use dbx_kernel::config::PropertiesLoader;
///
/// let props = PropertiesLoader::new()
///     .without_env()
///     .set("application.name", "svc-a")
///     .set("protocol.port", "20880")
///     .load()
///     .unwrap();
///
/// assert_eq!(props.application.name.as_deref(), Some("svc-a"));
/// assert_eq!(props.protocol.port, Some(20880));
/// ```
#[must_use = "loaders do nothing unless you call .load()"]
#[derive(Debug, Default)]
pub struct PropertiesLoader {
    files: Vec<FileLayer>,
    env: EnvLayer,
    overrides: Vec<(String, String)>,
}

impl PropertiesLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration file that must exist.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(FileLayer { path: path.as_ref().to_path_buf(), required: true });
        self
    }

    /// Adds a configuration file that is skipped when missing.
    pub fn optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(FileLayer { path: path.as_ref().to_path_buf(), required: false });
        self
    }

    /// Reads environment overrides from `vars` instead of the process environment.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = EnvLayer::Vars(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Ignores environment variables entirely.
    pub fn without_env(mut self) -> Self {
        self.env = EnvLayer::Disabled;
        self
    }

    /// Adds an explicit override. `key` may be relative to `spring.dubbo`.
    pub fn set(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.overrides.push((canonical_key(&qualify(key.as_ref())), value.into()));
        self
    }

    /// Adds an override written as `key=value`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidOverride`] when the pair has no `=` or an empty key.
    pub fn set_pair(self, pair: &str) -> Result<Self, ConfigError> {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(ConfigError::InvalidOverride {
                message: format!("expected key=value, got '{pair}'").into(),
                context: None,
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::InvalidOverride {
                message: format!("empty key in '{pair}'").into(),
                context: None,
            });
        }
        Ok(self.set(key, value.trim()))
    }

    /// Merges all layers and binds the `spring.dubbo` subtree.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] if a required file is missing, a file cannot be
    /// parsed, or a value does not fit its field type (e.g. `port = "abc"`).
    pub fn load(self) -> Result<DubboxProperties, ConfigError> {
        let config = self.builder()?.build().context("Failed to build layered configuration")?;

        match config.get::<DubboxProperties>(ROOT_PREFIX) {
            Ok(properties) => Ok(properties),
            Err(config::ConfigError::NotFound(_)) => {
                debug!("No '{ROOT_PREFIX}' keys found, using empty properties");
                Ok(DubboxProperties::default())
            },
            Err(source) => Err(ConfigError::Config {
                source,
                context: Some(format!("Failed to bind '{ROOT_PREFIX}'").into()),
            }),
        }
    }

    fn builder(self) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let mut builder = Config::builder();

        for layer in &self.files {
            for (key, value) in layer.entries()? {
                let key = canonical_key(&key);
                builder = builder
                    .set_override(key.as_str(), value)
                    .context(format!("Failed to apply '{key}' from {}", layer.path.display()))?;
            }
        }

        for (key, value) in self.env.entries() {
            debug!("Environment override {key}");
            builder = builder
                .set_override(key.as_str(), value)
                .context(format!("Failed to apply environment key '{key}'"))?;
        }

        for (key, value) in self.overrides {
            debug!("Override {key}");
            builder = builder
                .set_override(key.as_str(), value)
                .context(format!("Failed to apply override '{key}'"))?;
        }

        Ok(builder)
    }
}

/// Prefixes `key` with `spring.dubbo` unless it already carries it (in any case).
#[must_use]
pub fn qualify(key: &str) -> String {
    let key = key.trim().trim_start_matches('.');
    if in_namespace(key) || key.eq_ignore_ascii_case(ROOT_PREFIX) {
        key.to_owned()
    } else {
        format!("{ROOT_PREFIX}.{key}")
    }
}

/// Rewrites `spring.dubbo.<section>.<field>` onto the spelling the section declares,
/// ignoring ASCII case, `_` and `-` (`SPRING.DUBBO.CONSUMER.IS_DEFAULT` becomes
/// `spring.dubbo.consumer.isDefault`). Other keys are returned unchanged.
#[must_use]
pub fn canonical_key(key: &str) -> String {
    let segments: Vec<_> = key.split('.').collect();
    if let [root, namespace, section, field] = segments.as_slice()
        && format!("{root}.{namespace}").eq_ignore_ascii_case(ROOT_PREFIX)
        && let Some((section, field)) = DubboxProperties::canonical_field(section, field)
    {
        return format!("{ROOT_PREFIX}.{section}.{field}");
    }
    key.to_owned()
}

fn in_namespace(key: &str) -> bool {
    key.get(..=ROOT_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(&format!("{ROOT_PREFIX}.")))
}
