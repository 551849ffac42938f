use std::{collections::BTreeMap, fmt, path::PathBuf, str::FromStr};

use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::ParseConfigError;

/// Typed agent configuration parsed from whitespace-separated `key=value` pairs.
///
/// Parsing starts from `name=unknown role=unknown`, then applies the agent's
/// own defaults, then the user-supplied pairs; a later pair overwrites an
/// earlier one with the same key. A bare token without `=` is stored as
/// `token=token`, which lets flags such as `init` be written on their own.
///
/// Keys with a fixed meaning get typed fields. Everything else is retained in
/// [`AgentConfig::property`] for the agent that wants it.
///
/// ```
/// use fib2048_engine::AgentConfig;
///
/// let config = AgentConfig::parse("name=td role=player", "init alpha=0.1 save=w.bin mode=x")?;
/// assert_eq!(config.name(), "td");
/// assert_eq!(config.init(), Some("init"));
/// assert_eq!(config.alpha(), 0.1);
/// assert_eq!(config.property("mode"), Some("x"));
/// # Ok::<(), fib2048_engine::ParseConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    name: String,
    role: String,
    init: Option<String>,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
    alpha: f32,
    seed: Option<u64>,
    extra: BTreeMap<String, String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new("unknown", "unknown")
    }
}

impl AgentConfig {
    #[must_use]
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            init: None,
            load: None,
            save: None,
            alpha: 0.0,
            seed: None,
            extra: BTreeMap::new(),
        }
    }

    /// Parses `args` on top of an agent's `defaults`.
    pub fn parse(defaults: &str, args: &str) -> Result<Self, ParseConfigError> {
        let mut config = Self::default();
        for pair in defaults.split_whitespace().chain(args.split_whitespace()) {
            config.notify(pair)?;
        }
        Ok(config)
    }

    /// Updates a single entry from a `key=value` pair (or a bare token).
    pub fn notify(&mut self, pair: &str) -> Result<(), ParseConfigError> {
        let (key, value) = pair.split_once('=').unwrap_or((pair, pair));
        self.set(key, value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ParseConfigError> {
        let invalid = || ParseConfigError {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        match key {
            "name" => self.name = value.to_owned(),
            "role" => self.role = value.to_owned(),
            "init" => self.init = Some(value.to_owned()),
            "load" => self.load = Some(PathBuf::from(value)),
            "save" => self.save = Some(PathBuf::from(value)),
            "alpha" => self.alpha = value.parse().map_err(|_| invalid())?,
            "seed" => self.seed = Some(value.parse().map_err(|_| invalid())?),
            _ => {
                tracing::debug!(key, value, "retaining agent option");
                self.extra.insert(key.to_owned(), value.to_owned());
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Value of the `init` key; its presence requests fresh weight tables.
    #[must_use]
    pub fn init(&self) -> Option<&str> {
        self.init.as_deref()
    }

    #[must_use]
    pub fn load(&self) -> Option<&PathBuf> {
        self.load.as_ref()
    }

    #[must_use]
    pub fn save(&self) -> Option<&PathBuf> {
        self.save.as_ref()
    }

    /// Learning rate; 0 disables learning.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Looks up a key without a typed field.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Iterates over the keys without a typed field, in key order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Creates the agent's random source, seeded from `seed` when present.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        match self.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        }
    }
}

impl fmt::Display for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name={} role={}", self.name, self.role)?;
        if let Some(init) = &self.init {
            write!(f, " init={init}")?;
        }
        if let Some(load) = &self.load {
            write!(f, " load={}", load.display())?;
        }
        if let Some(save) = &self.save {
            write!(f, " save={}", save.display())?;
        }
        write!(f, " alpha={}", self.alpha)?;
        if let Some(seed) = self.seed {
            write!(f, " seed={seed}")?;
        }
        for (key, value) in &self.extra {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

impl FromStr for AgentConfig {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("", s)
    }
}
