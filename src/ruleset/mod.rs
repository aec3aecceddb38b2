//! Rule store construction and lookup.
//!
//! Rules are accumulated by a [`RuleStoreBuilder`] during startup, possibly
//! over several load passes, and then frozen into a [`RuleStore`] that is
//! shared read-only between request handlers.
//!
//! Within each kind, rules keep configuration order and are never
//! deduplicated: loading the same file twice registers every rule twice, and
//! the earlier copy always wins.

mod config;

pub use config::{LoaderConfig, PatternPolicy};

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::error::{EntryError, Error, Result};
use crate::properties::{self, Entry};
use crate::rule::{find_match, MatchResult, Rule};
use crate::rule_kind::RuleKind;

/// Outcome counts of one load pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Rules registered
    pub loaded: usize,
    /// Entries skipped as malformed
    pub skipped: usize,
}

/// Mutable accumulator used while loading configuration.
#[derive(Debug, Default)]
pub struct RuleStoreBuilder {
    config: LoaderConfig,
    explicit: Vec<Rule>,
    implicit: Vec<Rule>,
}

impl RuleStoreBuilder {
    /// Create a new builder with the specified configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            explicit: Vec::new(),
            implicit: Vec::new(),
        }
    }

    /// Number of rules accumulated so far.
    pub fn len(&self) -> usize {
        self.explicit.len() + self.implicit.len()
    }

    /// Check if no rules have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append an already-compiled rule to the list of its kind.
    pub fn push(&mut self, rule: Rule) {
        match rule.kind() {
            RuleKind::Explicit => self.explicit.push(rule),
            RuleKind::Implicit => self.implicit.push(rule),
        }
    }

    /// Load configuration entries in order.
    ///
    /// Malformed entries are logged and skipped. An invalid pattern aborts the
    /// pass under [`PatternPolicy::Fail`]; rules registered before it stay in
    /// the builder.
    pub fn load_entries<I>(&mut self, entries: I) -> Result<LoadStats>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut stats = LoadStats::default();

        for entry in entries {
            match self.load_entry(&entry) {
                Ok(()) => stats.loaded += 1,
                Err(Error::Entry(e)) => {
                    log::warn!("Skipping rule '{}' (line {}): {}", entry.key, entry.line, e);
                    stats.skipped += 1;
                }
                Err(e @ Error::InvalidPattern { .. }) => match self.config.pattern_policy {
                    PatternPolicy::Fail => return Err(e),
                    PatternPolicy::Skip => {
                        log::warn!("Skipping rule (line {}): {}", entry.line, e);
                        stats.skipped += 1;
                    }
                },
                Err(e) => return Err(e),
            }
        }

        Ok(stats)
    }

    /// Load entries from a reader in `key = value` format.
    pub fn load_reader<R: Read>(&mut self, reader: R) -> Result<LoadStats> {
        let entries = properties::parse(reader)?;
        self.load_entries(entries)
    }

    /// Load entries from a configuration file.
    pub fn load_file(&mut self, path: &Path) -> Result<LoadStats> {
        let file = File::open(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = properties::parse(file).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let stats = self.load_entries(entries)?;
        log::debug!(
            "Loaded {:?}: {} rules, {} skipped",
            path,
            stats.loaded,
            stats.skipped
        );
        Ok(stats)
    }

    fn load_entry(&mut self, entry: &Entry) -> Result<()> {
        let value = entry.value.as_deref().ok_or(EntryError::MissingValue)?;
        let rule = Rule::from_entry(&entry.key, value)?;

        if !rule.is_consistent() {
            log::warn!(
                "Rule '{}' references ${} but its pattern has {} capture groups",
                entry.key,
                rule.template().max_group(),
                rule.group_count()
            );
        }

        log::info!("Loaded redirection rule; {} to {}", entry.key, value);
        self.push(rule);
        Ok(())
    }

    /// Freeze the accumulated rules.
    pub fn build(self) -> RuleStore {
        RuleStore {
            config: self.config,
            explicit: self.explicit.into(),
            implicit: self.implicit.into(),
        }
    }
}

/// Immutable rule set, cheap to clone and safe to share across threads.
#[derive(Debug, Clone)]
pub struct RuleStore {
    config: LoaderConfig,
    explicit: Arc<[Rule]>,
    implicit: Arc<[Rule]>,
}

impl RuleStore {
    /// Start building a store with the specified configuration.
    pub fn builder(config: LoaderConfig) -> RuleStoreBuilder {
        RuleStoreBuilder::new(config)
    }

    /// Build a store from a reader with the default configuration.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut builder = RuleStoreBuilder::default();
        builder.load_reader(reader)?;
        Ok(builder.build())
    }

    /// Get the configuration this store was loaded with.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Explicit rules in registration order.
    pub fn explicit(&self) -> &[Rule] {
        &self.explicit
    }

    /// Implicit rules in registration order.
    pub fn implicit(&self) -> &[Rule] {
        &self.implicit
    }

    /// Rules of one kind in registration order.
    pub fn rules(&self, kind: RuleKind) -> &[Rule] {
        match kind {
            RuleKind::Explicit => self.explicit(),
            RuleKind::Implicit => self.implicit(),
        }
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.explicit.len() + self.implicit.len()
    }

    /// Check if the store holds no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the first rule of `kind` matching `input`.
    pub fn find(&self, kind: RuleKind, input: &str) -> Option<MatchResult<'_>> {
        find_match(self.rules(kind), input)
    }
}
