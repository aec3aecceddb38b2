//! The redirection plugin handed to the host proxy.
//!
//! A [`Redirector`] is built once at startup from a base configuration file
//! and an optional local override, then exposes:
//! - [`Redirector::explicit_handlers`]: rules answered with `302 Found`
//! - [`Redirector::implicit_handlers`]: rules that rewrite the request target
//! - [`Redirector::dispatch`]: both lists applied to one request
//!
//! [`Redirector::dispatch`] never fails. A rule whose target cannot be built
//! is logged and treated as not matching, so the request passes through. The
//! per-handler calls report that case as `Some(Err(_))`, which still ends the
//! search within its kind.

mod explicit;
mod implicit;

pub use explicit::ExplicitRedirector;
pub use implicit::ImplicitRedirector;

use std::fs;
use std::path::Path;

use http::{Request, Response};

use crate::error::{Error, Result};
use crate::rule_kind::RuleKind;
use crate::ruleset::{LoaderConfig, RuleStore, RuleStoreBuilder};

/// Configuration written to the base path when it does not exist yet.
pub const DEFAULT_CONFIG: &str = include_str!("../default.conf");

/// Outcome of dispatching one request.
#[derive(Debug)]
pub enum Dispatch {
    /// An explicit rule fired; send this response to the client
    Redirect(Response<()>),
    /// An implicit rule rewrote the request target; keep processing
    Rewritten { from: String, to: String },
    /// No rule applied; the request is unchanged
    PassThrough,
}

impl Dispatch {
    /// Check if no rule applied.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Dispatch::PassThrough)
    }
}

/// A handler of either kind, as registered with the host.
#[derive(Debug, Clone, Copy)]
pub enum Handler<'a> {
    Explicit(&'a ExplicitRedirector),
    Implicit(&'a ImplicitRedirector),
}

impl Handler<'_> {
    /// Kind of the underlying rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            Handler::Explicit(_) => RuleKind::Explicit,
            Handler::Implicit(_) => RuleKind::Implicit,
        }
    }

    /// Pattern the handler fires on.
    pub fn pattern(&self) -> &str {
        match self {
            Handler::Explicit(h) => h.pattern(),
            Handler::Implicit(h) => h.pattern(),
        }
    }

    /// Apply this single handler to `request`.
    ///
    /// `None` when the pattern does not match. `Some(Err(_))` when it
    /// matches but the target cannot be built; a host walking a handler list
    /// stops there and lets the request through, as [`Redirector::dispatch`]
    /// does.
    pub fn apply<B>(&self, request: &mut Request<B>) -> Option<Result<Dispatch>> {
        match self {
            Handler::Explicit(h) => h
                .handle(request)
                .map(|outcome| outcome.map(Dispatch::Redirect)),
            Handler::Implicit(h) => {
                let from = request.uri().to_string();
                h.update(request)
                    .map(|outcome| outcome.map(|to| Dispatch::Rewritten { from, to }))
            }
        }
    }
}

/// Frozen set of redirection handlers.
#[derive(Debug, Clone)]
pub struct Redirector {
    store: RuleStore,
    explicits: Vec<ExplicitRedirector>,
    implicits: Vec<ImplicitRedirector>,
}

impl Redirector {
    /// Load the base configuration, then the local override if it exists.
    ///
    /// A missing base file is first created with [`DEFAULT_CONFIG`].
    pub fn init(base: &Path, local: &Path) -> Result<Self> {
        Self::init_with_config(base, local, LoaderConfig::default())
    }

    /// Like [`Redirector::init`] with an explicit loader configuration.
    pub fn init_with_config(base: &Path, local: &Path, config: LoaderConfig) -> Result<Self> {
        if !base.exists() {
            log::debug!("Writing default configuration to {:?}", base);
            fs::write(base, DEFAULT_CONFIG).map_err(|source| Error::ConfigRead {
                path: base.to_path_buf(),
                source,
            })?;
        }

        let mut builder = RuleStoreBuilder::new(config);
        builder.load_file(base)?;

        if local.exists() {
            builder.load_file(local)?;
        }

        Self::from_store(builder.build())
    }

    /// Build handlers for every rule in `store`.
    pub fn from_store(store: RuleStore) -> Result<Self> {
        let server = store.config().server_name.clone();
        let explicits = store
            .explicit()
            .iter()
            .map(|rule| ExplicitRedirector::new(rule.clone(), &server))
            .collect::<Result<Vec<_>>>()?;
        let implicits = store
            .implicit()
            .iter()
            .cloned()
            .map(ImplicitRedirector::new)
            .collect();

        Ok(Self {
            store,
            explicits,
            implicits,
        })
    }

    /// Build a redirector from in-memory configuration text.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Self::from_store(RuleStore::from_reader(reader)?)
    }

    /// The underlying rule store.
    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Explicit handlers in registration order (may be empty).
    pub fn explicit_handlers(&self) -> &[ExplicitRedirector] {
        &self.explicits
    }

    /// Implicit handlers in registration order (may be empty).
    pub fn implicit_handlers(&self) -> &[ImplicitRedirector] {
        &self.implicits
    }

    /// All handlers, explicit ones first.
    pub fn handlers(&self) -> impl Iterator<Item = Handler<'_>> {
        self.explicits
            .iter()
            .map(Handler::Explicit)
            .chain(self.implicits.iter().map(Handler::Implicit))
    }

    /// Apply the rule set to `request`.
    ///
    /// The first matching explicit rule answers with a redirect. Otherwise
    /// the first matching implicit rule rewrites the request target. Within
    /// a kind only the first match is considered; if its target cannot be
    /// built the kind counts as not matching.
    pub fn dispatch<B>(&self, request: &mut Request<B>) -> Dispatch {
        let from = request.uri().to_string();

        if let Some(matched) = self.store.find(RuleKind::Explicit, &from) {
            match self.explicits[matched.position()].redirect(&matched) {
                Ok(response) => {
                    log::debug!("Redirecting {} ({})", from, matched.rule().pattern());
                    return Dispatch::Redirect(response);
                }
                Err(e) => log::warn!("Redirect for {} skipped: {}", from, e),
            }
        }

        if let Some(matched) = self.store.find(RuleKind::Implicit, &from) {
            match self.implicits[matched.position()].rewrite(request, &matched) {
                Ok(to) => {
                    log::debug!("Rewrote {} to {}", from, to);
                    return Dispatch::Rewritten { from, to };
                }
                Err(e) => log::warn!("Rewrite of {} skipped: {}", from, e),
            }
        }

        Dispatch::PassThrough
    }
}
