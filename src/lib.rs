//! Redirector - A rule-driven URL redirection engine.
//!
//! This crate turns a list of `pattern = target` rules into request handlers
//! for an HTTP proxy. Every rule is one of two kinds:
//!
//! - **Explicit** (`E:`): the client receives `302 Found` with a `Location`
//!   header built from the target
//! - **Implicit** (`I:`): the request target is rewritten in place and the
//!   proxy keeps processing it
//!
//! # Quick Start
//!
//! ```
//! use redirector::{Dispatch, Redirector};
//!
//! let rules = r#"
//! ^/old/(\d+)$ = E:/new/$1
//! ^/api/v1/(.+)$ = I:/api/v2/$1
//! "#;
//! let redirector = Redirector::from_reader(rules.as_bytes()).unwrap();
//!
//! let mut request = http::Request::get("/api/v1/users").body(()).unwrap();
//! assert!(matches!(redirector.dispatch(&mut request), Dispatch::Rewritten { .. }));
//! assert_eq!(request.uri(), "/api/v2/users");
//! ```
//!
//! # Configuration
//!
//! [`Redirector::init`] loads a base file and then an optional local
//! override. Both passes append to the same ordered lists; nothing is
//! replaced, and the earliest matching rule of each kind wins.
//!
//! ```text
//! # pattern         = kind:target
//! ^/old/(\d+)$      = E:/new/$1
//! ^/api/v1/(.+)$    = I:/api/v2/$1
//! ```
//!
//! # Failure Handling
//!
//! - Unreadable configuration and (by default) invalid patterns fail loading
//! - Malformed values are logged and skipped
//! - A rule whose target cannot be built is logged and treated as not
//!   matching, so the request passes through unchanged

mod error;
mod global;
mod rule_kind;

pub mod properties;
pub mod redirector;
pub mod rule;
pub mod ruleset;
pub mod template;

// Re-export core types
pub use error::{EntryError, Error, FormatError, Result};
pub use rule_kind::RuleKind;
pub use template::Template;

// Re-export rule and store types
pub use rule::{find_match, CaptureGroups, MatchResult, Rule};
pub use ruleset::{LoadStats, LoaderConfig, PatternPolicy, RuleStore, RuleStoreBuilder};

// Re-export dispatch types
pub use redirector::{Dispatch, ExplicitRedirector, Handler, ImplicitRedirector, Redirector};

// Re-export global API functions
pub use global::{dispatch, get, init, install, is_initialized};
