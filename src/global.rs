//! Global state and public API.

use once_cell::sync::OnceCell;
use std::path::Path;

use http::Request;

use crate::error::{Error, Result};
use crate::redirector::{Dispatch, Redirector};

/// Process-wide redirector, published once after loading
static GLOBAL_REDIRECTOR: OnceCell<Redirector> = OnceCell::new();

/// Publish a fully loaded redirector to request handlers.
///
/// Only the first call succeeds; later calls return [`Error::AlreadyInstalled`].
pub fn install(redirector: Redirector) -> Result<&'static Redirector> {
    GLOBAL_REDIRECTOR
        .try_insert(redirector)
        .map_err(|_| Error::AlreadyInstalled)
}

/// Load configuration and publish the result.
///
/// # Examples
/// ```ignore
/// use std::path::Path;
///
/// redirector::init(Path::new("redirector.conf"), Path::new("redirector.local.conf"))?;
/// ```
pub fn init(base: &Path, local: &Path) -> Result<&'static Redirector> {
    let redirector = Redirector::init(base, local)?;
    log::debug!(
        "Publishing redirector with {} explicit and {} implicit rules",
        redirector.explicit_handlers().len(),
        redirector.implicit_handlers().len()
    );
    install(redirector)
}

/// Check if a redirector has been published.
pub fn is_initialized() -> bool {
    GLOBAL_REDIRECTOR.get().is_some()
}

/// Get the published redirector.
pub fn get() -> Option<&'static Redirector> {
    GLOBAL_REDIRECTOR.get()
}

/// Dispatch a request against the published redirector.
///
/// Passes through when nothing has been published.
pub fn dispatch<B>(request: &mut Request<B>) -> Dispatch {
    match GLOBAL_REDIRECTOR.get() {
        Some(redirector) => redirector.dispatch(request),
        None => Dispatch::PassThrough,
    }
}
