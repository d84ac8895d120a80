//! Scoped Session Acquisition
//!
//! Every public operation opens its own session and releases it before
//! returning, whether the body succeeded or not.

use tracing::{debug, warn};

use crate::domain::ports::{DeployEvent, DeployEventSink, RemoteSession, SessionProvider};
use crate::error::SshIndexResult;

/// Connect, run `body`, and close the session
///
/// On success the session is closed explicitly. If `body` fails the
/// session is dropped, which releases it. A failed close after a
/// successful body is logged and does not undo the result.
pub fn with_session<P, T, F>(
    provider: &P,
    events: &dyn DeployEventSink,
    body: F,
) -> SshIndexResult<T>
where
    P: SessionProvider + ?Sized,
    F: FnOnce(&mut dyn RemoteSession) -> SshIndexResult<T>,
{
    let destination = provider.destination();
    events.on_event(DeployEvent::Connecting {
        destination: destination.clone(),
    });

    let mut session = provider.connect()?;
    debug!(%destination, "session open");

    let value = body(session.as_mut())?;

    if let Err(e) = session.close() {
        warn!(%destination, error = %e, "failed to close session cleanly");
    }
    debug!(%destination, "session closed");
    Ok(value)
}
