use crate::models::notice::Notice;
use crate::models::state::SessionSnapshot;

/// Event delegate for session notifications.
///
/// Methods are called from whichever task completed the operation.
/// Implementations should marshal to the UI thread if needed.
pub trait SessionDelegate: Send + Sync {
    /// Called after every applied state change.
    fn on_state_changed(&self, snapshot: &SessionSnapshot);

    /// Called when a one-shot notice should be shown to the user.
    fn on_notice(&self, notice: &Notice);
}
