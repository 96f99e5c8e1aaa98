//! Fire-and-forget audit trail recording.

use mockable::Clock;
use tracing::warn;

use crate::todo::{
    domain::{AuditAction, AuditLog, IssueId, UserId},
    ports::AuditLedger,
};

/// Appends an audit entry, logging instead of failing when storage refuses.
pub(crate) async fn record<A>(
    ledger: &A,
    clock: &(impl Clock + Sync),
    issue: IssueId,
    user: &UserId,
    action: AuditAction,
    metadata: Option<String>,
) where
    A: AuditLedger + ?Sized,
{
    let entry = AuditLog::record(issue, user.clone(), action, metadata, clock);
    if let Err(err) = ledger.append_audit_log(&entry).await {
        warn!(
            %issue,
            %user,
            action = action.as_str(),
            error = %err,
            "failed to record audit log"
        );
    }
}
