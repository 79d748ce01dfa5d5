//! Moving an employee entry from one hospital to another.

use hwl_store::RequestContext;
use hwl_types::{is_blank, EmployeeListEntry};

use crate::error::{WorklistError, WorklistResult};
use crate::nested;
use crate::reply::Reply;
use crate::service::Worklist;

impl Worklist {
    /// Move `entry_id` from `source_id` to the end of `target_id`'s list.
    ///
    /// This is two independent writes, source first, with no rollback:
    ///
    /// 1. Remove the entry from the source and persist the source. If this
    ///    write fails nothing has changed.
    /// 2. Load the target, append the entry, persist the target. If the
    ///    target is missing or this write fails, the entry is already gone
    ///    from the source and is lost.
    ///
    /// Retrying after a failed second write can duplicate the entry in the
    /// target if that write had in fact succeeded.
    pub async fn transfer_entry(
        &self,
        ctx: &RequestContext,
        source_id: &str,
        entry_id: &str,
        target_id: &str,
    ) -> WorklistResult<Reply<EmployeeListEntry>> {
        if [source_id, entry_id, target_id].into_iter().any(is_blank) {
            return Err(WorklistError::bad_request(
                "hospitalId, entryId and targetHospitalId are required",
            ));
        }

        let mut source = self
            .load_hospital(ctx, source_id, "source hospital not found")
            .await?;
        let entry = nested::remove(&mut source.employee_list, entry_id)
            .map_err(|_| WorklistError::not_found("entry not found in source hospital"))?;

        self.store()
            .update_document(ctx, source_id, &source)
            .await
            .map_err(|e| {
                tracing::error!(hospital = source_id, error = %e, "transfer aborted before any change");
                WorklistError::backend("failed to update source hospital", e)
            })?;

        let mut target = match self
            .load_hospital(ctx, target_id, "target hospital not found")
            .await
        {
            Ok(target) => target,
            Err(err) => {
                tracing::warn!(
                    source = source_id,
                    target = target_id,
                    entry = entry_id,
                    "entry removed from source but target unavailable; entry lost"
                );
                return Err(err);
            }
        };

        if nested::position(&target.employee_list, entry_id).is_some() {
            tracing::warn!(target = target_id, entry = entry_id, "target already holds an entry with this id");
        }
        target.employee_list.push(entry.clone());

        if let Err(e) = self.store().update_document(ctx, target_id, &target).await {
            tracing::warn!(
                source = source_id,
                target = target_id,
                entry = entry_id,
                error = %e,
                "entry removed from source but target write failed; entry lost"
            );
            return Err(WorklistError::backend("failed to update target hospital", e));
        }

        tracing::info!(source = source_id, target = target_id, entry = entry_id, "entry transferred");
        Ok(Reply::ok(entry))
    }
}
