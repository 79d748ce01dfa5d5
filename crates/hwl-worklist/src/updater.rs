use hwl_store::{RequestContext, StoreError};
use hwl_types::Hospital;

use crate::error::{WorklistError, WorklistResult};
use crate::nested;
use crate::reply::{Mutation, Reply};
use crate::service::Worklist;

impl Worklist {
    /// Load a hospital, let `mutate` transform it, and write it back if asked.
    ///
    /// Steps:
    /// 1. Load the hospital. Missing is `NotFound`; any other store error is
    ///    a backend failure.
    /// 2. Call `mutate` with the loaded hospital. An `Err` from the callback
    ///    is returned as-is and nothing is written.
    /// 3. If the callback set [`Mutation::persist`], write that hospital back
    ///    under `hospital_id`. A hospital deleted in the meantime is reported
    ///    as `NotFound`.
    /// 4. Return the callback's status and response.
    ///
    /// The read and the write happen in one call but are not isolated: no
    /// version is checked before the write-back, so a concurrent cycle on
    /// the same hospital can be overwritten.
    pub async fn apply_update<R, F>(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        mutate: F,
    ) -> WorklistResult<Reply<R>>
    where
        F: FnOnce(Hospital) -> WorklistResult<Mutation<R>>,
    {
        nested::require(hospital_id, "Hospital ID")?;
        let hospital = self.load_hospital(ctx, hospital_id, "Hospital not found").await?;

        let Mutation {
            persist,
            response,
            status,
        } = mutate(hospital)?;

        if let Some(mut updated) = persist {
            // the stored identity never changes
            updated.id = hospital_id.to_string();
            match self.store().update_document(ctx, hospital_id, &updated).await {
                Ok(()) => {
                    tracing::debug!(hospital = hospital_id, "hospital written back");
                }
                Err(StoreError::NotFound(_)) => {
                    tracing::warn!(hospital = hospital_id, "hospital removed during update");
                    return Err(WorklistError::not_found(
                        "Hospital was deleted while processing the request",
                    ));
                }
                Err(e) => {
                    tracing::error!(hospital = hospital_id, error = %e, "hospital write-back failed");
                    return Err(WorklistError::backend(
                        "Failed to update hospital in database",
                        e,
                    ));
                }
            }
        }

        Ok(Reply {
            status,
            body: response,
        })
    }

    /// Fetch one hospital, translating store errors into the worklist taxonomy.
    pub(crate) async fn load_hospital(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        not_found_message: &str,
    ) -> WorklistResult<Hospital> {
        match self.store().find_document(ctx, hospital_id).await {
            Ok(hospital) => Ok(hospital),
            Err(StoreError::NotFound(_)) => Err(WorklistError::not_found(not_found_message)),
            Err(e) => {
                tracing::error!(hospital = hospital_id, error = %e, "hospital load failed");
                Err(WorklistError::backend("Failed to load hospital from database", e))
            }
        }
    }
}
