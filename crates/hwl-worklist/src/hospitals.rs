//! Hospital-level operations: the aggregate itself.

use hwl_store::{RequestContext, StoreError};
use hwl_types::{generate_id, is_blank, Hospital};

use crate::error::{WorklistError, WorklistResult};
use crate::nested;
use crate::reply::{Mutation, Reply};
use crate::service::Worklist;

impl Worklist {
    /// Every stored hospital.
    pub async fn list_hospitals(&self, ctx: &RequestContext) -> WorklistResult<Reply<Vec<Hospital>>> {
        self.store()
            .list_documents(ctx)
            .await
            .map(Reply::ok)
            .map_err(|e| WorklistError::backend("Failed to list hospitals", e))
    }

    /// Store a new hospital. A blank id is replaced by a generated one.
    ///
    /// Employee entries sent along with the hospital get the same id rules
    /// as entries created one by one.
    pub async fn create_hospital(
        &self,
        ctx: &RequestContext,
        mut hospital: Hospital,
    ) -> WorklistResult<Reply<Hospital>> {
        if is_blank(&hospital.id) {
            hospital.id = generate_id();
        }
        let mut entries = nested::collect_unique(std::mem::take(&mut hospital.employee_list))?;
        for entry in &mut entries {
            if let Some(performances) = entry.performances.take() {
                entry.performances = Some(nested::collect_unique(performances)?);
            }
        }
        hospital.employee_list = entries;

        match self.store().create_document(ctx, &hospital.id, &hospital).await {
            Ok(()) => {
                tracing::info!(hospital = %hospital.id, "hospital created");
                Ok(Reply::created(hospital))
            }
            Err(StoreError::Conflict(_)) => Err(WorklistError::conflict("Hospital already exists")),
            Err(e) => Err(WorklistError::backend("Failed to create hospital in database", e)),
        }
    }

    pub async fn get_hospital(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
    ) -> WorklistResult<Reply<Hospital>> {
        self.apply_update(ctx, hospital_id, |hospital| Ok(Mutation::read(hospital)))
            .await
    }

    pub async fn delete_hospital(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
    ) -> WorklistResult<Reply<()>> {
        nested::require(hospital_id, "Hospital ID")?;
        match self.store().delete_document(ctx, hospital_id).await {
            Ok(()) => {
                tracing::info!(hospital = hospital_id, "hospital deleted");
                Ok(Reply::no_content())
            }
            Err(StoreError::NotFound(_)) => Err(WorklistError::not_found("Hospital not found")),
            Err(e) => Err(WorklistError::backend("Failed to delete hospital from database", e)),
        }
    }
}
