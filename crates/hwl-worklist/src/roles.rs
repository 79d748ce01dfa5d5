use hwl_store::RequestContext;
use hwl_types::Role;

use crate::error::WorklistResult;
use crate::reply::{Mutation, Reply};
use crate::service::Worklist;

impl Worklist {
    /// The predefined roles of a hospital. Read-only.
    pub async fn list_roles(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
    ) -> WorklistResult<Reply<Vec<Role>>> {
        self.apply_update(ctx, hospital_id, |hospital| {
            Ok(Mutation::read(hospital.predefined_roles))
        })
        .await
    }
}
