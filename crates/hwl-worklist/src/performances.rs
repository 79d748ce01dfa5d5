//! Performance entries nested inside an employee entry.

use hwl_store::RequestContext;
use hwl_types::PerformanceEntry;
use serde_json::Value;

use crate::error::{WorklistError, WorklistResult};
use crate::nested;
use crate::reply::{Mutation, Reply};
use crate::service::Worklist;

impl Worklist {
    /// All performance entries of one employee (empty when it has none).
    pub async fn list_performances(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        entry_id: &str,
    ) -> WorklistResult<Reply<Vec<PerformanceEntry>>> {
        nested::require(entry_id, "Entry ID")?;
        self.apply_update(ctx, hospital_id, |hospital| {
            let entry = nested::find(&hospital.employee_list, entry_id)?;
            Ok(Mutation::read(entry.performances.clone().unwrap_or_default()))
        })
        .await
    }

    pub async fn get_performance(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        entry_id: &str,
        performance_id: &str,
    ) -> WorklistResult<Reply<PerformanceEntry>> {
        require_ids(entry_id, performance_id)?;
        self.apply_update(ctx, hospital_id, |hospital| {
            let entry = nested::find(&hospital.employee_list, entry_id)?;
            let performances = entry.performances.as_deref().unwrap_or_default();
            let performance = nested::find(performances, performance_id)?.clone();
            Ok(Mutation::read(performance))
        })
        .await
    }

    pub async fn create_performance(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        entry_id: &str,
        performance: PerformanceEntry,
    ) -> WorklistResult<Reply<PerformanceEntry>> {
        nested::require(entry_id, "Entry ID")?;
        self.apply_update(ctx, hospital_id, |mut hospital| {
            let entry = nested::find_mut(&mut hospital.employee_list, entry_id)?;
            let performances = entry.performances.get_or_insert_with(Vec::new);
            let stored = nested::insert(performances, performance)?;
            Ok(Mutation::write(hospital, stored))
        })
        .await
    }

    /// Patch a performance entry.
    ///
    /// The body must carry the same id as the path. Members of the body that
    /// are present and non-empty overwrite the stored ones; the rest of the
    /// stored entry is kept.
    pub async fn update_performance(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        entry_id: &str,
        performance_id: &str,
        patch: PerformanceEntry,
    ) -> WorklistResult<Reply<PerformanceEntry>> {
        require_ids(entry_id, performance_id)?;
        if patch.id != performance_id {
            return Err(WorklistError::bad_request(
                "Performance ID in path does not match ID in body",
            ));
        }
        self.apply_update(ctx, hospital_id, |mut hospital| {
            let entry = nested::find_mut(&mut hospital.employee_list, entry_id)?;
            let performances = entry.performances.get_or_insert_with(Vec::new);
            let target = nested::find_mut(performances, performance_id)?;
            merge_fields(target, patch);
            let updated = target.clone();
            Ok(Mutation::write(hospital, updated))
        })
        .await
    }

    pub async fn delete_performance(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        entry_id: &str,
        performance_id: &str,
    ) -> WorklistResult<Reply<()>> {
        require_ids(entry_id, performance_id)?;
        self.apply_update(ctx, hospital_id, |mut hospital| {
            let entry = nested::find_mut(&mut hospital.employee_list, entry_id)?;
            let performances = entry.performances.get_or_insert_with(Vec::new);
            nested::remove(performances, performance_id)?;
            Ok(Mutation::write_no_content(hospital))
        })
        .await
    }
}

fn require_ids(entry_id: &str, performance_id: &str) -> WorklistResult<()> {
    nested::require(entry_id, "Entry ID")?;
    nested::require(performance_id, "Performance ID")
}

fn merge_fields(target: &mut PerformanceEntry, patch: PerformanceEntry) {
    for (key, value) in patch.fields {
        if !is_empty_value(&value) {
            target.fields.insert(key, value);
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
