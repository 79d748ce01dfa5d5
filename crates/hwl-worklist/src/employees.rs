//! Employee entries of a hospital's worklist.

use hwl_store::RequestContext;
use hwl_types::{is_blank, needs_generated_id, EmployeeListEntry};

use crate::error::{WorklistError, WorklistResult};
use crate::nested;
use crate::reply::{Mutation, Reply};
use crate::service::Worklist;

impl Worklist {
    /// All employee entries of a hospital (empty when it has none).
    pub async fn list_entries(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
    ) -> WorklistResult<Reply<Vec<EmployeeListEntry>>> {
        self.apply_update(ctx, hospital_id, |hospital| {
            Ok(Mutation::read(hospital.employee_list))
        })
        .await
    }

    pub async fn get_entry(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        entry_id: &str,
    ) -> WorklistResult<Reply<EmployeeListEntry>> {
        nested::require(entry_id, "Entry ID")?;
        self.apply_update(ctx, hospital_id, |hospital| {
            let entry = nested::find(&hospital.employee_list, entry_id)?.clone();
            Ok(Mutation::read(entry))
        })
        .await
    }

    /// Add an employee entry. A blank or `@new` id is replaced by a generated
    /// one; an id already on the list is a `Conflict`.
    pub async fn create_entry(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        mut entry: EmployeeListEntry,
    ) -> WorklistResult<Reply<EmployeeListEntry>> {
        nested::require(&entry.name, "Entry name")?;
        if let Some(performances) = entry.performances.take() {
            entry.performances = Some(nested::collect_unique(performances)?);
        }
        self.apply_update(ctx, hospital_id, |mut hospital| {
            let stored = nested::insert(&mut hospital.employee_list, entry)?;
            tracing::info!(hospital = %hospital.id, entry = %stored.id, "employee entry created");
            Ok(Mutation::write(hospital, stored))
        })
        .await
    }

    /// Patch an employee entry.
    ///
    /// `id`, `name`, `role.value` and `role.code` are overwritten only when
    /// the request carries a non-empty value, and `performances` only when
    /// present. `performance` (the current rating) is always overwritten,
    /// so a request without it clears the stored rating.
    pub async fn update_entry(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        entry_id: &str,
        patch: EmployeeListEntry,
    ) -> WorklistResult<Reply<EmployeeListEntry>> {
        nested::require(entry_id, "Entry ID")?;
        self.apply_update(ctx, hospital_id, |mut hospital| {
            let list = &mut hospital.employee_list;
            nested::find(list, entry_id)?;

            let renamed_to = (!is_blank(&patch.id) && !needs_generated_id(&patch.id)
                && patch.id != entry_id)
                .then(|| patch.id.clone());
            if let Some(new_id) = &renamed_to {
                if nested::position(list, new_id).is_some() {
                    return Err(WorklistError::conflict("Entry already exists"));
                }
            }

            let target = nested::find_mut(list, entry_id)?;
            apply_patch(target, patch)?;
            if let Some(new_id) = renamed_to {
                target.id = new_id;
            }
            let updated = target.clone();
            Ok(Mutation::write(hospital, updated))
        })
        .await
    }

    pub async fn delete_entry(
        &self,
        ctx: &RequestContext,
        hospital_id: &str,
        entry_id: &str,
    ) -> WorklistResult<Reply<()>> {
        nested::require(entry_id, "Entry ID")?;
        self.apply_update(ctx, hospital_id, |mut hospital| {
            nested::remove(&mut hospital.employee_list, entry_id)?;
            Ok(Mutation::write_no_content(hospital))
        })
        .await
    }
}

/// Field-by-field patch of everything except the id.
fn apply_patch(target: &mut EmployeeListEntry, patch: EmployeeListEntry) -> WorklistResult<()> {
    if !patch.name.is_empty() {
        target.name = patch.name;
    }
    if !patch.role.value.is_empty() {
        target.role.value = patch.role.value;
    }
    if !patch.role.code.is_empty() {
        target.role.code = patch.role.code;
    }
    // Intentionally unconditional, unlike the fields above.
    target.performance = patch.performance;
    if let Some(performances) = patch.performances {
        target.performances = Some(nested::collect_unique(performances)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::Status;
    use crate::testing::{ctx, worklist_with};
    use hwl_types::{Hospital, PerformanceEntry, Role, NEW_ENTRY_ID};

    fn nurse() -> Role {
        Role::new("Nurse", "checkup")
    }

    fn seeded() -> Vec<Hospital> {
        vec![Hospital::new("h1")
            .with_entry(
                EmployeeListEntry::new("e1", "Ana")
                    .with_role(nurse())
                    .with_performance(4.0)
                    .with_performances(vec![PerformanceEntry::new("p1")]),
            )
            .with_entry(EmployeeListEntry::new("e2", "Bob"))]
    }

    #[tokio::test]
    async fn list_entries_of_empty_hospital() {
        let (worklist, _store) = worklist_with(vec![Hospital::new("h1")]);
        let reply = worklist.list_entries(&ctx(), "h1").await.unwrap();
        assert_eq!(reply, Reply::ok(Vec::new()));
    }

    #[tokio::test]
    async fn get_entry_found_and_missing() {
        let (worklist, _store) = worklist_with(seeded());
        let reply = worklist.get_entry(&ctx(), "h1", "e2").await.unwrap();
        assert_eq!(reply.body.unwrap().name, "Bob");

        let err = worklist.get_entry(&ctx(), "h1", "e9").await.unwrap_err();
        assert!(matches!(err, WorklistError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_with_placeholder_generates_id() {
        let (worklist, store) = worklist_with(seeded());
        let reply = worklist
            .create_entry(&ctx(), "h1", EmployeeListEntry::new(NEW_ENTRY_ID, "Cyril"))
            .await
            .unwrap();
        assert_eq!(reply.status, Status::Ok);
        let created = reply.body.unwrap();
        assert_ne!(created.id, NEW_ENTRY_ID);
        assert_eq!(store.get("h1").await.unwrap().entry(&created.id), Some(&created));
    }

    #[tokio::test]
    async fn create_with_existing_id_conflicts_and_keeps_hospital() {
        let (worklist, store) = worklist_with(seeded());
        let before = store.get("h1").await.unwrap();
        let err = worklist
            .create_entry(&ctx(), "h1", EmployeeListEntry::new("e1", "Impostor"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorklistError::Conflict(_)));
        assert_eq!(store.get("h1").await.unwrap(), before);
        assert_eq!(store.update_calls(), 0);
    }

    #[tokio::test]
    async fn create_requires_name() {
        let (worklist, _store) = worklist_with(seeded());
        let err = worklist
            .create_entry(&ctx(), "h1", EmployeeListEntry::new("", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, WorklistError::BadRequest(_)));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_performance_ids() {
        let (worklist, _store) = worklist_with(seeded());
        let entry = EmployeeListEntry::new("", "Dana").with_performances(vec![
            PerformanceEntry::new("p1"),
            PerformanceEntry::new("p1"),
        ]);
        let err = worklist.create_entry(&ctx(), "h1", entry).await.unwrap_err();
        assert!(matches!(err, WorklistError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_leaves_omitted_fields_untouched() {
        let (worklist, _store) = worklist_with(seeded());
        let patch = EmployeeListEntry {
            name: "Ana Maria".into(),
            performance: Some(4.0),
            ..EmployeeListEntry::default()
        };
        let updated = worklist
            .update_entry(&ctx(), "h1", "e1", patch)
            .await
            .unwrap()
            .body
            .unwrap();
        assert_eq!(updated.id, "e1");
        assert_eq!(updated.name, "Ana Maria");
        assert_eq!(updated.role, nurse());
        assert_eq!(updated.performances.unwrap().len(), 1);
    }

    // Intentional but surprising: the rating is overwritten even when the
    // request omits it.
    #[tokio::test]
    async fn update_always_overwrites_performance_rating() {
        let (worklist, store) = worklist_with(seeded());
        let patch = EmployeeListEntry {
            name: "Ana".into(),
            ..EmployeeListEntry::default()
        };
        worklist.update_entry(&ctx(), "h1", "e1", patch).await.unwrap();

        let stored = store.get("h1").await.unwrap();
        assert_eq!(stored.entry("e1").unwrap().performance, None);
        assert_eq!(stored.entry("e1").unwrap().role, nurse());
    }

    #[tokio::test]
    async fn update_partial_role() {
        let (worklist, _store) = worklist_with(seeded());
        let patch = EmployeeListEntry {
            role: Role::new("Doctor", ""),
            ..EmployeeListEntry::default()
        };
        let updated = worklist
            .update_entry(&ctx(), "h1", "e1", patch)
            .await
            .unwrap()
            .body
            .unwrap();
        assert_eq!(updated.role, Role::new("Doctor", "checkup"));
    }

    #[tokio::test]
    async fn update_can_rename_but_not_onto_existing_id() {
        let (worklist, store) = worklist_with(seeded());
        let err = worklist
            .update_entry(&ctx(), "h1", "e1", EmployeeListEntry::new("e2", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, WorklistError::Conflict(_)));

        worklist
            .update_entry(&ctx(), "h1", "e1", EmployeeListEntry::new("e7", ""))
            .await
            .unwrap();
        let stored = store.get("h1").await.unwrap();
        assert!(stored.entry("e1").is_none());
        assert_eq!(stored.entry("e7").unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn update_missing_entry_is_not_found() {
        let (worklist, store) = worklist_with(seeded());
        let err = worklist
            .update_entry(&ctx(), "h1", "e9", EmployeeListEntry::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WorklistError::NotFound(_)));
        assert_eq!(store.update_calls(), 0);
    }

    #[tokio::test]
    async fn delete_missing_entry_leaves_hospital_unchanged() {
        let (worklist, store) = worklist_with(seeded());
        let before = store.get("h1").await.unwrap();
        let err = worklist.delete_entry(&ctx(), "h1", "e9").await.unwrap_err();
        assert!(matches!(err, WorklistError::NotFound(_)));
        assert_eq!(store.get("h1").await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_keeps_order_of_remaining_entries() {
        let (worklist, store) = worklist_with(vec![Hospital::new("h1")
            .with_entry(EmployeeListEntry::new("a", "A"))
            .with_entry(EmployeeListEntry::new("b", "B"))
            .with_entry(EmployeeListEntry::new("c", "C"))]);
        let reply = worklist.delete_entry(&ctx(), "h1", "b").await.unwrap();
        assert_eq!(reply, Reply::no_content());

        let ids: Vec<String> = store
            .get("h1")
            .await
            .unwrap()
            .employee_list
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn example_scenario() {
        let (worklist, _store) = worklist_with(vec![Hospital::new("H1")]);

        let created = worklist
            .create_entry(&ctx(), "H1", EmployeeListEntry::new("", "Ana"))
            .await
            .unwrap()
            .body
            .unwrap();
        let e1 = created.id.clone();
        assert!(!e1.is_empty());

        let err = worklist
            .create_entry(&ctx(), "H1", EmployeeListEntry::new(e1.clone(), "Bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorklistError::Conflict(_)));

        let patch = EmployeeListEntry {
            performance: Some(0.0),
            ..EmployeeListEntry::default()
        };
        let updated = worklist
            .update_entry(&ctx(), "H1", &e1, patch)
            .await
            .unwrap()
            .body
            .unwrap();
        assert_eq!(updated.performance, Some(0.0));
        assert_eq!(updated.name, "Ana");

        worklist.delete_entry(&ctx(), "H1", &e1).await.unwrap();
        let err = worklist.get_entry(&ctx(), "H1", &e1).await.unwrap_err();
        assert!(matches!(err, WorklistError::NotFound(_)));
    }
}
