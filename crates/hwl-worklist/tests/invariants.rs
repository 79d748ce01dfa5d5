//! Id uniqueness holds after arbitrary sequences of nested operations.

use std::collections::HashSet;
use std::sync::Arc;

use hwl_store::{DocumentStore, InMemoryDocumentStore, RequestContext};
use hwl_types::{EmployeeListEntry, Hospital, PerformanceEntry};
use hwl_worklist::Worklist;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    CreateEntry(Option<u8>),
    UpdateEntry { target: u8, rename: Option<u8> },
    DeleteEntry(u8),
    CreatePerformance { entry: u8, id: Option<u8> },
    ReplacePerformances { entry: u8, ids: Vec<Option<u8>> },
    DeletePerformance { entry: u8, id: u8 },
}

fn small_id() -> impl Strategy<Value = u8> {
    0u8..5
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        proptest::option::of(small_id()).prop_map(Op::CreateEntry),
        (small_id(), proptest::option::of(small_id()))
            .prop_map(|(target, rename)| Op::UpdateEntry { target, rename }),
        small_id().prop_map(Op::DeleteEntry),
        (small_id(), proptest::option::of(small_id()))
            .prop_map(|(entry, id)| Op::CreatePerformance { entry, id }),
        (small_id(), proptest::collection::vec(proptest::option::of(small_id()), 0..4))
            .prop_map(|(entry, ids)| Op::ReplacePerformances { entry, ids }),
        (small_id(), small_id()).prop_map(|(entry, id)| Op::DeletePerformance { entry, id }),
    ]
}

fn entry_id(n: u8) -> String {
    format!("e{n}")
}

fn perf_id(n: Option<u8>) -> String {
    n.map(|n| format!("p{n}")).unwrap_or_else(|| "@new".to_string())
}

async fn run(worklist: &Worklist, ctx: &RequestContext, op: Op) {
    // Rejected operations are expected; only the stored state matters.
    let _ = match op {
        Op::CreateEntry(id) => {
            let id = id.map(entry_id).unwrap_or_default();
            worklist
                .create_entry(ctx, "h", EmployeeListEntry::new(id, "name"))
                .await
                .map(|_| ())
        }
        Op::UpdateEntry { target, rename } => {
            let patch = EmployeeListEntry::new(rename.map(entry_id).unwrap_or_default(), "renamed");
            worklist
                .update_entry(ctx, "h", &entry_id(target), patch)
                .await
                .map(|_| ())
        }
        Op::DeleteEntry(target) => worklist
            .delete_entry(ctx, "h", &entry_id(target))
            .await
            .map(|_| ()),
        Op::CreatePerformance { entry, id } => worklist
            .create_performance(ctx, "h", &entry_id(entry), PerformanceEntry::new(perf_id(id)))
            .await
            .map(|_| ()),
        Op::ReplacePerformances { entry, ids } => {
            let patch = EmployeeListEntry::default().with_performances(
                ids.into_iter().map(|id| PerformanceEntry::new(perf_id(id))).collect(),
            );
            worklist
                .update_entry(ctx, "h", &entry_id(entry), patch)
                .await
                .map(|_| ())
        }
        Op::DeletePerformance { entry, id } => worklist
            .delete_performance(ctx, "h", &entry_id(entry), &perf_id(Some(id)))
            .await
            .map(|_| ()),
    };
}

fn assert_unique(hospital: &Hospital) {
    let mut entry_ids = HashSet::new();
    for entry in &hospital.employee_list {
        assert!(entry_ids.insert(entry.id.clone()), "duplicate entry id {}", entry.id);
        let mut perf_ids = HashSet::new();
        for perf in entry.performances.iter().flatten() {
            assert!(perf_ids.insert(perf.id.clone()), "duplicate performance id {}", perf.id);
        }
    }
}

proptest! {
    #[test]
    fn ids_stay_unique(ops in proptest::collection::vec(op(), 1..40)) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let store = Arc::new(InMemoryDocumentStore::with_documents([(
                "h".to_string(),
                Hospital::new("h"),
            )]));
            let worklist = Worklist::new(store.clone());
            let ctx = RequestContext::background();

            for op in ops {
                run(&worklist, &ctx, op).await;
                let hospital = store.find_document(&ctx, "h").await.unwrap();
                assert_unique(&hospital);
            }
        });
    }
}
