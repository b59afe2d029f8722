use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use chrono::Utc;
use partkeep_core::PartId;
use partkeep_ledger::{InMemoryPartStore, Ledger, MovementKind, PartSpec};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Naive CRUD simulation: direct key-value quantity updates, no history and
/// no per-part locking. Baseline for the overhead of the ledger cycle.
#[derive(Debug, Clone)]
struct NaiveCrudStore {
    inner: Arc<RwLock<HashMap<PartId, i64>>>,
}

impl NaiveCrudStore {
    fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn create(&self, id: PartId, quantity: i64) {
        let mut map = self.inner.write().unwrap();
        map.insert(id, quantity);
    }

    fn adjust(&self, id: PartId, delta: i64) -> Result<(), ()> {
        let mut map = self.inner.write().unwrap();
        if let Some(quantity) = map.get_mut(&id) {
            let next = *quantity + delta;
            if next < 0 {
                return Err(());
            }
            *quantity = next;
            Ok(())
        } else {
            Err(())
        }
    }
}

fn bench_spec() -> PartSpec {
    PartSpec {
        name: "Bench Part".to_string(),
        part_number: "BENCH-001".to_string(),
        description: String::new(),
        category: "Bench".to_string(),
        supplier: "Acme".to_string(),
        location: "A1".to_string(),
        quantity: 1_000_000,
        min_stock: 0,
        max_stock: 0,
    }
}

fn bench_movement_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement_latency");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ledger_apply_movement", |b| {
        let ledger = Ledger::new(InMemoryPartStore::new());
        let part = ledger.create_part(bench_spec()).unwrap();
        let id = part.id();
        b.iter(|| {
            ledger
                .apply_movement(black_box(id), black_box(1), MovementKind::In, Utc::now())
                .unwrap()
        });
    });

    group.bench_function("naive_crud_adjust", |b| {
        let store = NaiveCrudStore::new();
        let id = PartId::new();
        store.create(id, 1_000_000);
        b.iter(|| store.adjust(black_box(id), black_box(1)).unwrap());
    });

    group.finish();
}

fn bench_opname(c: &mut Criterion) {
    c.bench_function("stock_opname_noop", |b| {
        let ledger = Ledger::new(InMemoryPartStore::new());
        let part = ledger.create_part(bench_spec()).unwrap();
        let id = part.id();
        let quantity = part.quantity();
        b.iter(|| {
            ledger
                .apply_stock_opname(black_box(id), black_box(quantity), Utc::now())
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_movement_latency, bench_opname);
criterion_main!(benches);
