use criterion::{criterion_group, criterion_main, Criterion};
use geosearch_lib::{
    load_dataset, DatasetPaths, GreatCircle, HeuristicTable, LocationGraph, NullMetrics,
    SearchAlgorithm, SearchEngine,
};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_paths() -> DatasetPaths {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures");
    DatasetPaths::new(dir.join("coordinates.csv"), dir.join("adjacencies.txt"))
}

static GRAPH: Lazy<LocationGraph> = Lazy::new(|| {
    load_dataset(&fixture_paths(), &GreatCircle)
        .expect("fixture loads")
        .0
});
static HEURISTICS: Lazy<HeuristicTable> =
    Lazy::new(|| HeuristicTable::from_graph(&GRAPH, &GreatCircle));
static ENGINE: Lazy<SearchEngine> =
    Lazy::new(|| SearchEngine::default().with_metrics(Arc::new(NullMetrics)));

fn benchmark_search(c: &mut Criterion) {
    let graph = &*GRAPH;
    let heuristics = &*HEURISTICS;
    let engine = &*ENGINE;

    for algorithm in SearchAlgorithm::ALL {
        c.bench_function(&format!("{algorithm}_manhattan_anthony"), |b| {
            b.iter(|| {
                let result = engine
                    .search(graph, Some(heuristics), algorithm, "Manhattan", "Anthony")
                    .expect("route exists");
                black_box(result.explored.len())
            });
        });
    }

    c.bench_function("heuristic_table_compute", |b| {
        b.iter(|| {
            let table = HeuristicTable::from_graph(graph, &GreatCircle);
            black_box(table.len())
        });
    });
}

criterion_group!(benches, benchmark_search);
criterion_main!(benches);
