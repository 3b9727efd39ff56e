mod common;

use std::sync::Arc;
use std::thread;

use geosearch_lib::{SearchAlgorithm, SearchEngine};

use common::fixture_with_heuristics;

#[test]
fn searches_share_one_graph_across_threads() {
    let (graph, heuristics) = fixture_with_heuristics();
    let graph = Arc::new(graph);
    let heuristics = Arc::new(heuristics);
    let engine = Arc::new(SearchEngine::default());

    let expected = engine
        .search(&graph, Some(&*heuristics), SearchAlgorithm::AStar, "Hays", "Anthony")
        .expect("search runs")
        .path;

    let handles: Vec<_> = SearchAlgorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let graph = Arc::clone(&graph);
            let heuristics = Arc::clone(&heuristics);
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .search(&graph, Some(&*heuristics), algorithm, "Hays", "Anthony")
                    .map(|result| (algorithm, result.path))
            })
        })
        .collect();

    for handle in handles {
        let (algorithm, path) = handle
            .join()
            .expect("thread completes")
            .expect("search runs");
        let path = path.expect("route exists");
        assert_eq!(path.first().map(String::as_str), Some("Hays"), "{algorithm}");
        assert_eq!(path.last().map(String::as_str), Some("Anthony"), "{algorithm}");
    }

    // Repeated runs on the shared graph are deterministic.
    let again = engine
        .search(&graph, Some(&*heuristics), SearchAlgorithm::AStar, "Hays", "Anthony")
        .expect("search runs")
        .path;
    assert_eq!(again, expected);
}
