//! Grid search demo
//!
//! Builds a grid with a wall across the middle and finds a path around it with
//! Dijkstra and A*, printing how many nodes each search reached.
//!
//! ```bash
//! RUST_LOG=rust_dary_heap=debug cargo run --example grid_search
//! ```

use rust_dary_heap::pathfinding::{Graph, NodeId, PathFinderBuilder, SearchResult};
use rust_dary_heap::{HeapError, HeapResult};
use tracing_subscriber::EnvFilter;

const SIZE: i32 = 20;

fn build_grid() -> HeapResult<Graph<(i32, i32), u32>> {
    let is_wall = |x: i32, y: i32| x == SIZE / 2 && y < SIZE - 2;

    let mut graph = Graph::new();
    for y in 0..SIZE {
        for x in 0..SIZE {
            graph.add_node((x, y));
        }
    }
    for y in 0..SIZE {
        for x in 0..SIZE {
            if is_wall(x, y) {
                continue;
            }
            let Some(from) = graph.node_id(&(x, y)) else {
                continue;
            };
            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let (nx, ny) = (x + dx, y + dy);
                if !(0..SIZE).contains(&nx) || !(0..SIZE).contains(&ny) || is_wall(nx, ny) {
                    continue;
                }
                if let Some(to) = graph.node_id(&(nx, ny)) {
                    graph.add_edge(from, to, 1)?;
                }
            }
        }
    }
    Ok(graph)
}

fn reached(result: &SearchResult<u32>) -> usize {
    (0..result.distances.len())
        .filter(|&node| result.is_reached(node))
        .count()
}

fn main() -> Result<(), HeapError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let graph = build_grid()?;
    let (Some(start), Some(goal)) = (graph.node_id(&(0, 0)), graph.node_id(&(SIZE - 1, 0)))
    else {
        return Err(HeapError::ElementNotFound);
    };
    let is_goal = move |id: NodeId, _: &(i32, i32)| id == goal;
    let heuristic = |_: NodeId, &(x, y): &(i32, i32)| ((SIZE - 1 - x).abs() + y.abs()) as u32;

    for d in [2, 4, 8] {
        let dijkstra = PathFinderBuilder::new(&graph, start)
            .branching_factor(d)
            .dijkstra(is_goal);
        let a_star = PathFinderBuilder::new(&graph, start)
            .branching_factor(d)
            .a_star(is_goal, heuristic);

        match (dijkstra, a_star) {
            (Ok(dijkstra), Ok(a_star)) => {
                println!(
                    "d={d}: cost {:?} / {:?}, reached {} nodes with Dijkstra, {} with A*",
                    dijkstra.distance(goal),
                    a_star.distance(goal),
                    reached(&dijkstra),
                    reached(&a_star),
                );
                if let Some(path) = a_star.path_to(goal) {
                    println!("  path has {} steps", path.len() - 1);
                }
            }
            (Err(err), _) | (_, Err(err)) => eprintln!("d={d}: search failed: {err}"),
        }
    }
    Ok(())
}
