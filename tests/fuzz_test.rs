/// Fuzzes the searches on many random grids: a path must be found exactly when the end lies
/// on the start's connected component, and the optimal searches must agree with a plain
/// distance flood fill on its length.
use grid_search::{
    path_is_valid, search, solver::GridSolver, solver::astar::AstarSolver,
    solver::bfs::BfsSolver, solver::dijkstra::DijkstraSolver, solver::greedy::GreedySolver,
    Algorithm, Coordinate, Grid,
};
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(n: usize, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(n, n).unwrap();
    let start = Coordinate::new(0, 0);
    let end = Coordinate::new(n - 1, n - 1);
    grid.set_start(start).unwrap();
    grid.set_end(end).unwrap();
    for row in 0..n {
        for col in 0..n {
            let p = Coordinate::new(row, col);
            if p != start && p != end {
                grid.set_wall(p, rng.gen_bool(0.4)).unwrap();
            }
        }
    }
    grid
}

/// Number of moves from `start` to `end`, found by flooding the grid.
fn flood_distance(grid: &Grid, start: Coordinate, end: Coordinate) -> Option<usize> {
    let mut distance = vec![None; grid.cell_count()];
    let mut queue = VecDeque::from([start]);
    distance[grid.index_of(start)?] = Some(0);
    while let Some(p) = queue.pop_front() {
        let d = distance[grid.index_of(p)?]?;
        for n in grid.neighbors(&p) {
            let ix = grid.index_of(n)?;
            if distance[ix].is_none() {
                distance[ix] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    distance[grid.index_of(end)?]
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Coordinate::new(0, 0);
    let end = Coordinate::new(N - 1, N - 1);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng);
        let reachable = grid.reachable(&start, &end);
        for algorithm in Algorithm::ALL {
            let path = search(algorithm, &grid, |_| {}).unwrap();
            // Show the grid if the result disagrees with the components
            if path.is_empty() == reachable {
                println!("{algorithm}:\n{grid}");
            }
            assert_eq!(!path.is_empty(), reachable);
            if reachable {
                assert!(path_is_valid(&grid, &path));
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Coordinate::new(0, 0);
    let end = Coordinate::new(N - 1, N - 1);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng);
        let Some(distance) = flood_distance(&grid, start, end) else {
            continue;
        };
        let bfs = BfsSolver.get_path(&grid).unwrap();
        let dijkstra = DijkstraSolver.get_path(&grid).unwrap();
        let astar = AstarSolver::new().get_path(&grid).unwrap();
        let greedy = GreedySolver.get_path(&grid).unwrap();
        for path in [&bfs, &dijkstra, &astar] {
            if path.len() != distance + 1 {
                println!("expected {} moves, got {path:?}\n{grid}", distance);
            }
            assert_eq!(path.len(), distance + 1);
        }
        assert!(greedy.len() >= astar.len());
        assert!(path_is_valid(&grid, &greedy));
    }
}

#[test]
fn fuzz_deterministic() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..200 {
        let grid = random_grid(N, &mut rng);
        for algorithm in Algorithm::ALL {
            let mut first = Vec::new();
            let mut second = Vec::new();
            let a = search(algorithm, &grid, |s| first.push(s.visiting())).unwrap();
            let b = search(algorithm, &grid, |s| second.push(s.visiting())).unwrap();
            assert_eq!(a, b);
            assert_eq!(first, second);
        }
    }
}
