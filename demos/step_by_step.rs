use grid_search::{
    solver::astar::AstarSolver, Algorithm, Coordinate, Grid, Outcome, Pathfinder, Search, Step,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// Watches searches unfold one visited cell at a time. The search never sleeps on its own;
// pacing the animation is up to the observer.

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let grid: Grid = "\
        S.........
        .####.#.#.
        .#....#.#.
        .#.####.#.
        ...#....#E"
        .parse()
        .unwrap();

    // Driving a search directly
    let mut search = Search::new(AstarSolver::new(), &grid).unwrap();
    while let Step::Visited(p) = search.step() {
        println!("visit {}: {}\n{}", search.visits(), p, search.snapshot());
        thread::sleep(Duration::from_millis(50));
    }
    println!("{:?} after {} visits", search.state(), search.visits());
    println!("{}", grid.with_path(&search.path()));

    // Letting a pathfinder drive, cancelled halfway by the observer
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    let target = Coordinate::new(4, 2);
    let outcome = Pathfinder::new(Algorithm::Bfs)
        .with_cancel_signal(cancel)
        .run(&grid, |snapshot| {
            if snapshot.visiting() == Some(target) {
                flag.store(true, Ordering::Relaxed);
            }
        })
        .unwrap();
    assert_eq!(outcome, Outcome::Cancelled);
    println!("BFS stopped once it reached {}", target);
}
