use grid_search::{Algorithm, Coordinate, Grid, Pathfinder};
use rand::{rngs::StdRng, SeedableRng};

// Compares the four searches on a seeded random 20x20 grid with 30% walls.

fn main() {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(7);
    let mut grid = Grid::new(20, 20).unwrap();
    grid.set_start(Coordinate::new(0, 0)).unwrap();
    grid.set_end(Coordinate::new(19, 19)).unwrap();
    let placed = grid.place_random_walls(30, &mut rng);
    println!("{} walls\n{}", placed, grid);
    for algorithm in Algorithm::ALL {
        let report = Pathfinder::new(algorithm).run_report(&grid, |_| {}).unwrap();
        let path = report.outcome.path();
        if path.is_empty() {
            println!("{}: no path after {} visits", algorithm, report.visits());
        } else {
            println!(
                "{}: {} moves, {} visits",
                algorithm,
                path.len() - 1,
                report.visits()
            );
        }
    }
}
