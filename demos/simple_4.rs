use grid_search::{search, Algorithm, Grid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S..|
// |.#.|
// |..E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let grid: Grid = "S..\n.#.\n..E".parse().unwrap();
    println!("{}", grid);
    for algorithm in Algorithm::ALL {
        let mut visits = 0;
        let path = search(algorithm, &grid, |_| visits += 1).unwrap();
        println!("{} ({} visits):", algorithm, visits);
        for p in &path {
            println!("{}", p);
        }
        println!("{}", grid.with_path(&path));
    }
}
