use aerocloth::{Aerodynamics, ClothGrid, ClothSolver, GridConfig, NoOpStepObserver, SolverConfig, Vec3};

fn run_cloth() -> Vec<Vec3<f32>> {
    let grid = ClothGrid::build(Vec3::zero(), &GridConfig::new(16, 16)).unwrap();
    let config = SolverConfig::new()
        .with_iterations(12)
        .with_aerodynamics(Aerodynamics::new().with_wind(Vec3::new(1.5, 0.0, -8.0)).with_lift(0.2));
    let mut solver = ClothSolver::new(grid, config).unwrap();
    for _ in 0..90 {
        solver.step(&mut NoOpStepObserver).unwrap();
    }
    solver.positions()
}

#[test]
fn cloth_deterministic() {
    let results: Vec<_> = (0..3).map(|_| run_cloth()).collect();

    for r in &results[1..] {
        for (a, b) in results[0].iter().zip(r.iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
    }
}
