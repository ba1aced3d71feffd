//! Simulates a single undriven revolute pendulum under gravity and prints its trajectory.

use dynamics_rs::prelude::*;

fn main() {
    let mut world = World::new(UnitSystem::MKS, Vec3::new(0.0, -9.80665, 0.0));

    let rod = world
        .new_revolute(Pose::identity(), Vec3::z())
        .expect("unit axis");
    let joint = world.joint_mut(rod);
    let length = 0.30;
    let i_zz = (0.02_f64.powi(2) + length.powi(2)) / 12.0;
    joint.add_mass_properties(
        1.0,
        Vec3::new(length / 2.0 - 0.005, 0.0, 0.0),
        Mat3::symmetric(i_zz, i_zz, i_zz, 0.0, 0.0, 0.0),
    );
    joint.set_initial_conditions((std::f64::consts::FRAC_PI_6, 0.0));
    joint.set_motor(Motor::const_forcing(0.0));

    let mut sim = world.to_simulation().expect("non-empty world");
    let max_residual = sim.run_to(1.0, 200).expect("well-posed configuration");

    for (t, y) in sim.history().iter().step_by(40) {
        println!("t = {t:.3}  q = {:+.5}  qdot = {:+.5}", y.part(0)[0], y.part(1)[0]);
    }
    println!("max residual over run: {max_residual:e}");
}
