//! Simulates a prismatic joint under a constant applied force, carrying a driven revolute joint,
//! and reports the final joint-space state plus the worst per-step residual.

use dynamics_rs::prelude::*;

fn main() {
    let mut world = World::new(UnitSystem::MKS, Vec3::zeros());

    let slider = world
        .new_prismatic(Pose::identity(), Vec3::x())
        .expect("unit axis");
    world.joint_mut(slider).set_initial_conditions((0.0, 1.0));
    world.joint_mut(slider).set_motor(Motor::const_forcing(5.0));

    let wrist = world
        .add_revolute(slider, Pose::identity(), Vec3::z())
        .expect("slider is a member of this world");
    let joint = world.joint_mut(wrist);
    let l = 0.14905;
    let i_zz = (0.02_f64.powi(2) + 0.30_f64.powi(2)) / 12.0;
    joint.add_mass_properties(1.0, Vec3::new(l, 0.0, 0.0), Mat3::symmetric(i_zz, i_zz, i_zz, 0.0, 0.0, 0.0));
    joint.set_motor(Motor::spring_damper(2.0, 0.0, 0.5));

    let mut sim = world.to_simulation().expect("non-empty world");
    let max_residual = sim.run_to(1.0, 20).expect("well-posed configuration");

    let (t, y) = sim.history().last().expect("at least the initial sample");
    println!("t = {t}");
    println!("q    = {:?}", y.part(0));
    println!("qdot = {:?}", y.part(1));
    println!("max residual over run: {max_residual:e}");
}
