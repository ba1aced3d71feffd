//! Shared mechanism builders for the scenario tests and the benchmark harness.

use dynamics_joint::Motor;
use dynamics_model::{UnitSystem, World};
use dynamics_spatial::{Mat3, Pose, Vec3};

/// A thin rod of the given `mass` and `length`, with its centre of mass at the midpoint minus a
/// small bearing offset (as in §8 scenario 1), and rotational inertia about that centre of mass
/// treating the rod as a slender cylinder of 2 cm diameter.
#[must_use]
pub fn rod_inertia(mass: f64, length: f64) -> Mat3 {
    let i_zz = mass * (0.02_f64.powi(2) + length.powi(2)) / 12.0;
    Mat3::symmetric(i_zz, i_zz, i_zz, 0.0, 0.0, 0.0)
}

/// Builds a single undriven revolute pendulum: a 0.30 m thin rod of mass 1 kg, CoM at
/// `(0.14905, 0, 0)`, hinged about `+Z` at the origin, released from `q(0) = π/6` (§8 scenario 1).
#[must_use]
pub fn undriven_pendulum(gravity: Vec3) -> World {
    let mut world = World::new(UnitSystem::MKS, gravity);
    let rod = world.new_revolute(Pose::identity(), Vec3::z()).unwrap();
    let joint = world.joint_mut(rod);
    joint.add_mass_properties(1.0, Vec3::new(0.14905, 0.0, 0.0), rod_inertia(1.0, 0.30));
    joint.set_initial_conditions((std::f64::consts::FRAC_PI_6, 0.0));
    joint.set_motor(Motor::const_forcing(0.0));
    world
}

/// Builds an `n`-link serial chain of equal-mass rods connected by parallel revolute joints
/// about `+Z`, each carrying the previous joint's initial angular rate `qdot0` (§8 scenario 5).
#[must_use]
pub fn serial_revolute_chain(n: usize, link_length: f64, qdot0: f64) -> World {
    let mut world = World::new(UnitSystem::MKS, Vec3::zeros());
    let mut parent = None;
    for _ in 0..n {
        let local_pose = match parent {
            None => Pose::identity(),
            Some(_) => Pose::translation(Vec3::new(link_length, 0.0, 0.0)),
        };
        let id = match parent {
            None => world.new_revolute(local_pose, Vec3::z()).unwrap(),
            Some(p) => world.add_revolute(p, local_pose, Vec3::z()).unwrap(),
        };
        let joint = world.joint_mut(id);
        joint.add_mass_properties(
            1.0,
            Vec3::new(link_length / 2.0, 0.0, 0.0),
            rod_inertia(1.0, link_length),
        );
        joint.set_initial_conditions((0.0, qdot0));
        joint.set_motor(Motor::const_forcing(0.0));
        parent = Some(id);
    }
    world
}
