//! The six end-to-end scenarios enumerated in the design's testable-properties section,
//! exercised through the public `World`/`Simulation` surface.

use approx::assert_relative_eq;

use dynamics_joint::{Joint, Motor, MotorDefinedKind};
use dynamics_model::kinematics::kinematics_pass;
use dynamics_model::{AlgorithmError, UnitSystem, World};
use dynamics_spatial::{Mat3, Pose, StackedMatrix, StackedVector, Vec3};

use crate::fixtures::{serial_revolute_chain, undriven_pendulum};

#[test]
fn test_scenario_1_single_pendulum_initial_acceleration() {
    let world = undriven_pendulum(Vec3::new(0.0, -9.80665, 0.0));
    let mut sim = world.to_simulation().unwrap();

    // A single Featherstone call at t=0 is enough to read off q̈(0); advance by an
    // infinitesimally small step and look at the reported derivative implicitly via q̇.
    sim.integrate(1e-9).unwrap();
    let qdot = sim.state().qdot[0];
    let qddot_estimate = qdot / 1e-9;

    let l = 0.14905;
    let i_zz = (0.02_f64.powi(2) + 0.30_f64.powi(2)) / 12.0;
    let expected = -9.80665 * l * (std::f64::consts::FRAC_PI_6).sin() / (i_zz + l * l);
    assert!(
        (qddot_estimate - expected).abs() < 1e-2,
        "qddot(0) = {qddot_estimate}, expected {expected}"
    );
}

#[test]
fn test_scenario_2_prismatic_driven_revolute_chain() {
    let mut world = World::new(UnitSystem::MKS, Vec3::zeros());
    let slider = world.new_prismatic(Pose::identity(), Vec3::x()).unwrap();
    world.joint_mut(slider).set_initial_conditions((0.0, 1.0));
    world.joint_mut(slider).set_motor(Motor::const_forcing(5.0));

    let wrist = world.add_revolute(slider, Pose::identity(), Vec3::z()).unwrap();
    let joint = world.joint_mut(wrist);
    let l = 0.14905;
    let i_zz = (0.02_f64.powi(2) + 0.30_f64.powi(2)) / 12.0;
    joint.add_mass_properties(1.0, Vec3::new(l, 0.0, 0.0), Mat3::symmetric(i_zz, i_zz, i_zz, 0.0, 0.0, 0.0));
    joint.set_motor(Motor::const_forcing(0.0));

    let mut sim = world.to_simulation().unwrap();
    let mut prev_q = sim.state().q[0];
    let mut max_residual = 0.0_f64;
    for _ in 0..20 {
        max_residual = max_residual.max(sim.integrate(0.05).unwrap());
        let q = sim.state().q[0];
        assert!(q > prev_q, "prismatic position must strictly increase: {q} <= {prev_q}");
        prev_q = q;
    }
    assert!(max_residual < 1e-6, "max residual {max_residual} too large");
}

#[test]
fn test_scenario_3_motor_lift_matches_analytic_second_derivative() {
    // Position drive f(t) = 0.2*sin(10t); the caller differentiates it twice (the symbolic
    // layer is an external collaborator) to produce the acceleration closure the core consumes.
    let motor = Motor::function_of_time(MotorDefinedKind::Position, |t, _q, _qdot| {
        -0.2 * 100.0 * (10.0 * t).sin()
    });
    assert_eq!(motor.known(), dynamics_joint::Known::Acceleration);

    for n in 1..=16 {
        let t = std::f64::consts::PI / (10.0 * n as f64);
        let qddot_actual = motor.evaluate(t, 0.0, 0.0);
        let expected = -0.2 * 100.0 * (10.0 * t).sin();
        assert_relative_eq!(qddot_actual, expected, epsilon = 1e-6);
    }
}

#[test]
fn test_scenario_4_stacked_block_solve_recovers_x() {
    let a1 = Vec3::new(0.3, -0.1, 0.2);
    let b1 = Vec3::new(0.1, 0.4, -0.2);
    let a2 = Vec3::new(-0.2, 0.2, 0.1);
    let b2 = Vec3::new(0.3, 0.1, 0.2);

    let outer = |u: &Vec3, v: &Vec3| -> [f64; 9] {
        let uu = *u.as_slice();
        let vv = *v.as_slice();
        let mut out = [0.0; 9];
        for i in 0..3 {
            for j in 0..3 {
                out[i * 3 + j] = uu[i] * vv[j];
            }
        }
        out
    };
    let combine = |scale: f64, block: [f64; 9]| -> [f64; 9] {
        let mut out = block;
        out[0] += scale;
        out[4] += scale;
        out[8] += scale;
        out
    };
    let neg = |block: [f64; 9]| -> [f64; 9] {
        let mut out = [0.0; 9];
        for (o, v) in out.iter_mut().zip(block) {
            *o = -v;
        }
        out
    };

    let mut a = StackedMatrix::zeros(&[3, 3], &[3, 3]);
    a.set_block(0, 0, &combine(1.0, outer(&a1, &b1))).unwrap();
    a.set_block(1, 1, &combine(1.0, outer(&a2, &b2))).unwrap();
    a.set_block(0, 1, &neg(outer(&a1, &b1))).unwrap();
    a.set_block(1, 0, &neg(outer(&a2, &b2))).unwrap();

    let x = StackedVector::from_parts(&[&[1.0, -2.0, 0.5], &[0.3, 0.3, -0.7]]);
    let y = a.matvec(&x).unwrap();
    let (solved, residual) = a.solve(&y).unwrap();

    assert_relative_eq!(solved.as_slice(), x.as_slice(), epsilon = 1e-9);
    assert!(residual < 1e-9, "residual {residual} too large");
}

fn kinetic_energy(joints: &[Joint], parents: &[Option<usize>], q: &[f64], qdot: &[f64]) -> f64 {
    let kin = kinematics_pass(joints, parents, q, qdot).unwrap();
    kin.iter().fold(0.0, |acc, entry| acc + 0.5 * entry.v.dot(&entry.momentum))
}

#[test]
fn test_scenario_5_energy_conservation_over_serial_chain() {
    let world = serial_revolute_chain(3, 0.25, 0.8);
    let mut sim = world.to_simulation().unwrap();

    let initial_energy = kinetic_energy(sim.joints(), sim.parents(), &sim.state().q, &sim.state().qdot);
    assert!(initial_energy > 0.0);

    sim.run_to(1.0, 1000).unwrap();

    let final_energy = kinetic_energy(sim.joints(), sim.parents(), &sim.state().q, &sim.state().qdot);
    let relative_drift = (final_energy - initial_energy).abs() / initial_energy;
    assert!(relative_drift < 1e-4, "relative KE drift {relative_drift} too large");
}

#[test]
fn test_scenario_6_singular_configuration_fails_on_first_integrate() {
    let mut world = World::new(UnitSystem::MKS, Vec3::zeros());
    let root = world.new_prismatic(Pose::identity(), Vec3::x()).unwrap();
    world.add_prismatic(root, Pose::identity(), Vec3::x()).unwrap();

    let mut sim = world.to_simulation().unwrap();
    let result = sim.integrate(1e-3);
    assert!(matches!(result, Err(AlgorithmError::SingularArticulation { joint: 1 })));
}
