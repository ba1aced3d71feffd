//! The mutable mechanism-building surface: a forest of [`Joint`]s held in an arena, addressed by
//! opaque [`JointId`] handles, plus unit-system conversion at [`World::to_simulation`] time.

use dynamics_joint::{Joint, JointKind};
use dynamics_spatial::{Mat3, Pose, Vec3};

use crate::errors::AlgorithmError;
use crate::simulation::Simulation;

/// An opaque handle into a [`World`]'s joint arena. Never constructed outside this crate; the
/// only way to obtain one is from a `World` insertion method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(usize);

#[derive(Debug, Clone)]
struct JointNode {
    joint: Joint,
    parent: Option<JointId>,
}

/// A fixed (length, mass, time) multiplicative-factor record converting a joint tree authored
/// in some unit system into MKS at [`World::to_simulation`] time.
///
/// Each field is the factor that turns one unit of that quantity, in the source system, into
/// its MKS equivalent — e.g. centimetres-grams-seconds has `length = 0.01, mass = 0.001, time =
/// 1.0`. Inertia is derived as `mass·length²`, consistent with dimensional analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSystem {
    pub length: f64,
    pub mass: f64,
    pub time: f64,
}

impl UnitSystem {
    /// The identity unit system: metres, kilograms, seconds.
    pub const MKS: Self = Self {
        length: 1.0,
        mass: 1.0,
        time: 1.0,
    };

    /// Centimetres, grams, seconds.
    pub const CGS: Self = Self {
        length: 0.01,
        mass: 0.001,
        time: 1.0,
    };

    fn inertia_factor(self) -> f64 {
        self.mass * self.length * self.length
    }
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self::MKS
    }
}

/// A forest of joints, built incrementally via the `new_*`/`add_*` constructors, then flattened
/// into a [`Simulation`] by [`World::to_simulation`].
#[derive(Debug, Clone)]
pub struct World {
    units: UnitSystem,
    gravity: Vec3,
    nodes: Vec<JointNode>,
    roots: Vec<JointId>,
}

impl World {
    /// Creates an empty forest in the given unit system, with gravity expressed in that same
    /// system.
    #[must_use]
    pub fn new(units: UnitSystem, gravity: Vec3) -> Self {
        Self {
            units,
            gravity,
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn insert(&mut self, joint: Joint, parent: Option<JointId>) -> JointId {
        let id = JointId(self.nodes.len());
        self.nodes.push(JointNode { joint, parent });
        if parent.is_none() {
            self.roots.push(id);
        }
        id
    }

    /// Adds a root revolute joint.
    ///
    /// # Errors
    /// Returns [`AlgorithmError::Joint`] if `axis` has zero magnitude.
    pub fn new_revolute(&mut self, local_pose: Pose, axis: Vec3) -> Result<JointId, AlgorithmError> {
        Ok(self.insert(Joint::new_revolute(local_pose, axis)?, None))
    }

    /// Adds a root prismatic joint.
    ///
    /// # Errors
    /// Same as [`World::new_revolute`].
    pub fn new_prismatic(&mut self, local_pose: Pose, axis: Vec3) -> Result<JointId, AlgorithmError> {
        Ok(self.insert(Joint::new_prismatic(local_pose, axis)?, None))
    }

    /// Adds a root screw joint.
    ///
    /// # Errors
    /// Same as [`World::new_revolute`].
    pub fn new_screw(&mut self, local_pose: Pose, axis: Vec3, pitch: f64) -> Result<JointId, AlgorithmError> {
        Ok(self.insert(Joint::new_screw(local_pose, axis, pitch)?, None))
    }

    /// Adds a revolute joint as a child of `parent`.
    ///
    /// # Errors
    /// Returns [`AlgorithmError::DimensionMismatch`] if `parent` does not belong to this world,
    /// or propagates [`AlgorithmError::Joint`] from the underlying construction.
    pub fn add_revolute(
        &mut self,
        parent: JointId,
        local_pose: Pose,
        axis: Vec3,
    ) -> Result<JointId, AlgorithmError> {
        self.check_member(parent)?;
        Ok(self.insert(Joint::new_revolute(local_pose, axis)?, Some(parent)))
    }

    /// Adds a prismatic joint as a child of `parent`.
    ///
    /// # Errors
    /// Same as [`World::add_revolute`].
    pub fn add_prismatic(
        &mut self,
        parent: JointId,
        local_pose: Pose,
        axis: Vec3,
    ) -> Result<JointId, AlgorithmError> {
        self.check_member(parent)?;
        Ok(self.insert(Joint::new_prismatic(local_pose, axis)?, Some(parent)))
    }

    /// Adds a screw joint as a child of `parent`.
    ///
    /// # Errors
    /// Same as [`World::add_revolute`].
    pub fn add_screw(
        &mut self,
        parent: JointId,
        local_pose: Pose,
        axis: Vec3,
        pitch: f64,
    ) -> Result<JointId, AlgorithmError> {
        self.check_member(parent)?;
        Ok(self.insert(Joint::new_screw(local_pose, axis, pitch)?, Some(parent)))
    }

    fn check_member(&self, id: JointId) -> Result<(), AlgorithmError> {
        if id.0 >= self.nodes.len() {
            return Err(AlgorithmError::DimensionMismatch {
                name: "World::add_*: unknown parent JointId",
                expected: self.nodes.len(),
                got: id.0,
            });
        }
        Ok(())
    }

    /// Borrows the joint at `id`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this world.
    #[must_use]
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.nodes[id.0].joint
    }

    /// Mutably borrows the joint at `id`, for `add_mass_properties`/`set_motor`/
    /// `set_initial_conditions`.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this world.
    pub fn joint_mut(&mut self, id: JointId) -> &mut Joint {
        &mut self.nodes[id.0].joint
    }

    /// Flattens this forest into a [`Simulation`]: a pre-order walk from each root (so that
    /// `parents[i] < i` holds for every `i`), applying this world's [`UnitSystem`] conversion to
    /// every joint's local pose translation, mass properties, initial conditions, and to gravity.
    ///
    /// # Errors
    /// Returns [`AlgorithmError::DimensionMismatch`] if the forest is empty.
    pub fn to_simulation(&self) -> Result<Simulation, AlgorithmError> {
        if self.nodes.is_empty() {
            return Err(AlgorithmError::DimensionMismatch {
                name: "World::to_simulation: empty forest",
                expected: 1,
                got: 0,
            });
        }

        // Map from arena index to its position in the flattened, pre-order output.
        let mut flat_index = vec![None; self.nodes.len()];
        let mut joints = Vec::with_capacity(self.nodes.len());
        let mut parents = Vec::with_capacity(self.nodes.len());
        let mut children: Vec<Vec<usize>> = Vec::with_capacity(self.nodes.len());

        let mut children_of: Vec<Vec<JointId>> = vec![Vec::new(); self.nodes.len()];
        for (idx, node) in self.nodes.iter().enumerate() {
            if let Some(JointId(p)) = node.parent {
                children_of[p].push(JointId(idx));
            }
        }

        let mut stack: Vec<JointId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let flat = joints.len();
            flat_index[id.0] = Some(flat);
            let node = &self.nodes[id.0];
            let parent_flat = node.parent.map(|p| flat_index[p.0].expect("parent visited before child"));
            joints.push(self.convert_joint(&node.joint));
            parents.push(parent_flat);
            children.push(Vec::new());
            if let Some(p) = parent_flat {
                children[p].push(flat);
            }
            for child in children_of[id.0].iter().rev() {
                stack.push(*child);
            }
        }

        let gravity = self.gravity * self.units.length / (self.units.time * self.units.time);
        Ok(Simulation::new(joints, parents, children, gravity))
    }

    fn convert_joint(&self, joint: &Joint) -> Joint {
        let u = self.units;
        let mut out = joint.clone();

        out.local_pose = Pose::new(
            joint.local_pose.position * u.length,
            joint.local_pose.orientation,
        );

        let com = joint.mass.com * u.length;
        let i_c = joint.mass.i_c * u.inertia_factor();
        out.add_mass_properties(joint.mass.mass * u.mass, com, i_c);

        let (q0, qdot0) = joint.initial_conditions();
        let (q0, qdot0) = match out.kind {
            JointKind::Revolute { .. } => (q0, qdot0 / u.time),
            JointKind::Prismatic { .. } => (q0 * u.length, qdot0 * u.length / u.time),
            JointKind::Screw { pitch, .. } => {
                out.kind = JointKind::Screw {
                    axis: match joint.kind {
                        JointKind::Screw { axis, .. } => axis,
                        _ => unreachable!(),
                    },
                    pitch: pitch * u.length,
                };
                (q0, qdot0 / u.time)
            }
        };
        out.set_initial_conditions((q0, qdot0));
        out.set_motor(joint.motor.clone());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_orders_parents_before_children() {
        let mut world = World::new(UnitSystem::MKS, Vec3::new(0.0, 0.0, -9.81));
        let root = world.new_revolute(Pose::identity(), Vec3::z()).unwrap();
        let _child = world
            .add_prismatic(root, Pose::identity(), Vec3::x())
            .unwrap();
        let sim = world.to_simulation().unwrap();
        assert_eq!(sim.joint_count(), 2);
        assert_eq!(sim.parents()[0], None);
        assert_eq!(sim.parents()[1], Some(0));
    }

    #[test]
    fn test_cgs_prismatic_initial_position_converts_to_metres() {
        let mut world = World::new(UnitSystem::CGS, Vec3::zeros());
        let root = world.new_prismatic(Pose::identity(), Vec3::x()).unwrap();
        world.joint_mut(root).set_initial_conditions((100.0, 0.0));
        let sim = world.to_simulation().unwrap();
        assert_eq!(sim.joints()[0].initial_conditions().0, 1.0);
    }

    #[test]
    fn test_empty_world_rejected() {
        let world = World::new(UnitSystem::MKS, Vec3::zeros());
        assert!(world.to_simulation().is_err());
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut a = World::new(UnitSystem::MKS, Vec3::zeros());
        let mut b = World::new(UnitSystem::MKS, Vec3::zeros());
        let id_from_a = a.new_revolute(Pose::identity(), Vec3::z()).unwrap();
        assert!(b
            .add_revolute(id_from_a, Pose::identity(), Vec3::z())
            .is_err());
    }
}
