//! The drive model: a compiled scalar function `f(t, q, q̇) → ℝ` plus the kind that tells the
//! Featherstone dynamics pass how to use its output.

use std::fmt;
use std::sync::Arc;

/// The kind a motor was originally defined as, before any lifting to an acceleration drive.
///
/// `Position` and `Velocity` motors are always lifted, at construction time, to an
/// [`Known::Acceleration`] drive: the symbolic time-differentiation that performs the lift is an
/// external collaborator (see crate docs), so by the time a [`Motor`] exists in this crate its
/// `drive` closure already *is* the acceleration function. `defined_kind` is retained purely for
/// display/diagnostics — the dynamics pass only ever looks at [`Motor::known`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorDefinedKind {
    /// Defined as a prescribed joint position; lifted to acceleration.
    Position,
    /// Defined as a prescribed joint velocity; lifted to acceleration.
    Velocity,
    /// Defined as a prescribed joint acceleration.
    Acceleration,
    /// Defined as an applied generalised force/torque.
    Forcing,
}

impl fmt::Display for MotorDefinedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotorDefinedKind::Position => "position",
            MotorDefinedKind::Velocity => "velocity",
            MotorDefinedKind::Acceleration => "acceleration",
            MotorDefinedKind::Forcing => "forcing",
        };
        write!(f, "{name}")
    }
}

/// How the Featherstone dynamics pass (§4.5) must treat a joint's drive output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Known {
    /// `drive(t, q, q̇)` is the joint's generalised applied force/torque `τᵢ`; `q̈ᵢ` is solved for.
    Forcing,
    /// `drive(t, q, q̇)` is the joint's prescribed acceleration `q̈ᵢ`; `τᵢ` is the reaction.
    Acceleration,
}

type DriveFn = Arc<dyn Fn(f64, f64, f64) -> f64 + Send + Sync>;

/// A joint's drive: a compiled scalar function of `(t, q, q̇)` plus the kind that determines how
/// the Featherstone recursion consumes its output.
#[derive(Clone)]
pub struct Motor {
    defined_kind: MotorDefinedKind,
    known: Known,
    drive: DriveFn,
}

impl fmt::Debug for Motor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Motor")
            .field("defined_kind", &self.defined_kind)
            .field("known", &self.known)
            .finish_non_exhaustive()
    }
}

impl Motor {
    fn new(defined_kind: MotorDefinedKind, drive: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        // Position/Velocity are always lifted to Acceleration (§9 open question (b)); Acceleration
        // stays Acceleration, Forcing stays Forcing.
        let known = match defined_kind {
            MotorDefinedKind::Position | MotorDefinedKind::Velocity | MotorDefinedKind::Acceleration => {
                Known::Acceleration
            }
            MotorDefinedKind::Forcing => Known::Forcing,
        };
        Self {
            defined_kind,
            known,
            drive: Arc::new(drive),
        }
    }

    /// A constant applied generalised force/torque, independent of `t`, `q`, `q̇`.
    #[must_use]
    pub fn const_forcing(value: f64) -> Self {
        Self::new(MotorDefinedKind::Forcing, move |_t, _q, _qdot| value)
    }

    /// A constant prescribed acceleration, independent of `t`, `q`, `q̇`.
    #[must_use]
    pub fn const_acceleration(value: f64) -> Self {
        Self::new(MotorDefinedKind::Acceleration, move |_t, _q, _qdot| value)
    }

    /// A linear spring-damper applied force `-k·q - preload - c·q̇` (a `Forcing` drive).
    #[must_use]
    pub fn spring_damper(k: f64, preload: f64, c: f64) -> Self {
        Self::new(MotorDefinedKind::Forcing, move |_t, q, qdot| {
            -k * q - preload - c * qdot
        })
    }

    /// A drive whose closure is conceptually a function of time alone, already differentiated
    /// (by the caller, per crate docs) down to the `(t, q, q̇) → ℝ` signature the core consumes.
    #[must_use]
    pub fn function_of_time(
        kind: MotorDefinedKind,
        f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::new(kind, f)
    }

    /// A drive whose closure is conceptually a function of position alone, already differentiated
    /// down to the `(t, q, q̇) → ℝ` signature the core consumes.
    #[must_use]
    pub fn function_of_position(
        kind: MotorDefinedKind,
        f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::new(kind, f)
    }

    /// A drive whose closure is conceptually a function of position and speed, already
    /// differentiated down to the `(t, q, q̇) → ℝ` signature the core consumes.
    #[must_use]
    pub fn function_of_position_and_speed(
        kind: MotorDefinedKind,
        f: impl Fn(f64, f64, f64) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self::new(kind, f)
    }

    /// The kind this motor was originally defined as (before lifting).
    #[must_use]
    pub fn defined_kind(&self) -> MotorDefinedKind {
        self.defined_kind
    }

    /// How the dynamics pass must treat this motor's drive output.
    #[must_use]
    pub fn known(&self) -> Known {
        self.known
    }

    /// Evaluates the drive at `(t, q, q̇)`.
    ///
    /// Calls all three arguments distinctly — `drive(t, q, q̇)` — per §9 open question (d); the
    /// source's `Drive(t, q, q)` double-q call is not reproduced.
    #[must_use]
    pub fn evaluate(&self, t: f64, q: f64, qdot: f64) -> f64 {
        (self.drive)(t, q, qdot)
    }
}
