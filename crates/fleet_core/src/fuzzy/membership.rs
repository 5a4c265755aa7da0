//! Membership functions: crisp inputs to degrees of truth in [0, 1].
//!
//! Shapes are data, not code, so a variable's linguistic labels can be
//! reconfigured without touching the inference engine. Adjacent labels
//! overlap on purpose; the controller needs the overlap to produce
//! intermediate aggression values.

/// Remaining-distance decision boundary between `Close` and `Far`, in km.
pub const DISTANCE_BOUNDARY_KM: f64 = 20.0;

/// Width of the `Close`/`Far` transition ramp, in km. Both ramps are centered
/// on [DISTANCE_BOUNDARY_KM], so `Far` is 0 at 17.5 km, 1 at 22.5 km, and
/// crosses `Close` at 0.5 on the boundary itself.
pub const DISTANCE_RAMP_KM: f64 = 5.0;

/// A single membership shape over one input variable. Every shape is total:
/// out-of-domain inputs clamp to the nearest extreme degree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipShape {
    /// Degree 1 at or below `full`, falling linearly to 0 at `zero`.
    RampDown { full: f64, zero: f64 },
    /// Degree 0 at or below `zero`, rising linearly to 1 at `full`.
    RampUp { zero: f64, full: f64 },
    /// Trapezoid over `a <= b <= c <= d`: 0 outside [a, d], 1 on [b, c].
    /// Requires a < b and c < d; a triangle is the degenerate case b == c.
    Trapezoid { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipShape {
    /// Triangle with feet at `a` and `d` and its peak at `peak`.
    pub fn triangle(a: f64, peak: f64, d: f64) -> Self {
        Self::Trapezoid {
            a,
            b: peak,
            c: peak,
            d,
        }
    }

    /// Degree of membership of `x`, always within [0, 1].
    pub fn degree(&self, x: f64) -> f64 {
        let raw = match *self {
            Self::RampDown { full, zero } => (zero - x) / (zero - full),
            Self::RampUp { zero, full } => (x - zero) / (full - zero),
            Self::Trapezoid { a, b, c, d } => {
                if x < b {
                    (x - a) / (b - a)
                } else if x > c {
                    (d - x) / (d - c)
                } else {
                    1.0
                }
            }
        };
        raw.clamp(0.0, 1.0)
    }
}

/// Linguistic labels over battery state of charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocLabel {
    Critical,
    Low,
    Normal,
    Full,
}

/// Linguistic labels over remaining trip distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistanceLabel {
    Close,
    Far,
}

/// Immutable ordered set of (label, shape) pairs for one input variable.
#[derive(Debug, Clone)]
pub struct MembershipSet<L> {
    entries: Vec<(L, MembershipShape)>,
}

impl<L: Copy + PartialEq> MembershipSet<L> {
    pub fn new(entries: Vec<(L, MembershipShape)>) -> Self {
        Self { entries }
    }

    /// Degree of `x` in `label`; 0 for labels absent from the set.
    pub fn degree(&self, label: L, x: f64) -> f64 {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, shape)| shape.degree(x))
            .unwrap_or(0.0)
    }

    pub fn labels(&self) -> impl Iterator<Item = L> + '_ {
        self.entries.iter().map(|(l, _)| *l)
    }
}

/// SOC membership set: critical fades out over 0.10–0.20, low peaks at 0.20,
/// normal peaks at 0.50, full ramps up from 0.60.
pub fn soc_memberships() -> MembershipSet<SocLabel> {
    MembershipSet::new(vec![
        (
            SocLabel::Critical,
            MembershipShape::RampDown {
                full: 0.10,
                zero: 0.20,
            },
        ),
        (SocLabel::Low, MembershipShape::triangle(0.10, 0.20, 0.40)),
        (
            SocLabel::Normal,
            MembershipShape::triangle(0.30, 0.50, 0.60),
        ),
        (
            SocLabel::Full,
            MembershipShape::RampUp {
                zero: 0.60,
                full: 1.00,
            },
        ),
    ])
}

/// Distance membership set: complementary ramps around the 20 km boundary.
pub fn distance_memberships() -> MembershipSet<DistanceLabel> {
    let half = DISTANCE_RAMP_KM / 2.0;
    MembershipSet::new(vec![
        (
            DistanceLabel::Close,
            MembershipShape::RampDown {
                full: DISTANCE_BOUNDARY_KM - half,
                zero: DISTANCE_BOUNDARY_KM + half,
            },
        ),
        (
            DistanceLabel::Far,
            MembershipShape::RampUp {
                zero: DISTANCE_BOUNDARY_KM - half,
                full: DISTANCE_BOUNDARY_KM + half,
            },
        ),
    ])
}
