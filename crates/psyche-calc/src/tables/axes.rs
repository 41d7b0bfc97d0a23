//! Axis match-up groups for Jung-style typing.
//!
//! Every group lists `(question, polarity)` pairs over the 42-question
//! self-report layout. Group order within an axis is the tie-break priority
//! when two decisive groups of the winning pole score the same.

use crate::answers::Polarity::{self, Direct as D, Inverse as I};
use crate::axis::{Axis, Pole};

/// A group mean strictly above this is decisive.
pub const DECISIVE_THRESHOLD: f64 = 3.0;

/// One candidate sub-archetype and the questions that indicate it.
#[derive(Debug, Clone, Copy)]
pub struct MatchUpGroup {
    /// Stable archetype identifier
    pub archetype: &'static str,
    /// Pole this group votes for
    pub pole: Pole,
    /// `(question, polarity)` pairs
    pub items: &'static [(u16, Polarity)],
}

/// A bipolar axis and its match-up groups.
#[derive(Debug, Clone, Copy)]
pub struct AxisSpec {
    /// Which axis
    pub axis: Axis,
    /// The two named poles, type-code order
    pub poles: [Pole; 2],
    /// Match-up groups in priority order
    pub groups: &'static [MatchUpGroup],
}

/// Energy: Introvert / Extrovert.
pub const ENERGY: AxisSpec = AxisSpec {
    axis: Axis::Energy,
    poles: [Pole::Introvert, Pole::Extrovert],
    groups: &[
        MatchUpGroup {
            archetype: "contemplative",
            pole: Pole::Introvert,
            items: &[(1, D), (22, D), (27, I)],
        },
        MatchUpGroup {
            archetype: "reserved",
            pole: Pole::Introvert,
            items: &[(5, D), (33, D), (24, I)],
        },
        MatchUpGroup {
            archetype: "commanding",
            pole: Pole::Extrovert,
            items: &[(3, D), (24, D), (17, I)],
        },
        MatchUpGroup {
            archetype: "gregarious",
            pole: Pole::Extrovert,
            items: &[(6, D), (34, D), (41, I)],
        },
    ],
};

/// Perception: Sensing / Intuitive.
pub const PERCEPTION: AxisSpec = AxisSpec {
    axis: Axis::Perception,
    poles: [Pole::Sensing, Pole::Intuitive],
    groups: &[
        MatchUpGroup {
            archetype: "pragmatic",
            pole: Pole::Sensing,
            items: &[(4, D), (11, D), (2, D)],
        },
        MatchUpGroup {
            archetype: "grounded",
            pole: Pole::Sensing,
            items: &[(7, D), (14, D), (8, I)],
        },
        MatchUpGroup {
            archetype: "visionary",
            pole: Pole::Intuitive,
            items: &[(1, D), (29, D), (15, I)],
        },
        MatchUpGroup {
            archetype: "abstract",
            pole: Pole::Intuitive,
            items: &[(8, D), (36, I), (21, D)],
        },
    ],
};

/// Judgment: Thinking / Feeling.
pub const JUDGMENT: AxisSpec = AxisSpec {
    axis: Axis::Judgment,
    poles: [Pole::Thinking, Pole::Feeling],
    groups: &[
        MatchUpGroup {
            archetype: "analytical",
            pole: Pole::Thinking,
            items: &[(2, D), (9, D), (12, I)],
        },
        MatchUpGroup {
            archetype: "strategic",
            pole: Pole::Thinking,
            items: &[(10, D), (23, D), (40, D)],
        },
        MatchUpGroup {
            archetype: "empathic",
            pole: Pole::Feeling,
            items: &[(5, D), (12, D), (19, I)],
        },
        MatchUpGroup {
            archetype: "harmonizing",
            pole: Pole::Feeling,
            items: &[(13, D), (27, D), (20, I)],
        },
        MatchUpGroup {
            archetype: "principled",
            pole: Pole::Feeling,
            items: &[(7, D), (28, D), (35, D)],
        },
    ],
};

/// Orientation: Judging / Perspective.
pub const ORIENTATION: AxisSpec = AxisSpec {
    axis: Axis::Orientation,
    poles: [Pole::Judging, Pole::Perspective],
    groups: &[
        MatchUpGroup {
            archetype: "structured",
            pole: Pole::Judging,
            items: &[(9, D), (30, D), (16, I)],
        },
        MatchUpGroup {
            archetype: "dutiful",
            pole: Pole::Judging,
            items: &[(14, D), (42, I), (11, I)],
        },
        MatchUpGroup {
            archetype: "spontaneous",
            pole: Pole::Perspective,
            items: &[(4, D), (25, D), (18, I)],
        },
        MatchUpGroup {
            archetype: "exploratory",
            pole: Pole::Perspective,
            items: &[(22, D), (29, D), (37, D)],
        },
    ],
};

/// All four axes in type-code order.
pub static AXES: [AxisSpec; 4] = [ENERGY, PERCEPTION, JUDGMENT, ORIENTATION];
