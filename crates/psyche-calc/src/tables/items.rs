//! Questionnaire item → drive tables.
//!
//! Innate and surface rows share a 42-question layout; question
//! `k * 7 + d + 1` is item `k` of the drive at canonical index `d`.
//! The imposed row uses the first three items of the same interleaving.

use crate::answers::Polarity;
use crate::drive::Drive;
use crate::layer::PersonaLayer;

/// Questions in the innate / surface questionnaire.
pub const SELF_REPORT_QUESTIONS: u16 = 42;

/// Questions in the imposed questionnaire.
pub const IMPOSED_QUESTIONS: u16 = 21;

/// Weight of the first (anchor) item of each self-report drive block.
pub const ANCHOR_WEIGHT: f64 = 1.5;

/// One question contributing to a drive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveItem {
    /// 1-based question index
    pub question: u16,
    /// Whether the answer is complemented before averaging
    pub polarity: Polarity,
    /// Relative weight within the drive's block
    pub weight: f64,
}

const fn direct(question: u16) -> DriveItem {
    DriveItem {
        question,
        polarity: Polarity::Direct,
        weight: 1.0,
    }
}

const fn inverse(question: u16) -> DriveItem {
    DriveItem {
        question,
        polarity: Polarity::Inverse,
        weight: 1.0,
    }
}

const fn anchor(question: u16) -> DriveItem {
    DriveItem {
        question,
        polarity: Polarity::Direct,
        weight: ANCHOR_WEIGHT,
    }
}

/// Innate / surface items, indexed by canonical drive order.
pub static SELF_REPORT_ITEMS: [[DriveItem; 6]; Drive::COUNT] = [
    // Exploration
    [anchor(1), direct(8), inverse(15), direct(22), direct(29), inverse(36)],
    // Achievement
    [anchor(2), direct(9), inverse(16), direct(23), direct(30), inverse(37)],
    // Dominance
    [anchor(3), direct(10), inverse(17), direct(24), direct(31), inverse(38)],
    // Pleasure
    [anchor(4), direct(11), inverse(18), direct(25), direct(32), inverse(39)],
    // Care
    [anchor(5), direct(12), inverse(19), direct(26), direct(33), inverse(40)],
    // Affiliation
    [anchor(6), direct(13), inverse(20), direct(27), direct(34), inverse(41)],
    // Value
    [anchor(7), direct(14), inverse(21), direct(28), direct(35), inverse(42)],
];

/// Imposed-layer items (environmental satisfaction), indexed by canonical drive order.
pub static IMPOSED_ITEMS: [[DriveItem; 3]; Drive::COUNT] = [
    [direct(1), direct(8), inverse(15)],
    [direct(2), direct(9), inverse(16)],
    [direct(3), direct(10), inverse(17)],
    [direct(4), direct(11), inverse(18)],
    [direct(5), direct(12), inverse(19)],
    [direct(6), direct(13), inverse(20)],
    [direct(7), direct(14), inverse(21)],
];

/// Items feeding `drive` in the questionnaire of `layer`.
#[must_use]
pub fn drive_items(layer: PersonaLayer, drive: Drive) -> &'static [DriveItem] {
    match layer {
        PersonaLayer::Innate | PersonaLayer::Surface => &SELF_REPORT_ITEMS[drive.index()],
        PersonaLayer::Imposed => &IMPOSED_ITEMS[drive.index()],
    }
}
