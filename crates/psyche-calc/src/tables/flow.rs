//! Constants of the cross-drive flow model.

/// Imposed satisfaction at or above this keeps a diverted path loss-free.
pub const SATISFACTION_FLOOR: f64 = 3.0;

/// Default drain total above which a drive is significantly drained.
pub const DEFAULT_DRAIN_THRESHOLD: f64 = 0.01;

/// Default transfer total above which a drive is significantly transferred.
pub const DEFAULT_TRANSFER_THRESHOLD: f64 = 0.01;
