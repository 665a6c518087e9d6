use crate::commit::{Curve, CurveKind};
use crate::lanes::LaneTransition;

/// Project recorded lane transitions into renderer-facing curve descriptors.
///
/// Purely a projection: the allocator decides connector semantics, this keeps
/// the renderer from re-deriving them out of raw lane state.
pub(crate) fn resolve_curves(transitions: &[LaneTransition]) -> Vec<Curve> {
    transitions
        .iter()
        .map(|transition| match *transition {
            LaneTransition::MergeIn {
                from_column,
                from_y,
                to_column,
                to_y,
            } => Curve {
                kind: CurveKind::MergeIn,
                from_column,
                from_y,
                to_column,
                to_y,
            },
            LaneTransition::BranchOut {
                from_column,
                from_y,
                to_column,
                to_y,
            } => Curve {
                kind: CurveKind::BranchOut,
                from_column,
                from_y,
                to_column,
                to_y,
            },
        })
        .collect()
}
