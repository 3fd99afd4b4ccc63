use pathviz_core::Pos;

use crate::context::SearchContext;

/// Walk predecessor links back from `end`.
///
/// The result starts at the cell adjacent to `end` and stops before
/// `start`; neither endpoint is included. A cell without a predecessor
/// also ends the walk.
pub fn reconstruct(ctx: &SearchContext, start: Pos, end: Pos) -> Vec<Pos> {
    let mut path = Vec::new();
    let mut cur = ctx.predecessor(end);
    while let Some(p) = cur {
        if p == start {
            break;
        }
        path.push(p);
        cur = ctx.predecessor(p);
    }
    path
}
