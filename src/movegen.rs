//! Successor generation for the search graph.
//!
//! A generator move is one edge of the search graph. It is usually a one-cell
//! slide, but after some primary slides the same piece may immediately continue
//! with a second slide (see [`chain_directions`]); that two-cell result is emitted
//! as an extra successor of the same node, so it costs one edge, not two.

use crate::geometry::{BlankPair, Direction};
use crate::layout::{decode, is_goal, relocate, LayoutCode, Piece, Shape};

/// A board state reached by one generator move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Successor {
    pub code: LayoutCode,
    pub blanks: BlankPair,
}

/// One entry of a BFS frontier. Created once and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub code: LayoutCode,
    /// Code of the state this node was generated from; `None` for the root.
    pub parent: Option<LayoutCode>,
    pub blanks: BlankPair,
    pub is_goal: bool,
}

impl SearchNode {
    pub fn root(code: LayoutCode, blanks: BlankPair) -> Self {
        SearchNode {
            code,
            parent: None,
            blanks,
            is_goal: is_goal(code),
        }
    }
}

/// Directions a piece may continue in after a primary slide in `primary`.
///
/// Squares may turn or continue straight, dominoes only continue along their
/// long axis, and the block never chains. Reversing is never listed.
pub fn chain_directions(shape: Shape, primary: Direction) -> &'static [Direction] {
    use Direction::*;
    match (shape, primary) {
        (Shape::Square, Down) => &[Down, Left, Right],
        (Shape::Square, Left) => &[Up, Down, Left],
        (Shape::Square, Right) => &[Up, Down, Right],
        (Shape::Square, Up) => &[Up, Left, Right],
        (Shape::HorizontalDomino, Left) => &[Left],
        (Shape::HorizontalDomino, Right) => &[Right],
        (Shape::VerticalDomino, Down) => &[Down],
        (Shape::VerticalDomino, Up) => &[Up],
        _ => &[],
    }
}

/// All moves of a single piece, primary slides each followed by their chains.
fn piece_moves(code: LayoutCode, piece: Piece, blanks: &BlankPair, out: &mut Vec<Successor>) {
    for primary in Direction::SEARCH_ORDER {
        let Some((moved, after_primary)) = piece.apply_move(primary, blanks) else {
            continue;
        };
        out.push(Successor {
            code: relocate(code, piece, moved.anchor),
            blanks: after_primary,
        });
        for &secondary in chain_directions(piece.shape, primary) {
            if let Some((chained, after_chain)) = moved.apply_move(secondary, &after_primary) {
                out.push(Successor {
                    code: relocate(code, piece, chained.anchor),
                    blanks: after_chain,
                });
            }
        }
    }
}

/// Every state reachable from `(code, blanks)` by one generator move.
///
/// Pieces are expanded in anchor order and each primary direction is tried from
/// the state's own position. The result may contain the state the caller came
/// from; use [`successors`] to filter it.
///
/// # Examples
/// ```
/// use klotski_solver::geometry::BlankPair;
/// use klotski_solver::layout::{encode, Piece, Shape};
/// use klotski_solver::movegen::generate;
///
/// // A lone square with both blanks below it: one slide, or two chained.
/// let code = encode(&[Piece::new(Shape::Square, 8)]);
/// let next = generate(code, &BlankPair::new(12, 16));
/// assert_eq!(next.len(), 2);
/// ```
pub fn generate(code: LayoutCode, blanks: &BlankPair) -> Vec<Successor> {
    let mut out = Vec::with_capacity(8);
    for piece in decode(code) {
        piece_moves(code, piece, blanks, &mut out);
    }
    out
}

/// Child nodes of `node`, never including the node's own parent state.
pub fn successors(node: &SearchNode) -> Vec<SearchNode> {
    generate(node.code, &node.blanks)
        .into_iter()
        .filter(|s| Some(s.code) != node.parent)
        .map(|s| SearchNode {
            code: s.code,
            parent: Some(node.code),
            blanks: s.blanks,
            is_goal: is_goal(s.code),
        })
        .collect()
}
