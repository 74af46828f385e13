//! 駒と擬合法手生成
//!
//! 各駒は自分の位置と盤面スナップショットから擬合法手（移動形と駒の
//! 有無だけで判定した手）を生成する。自玉の安全はここでは見ない。

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::notation;
use crate::types::{PieceKind, Side, Square};

/// 9x9 の盤面スナップショット
pub type Grid = [[Option<Piece>; 9]; 9];

/// 盤上の移動手（打ちは含まない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promote: bool,
}

/// 指し手リスト。ほとんどの局面は 128 手未満でヒープ確保を避けられる
pub type MoveVec = SmallVec<[Move; 128]>;

impl Move {
    /// 表記文字列にする
    pub fn notation(&self) -> String {
        notation::encode_move(self.from, self.to, self.promote)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

// 移動パターン（先手視点。後手は row 成分を反転して使う）
const KING_STEPS: &[(i8, i8)] = &[
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const GOLD_STEPS: &[(i8, i8)] = &[(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0)];
const SILVER_STEPS: &[(i8, i8)] = &[(-1, -1), (-1, 0), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_STEPS: &[(i8, i8)] = &[(-2, -1), (-2, 1)];
const FORWARD: &[(i8, i8)] = &[(-1, 0)];
const ROOK_SLIDES: &[(i8, i8)] = &[(-1, 0), (0, -1), (0, 1), (1, 0)];
const BISHOP_SLIDES: &[(i8, i8)] = &[(-1, -1), (-1, 1), (1, -1), (1, 1)];
const NONE: &[(i8, i8)] = &[];

/// 盤上の駒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub promoted: bool,
}

impl Piece {
    /// 生駒を作る
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Piece {
        Piece {
            kind,
            side,
            promoted: false,
        }
    }

    /// 駒の表示文字。先手は小文字、後手は大文字
    pub fn letter(self) -> char {
        match self.side {
            Side::Sente => self.kind.letter().to_ascii_lowercase(),
            Side::Gote => self.kind.letter(),
        }
    }

    /// (単発ステップ, 走り方向) の組。先手視点のオフセット
    const fn pattern(self) -> (&'static [(i8, i8)], &'static [(i8, i8)]) {
        match (self.kind, self.promoted) {
            (PieceKind::King, _) => (KING_STEPS, NONE),
            (PieceKind::Rook, false) => (NONE, ROOK_SLIDES),
            // 竜: 斜め一歩が加わる
            (PieceKind::Rook, true) => (BISHOP_SLIDES, ROOK_SLIDES),
            (PieceKind::Bishop, false) => (NONE, BISHOP_SLIDES),
            // 馬: 縦横一歩が加わる
            (PieceKind::Bishop, true) => (ROOK_SLIDES, BISHOP_SLIDES),
            (PieceKind::Gold, _) => (GOLD_STEPS, NONE),
            (PieceKind::Silver, false) => (SILVER_STEPS, NONE),
            (PieceKind::Silver, true) => (GOLD_STEPS, NONE),
            (PieceKind::Knight, false) => (KNIGHT_STEPS, NONE),
            (PieceKind::Knight, true) => (GOLD_STEPS, NONE),
            (PieceKind::Lance, false) => (NONE, FORWARD),
            // 成香は走りを失い金と同じ動きになる
            (PieceKind::Lance, true) => (GOLD_STEPS, NONE),
            (PieceKind::Pawn, false) => (FORWARD, NONE),
            (PieceKind::Pawn, true) => (GOLD_STEPS, NONE),
        }
    }

    /// 後手は前後を反転
    #[inline]
    const fn orient(self, offset: (i8, i8)) -> (i8, i8) {
        match self.side {
            Side::Sente => offset,
            Side::Gote => (-offset.0, offset.1),
        }
    }

    /// 擬合法手を列挙する
    ///
    /// 移動先が盤内で、空きか相手駒の升だけを残す。未成の駒が敵陣三段に
    /// 入る手には成り手も並べて積む（成りは常に任意で、行き所のない駒の
    /// 強制成りは課さない）。
    pub fn pseudo_legal_moves(self, from: Square, grid: &Grid) -> MoveVec {
        let mut moves = MoveVec::new();
        let (steps, slides) = self.pattern();

        for &offset in steps {
            let (dr, dc) = self.orient(offset);
            if let Some(to) = from.offset(dr, dc) {
                match at(grid, to) {
                    None => self.push_dest(&mut moves, from, to),
                    Some(other) if other.side != self.side => {
                        self.push_dest(&mut moves, from, to)
                    }
                    Some(_) => {}
                }
            }
        }

        for &direction in slides {
            let (dr, dc) = self.orient(direction);
            let mut cursor = from.offset(dr, dc);
            while let Some(to) = cursor {
                match at(grid, to) {
                    None => {
                        self.push_dest(&mut moves, from, to);
                        cursor = to.offset(dr, dc);
                    }
                    Some(other) if other.side != self.side => {
                        // 最初の相手駒までで走りは止まる（取りとして一度だけ積む）
                        self.push_dest(&mut moves, from, to);
                        break;
                    }
                    Some(_) => break,
                }
            }
        }

        moves
    }

    fn push_dest(self, moves: &mut MoveVec, from: Square, to: Square) {
        moves.push(Move {
            from,
            to,
            promote: false,
        });
        if !self.promoted && self.side.in_promotion_zone(to.row()) {
            moves.push(Move {
                from,
                to,
                promote: true,
            });
        }
    }
}

/// 升上の駒を読む
#[inline]
pub(crate) fn at(grid: &Grid, sq: Square) -> Option<Piece> {
    grid[sq.row() as usize][sq.col() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_grid() -> Grid {
        [[None; 9]; 9]
    }

    fn notations(moves: &MoveVec) -> Vec<String> {
        moves.iter().map(|m| m.notation()).collect()
    }

    #[test]
    fn test_pawn_forward() {
        let grid = empty_grid();
        let pawn = Piece::new(PieceKind::Pawn, Side::Sente);
        let moves = pawn.pseudo_legal_moves(Square::new(5, 3), &grid);
        assert_eq!(notations(&moves), ["d4d5"]);

        let gote_pawn = Piece::new(PieceKind::Pawn, Side::Gote);
        let moves = gote_pawn.pseudo_legal_moves(Square::new(4, 3), &grid);
        assert_eq!(notations(&moves), ["d5d4"]);
    }

    #[test]
    fn test_pawn_blocked_by_own_piece() {
        let mut grid = empty_grid();
        grid[4][3] = Some(Piece::new(PieceKind::Gold, Side::Sente));
        let pawn = Piece::new(PieceKind::Pawn, Side::Sente);
        let moves = pawn.pseudo_legal_moves(Square::new(5, 3), &grid);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_pawn_promotion_zone_yields_both_variants() {
        let grid = empty_grid();
        let pawn = Piece::new(PieceKind::Pawn, Side::Sente);
        let moves = pawn.pseudo_legal_moves(Square::new(3, 2), &grid);
        assert_eq!(notations(&moves), ["c6c7", "c6c7+"]);

        // 成駒は一通りだけ
        let mut promoted = pawn;
        promoted.promoted = true;
        let moves = promoted.pseudo_legal_moves(Square::new(3, 2), &grid);
        assert_eq!(moves.len(), 6);
        assert!(moves.iter().all(|m| !m.promote));
    }

    #[test]
    fn test_knight_jump() {
        let grid = empty_grid();
        let knight = Piece::new(PieceKind::Knight, Side::Sente);
        let moves = knight.pseudo_legal_moves(Square::new(4, 4), &grid);
        let mut dests: Vec<Square> = moves.iter().map(|m| m.to).collect();
        dests.sort();
        dests.dedup(); // 跳び先は敵陣なので成り手も並ぶ
        assert_eq!(dests, [Square::new(2, 3), Square::new(2, 5)]);

        let gote_knight = Piece::new(PieceKind::Knight, Side::Gote);
        let moves = gote_knight.pseudo_legal_moves(Square::new(4, 4), &grid);
        let mut dests: Vec<Square> = moves.iter().map(|m| m.to).collect();
        dests.sort();
        dests.dedup();
        assert_eq!(dests, [Square::new(6, 3), Square::new(6, 5)]);
    }

    #[test]
    fn test_gold_pattern_mirrors_for_gote() {
        let grid = empty_grid();
        let gold = Piece::new(PieceKind::Gold, Side::Gote);
        let moves = gold.pseudo_legal_moves(Square::new(4, 4), &grid);
        let mut dests: Vec<Square> = moves.iter().map(|m| m.to).collect();
        dests.sort();
        assert_eq!(
            dests,
            [
                Square::new(3, 4),
                Square::new(4, 3),
                Square::new(4, 5),
                Square::new(5, 3),
                Square::new(5, 4),
                Square::new(5, 5),
            ]
        );
    }

    #[test]
    fn test_king_all_adjacent() {
        let grid = empty_grid();
        let king = Piece::new(PieceKind::King, Side::Sente);
        let moves = king.pseudo_legal_moves(Square::new(4, 4), &grid);
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| {
            let dr = (m.to.row() as i8 - 4).abs();
            let dc = (m.to.col() as i8 - 4).abs();
            dr <= 1 && dc <= 1
        }));

        // 隅では盤内の 3 方向だけ
        let moves = king.pseudo_legal_moves(Square::new(8, 8), &grid);
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn test_rook_slides_until_first_occupied() {
        let mut grid = empty_grid();
        grid[4][6] = Some(Piece::new(PieceKind::Pawn, Side::Sente));
        grid[4][2] = Some(Piece::new(PieceKind::Pawn, Side::Gote));
        let rook = Piece::new(PieceKind::Rook, Side::Sente);
        let moves = rook.pseudo_legal_moves(Square::new(4, 4), &grid);
        let dests: Vec<Square> = moves.iter().map(|m| m.to).collect();

        // 右は味方の直前まで。味方の升は含まれない
        assert!(dests.contains(&Square::new(4, 5)));
        assert!(!dests.contains(&Square::new(4, 6)));
        // 左は相手駒の升まで含み、その先へは抜けない
        assert!(dests.contains(&Square::new(4, 3)));
        assert!(dests.contains(&Square::new(4, 2)));
        assert!(!dests.contains(&Square::new(4, 1)));
        // 縦は両端まで
        assert!(dests.contains(&Square::new(0, 4)));
        assert!(dests.contains(&Square::new(8, 4)));
    }

    #[test]
    fn test_lance_forward_only() {
        let mut grid = empty_grid();
        grid[2][0] = Some(Piece::new(PieceKind::Pawn, Side::Gote));
        let lance = Piece::new(PieceKind::Lance, Side::Sente);
        let moves = lance.pseudo_legal_moves(Square::new(8, 0), &grid);
        let dests: Vec<Square> = moves.iter().map(|m| m.to).collect();
        assert!(dests.contains(&Square::new(3, 0)));
        assert!(dests.contains(&Square::new(2, 0)));
        assert!(!dests.contains(&Square::new(1, 0)));
        // 敵陣に届く手には成りの選択肢が付く
        assert!(moves
            .iter()
            .any(|m| m.to == Square::new(2, 0) && m.promote));
    }

    #[test]
    fn test_promoted_rook_gains_diagonal_steps() {
        let grid = empty_grid();
        let mut rook = Piece::new(PieceKind::Rook, Side::Sente);
        rook.promoted = true;
        let moves = rook.pseudo_legal_moves(Square::new(4, 4), &grid);
        let dests: Vec<Square> = moves.iter().map(|m| m.to).collect();
        assert!(dests.contains(&Square::new(3, 3)));
        assert!(dests.contains(&Square::new(5, 5)));
        // 斜めは一歩だけ
        assert!(!dests.contains(&Square::new(2, 2)));
        // 走りは残る
        assert!(dests.contains(&Square::new(4, 0)));
    }

    #[test]
    fn test_promoted_silver_moves_like_gold() {
        let grid = empty_grid();
        let mut silver = Piece::new(PieceKind::Silver, Side::Sente);
        silver.promoted = true;
        let gold = Piece::new(PieceKind::Gold, Side::Sente);
        let silver_moves = notations(&silver.pseudo_legal_moves(Square::new(4, 4), &grid));
        let gold_moves = notations(&gold.pseudo_legal_moves(Square::new(4, 4), &grid));
        assert_eq!(silver_moves, gold_moves);
    }

    #[test]
    fn test_destinations_never_land_on_own_piece() {
        let mut grid = empty_grid();
        grid[3][3] = Some(Piece::new(PieceKind::Pawn, Side::Sente));
        grid[3][4] = Some(Piece::new(PieceKind::Pawn, Side::Sente));
        grid[5][5] = Some(Piece::new(PieceKind::Gold, Side::Sente));
        for kind in PieceKind::ALL {
            let piece = Piece::new(kind, Side::Sente);
            for m in piece.pseudo_legal_moves(Square::new(4, 4), &grid) {
                let occupied = at(&grid, m.to);
                assert!(!matches!(occupied, Some(p) if p.side == Side::Sente));
            }
        }
    }
}
