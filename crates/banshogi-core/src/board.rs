//! 盤面（Board）
//!
//! 9x9 の盤そのものと、指し手・打ち手の実行、持ち駒のやり取り、王手判定、
//! 詰み判定に使う回避手の列挙を担う。
//!
//! どの操作も検証がすべて通ってから盤面を書き換える。回避手の列挙は
//! 盤面の作業用コピーに適用・巻き戻しを繰り返すだけで、確定前の手が
//! 本体の盤面に漏れることはない。

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::error::{DropError, EngineError, MoveError};
use crate::notation::{self, Command};
use crate::piece::{at, Grid, Move, Piece};
use crate::player::Player;
use crate::types::{PieceKind, Side, Square};

/// 盤面本体。グリッドと両玉の位置キャッシュを持つ。
///
/// 玉の位置キャッシュは駒を置く経路（`put_piece`）だけで更新され、
/// 玉を動かした後も必ず実際の玉の位置と一致する。
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    king_pos: [Option<Square>; Side::NUM],
}

impl Board {
    /// 平手初期配置の盤面
    pub fn new() -> Board {
        let mut board = Board::empty();
        board.setup_hirate();
        board
    }

    /// 駒のない盤面（任意局面の構築用）
    pub fn empty() -> Board {
        Board {
            grid: [[None; 9]; 9],
            king_pos: [None; Side::NUM],
        }
    }

    /// 平手の初期配置
    ///
    /// ```text
    /// 9 | L| N| S| G| K| G| S| N| L|
    /// 8 |__| R|__|__|__|__|__| B|__|
    /// 7 | P| P| P| P| P| P| P| P| P|
    /// 6 |__|__|__|__|__|__|__|__|__|
    /// 5 |__|__|__|__|__|__|__|__|__|
    /// 4 |__|__|__|__|__|__|__|__|__|
    /// 3 | p| p| p| p| p| p| p| p| p|
    /// 2 |__| b|__|__|__|__|__| r|__|
    /// 1 | l| n| s| g| k| g| s| n| l|
    ///     a  b  c  d  e  f  g  h  i
    /// ```
    fn setup_hirate(&mut self) {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; 9] = [Lance, Knight, Silver, Gold, King, Gold, Silver, Knight, Lance];

        for (col, &kind) in BACK_RANK.iter().enumerate() {
            self.put_piece(Square::new(0, col as u8), Piece::new(kind, Side::Gote));
            self.put_piece(Square::new(8, col as u8), Piece::new(kind, Side::Sente));
        }
        // 飛角は二段目。筋は先後で鏡映になる
        self.put_piece(Square::new(1, 1), Piece::new(Rook, Side::Gote));
        self.put_piece(Square::new(1, 7), Piece::new(Bishop, Side::Gote));
        self.put_piece(Square::new(7, 1), Piece::new(Bishop, Side::Sente));
        self.put_piece(Square::new(7, 7), Piece::new(Rook, Side::Sente));
        for col in 0..9u8 {
            self.put_piece(Square::new(2, col), Piece::new(Pawn, Side::Gote));
            self.put_piece(Square::new(6, col), Piece::new(Pawn, Side::Sente));
        }
    }

    /// 駒を置く（上書き）。玉なら位置キャッシュも追随する。
    pub fn put_piece(&mut self, sq: Square, piece: Piece) {
        set(&mut self.grid, sq, Some(piece));
        if piece.kind == PieceKind::King {
            self.king_pos[piece.side.index()] = Some(sq);
        }
    }

    /// 升上の駒
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        at(&self.grid, sq)
    }

    /// グリッドのスナップショット参照
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// 表記文字列を解釈して移動または打ちを実行する
    ///
    /// 2 文字目が `*` なら打ち、それ以外は移動として扱う。
    pub fn execute(&mut self, command: &str, player: &mut Player) -> Result<(), EngineError> {
        match notation::parse_command(command)? {
            Command::Move { from, to, promote } => self.commit_move(from, to, promote, player),
            Command::Drop { kind, to } => self.commit_drop(kind, to, player),
        }
    }

    /// 移動手を実行する
    ///
    /// 自玉が王手に残る手はここでは弾かない。合法性の最終判断は
    /// `is_in_check` / `enumerate_evasions` を使う呼び出し側に委ねる。
    pub fn execute_move(&mut self, command: &str, player: &mut Player) -> Result<(), EngineError> {
        let (from, to, promote) = notation::parse_move(command)?;
        self.commit_move(from, to, promote, player)
    }

    /// 打ち手を実行する。打ち歩詰めはここでは禁止しない。
    pub fn execute_drop(&mut self, command: &str, player: &mut Player) -> Result<(), EngineError> {
        let (kind, to) = notation::parse_drop(command)?;
        self.commit_drop(kind, to, player)
    }

    fn commit_move(
        &mut self,
        from: Square,
        to: Square,
        promote: bool,
        player: &mut Player,
    ) -> Result<(), EngineError> {
        let piece = self.piece_on(from).ok_or(MoveError::EmptySource)?;
        if piece.side != player.side() {
            return Err(MoveError::WrongSide.into());
        }
        let wanted = Move { from, to, promote };
        if !piece.pseudo_legal_moves(from, &self.grid).contains(&wanted) {
            return Err(MoveError::NotPseudoLegal.into());
        }
        let captured = self.piece_on(to);
        if let Some(target) = captured {
            if target.side == piece.side {
                return Err(MoveError::OwnPieceDestination.into());
            }
        }
        if promote && (piece.promoted || !piece.side.in_promotion_zone(to.row())) {
            return Err(MoveError::BadPromotion.into());
        }

        // ここから先は失敗しない
        if let Some(target) = captured {
            player.capture(target.kind);
            trace!(
                "{:?} captures {} on {}",
                player.side(),
                target.kind.letter(),
                notation::encode_square(to)
            );
        }
        let mut moved = piece;
        if promote {
            moved.promoted = true;
        }
        set(&mut self.grid, from, None);
        self.put_piece(to, moved);
        debug!("{:?} plays {}", player.side(), wanted);
        Ok(())
    }

    fn commit_drop(
        &mut self,
        kind: PieceKind,
        to: Square,
        player: &mut Player,
    ) -> Result<(), EngineError> {
        self.check_drop(kind, to, player.side())?;
        player.drop(kind)?;
        self.put_piece(to, Piece::new(kind, player.side()));
        debug!(
            "{:?} drops {}",
            player.side(),
            notation::encode_drop(kind, to)
        );
        Ok(())
    }

    /// 打てない理由があればエラー（持ち駒の有無はここでは見ない）
    fn check_drop(&self, kind: PieceKind, to: Square, side: Side) -> Result<(), DropError> {
        if self.piece_on(to).is_some() {
            return Err(DropError::Occupied);
        }
        if kind.drop_forbidden(side, to.row()) {
            return Err(DropError::ForbiddenRank(kind));
        }
        if kind == PieceKind::Pawn && self.has_unpromoted_pawn_on_file(side, to.col()) {
            return Err(DropError::Nifu);
        }
        Ok(())
    }

    fn has_unpromoted_pawn_on_file(&self, side: Side, col: u8) -> bool {
        (0..9u8).any(|row| {
            matches!(
                at(&self.grid, Square::new(row, col)),
                Some(p) if p.kind == PieceKind::Pawn && p.side == side && !p.promoted
            )
        })
    }

    /// side の玉に王手が掛かっているか
    ///
    /// 相手側全駒の擬合法移動先の和集合に、玉の現在位置が含まれるかで
    /// 判定する。
    pub fn is_in_check(&self, side: Side) -> bool {
        let Some(king_sq) = self.king_square(side) else {
            return false;
        };
        attacked_squares(&self.grid, side.opponent()).contains(&king_sq)
    }

    /// 玉の現在位置
    ///
    /// 玉自身の擬合法手が共有する移動元から読み取る（生成される手は
    /// すべて同じ from を持つ）。玉に手が無いときはキャッシュに頼る。
    fn king_square(&self, side: Side) -> Option<Square> {
        let cached = self.king_pos[side.index()]?;
        let king = self
            .piece_on(cached)
            .filter(|p| p.kind == PieceKind::King && p.side == side)?;
        let moves = king.pseudo_legal_moves(cached, &self.grid);
        Some(moves.last().map_or(cached, |m| m.from))
    }

    /// 指した後に自玉が王手から外れる手（移動・打ち）の表記集合
    ///
    /// 玉の逃げ場と、動かして確かめた手の積集合に、打って確かめた手を
    /// 合わせたもの。王手中にこれが空なら詰み。
    pub fn enumerate_evasions(&self, player: &Player) -> BTreeSet<String> {
        let side = player.side();
        let king = self.king_evasions(side);
        let pieces = self.piece_evasions(side);
        let mut evasions: BTreeSet<String> = king.intersection(&pieces).cloned().collect();
        evasions.extend(self.drop_evasions(player));
        evasions
    }

    /// 相手の利きの無い升への玉の移動
    fn king_evasions(&self, side: Side) -> BTreeSet<String> {
        let Some(king_sq) = self.king_square(side) else {
            return BTreeSet::new();
        };
        let Some(king) = self.piece_on(king_sq) else {
            return BTreeSet::new();
        };
        let attacked = attacked_squares(&self.grid, side.opponent());
        king.pseudo_legal_moves(king_sq, &self.grid)
            .into_iter()
            .filter(|m| !attacked.contains(&m.to))
            .map(|m| m.notation())
            .collect()
    }

    /// 全駒の擬合法手を一手ずつ試し、王手が解けている手を残す
    fn piece_evasions(&self, side: Side) -> BTreeSet<String> {
        let mut scratch = self.grid;
        let mut evasions = BTreeSet::new();
        for (from, piece) in pieces_of(&self.grid, side) {
            for m in piece.pseudo_legal_moves(from, &self.grid) {
                let mut moved = piece;
                if m.promote {
                    moved.promoted = true;
                }
                let captured = at(&scratch, m.to);
                set(&mut scratch, from, None);
                set(&mut scratch, m.to, Some(moved));

                if !in_check_on(&scratch, side) {
                    evasions.insert(m.notation());
                }

                // 巻き戻し
                set(&mut scratch, m.to, captured);
                set(&mut scratch, from, Some(piece));
            }
        }
        evasions
    }

    /// 持ち駒を空き升へ打ってみて、王手が解けている打ち手を残す
    fn drop_evasions(&self, player: &Player) -> BTreeSet<String> {
        let side = player.side();
        let mut kinds: Vec<PieceKind> = player.hand().to_vec();
        kinds.sort_unstable();
        kinds.dedup();

        let mut scratch = self.grid;
        let mut evasions = BTreeSet::new();
        for kind in kinds {
            for to in Square::all() {
                if self.check_drop(kind, to, side).is_err() {
                    continue;
                }
                set(&mut scratch, to, Some(Piece::new(kind, side)));
                if !in_check_on(&scratch, side) {
                    evasions.insert(notation::encode_drop(kind, to));
                }
                set(&mut scratch, to, None);
            }
        }
        evasions
    }

    /// 人が読むための盤面テキスト。両者の持ち駒も添える。
    pub fn render(&self, sente: &Player, gote: &Player) -> String {
        let mut out = String::new();
        for (idx, row) in self.grid.iter().enumerate() {
            out.push_str(&format!("{} |", 9 - idx));
            for cell in row {
                match cell {
                    Some(p) if p.promoted => {
                        out.push('+');
                        out.push(p.letter());
                        out.push('|');
                    }
                    Some(p) => {
                        out.push(' ');
                        out.push(p.letter());
                        out.push('|');
                    }
                    None => out.push_str("__|"),
                }
            }
            out.push('\n');
        }
        out.push_str("    a  b  c  d  e  f  g  h  i\n\n");
        out.push_str(&format!("{} captures: {}\n", sente.name(), hand_line(sente)));
        out.push_str(&format!("{} captures: {}\n", gote.name(), hand_line(gote)));
        out
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

#[inline]
fn set(grid: &mut Grid, sq: Square, cell: Option<Piece>) {
    grid[sq.row() as usize][sq.col() as usize] = cell;
}

/// グリッド上の side の駒を列挙する
fn pieces_of(grid: &Grid, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
    Square::all().filter_map(move |sq| match at(grid, sq) {
        Some(p) if p.side == side => Some((sq, p)),
        _ => None,
    })
}

/// side の全駒の擬合法移動先の和集合
fn attacked_squares(grid: &Grid, side: Side) -> BTreeSet<Square> {
    let mut attacked = BTreeSet::new();
    for (sq, piece) in pieces_of(grid, side) {
        for m in piece.pseudo_legal_moves(sq, grid) {
            attacked.insert(m.to);
        }
    }
    attacked
}

/// 作業用グリッド上で side の玉が王手されているか（玉は走査で探す）
fn in_check_on(grid: &Grid, side: Side) -> bool {
    let Some((king_sq, _)) = pieces_of(grid, side).find(|(_, p)| p.kind == PieceKind::King) else {
        return false;
    };
    attacked_squares(grid, side.opponent()).contains(&king_sq)
}

fn hand_line(player: &Player) -> String {
    player
        .hand()
        .iter()
        .map(|k| k.letter().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
