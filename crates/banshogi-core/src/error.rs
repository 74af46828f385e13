//! エラー分類
//!
//! 表記の不備（`NotationError`）、指せない移動（`MoveError`）、打てない
//! 打ち手（`DropError`）を区別する。どの操作も検証がすべて通るまで盤面に
//! 触れないため、エラー時に盤面が中途半端に書き換わることはない。

use thiserror::Error;

use crate::notation::NotationError;
use crate::types::PieceKind;

/// エンジン操作の失敗理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid notation: {0}")]
    InvalidNotation(#[from] NotationError),
    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),
    #[error("illegal drop: {0}")]
    IllegalDrop(#[from] DropError),
    /// 終局後の対局へ手を投入した
    #[error("game is already finished")]
    GameOver,
}

/// 移動手が拒否される理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on the source square")]
    EmptySource,
    #[error("the source piece belongs to the opponent")]
    WrongSide,
    #[error("the piece cannot reach the destination")]
    NotPseudoLegal,
    #[error("the destination holds a piece of the same side")]
    OwnPieceDestination,
    #[error("the piece cannot promote on this move")]
    BadPromotion,
}

/// 打ち手が拒否される理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DropError {
    #[error("the target square is occupied")]
    Occupied,
    #[error("{} cannot be dropped on that rank", .0.letter())]
    ForbiddenRank(PieceKind),
    /// 二歩。同じ筋に自分の生歩が既にある
    #[error("an unpromoted pawn is already on that file")]
    Nifu,
    #[error("no {} in hand", .0.letter())]
    NotInHand(PieceKind),
}
