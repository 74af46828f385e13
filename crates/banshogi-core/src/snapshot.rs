//! 対局状態のスナップショット
//!
//! ホスト層（配信・永続化）へ渡す JSON 向きのビュー。盤のセル行列と
//! 両者の持ち駒、手番、手数を平坦な構造体で持つ。

use serde::{Deserialize, Serialize};

use crate::game::{Game, GameStatus};
use crate::notation;
use crate::player::Player;
use crate::types::{Side, Square};

/// 駒 1 枚分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceState {
    /// "sente" | "gote"
    pub owner: Side,
    /// "K" | "R" | "B" | "G" | "S" | "N" | "L" | "P"
    #[serde(rename = "type")]
    pub kind: String,
    pub promoted: bool,
}

/// 盤面の 1 マス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellState {
    /// "a9" 〜 "i1" 形式
    pub square: String,
    /// 駒（無ければ null）
    pub piece: Option<PieceState>,
}

/// 両者の持ち駒（取得順の駒種文字）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandsState {
    pub sente: Vec<String>,
    pub gote: Vec<String>,
}

/// 対局全体の状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// 9x9 のセル配列（row 0 = 後手陣の最奥段）
    pub cells: Vec<Vec<CellState>>,
    pub hands: HandsState,
    pub turn: Side,
    pub round: u32,
    pub status: GameStatus,
}

impl Game {
    /// 現在の対局状態をスナップショットにする
    pub fn snapshot(&self) -> GameSnapshot {
        let mut cells = Vec::with_capacity(9);
        for row in 0..9u8 {
            let mut line = Vec::with_capacity(9);
            for col in 0..9u8 {
                let sq = Square::new(row, col);
                line.push(CellState {
                    square: notation::encode_square(sq),
                    piece: self.board().piece_on(sq).map(|p| PieceState {
                        owner: p.side,
                        kind: p.kind.letter().to_string(),
                        promoted: p.promoted,
                    }),
                });
            }
            cells.push(line);
        }

        GameSnapshot {
            cells,
            hands: HandsState {
                sente: hand_letters(self.player(Side::Sente)),
                gote: hand_letters(self.player(Side::Gote)),
            },
            turn: self.side_to_move(),
            round: self.round(),
            status: self.status(),
        }
    }
}

fn hand_letters(player: &Player) -> Vec<String> {
    player
        .hand()
        .iter()
        .map(|k| k.letter().to_string())
        .collect()
}
