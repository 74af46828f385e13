//! 対局（Game）
//!
//! 手番の進行と終局判定。手番は手数の偶奇で厳密に交代し、受理された
//! 一手ごとに手数がちょうど 1 進む。

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::EngineError;
use crate::player::Player;
use crate::types::{PieceKind, Side};

/// 対局の進行状態
///
/// `Finished` は終端で、以後の遷移は無い。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Finished { winner: Side },
}

/// 一局。盤と両対局者、手数を束ねる。
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; Side::NUM],
    round: u32,
    status: GameStatus,
}

impl Game {
    /// 平手初期配置から対局を始める
    pub fn new(sente_name: impl Into<String>, gote_name: impl Into<String>) -> Game {
        Game::with_board(Board::new(), sente_name, gote_name)
    }

    /// 任意の盤面から対局を始める（駒落ちや途中局面の再開用）
    pub fn with_board(
        board: Board,
        sente_name: impl Into<String>,
        gote_name: impl Into<String>,
    ) -> Game {
        Game {
            board,
            players: [
                Player::new(sente_name, Side::Sente),
                Player::new(gote_name, Side::Gote),
            ],
            round: 0,
            status: GameStatus::InProgress,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// 受理された手の数
    #[inline]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// いま指す側（手数の偶奇で交代）
    #[inline]
    pub fn side_to_move(&self) -> Side {
        if self.round % 2 == 0 {
            Side::Sente
        } else {
            Side::Gote
        }
    }

    /// 手番側の一手として表記を実行し、終局判定まで進める
    ///
    /// 手が拒否された場合は盤面も手数も変わらない。
    pub fn submit(&mut self, command: &str) -> Result<GameStatus, EngineError> {
        if matches!(self.status, GameStatus::Finished { .. }) {
            return Err(EngineError::GameOver);
        }
        let side = self.side_to_move();
        self.board
            .execute(command, &mut self.players[side.index()])?;
        self.round += 1;
        self.status = self.evaluate_outcome();
        if let GameStatus::Finished { winner } = self.status {
            debug!("game over after {} moves, winner: {:?}", self.round, winner);
        }
        Ok(self.status)
    }

    /// 終局判定
    ///
    /// 玉を取られた側と詰まされた側は負け。二つの条件は独立で、どちらか
    /// 一方だけでも終局になる。
    pub fn evaluate_outcome(&self) -> GameStatus {
        let mut status = GameStatus::InProgress;
        if self.is_defeated(Side::Sente) {
            status = GameStatus::Finished { winner: Side::Gote };
        }
        if self.is_defeated(Side::Gote) {
            status = GameStatus::Finished {
                winner: Side::Sente,
            };
        }
        status
    }

    /// 盤面テキスト（両者の持ち駒つき）
    pub fn render(&self) -> String {
        self.board
            .render(self.player(Side::Sente), self.player(Side::Gote))
    }

    fn is_defeated(&self, side: Side) -> bool {
        self.king_captured(side) || self.checkmated(side)
    }

    /// side の玉が相手の持ち駒に入っているか
    fn king_captured(&self, side: Side) -> bool {
        self.player(side.opponent()).has_in_hand(PieceKind::King)
    }

    /// side が王手されていて回避手が無いか
    fn checkmated(&self, side: Side) -> bool {
        self.board.is_in_check(side)
            && self.board.enumerate_evasions(self.player(side)).is_empty()
    }
}
