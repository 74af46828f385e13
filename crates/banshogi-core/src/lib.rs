//! # banshogi-core
//!
//! 9x9 将棋のルールエンジン。
//!
//! 対局を配信する Web サービス側（ルーティング・認証・永続化・通知）から
//! 呼ばれる純粋な状態機械で、エンジン自体は一切 I/O を行わない。
//! 盤面・駒・持ち駒の表現、指し手と打ち手の実行、王手判定、詰み判定用の
//! 回避手列挙を提供する。
//!
//! ## モジュール構成
//!
//! - `types`: 基本型（Side, Square, PieceKind）
//! - `notation`: 指し手表記の解析と生成
//! - `piece`: 駒と擬合法手生成
//! - `board`: 盤面表現と指し手の実行・王手/回避手判定
//! - `player`: 対局者と持ち駒
//! - `game`: 手番進行と終局判定
//! - `snapshot`: ホスト層へ渡す対局状態のビュー
//! - `error`: エラー分類

pub mod board;
pub mod error;
pub mod game;
pub mod notation;
pub mod piece;
pub mod player;
pub mod snapshot;
pub mod types;

pub use board::Board;
pub use error::{DropError, EngineError, MoveError};
pub use game::{Game, GameStatus};
pub use notation::NotationError;
pub use piece::{Move, Piece};
pub use player::Player;
pub use snapshot::GameSnapshot;
pub use types::{PieceKind, Side, Square};
