//! 対局者（Player）

use crate::error::DropError;
use crate::types::{PieceKind, Side};

/// 対局者。側と表示名、取った駒の並びを持つ。
///
/// 持ち駒は取得順のままの多重集合で、駒種以外の情報（先後・成り）は
/// 持たない。
#[derive(Debug, Clone)]
pub struct Player {
    side: Side,
    name: String,
    hand: Vec<PieceKind>,
}

impl Player {
    pub fn new(name: impl Into<String>, side: Side) -> Player {
        Player {
            side,
            name: name.into(),
            hand: Vec::new(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 持ち駒（取得順のまま）
    #[inline]
    pub fn hand(&self) -> &[PieceKind] {
        &self.hand
    }

    /// 取った駒を持ち駒に加える
    pub fn capture(&mut self, kind: PieceKind) {
        self.hand.push(kind);
    }

    /// 持ち駒からひとつ取り除く（最初に見つかったもの）
    pub fn drop(&mut self, kind: PieceKind) -> Result<(), DropError> {
        match self.hand.iter().position(|&k| k == kind) {
            Some(i) => {
                self.hand.remove(i);
                Ok(())
            }
            None => Err(DropError::NotInHand(kind)),
        }
    }

    /// 指定駒種を持っているか
    pub fn has_in_hand(&self, kind: PieceKind) -> bool {
        self.hand.contains(&kind)
    }
}
