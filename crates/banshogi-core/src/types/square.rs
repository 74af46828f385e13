//! 升目（Square）

use serde::{Deserialize, Serialize};

use crate::notation::in_bounds;

/// 盤上の升目。(row, col) それぞれ 0..=8。
///
/// row 0 が後手陣の最奥段、row 8 が先手陣の最奥段。col 0 が盤面左端
/// （表記の 'a' 筋）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// 升目の数
    pub const NUM: usize = 81;

    /// row/col から生成。範囲は呼び出し側が保証する（0..=8）
    #[inline]
    pub const fn new(row: u8, col: u8) -> Square {
        debug_assert!(row < 9 && col < 9);
        Square { row, col }
    }

    /// 段（0..=8）
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// 筋（0..=8）
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// オフセット移動。盤外に出る場合は None
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if in_bounds(row, col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// 全升を返すイテレータ
    pub fn all() -> impl Iterator<Item = Square> {
        (0..9u8).flat_map(|row| (0..9u8).map(move |col| Square::new(row, col)))
    }
}
