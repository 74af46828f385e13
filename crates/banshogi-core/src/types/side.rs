//! 対局者の側（Side）

use serde::{Deserialize, Serialize};

/// 対局者の側（先手/後手）
///
/// 盤は先手を手前に固定する。row 8 が先手陣の最奥段、row 0 が後手陣の
/// 最奥段で、先手の「前」は row が減る方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Side {
    Sente = 0,
    Gote = 1,
}

impl Side {
    /// 側の数
    pub const NUM: usize = 2;

    /// 相手側を返す
    #[inline]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Sente => Side::Gote,
            Side::Gote => Side::Sente,
        }
    }

    /// 配列アクセス用インデックス
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 前方向の row 増分（先手: -1、後手: +1）
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::Sente => -1,
            Side::Gote => 1,
        }
    }

    /// row が自陣から見た敵陣三段（成り可能地帯）か
    #[inline]
    pub const fn in_promotion_zone(self, row: u8) -> bool {
        match self {
            Side::Sente => row <= 2,
            Side::Gote => row >= 6,
        }
    }
}

impl std::ops::Not for Side {
    type Output = Side;

    #[inline]
    fn not(self) -> Side {
        self.opponent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Sente.opponent(), Side::Gote);
        assert_eq!(Side::Gote.opponent(), Side::Sente);
        assert_eq!(!Side::Sente, Side::Gote);
    }

    #[test]
    fn test_side_forward() {
        assert_eq!(Side::Sente.forward(), -1);
        assert_eq!(Side::Gote.forward(), 1);
    }

    #[test]
    fn test_side_promotion_zone() {
        assert!(Side::Sente.in_promotion_zone(0));
        assert!(Side::Sente.in_promotion_zone(2));
        assert!(!Side::Sente.in_promotion_zone(3));
        assert!(Side::Gote.in_promotion_zone(6));
        assert!(Side::Gote.in_promotion_zone(8));
        assert!(!Side::Gote.in_promotion_zone(5));
    }
}
