//! 衝突検出モジュール
//!
//! このモジュールは、AABB（軸並行境界ボックス）同士の衝突検出と
//! 画面境界の判定を提供します。状態を持たない純粋な関数のみで構成されます。

/// AABB（軸並行境界ボックス）
///
/// 左上の座標とサイズで矩形を表します。
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// 左端のX座標
    pub x: f64,
    /// 上端のY座標
    pub y: f64,
    /// 幅
    pub width: f64,
    /// 高さ
    pub height: f64,
}

impl Aabb {
    /// 新しいAABBを作成
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// 右端のX座標
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// 下端のY座標
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// X方向の範囲内に収まっているかを判定
    ///
    /// 右端が `upper` を超えるか、左端が `lower` を下回った場合のみ範囲外です。
    /// 境界にちょうど接している場合は範囲内として扱います。
    pub fn in_bounds_x(&self, lower: f64, upper: f64) -> bool {
        !(self.right() > upper || self.x < lower)
    }

    /// 別のAABBと重なっているかを判定
    ///
    /// 分離軸が一つでも存在すれば衝突していません。
    /// 辺同士が接しているだけの場合も衝突として扱います。
    pub fn intersects(&self, other: &Aabb) -> bool {
        detect_aabb_aabb(self, other)
    }
}

/// 二つのAABB間の衝突を検出
pub fn detect_aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
    let separated = a.x > b.right()
        || a.right() < b.x
        || a.y > b.bottom()
        || a.bottom() < b.y;
    !separated
}
