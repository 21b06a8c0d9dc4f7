//! 数学ユーティリティモジュール
//!
//! このモジュールには、ゲーム内で使用される数学関連の型と関数が含まれています。

use serde::{Deserialize, Serialize};

/// 2次元ベクトル
///
/// 位置と速度の両方に使用します。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// 新しいベクトルを作成
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// ゼロベクトル
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// 矩形の中心が指定点に来るような左上座標を計算
///
/// # 引数
///
/// * `center` - 中心にしたい点
/// * `width` - 矩形の幅
/// * `height` - 矩形の高さ
///
/// # 戻り値
///
/// * 左上の座標（画面外へのクリップは行わない）
pub fn centered_origin(center: Vec2, width: f64, height: f64) -> Vec2 {
    Vec2::new(center.x - width / 2.0, center.y - height / 2.0)
}

/// 2つの値がほぼ等しいかどうかを判定
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
