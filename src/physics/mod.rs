//! 物理システムモジュール
//!
//! このモジュールは、ゲーム内の当たり判定に使う幾何プリミティブを提供します。
//! 重力や摩擦などの運動はプレイヤー側（`game::player`）で扱います。

pub mod collision;

pub use collision::{detect_aabb_aabb, Aabb};
