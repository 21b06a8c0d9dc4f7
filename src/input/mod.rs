//! 入力処理システムの実装
//!
//! このモジュールは、キーボードとマウスの入力処理を担当します。
//! 矢印キーの押下状態の管理と、シーンへ入力イベントを届ける
//! バインディング（`InputBinding`）を提供します。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use wasm_bindgen::JsValue;

use crate::game::scene::SceneState;

pub mod dom;
pub mod key_codes;

pub use dom::{ClickSpawnBinding, KeyboardBinding};
pub use key_codes::*;

/// キーコード用の型エイリアス
pub type KeyCode = u32;

/// 矢印キーの押下状態テーブル
///
/// 認識するのは ←↑→↓ の4キーのみで、それ以外のキーコードは無視されます。
#[derive(Debug, Clone, PartialEq)]
pub struct KeyStates {
    pressed: HashMap<KeyCode, bool>,
}

impl KeyStates {
    /// 全キーが離された状態で作成
    pub fn new() -> Self {
        let pressed = TRACKED_KEYS.iter().map(|&code| (code, false)).collect();
        Self { pressed }
    }

    /// キーの状態を更新
    ///
    /// 認識しないキーコードの場合は何もせず `false` を返します。
    pub fn set(&mut self, pressed: bool, key_code: KeyCode) -> bool {
        match self.pressed.get_mut(&key_code) {
            Some(state) => {
                *state = pressed;
                true
            }
            None => false,
        }
    }

    /// キーが押されているかどうか
    pub fn is_pressed(&self, key_code: KeyCode) -> bool {
        self.pressed.get(&key_code).copied().unwrap_or(false)
    }

    pub fn left(&self) -> bool {
        self.is_pressed(KEY_LEFT)
    }

    pub fn up(&self) -> bool {
        self.is_pressed(KEY_UP)
    }

    pub fn right(&self) -> bool {
        self.is_pressed(KEY_RIGHT)
    }

    pub fn down(&self) -> bool {
        self.is_pressed(KEY_DOWN)
    }
}

impl Default for KeyStates {
    fn default() -> Self {
        Self::new()
    }
}

/// 入力バインディング
///
/// シーンの開始時に接続され、終了時に切断される入力源です。
/// どの入力を受け付けるかはシーン作成時に渡すバインディングで決まります。
pub trait InputBinding {
    /// ログ出力用の名前
    fn name(&self) -> &'static str;

    /// イベントリスナーを登録し、受け取った入力をシーンへ届ける
    fn attach(&mut self, scene: Weak<RefCell<SceneState>>) -> Result<(), JsValue>;

    /// 登録したイベントリスナーを解除する（未登録なら何もしない）
    fn detach(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_states_creation() {
        let keys = KeyStates::new();
        for code in TRACKED_KEYS.iter() {
            assert!(!keys.is_pressed(*code));
        }
    }

    #[test]
    fn test_key_update() {
        let mut keys = KeyStates::new();
        assert!(keys.set(true, KEY_UP));
        assert!(keys.up());
        assert!(!keys.left());

        assert!(keys.set(false, KEY_UP));
        assert!(!keys.up());

        keys.set(true, KEY_DOWN);
        assert!(keys.down());
    }

    #[test]
    fn test_unrecognized_key_is_ignored() {
        let mut keys = KeyStates::new();
        let before = keys.clone();
        assert!(!keys.set(true, 32)); // Space key
        assert!(!keys.is_pressed(32));
        assert_eq!(keys, before);
    }
}
