//! キーコードの定数定義
//!
//! このモジュールはゲームが認識する矢印キーの定数を定義します。
//! 値はブラウザの `KeyboardEvent.keyCode` に対応します。

use crate::input::KeyCode;

/// キーボード: ←
pub const KEY_LEFT: KeyCode = 37;
/// キーボード: ↑
pub const KEY_UP: KeyCode = 38;
/// キーボード: →
pub const KEY_RIGHT: KeyCode = 39;
/// キーボード: ↓
pub const KEY_DOWN: KeyCode = 40;

/// 状態を追跡するキーの一覧
pub const TRACKED_KEYS: [KeyCode; 4] = [KEY_LEFT, KEY_UP, KEY_RIGHT, KEY_DOWN];
