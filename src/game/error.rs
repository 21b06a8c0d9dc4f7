//! ゲームエラーモジュール

use std::fmt;

use wasm_bindgen::JsValue;

/// シーンの構築・設定に関するエラー
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// スプライト配列が不正（空、先頭がプレイヤーでない、プレイヤーが複数）
    InvalidSceneConfiguration(String),
    /// 設定の解析・検証エラー
    Config(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidSceneConfiguration(msg) => write!(f, "シーン構成エラー: {}", msg),
            SceneError::Config(msg) => write!(f, "設定エラー: {}", msg),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<SceneError> for JsValue {
    fn from(err: SceneError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SceneError::InvalidSceneConfiguration("empty".to_string());
        assert_eq!(err.to_string(), "シーン構成エラー: empty");

        let err = SceneError::Config("bad json".to_string());
        assert_eq!(err.to_string(), "設定エラー: bad json");
    }
}
