//! ゲーム設定モジュール
//!
//! キャンバスサイズ、ティック間隔、プレイヤーや足場の初期配置などを保持します。
//! JavaScript側からJSONで一部だけ上書きでき、指定のない項目は既定値になります。

use serde::{Deserialize, Serialize};

use crate::game::entities::{Platform, Sprite};
use crate::game::error::SceneError;
use crate::game::player::{Player, PlayerPhysics};
use crate::rendering::ColorScheme;
use crate::utils::Vec2;

/// 既定のキャンバス幅
pub const CANVAS_WIDTH: f64 = 800.0;
/// 既定のキャンバス高さ
pub const CANVAS_HEIGHT: f64 = 480.0;
/// 既定の足場の幅
pub const PLATFORM_WIDTH: f64 = 200.0;
/// 既定の足場の高さ
pub const PLATFORM_HEIGHT: f64 = 15.0;

/// プレイヤーの初期設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub physics: PlayerPhysics,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 50.0,
            height: 50.0,
            x: 10.0,
            y: 10.0,
            physics: PlayerPhysics::default(),
        }
    }
}

/// ゲーム設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// キャンバスの幅
    pub canvas_width: f64,
    /// キャンバスの高さ
    pub canvas_height: f64,
    /// 描画・更新の間隔（秒）
    pub tick_seconds: f64,
    /// 足場の幅（初期配置とクリック生成の両方）
    pub platform_width: f64,
    /// 足場の高さ
    pub platform_height: f64,
    /// プレイヤーの初期設定
    pub player: PlayerConfig,
    /// 初期配置する足場の左上座標
    pub platforms: Vec<Vec2>,
    /// 配色
    pub colors: ColorScheme,
    /// キーボード入力を受け付けるか
    pub keyboard: bool,
    /// クリックによる足場生成を受け付けるか
    pub mouse: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            tick_seconds: 0.01,
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            player: PlayerConfig::default(),
            platforms: vec![
                Vec2::new(10.0, CANVAS_HEIGHT - 10.0),
                Vec2::new(400.0, 300.0),
            ],
            colors: ColorScheme::default(),
            keyboard: true,
            mouse: true,
        }
    }
}

impl GameConfig {
    /// JSON文字列から設定を読み込む
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| SceneError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 設定値を検証
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return Err(SceneError::Config(format!(
                "キャンバスサイズが不正です: {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        // キャンバスは整数ピクセルで確保するため、シーンの境界と食い違わないよう整数に限る
        if self.canvas_width.fract() != 0.0 || self.canvas_height.fract() != 0.0 {
            return Err(SceneError::Config(format!(
                "キャンバスサイズは整数で指定してください: {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.tick_seconds.is_finite() && self.tick_seconds > 0.0) {
            return Err(SceneError::Config(format!(
                "ティック間隔が不正です: {}",
                self.tick_seconds
            )));
        }
        let sizes = [
            self.platform_width,
            self.platform_height,
            self.player.width,
            self.player.height,
        ];
        if sizes.iter().any(|size| !(*size >= 0.0)) {
            return Err(SceneError::Config("サイズに負の値は指定できません".to_string()));
        }
        Ok(())
    }

    /// 設定サイズの足場を作成
    pub fn platform_at(&self, origin: Vec2) -> Platform {
        Platform::new(self.platform_width, self.platform_height, origin.x, origin.y)
    }

    /// 初期スプライト配列を作成（先頭がプレイヤー）
    pub fn build_sprites(&self) -> Vec<Sprite> {
        let player = &self.player;
        let mut sprites = vec![Sprite::Player(Player::with_physics(
            player.width,
            player.height,
            player.x,
            player.y,
            player.physics,
        ))];
        sprites.extend(self.platforms.iter().map(|origin| Sprite::Platform(self.platform_at(*origin))));
        sprites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.canvas_width, 800.0);
        assert_eq!(config.canvas_height, 480.0);
        assert_eq!(config.tick_seconds, 0.01);
        assert!(config.validate().is_ok());

        let sprites = config.build_sprites();
        assert_eq!(sprites.len(), 3);
        assert!(sprites[0].is_player());
        assert_eq!(sprites[1].body().position, Vec2::new(10.0, 470.0));
        assert_eq!(sprites[2].body().position, Vec2::new(400.0, 300.0));
        assert_eq!(sprites[2].body().width(), 200.0);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{ "tick_seconds": 0.02, "player": { "x": 100.0, "physics": { "gravity": 1.5 } } }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.tick_seconds, 0.02);
        assert_eq!(config.canvas_width, 800.0);
        assert_eq!(config.player.x, 100.0);
        assert_eq!(config.player.width, 50.0);
        assert_eq!(config.player.physics.gravity, 1.5);
        assert_eq!(config.player.physics.jump_height, 20.0);
        assert_eq!(config.platforms.len(), 2);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(GameConfig::from_json("{ not json"), Err(SceneError::Config(_))));
        assert!(matches!(
            GameConfig::from_json(r#"{ "tick_seconds": 0.0 }"#),
            Err(SceneError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "platform_width": -1.0 }"#),
            Err(SceneError::Config(_))
        ));
    }

    #[test]
    fn test_fractional_canvas_size_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "canvas_width": 800.5 }"#),
            Err(SceneError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "canvas_height": 479.9 }"#),
            Err(SceneError::Config(_))
        ));
        assert!(GameConfig::from_json(r#"{ "canvas_width": 640, "canvas_height": 360 }"#).is_ok());
    }

    #[test]
    fn test_round_trip_json() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
