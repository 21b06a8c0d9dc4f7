//! ゲームモジュール
//!
//! ゲームのコア機能を提供するモジュールです。
//! スプライト（プレイヤーと足場）、シーンのゲームループ、設定とエラーを提供します。

pub mod config;    // ゲーム設定
pub mod entities;  // スプライトの共通部分と足場
pub mod error;     // シーンのエラー
pub mod player;    // プレイヤーの物理状態
pub mod scene;     // シーンとゲームループ

pub use config::GameConfig;
pub use entities::{Platform, Sprite, SpriteBody};
pub use error::SceneError;
pub use player::{Player, PlayerPhysics};
pub use scene::{Scene, SceneState};
