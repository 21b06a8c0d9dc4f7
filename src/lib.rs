use std::rc::Rc;

use wasm_bindgen::prelude::*;

// モジュール宣言
pub mod game;
pub mod input;
pub mod physics;
pub mod rendering;
pub mod utils;

use game::{GameConfig, Scene, SceneState};
use input::{ClickSpawnBinding, KeyboardBinding};
use rendering::{prepare_canvas, CanvasSurface};
use utils::{BrowserIntervalHost, LogLevel};

// 初期化用のエントリーポイント
#[wasm_bindgen(start)]
pub fn start() {
    // エラーをコンソールにパニックフックとして表示
    console_error_panic_hook::set_once();

    // ロガーの初期化
    utils::init_logging(LogLevel::Info);
    log::info!("WebAssembly module initialized!");
}

/// ゲームインスタンスを作成して開始するエクスポート関数
///
/// # 引数
///
/// * `canvas_id` - 描画先キャンバスのID
/// * `config_json` - 設定のJSON（省略時は既定値）
#[wasm_bindgen]
pub fn initialize_game(canvas_id: &str, config_json: Option<String>) -> Result<GameInstance, JsValue> {
    let config = match config_json {
        Some(json) => GameConfig::from_json(&json)?,
        None => GameConfig::default(),
    };
    GameInstance::new(canvas_id, &config)
}

// JavaScriptからアクセス可能なゲームインスタンス
#[wasm_bindgen]
pub struct GameInstance {
    scene: Scene,
}

impl GameInstance {
    /// 設定からシーンを組み立てて開始
    pub fn new(canvas_id: &str, config: &GameConfig) -> Result<GameInstance, JsValue> {
        config.validate()?;

        let canvas = prepare_canvas(canvas_id, config.canvas_width as u32, config.canvas_height as u32)?;
        let surface = Rc::new(CanvasSurface::new(canvas.clone())?);
        let host = Rc::new(BrowserIntervalHost::new()?);
        let state = SceneState::from_config(config)?;

        let mut scene = Scene::from_state(state, config.tick_seconds, surface, host);
        if config.keyboard {
            scene = scene.with_binding(Box::new(KeyboardBinding::new()?));
        }
        if config.mouse {
            scene = scene.with_binding(Box::new(ClickSpawnBinding::new(canvas)));
        }
        scene.start();

        Ok(GameInstance { scene })
    }
}

#[wasm_bindgen]
impl GameInstance {
    /// 一時停止と再開を切り替える
    pub fn pause(&mut self) {
        self.scene.pause();
    }

    /// 一時停止中かどうか
    pub fn is_paused(&self) -> bool {
        self.scene.is_paused()
    }

    /// ゲームを終了し、画面を消去する
    pub fn end(&mut self) {
        self.scene.end();
    }

    /// シーン内のスプライト数
    pub fn sprite_count(&self) -> usize {
        self.scene.state().borrow().sprites().len()
    }

    /// プレイヤーの位置 [x, y]
    pub fn player_position(&self) -> Vec<f64> {
        let state = self.scene.state();
        let state = state.borrow();
        let position = state.player().body().position;
        vec![position.x, position.y]
    }
}
