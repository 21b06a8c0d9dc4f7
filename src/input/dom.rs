//! DOMイベントの入力バインディング
//!
//! `document` のキーイベントとキャンバスのクリックイベントをシーンへ届けます。

use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use super::InputBinding;
use crate::game::scene::SceneState;
use crate::utils::Vec2;

/// シーンが生きていて借用できる場合のみ処理を実行する
fn with_scene(scene: &Weak<RefCell<SceneState>>, f: impl FnOnce(&mut SceneState)) {
    if let Some(scene) = scene.upgrade() {
        match scene.try_borrow_mut() {
            Ok(mut state) => f(&mut state),
            Err(_) => log::warn!("シーンが使用中のため入力イベントを破棄しました"),
        };
    }
}

/// キーボードバインディング
///
/// `keydown` / `keyup` を購読し、矢印キーの押下状態を更新します。
pub struct KeyboardBinding {
    document: Document,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    keyup: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl KeyboardBinding {
    /// 現在のドキュメントに対するバインディングを作成
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .ok_or_else(|| JsValue::from_str("Failed to get window"))?
            .document()
            .ok_or_else(|| JsValue::from_str("Failed to get document"))?;

        Ok(Self {
            document,
            keydown: None,
            keyup: None,
        })
    }

    fn listener(scene: Weak<RefCell<SceneState>>, pressed: bool) -> Closure<dyn FnMut(KeyboardEvent)> {
        Closure::wrap(Box::new(move |event: KeyboardEvent| {
            with_scene(&scene, |state| {
                state.set_key_state(pressed, event.key_code());
            });
        }) as Box<dyn FnMut(KeyboardEvent)>)
    }
}

impl InputBinding for KeyboardBinding {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn attach(&mut self, scene: Weak<RefCell<SceneState>>) -> Result<(), JsValue> {
        if self.keydown.is_some() {
            return Ok(());
        }

        let keydown = Self::listener(scene.clone(), true);
        let keyup = Self::listener(scene, false);

        self.document
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;
        self.document
            .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;

        self.keydown = Some(keydown);
        self.keyup = Some(keyup);
        Ok(())
    }

    fn detach(&mut self) {
        if let Some(keydown) = self.keydown.take() {
            if let Err(err) = self
                .document
                .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            {
                log::warn!("⚠️ keydown リスナーの解除に失敗: {:?}", err);
            }
        }
        if let Some(keyup) = self.keyup.take() {
            if let Err(err) = self
                .document
                .remove_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())
            {
                log::warn!("⚠️ keyup リスナーの解除に失敗: {:?}", err);
            }
        }
    }
}

/// クリックで足場を生成するバインディング
///
/// クリック位置をキャンバス左上基準の座標に変換し、その点を中心に足場を追加します。
pub struct ClickSpawnBinding {
    canvas: HtmlCanvasElement,
    click: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl ClickSpawnBinding {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, click: None }
    }
}

/// クライアント座標をキャンバス内の座標に変換
pub fn canvas_local_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
    Vec2::new(
        (client_x - canvas.offset_left()) as f64,
        (client_y - canvas.offset_top()) as f64,
    )
}

impl InputBinding for ClickSpawnBinding {
    fn name(&self) -> &'static str {
        "mouse"
    }

    fn attach(&mut self, scene: Weak<RefCell<SceneState>>) -> Result<(), JsValue> {
        if self.click.is_some() {
            return Ok(());
        }

        let canvas = self.canvas.clone();
        let click = Closure::wrap(Box::new(move |event: MouseEvent| {
            let point = canvas_local_point(&canvas, event.client_x(), event.client_y());
            with_scene(&scene, |state| state.spawn_platform_at(point));
        }) as Box<dyn FnMut(MouseEvent)>);

        self.canvas
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
        self.click = Some(click);
        Ok(())
    }

    fn detach(&mut self) {
        if let Some(click) = self.click.take() {
            if let Err(err) = self
                .canvas
                .remove_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            {
                log::warn!("⚠️ click リスナーの解除に失敗: {:?}", err);
            }
        }
    }
}
