//! レンダリングシステムモジュール
//!
//! このモジュールは、ゲームの2Dレンダリングを担当します。
//! 描画は「背景の塗りつぶし」と「色付き矩形の塗りつぶし」の2操作だけで構成され、
//! `RenderSurface` トレイトを通してキャンバスから切り離されています。

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// 描画先のインターフェース
///
/// シーンはこのトレイト経由でのみ描画を行います。
pub trait RenderSurface {
    /// 描画面全体を指定色で塗りつぶす
    fn fill_background(&self, color: &str);

    /// 指定位置・サイズの矩形を指定色で塗りつぶす
    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64, color: &str);
}

/// 配色設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// 背景色
    pub background: String,
    /// プレイヤーの色
    pub player: String,
    /// 足場の色
    pub platform: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            player: "red".to_string(),
            platform: "black".to_string(),
        }
    }
}

/// キャンバスを取得してサイズを設定
///
/// # 引数
///
/// * `canvas_id` - キャンバス要素のID
/// * `width` - 設定する幅
/// * `height` - 設定する高さ
pub fn prepare_canvas(canvas_id: &str, width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("document not available"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("canvas not found"))?
        .dyn_into::<HtmlCanvasElement>()?;

    canvas.set_width(width);
    canvas.set_height(height);
    canvas.style().set_property("align-content", "center")?;

    log::info!("🖼️ キャンバス準備完了: id = {}, サイズ {}x{}", canvas_id, width, height);
    Ok(canvas)
}

/// キャンバス描画面
///
/// `CanvasRenderingContext2d` を保持し、`RenderSurface` を実装します。
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// キャンバスから描画面を作成
    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasSurface, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Failed to get 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(CanvasSurface { canvas, context })
    }

    /// キャンバスのサイズを取得
    pub fn get_size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    /// 描画先のキャンバス要素
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl RenderSurface for CanvasSurface {
    fn fill_background(&self, color: &str) {
        let (width, height) = self.get_size();
        self.fill_rect(0.0, 0.0, width, height, color);
    }

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(x, y, width, height);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[test]
    fn test_default_colors() {
        let colors = ColorScheme::default();
        assert_eq!(colors.background, "white");
        assert_eq!(colors.player, "red");
        assert_eq!(colors.platform, "black");
    }

    #[wasm_bindgen_test]
    fn test_canvas_surface_creation() {
        // テスト用のキャンバスを作成
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document.create_element("canvas").unwrap();
        canvas.set_id("test_canvas");
        document.body().unwrap().append_child(&canvas).unwrap();

        let canvas = prepare_canvas("test_canvas", 800, 480).unwrap();
        let surface = CanvasSurface::new(canvas).unwrap();
        assert_eq!(surface.get_size(), (800.0, 480.0));

        surface.fill_background("white");
        surface.fill_rect(10.0, 10.0, 50.0, 50.0, "red");

        // クリーンアップ
        document.body().unwrap().remove_child(surface.canvas()).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_missing_canvas() {
        assert!(prepare_canvas("no_such_canvas", 800, 480).is_err());
    }
}
