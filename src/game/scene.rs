//! シーンモジュール
//!
//! スプライト配列、キー状態、一時停止フラグを持つ `SceneState` と、
//! 描画タイマー・更新タイマー・入力バインディングを束ねる `Scene` を実装します。
//!
//! 描画と更新は別々のタイマーから同じ間隔で呼ばれますが、互いの位相は揃えていません。

use std::cell::RefCell;
use std::rc::Rc;

use crate::game::config::{GameConfig, PLATFORM_HEIGHT, PLATFORM_WIDTH};
use crate::game::entities::{Platform, Sprite};
use crate::game::error::SceneError;
use crate::game::player::Player;
use crate::input::{InputBinding, KeyCode, KeyStates};
use crate::rendering::{ColorScheme, RenderSurface};
use crate::utils::{centered_origin, IntervalHost, TickCallback, Timer, Vec2};

/// シーンの状態
///
/// スプライト配列の先頭は常にプレイヤーで、プレイヤーは1体だけです。
#[derive(Debug)]
pub struct SceneState {
    width: f64,
    height: f64,
    sprites: Vec<Sprite>,
    keys: KeyStates,
    paused: bool,
    platform_size: (f64, f64),
    colors: ColorScheme,
}

impl SceneState {
    /// 新しいシーン状態を作成
    ///
    /// # 引数
    ///
    /// * `width` - シーンの幅
    /// * `height` - シーンの高さ（床の位置）
    /// * `sprites` - スプライト配列。先頭がプレイヤーでなければエラー
    pub fn new(width: f64, height: f64, sprites: Vec<Sprite>) -> Result<Self, SceneError> {
        validate_sprites(&sprites)?;

        Ok(Self {
            width,
            height,
            sprites,
            keys: KeyStates::new(),
            paused: false,
            platform_size: (PLATFORM_WIDTH, PLATFORM_HEIGHT),
            colors: ColorScheme::default(),
        })
    }

    /// 設定からシーン状態を作成
    pub fn from_config(config: &GameConfig) -> Result<Self, SceneError> {
        let mut state = Self::new(config.canvas_width, config.canvas_height, config.build_sprites())?;
        state.platform_size = (config.platform_width, config.platform_height);
        state.colors = config.colors.clone();
        Ok(state)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn keys(&self) -> &KeyStates {
        &self.keys
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// プレイヤー（スプライト配列の先頭）
    pub fn player(&self) -> &Player {
        match self.sprites.first() {
            Some(Sprite::Player(player)) => player,
            _ => unreachable!("scene always starts with the player"),
        }
    }

    /// 背景と全スプライトを描画
    pub fn draw(&self, surface: &dyn RenderSurface) {
        if self.paused {
            return;
        }
        self.draw_background(surface);
        for sprite in self.sprites.iter() {
            sprite.draw(surface, &self.colors);
        }
    }

    /// 背景を描画
    pub fn draw_background(&self, surface: &dyn RenderSurface) {
        surface.fill_background(&self.colors.background);
    }

    /// 全スプライトを1ティック分更新
    ///
    /// 配列の順に処理します。先頭のプレイヤーを更新した直後に接地フラグを消し、
    /// その後に続く足場との衝突判定で同じティック内に再設定します。
    /// プレイヤーが次のティックで参照する接地フラグは、このスイープの結果です。
    pub fn update(&mut self) {
        if self.paused {
            return;
        }

        let Some((first, rest)) = self.sprites.split_first_mut() else {
            return;
        };
        let Sprite::Player(player) = first else {
            return;
        };

        player.update(&self.keys, self.width, self.height);
        player.clear_bottom_collision();

        for sprite in rest.iter_mut() {
            if sprite.body().collides_with(player.body()) {
                player.on_collision_y(sprite.body());
            }
            sprite.update(&self.keys, self.width, self.height);
        }
    }

    /// キーの押下状態を更新（認識しないキーは無視）
    pub fn set_key_state(&mut self, pressed: bool, key_code: KeyCode) {
        self.keys.set(pressed, key_code);
    }

    /// 足場を追加
    pub fn add_platform(&mut self, platform: Platform) {
        self.sprites.push(Sprite::Platform(platform));
    }

    /// 指定点を中心に足場を生成
    pub fn spawn_platform_at(&mut self, center: Vec2) {
        let (width, height) = self.platform_size;
        let origin = centered_origin(center, width, height);
        log::debug!("🧱 足場を生成: ({}, {})", origin.x, origin.y);
        self.add_platform(Platform::new(width, height, origin.x, origin.y));
    }
}

/// スプライト配列を検証
fn validate_sprites(sprites: &[Sprite]) -> Result<(), SceneError> {
    match sprites.first() {
        None => {
            return Err(SceneError::InvalidSceneConfiguration(
                "スプライト配列が空です".to_string(),
            ))
        }
        Some(first) if !first.is_player() => {
            return Err(SceneError::InvalidSceneConfiguration(
                "プレイヤーは常にスプライト配列の先頭に置く必要があります".to_string(),
            ))
        }
        Some(_) => {}
    }

    if sprites.iter().skip(1).any(Sprite::is_player) {
        return Err(SceneError::InvalidSceneConfiguration(
            "プレイヤーは1体だけ配置できます".to_string(),
        ));
    }
    Ok(())
}

/// シーン（ゲームループの制御）
///
/// 描画タイマーと更新タイマーを持ち、開始・終了・一時停止を制御します。
pub struct Scene {
    state: Rc<RefCell<SceneState>>,
    surface: Rc<dyn RenderSurface>,
    host: Rc<dyn IntervalHost>,
    delay_seconds: f64,
    draw_timer: Option<Timer>,
    update_timer: Option<Timer>,
    bindings: Vec<Box<dyn InputBinding>>,
    /// start() 済みで end() されていないか
    started: bool,
}

impl Scene {
    /// 新しいシーンを作成
    ///
    /// # 引数
    ///
    /// * `width` / `height` - シーンのサイズ
    /// * `sprites` - 先頭がプレイヤーのスプライト配列
    /// * `delay_seconds` - 描画・更新の間隔（秒）
    /// * `surface` - 描画先
    /// * `host` - タイマーのスケジューラ
    pub fn new(
        width: f64,
        height: f64,
        sprites: Vec<Sprite>,
        delay_seconds: f64,
        surface: Rc<dyn RenderSurface>,
        host: Rc<dyn IntervalHost>,
    ) -> Result<Self, SceneError> {
        let state = SceneState::new(width, height, sprites)?;
        Ok(Self::from_state(state, delay_seconds, surface, host))
    }

    /// 作成済みのシーン状態からシーンを作成
    pub fn from_state(
        state: SceneState,
        delay_seconds: f64,
        surface: Rc<dyn RenderSurface>,
        host: Rc<dyn IntervalHost>,
    ) -> Self {
        log::info!(
            "🎮 シーン作成: {}x{}, スプライト数 {}, 間隔 {}秒",
            state.width,
            state.height,
            state.sprites.len(),
            delay_seconds
        );
        Self {
            state: Rc::new(RefCell::new(state)),
            surface,
            host,
            delay_seconds,
            draw_timer: None,
            update_timer: None,
            bindings: Vec::new(),
            started: false,
        }
    }

    /// 入力バインディングを追加
    pub fn with_binding(mut self, binding: Box<dyn InputBinding>) -> Self {
        self.bindings.push(binding);
        self
    }

    /// 共有されたシーン状態
    pub fn state(&self) -> Rc<RefCell<SceneState>> {
        Rc::clone(&self.state)
    }

    pub fn is_paused(&self) -> bool {
        self.state.borrow().is_paused()
    }

    /// タイマーが動いているか
    pub fn is_running(&self) -> bool {
        self.draw_timer.as_ref().map_or(false, |timer| !timer.interval_is_null())
    }

    fn draw_callback(&self) -> TickCallback {
        let state = Rc::downgrade(&self.state);
        let surface = Rc::clone(&self.surface);
        Rc::new(move || {
            if let Some(state) = state.upgrade() {
                match state.try_borrow() {
                    Ok(state) => state.draw(surface.as_ref()),
                    Err(_) => log::warn!("シーンが使用中のため描画をスキップしました"),
                }
            }
        })
    }

    fn update_callback(&self) -> TickCallback {
        let state = Rc::downgrade(&self.state);
        Rc::new(move || {
            if let Some(state) = state.upgrade() {
                match state.try_borrow_mut() {
                    Ok(mut state) => state.update(),
                    Err(_) => log::warn!("シーンが使用中のため更新をスキップしました"),
                }
            }
        })
    }

    /// タイマーを開始し、入力バインディングを接続
    pub fn start(&mut self) {
        if self.draw_timer.is_none() {
            self.draw_timer = Some(Timer::new(Rc::clone(&self.host), self.delay_seconds, self.draw_callback()));
        }
        if self.update_timer.is_none() {
            self.update_timer = Some(Timer::new(Rc::clone(&self.host), self.delay_seconds, self.update_callback()));
        }
        self.started = true;

        // end() 後の再開では既存のタイマーを動かし直す。開始前に一時停止されていれば止めたまま
        if self.is_paused() {
            self.stop_timers();
        } else {
            self.start_timers();
        }

        let weak = Rc::downgrade(&self.state);
        for binding in self.bindings.iter_mut() {
            if let Err(err) = binding.attach(weak.clone()) {
                log::error!("❌ 入力バインディング '{}' の接続に失敗: {:?}", binding.name(), err);
            }
        }
        log::info!("▶️ シーン開始");
    }

    /// タイマーを止め、背景だけを描画し、入力バインディングを切断
    pub fn end(&mut self) {
        self.stop_timers();
        self.started = false;

        self.state.borrow().draw_background(self.surface.as_ref());

        for binding in self.bindings.iter_mut() {
            binding.detach();
        }
        log::info!("⏹️ シーン終了");
    }

    fn start_timers(&mut self) {
        for timer in [self.draw_timer.as_mut(), self.update_timer.as_mut()].into_iter().flatten() {
            timer.start_timer();
        }
    }

    fn stop_timers(&mut self) {
        for timer in [self.draw_timer.as_mut(), self.update_timer.as_mut()].into_iter().flatten() {
            timer.stop_timer();
        }
    }

    /// 一時停止と再開を切り替え
    ///
    /// 1回目の呼び出しで停止し、2回目で再開します。スプライトの状態は保持されます。
    pub fn pause(&mut self) {
        let paused = {
            let mut state = self.state.borrow_mut();
            state.paused = !state.paused;
            state.paused
        };

        // 開始前・終了後はフラグだけを切り替え、タイマーは start() に任せる
        if self.started {
            if paused {
                self.stop_timers();
            } else {
                self.start_timers();
            }
        }
        log::info!("⏸️ 一時停止: {}", paused);
    }
}
