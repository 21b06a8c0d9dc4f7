//! 時間ユーティリティモジュール
//!
//! 一定間隔で繰り返し呼び出されるコールバック（インターバル）を扱います。
//! `IntervalHost` がスケジューリングの実体を抽象化し、`Timer` がその上に
//! 開始・停止の冪等性を提供します。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// タイマーから呼び出されるコールバック
pub type TickCallback = Rc<dyn Fn()>;

/// 登録済みインターバルの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalId(pub i32);

/// 繰り返しコールバックのスケジューラ
pub trait IntervalHost {
    /// `delay_ms` ミリ秒ごとに `callback` を呼び出すよう登録する
    ///
    /// # 戻り値
    ///
    /// * 登録できた場合はそのID、失敗した場合は `None`
    fn set_interval(&self, delay_ms: i32, callback: TickCallback) -> Option<IntervalId>;

    /// 登録済みのインターバルを解除する
    fn clear_interval(&self, id: IntervalId);
}

/// ブラウザの `setInterval` / `clearInterval` を使うスケジューラ
pub struct BrowserIntervalHost {
    window: web_sys::Window,
    // 解除されるまでクロージャを保持する
    closures: RefCell<HashMap<i32, Closure<dyn FnMut()>>>,
}

impl BrowserIntervalHost {
    /// 新しいスケジューラを作成
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
        Ok(Self {
            window,
            closures: RefCell::new(HashMap::new()),
        })
    }
}

impl IntervalHost for BrowserIntervalHost {
    fn set_interval(&self, delay_ms: i32, callback: TickCallback) -> Option<IntervalId> {
        let closure = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);

        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(closure.as_ref().unchecked_ref(), delay_ms)
        {
            Ok(handle) => {
                self.closures.borrow_mut().insert(handle, closure);
                Some(IntervalId(handle))
            }
            Err(err) => {
                log::error!("❌ setIntervalの登録に失敗: {:?}", err);
                None
            }
        }
    }

    fn clear_interval(&self, id: IntervalId) {
        self.window.clear_interval_with_handle(id.0);
        self.closures.borrow_mut().remove(&id.0);
    }
}

/// 手動で時間を進めるスケジューラ
///
/// 実時間を使わず、`fire_all` を呼ぶたびに登録順で全コールバックを1回ずつ実行します。
/// 描画と更新の順序が常に固定されるため、ヘッドレス実行やテストに使います。
#[derive(Default)]
pub struct SteppedIntervalHost {
    next_id: RefCell<i32>,
    intervals: RefCell<Vec<(IntervalId, i32, TickCallback)>>,
}

impl SteppedIntervalHost {
    /// 新しいスケジューラを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中のインターバル数
    pub fn active_count(&self) -> usize {
        self.intervals.borrow().len()
    }

    /// 登録中のインターバルの遅延（ミリ秒）を登録順に返す
    pub fn delays(&self) -> Vec<i32> {
        self.intervals.borrow().iter().map(|(_, delay, _)| *delay).collect()
    }

    /// 全インターバルを登録順に1回ずつ実行
    pub fn fire_all(&self) {
        // コールバック内で登録・解除されても借用が衝突しないよう先に複製する
        let callbacks: Vec<TickCallback> = self
            .intervals
            .borrow()
            .iter()
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    /// 指定回数だけ `fire_all` を繰り返す
    pub fn advance(&self, ticks: usize) {
        for _ in 0..ticks {
            self.fire_all();
        }
    }
}

impl IntervalHost for SteppedIntervalHost {
    fn set_interval(&self, delay_ms: i32, callback: TickCallback) -> Option<IntervalId> {
        let mut next_id = self.next_id.borrow_mut();
        *next_id += 1;
        let id = IntervalId(*next_id);
        self.intervals.borrow_mut().push((id, delay_ms, callback));
        Some(id)
    }

    fn clear_interval(&self, id: IntervalId) {
        self.intervals.borrow_mut().retain(|(registered, _, _)| *registered != id);
    }
}

/// タイマー構造体
///
/// 作成と同時に開始されます。開始中の `start_timer` と停止中の `stop_timer` は何もしません。
pub struct Timer {
    /// 呼び出し間隔（ミリ秒）
    delay_ms: i32,
    /// スケジューラ
    host: Rc<dyn IntervalHost>,
    /// 呼び出すコールバック
    callback: TickCallback,
    /// 実行中のインターバル（停止中は `None`）
    interval: Option<IntervalId>,
}

impl Timer {
    /// 新しいタイマーを作成して開始
    ///
    /// # 引数
    ///
    /// * `host` - スケジューラ
    /// * `delay_seconds` - 呼び出し間隔（秒）。内部ではミリ秒に変換します
    /// * `callback` - 呼び出すコールバック
    pub fn new(host: Rc<dyn IntervalHost>, delay_seconds: f64, callback: TickCallback) -> Self {
        let mut timer = Self {
            delay_ms: seconds_to_millis(delay_seconds),
            host,
            callback,
            interval: None,
        };
        timer.start_timer();
        timer
    }

    /// タイマーを開始（実行中なら何もしない）
    pub fn start_timer(&mut self) {
        if self.interval_is_null() {
            self.interval = self.host.set_interval(self.delay_ms, Rc::clone(&self.callback));
            log::debug!("⏱️ タイマー開始: {}ms, {:?}", self.delay_ms, self.interval);
        }
    }

    /// タイマーを停止（停止中なら何もしない）
    pub fn stop_timer(&mut self) {
        if let Some(id) = self.interval.take() {
            self.host.clear_interval(id);
            log::debug!("⏱️ タイマー停止: {:?}", id);
        }
    }

    /// インターバルが未登録（停止中）かどうか
    pub fn interval_is_null(&self) -> bool {
        self.interval.is_none()
    }

    /// 呼び出し間隔（ミリ秒）
    pub fn delay_ms(&self) -> i32 {
        self.delay_ms
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

/// 秒をミリ秒に変換
pub fn seconds_to_millis(seconds: f64) -> i32 {
    (seconds * 1000.0).round() as i32
}
