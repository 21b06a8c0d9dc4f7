//! ロギングユーティリティモジュール
//!
//! このモジュールには、ゲーム内のロギング機能が含まれています。
//! `log` クレートの出力を `wasm-logger` 経由でブラウザのコンソールへ送ります。

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// デバッグ情報（詳細な情報）
    Debug,
    /// 情報（一般的な情報）
    Info,
    /// 警告（潜在的な問題）
    Warning,
    /// エラー（実行を妨げる問題）
    Error,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// ロギング初期化
pub fn init_logging(min_level: LogLevel) {
    wasm_logger::init(wasm_logger::Config::new(min_level.into()));
    log::info!("ロガーが初期化されました (最小レベル: {:?})", min_level);
}
