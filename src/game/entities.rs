//! ゲームエンティティモジュール
//!
//! シーンに置かれるスプライト（プレイヤーと足場）を実装します。
//! 種類はプレイヤーと足場の2つだけなので、閉じた列挙型 `Sprite` で表し、
//! 描画と更新はこの列挙型を通して振り分けます。

use crate::game::player::Player;
use crate::input::KeyStates;
use crate::physics::Aabb;
use crate::rendering::{ColorScheme, RenderSurface};
use crate::utils::Vec2;

/// スプライトの形状と運動状態
///
/// 幅と高さは作成時に決まり、以後変更されません。
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteBody {
    width: f64,
    height: f64,
    /// 左上の位置
    pub position: Vec2,
    /// 速度（1ティックあたり）
    pub velocity: Vec2,
}

impl SpriteBody {
    pub fn new(width: f64, height: f64, x: f64, y: f64, dx: f64, dy: f64) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "sprite size must not be negative");
        Self {
            width,
            height,
            position: Vec2::new(x, y),
            velocity: Vec2::new(dx, dy),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// 右端のX座標
    pub fn right(&self) -> f64 {
        self.position.x + self.width
    }

    /// 下端のY座標
    pub fn bottom(&self) -> f64 {
        self.position.y + self.height
    }

    /// 現在の境界ボックス
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// X方向の範囲内にいるか
    pub fn in_bounds_x(&self, lower: f64, upper: f64) -> bool {
        self.bounds().in_bounds_x(lower, upper)
    }

    /// 別のスプライトと衝突しているか
    pub fn collides_with(&self, other: &SpriteBody) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Vec2::new(x, y);
    }
}

/// 足場
///
/// 速度は常にゼロで、作成後に動くことはありません。
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    body: SpriteBody,
}

impl Platform {
    pub fn new(width: f64, height: f64, x: f64, y: f64) -> Self {
        Self {
            body: SpriteBody::new(width, height, x, y, 0.0, 0.0),
        }
    }

    pub fn body(&self) -> &SpriteBody {
        &self.body
    }

    /// 足場を描画
    pub fn draw(&self, surface: &dyn RenderSurface, colors: &ColorScheme) {
        let body = &self.body;
        surface.fill_rect(body.position.x, body.position.y, body.width, body.height, &colors.platform);
    }

    /// 足場は静止しているので何もしない
    pub fn update(&mut self) {}
}

/// シーン内のスプライト
#[derive(Debug, Clone, PartialEq)]
pub enum Sprite {
    Player(Player),
    Platform(Platform),
}

impl Sprite {
    pub fn body(&self) -> &SpriteBody {
        match self {
            Sprite::Player(player) => player.body(),
            Sprite::Platform(platform) => platform.body(),
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Sprite::Player(_))
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Sprite::Player(player) => Some(player),
            Sprite::Platform(_) => None,
        }
    }

    /// スプライトを描画
    pub fn draw(&self, surface: &dyn RenderSurface, colors: &ColorScheme) {
        match self {
            Sprite::Player(player) => player.draw(surface, colors),
            Sprite::Platform(platform) => platform.draw(surface, colors),
        }
    }

    /// スプライトを1ティック分更新
    pub fn update(&mut self, keys: &KeyStates, bounds_width: f64, floor: f64) {
        match self {
            Sprite::Player(player) => player.update(keys, bounds_width, floor),
            Sprite::Platform(platform) => platform.update(),
        }
    }
}

impl From<Player> for Sprite {
    fn from(player: Player) -> Self {
        Sprite::Player(player)
    }
}

impl From<Platform> for Sprite {
    fn from(platform: Platform) -> Self {
        Sprite::Platform(platform)
    }
}
