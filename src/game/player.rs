//! プレイヤーモジュール
//!
//! プレイヤーの物理状態（重力、ジャンプ、摩擦、空気抵抗、接地フラグ）と
//! 1ティックごとの状態遷移を実装します。

use serde::{Deserialize, Serialize};

use crate::game::entities::SpriteBody;
use crate::input::KeyStates;
use crate::rendering::{ColorScheme, RenderSurface};

/// プレイヤーの物理定数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerPhysics {
    /// 重力加速度（1ティックあたり）
    pub gravity: f64,
    /// 左右キー1ティックあたりの加速量
    pub speed: f64,
    /// ジャンプ時に一度だけ与える上向きの速度
    pub jump_height: f64,
    /// 水平速度の減衰係数
    pub friction: f64,
    /// 垂直速度の減衰係数
    pub air_resistance: f64,
}

impl Default for PlayerPhysics {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            speed: 2.0,
            jump_height: 20.0,
            friction: 0.9,
            air_resistance: 0.9,
        }
    }
}

/// プレイヤー
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    body: SpriteBody,
    physics: PlayerPhysics,
    /// ジャンプ中または空中にいるか
    is_jumping: bool,
    /// このティックで足場の上に乗っているか
    bottom_collision: bool,
}

impl Player {
    /// 既定の物理定数でプレイヤーを作成
    pub fn new(width: f64, height: f64, x: f64, y: f64) -> Self {
        Self::with_physics(width, height, x, y, PlayerPhysics::default())
    }

    /// 物理定数を指定してプレイヤーを作成
    pub fn with_physics(width: f64, height: f64, x: f64, y: f64, physics: PlayerPhysics) -> Self {
        Self {
            body: SpriteBody::new(width, height, x, y, 0.0, 0.0),
            physics,
            is_jumping: false,
            bottom_collision: false,
        }
    }

    pub fn body(&self) -> &SpriteBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut SpriteBody {
        &mut self.body
    }

    pub fn physics(&self) -> &PlayerPhysics {
        &self.physics
    }

    pub fn is_jumping(&self) -> bool {
        self.is_jumping
    }

    pub fn has_bottom_collision(&self) -> bool {
        self.bottom_collision
    }

    /// プレイヤーを描画
    pub fn draw(&self, surface: &dyn RenderSurface, colors: &ColorScheme) {
        let body = &self.body;
        surface.fill_rect(body.position.x, body.position.y, body.width(), body.height(), &colors.player);
    }

    /// 押下中のキーに応じてプレイヤーを1ティック分更新
    ///
    /// # 引数
    ///
    /// * `keys` - 現在のキー状態
    /// * `bounds_width` - 水平方向の移動範囲（キャンバス幅）
    /// * `floor` - 床の高さ（キャンバス高さ）
    pub fn update(&mut self, keys: &KeyStates, bounds_width: f64, floor: f64) {
        self.apply_jump(keys);
        self.resolve_vertical(floor);
        self.resolve_horizontal(keys, bounds_width);
    }

    /// ジャンプの開始
    ///
    /// 空中にいなければ、上キーで上向きの速度を与え、その速度の2倍だけ移動します。
    fn apply_jump(&mut self, keys: &KeyStates) {
        if !self.is_jumping && keys.up() {
            self.is_jumping = true;
            self.body.velocity.y -= self.physics.jump_height;
            self.body.position.y += self.body.velocity.y + self.body.velocity.y;
        }
    }

    /// 垂直方向の解決
    fn resolve_vertical(&mut self, floor: f64) {
        let body = &mut self.body;
        if body.bottom() < floor && !self.bottom_collision {
            // 空中
            body.velocity.y += self.physics.gravity;
            body.position.y += body.velocity.y;
            body.velocity.y *= self.physics.air_resistance;
            self.is_jumping = true;
        } else {
            // 接地: 直前の移動を1ティック遅れで打ち消して止める
            body.position.y -= body.velocity.y;
            self.is_jumping = false;
            body.velocity.y = 0.0;
        }
    }

    /// 水平方向の解決
    fn resolve_horizontal(&mut self, keys: &KeyStates, bounds_width: f64) {
        let speed = self.physics.speed;
        let body = &mut self.body;

        if !body.in_bounds_x(0.0, bounds_width) {
            // 右端を越えた: 左キーのみ有効
            if body.right() > bounds_width {
                if keys.left() {
                    body.velocity.x += speed;
                }
                body.position.x -= body.velocity.x;
                body.velocity.x = 0.0;
            }
            // 左端を越えた: 右キーのみ有効
            if body.position.x < 0.0 {
                if keys.right() {
                    body.velocity.x -= speed;
                }
                body.position.x -= body.velocity.x;
                body.velocity.x = 0.0;
            }
        } else {
            if keys.left() {
                body.velocity.x -= speed;
            }
            if keys.right() {
                body.velocity.x += speed;
            }
            body.position.x += body.velocity.x;
            body.velocity.x *= self.physics.friction;
        }
    }

    /// 足場と衝突したときの接地判定
    ///
    /// プレイヤーの下端が足場の下端より上にあれば接地とみなします。
    /// 水平方向の重なり具合は見ません。
    pub fn on_collision_y(&mut self, other: &SpriteBody) {
        if self.body.bottom() < other.bottom() {
            self.bottom_collision = true;
        }
    }

    /// 接地フラグをリセット
    pub fn clear_bottom_collision(&mut self) {
        self.bottom_collision = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KEY_LEFT, KEY_RIGHT, KEY_UP};
    use crate::utils::approx_eq;

    const WIDTH: f64 = 800.0;
    const FLOOR: f64 = 480.0;

    fn keys_with(codes: &[u32]) -> KeyStates {
        let mut keys = KeyStates::new();
        for code in codes {
            keys.set(true, *code);
        }
        keys
    }

    #[test]
    fn test_player_creation() {
        let player = Player::new(50.0, 50.0, 10.0, 10.0);
        assert_eq!(player.body().width(), 50.0);
        assert_eq!(player.body().position.x, 10.0);
        assert_eq!(player.body().velocity.y, 0.0);
        assert!(!player.is_jumping());
        assert!(!player.has_bottom_collision());
        assert_eq!(player.physics().gravity, 0.8);
    }

    #[test]
    fn test_jump_impulse() {
        let mut player = Player::new(50.0, 50.0, 100.0, 100.0);
        player.apply_jump(&keys_with(&[KEY_UP]));

        assert!(player.is_jumping());
        assert_eq!(player.body().velocity.y, -20.0);
        assert_eq!(player.body().position.y, 60.0);
    }

    #[test]
    fn test_jump_full_tick() {
        let mut player = Player::new(50.0, 50.0, 100.0, 100.0);
        player.update(&keys_with(&[KEY_UP]), WIDTH, FLOOR);

        // ジャンプ後、同じティックで重力と空気抵抗も適用される
        assert!(player.is_jumping());
        assert!(approx_eq(player.body().position.y, 60.0 - 19.2));
        assert!(approx_eq(player.body().velocity.y, -19.2 * 0.9));
    }

    #[test]
    fn test_no_double_jump() {
        let mut player = Player::new(50.0, 50.0, 100.0, 100.0);
        let up = keys_with(&[KEY_UP]);
        player.update(&up, WIDTH, FLOOR);
        let y = player.body().position.y;
        let dy = player.body().velocity.y;

        player.update(&up, WIDTH, FLOOR);
        let expected_dy = dy + 0.8;
        assert!(approx_eq(player.body().position.y, y + expected_dy));
        assert!(approx_eq(player.body().velocity.y, expected_dy * 0.9));
    }

    #[test]
    fn test_gravity_in_air() {
        let mut player = Player::new(50.0, 50.0, 100.0, 100.0);
        player.update(&KeyStates::new(), WIDTH, FLOOR);

        assert!(player.is_jumping());
        assert!(approx_eq(player.body().position.y, 100.8));
        assert!(approx_eq(player.body().velocity.y, 0.72));
    }

    #[test]
    fn test_floor_stops_fall() {
        let mut player = Player::new(50.0, 50.0, 100.0, 431.0);
        player.body_mut().velocity.y = 3.0;
        player.is_jumping = true;
        player.update(&KeyStates::new(), WIDTH, FLOOR);

        // 下端481 >= 480 なので接地扱い
        assert!(!player.is_jumping());
        assert_eq!(player.body().velocity.y, 0.0);
        assert_eq!(player.body().position.y, 428.0);
    }

    #[test]
    fn test_resting_on_platform_resets_dy() {
        let mut player = Player::new(50.0, 50.0, 100.0, 200.0);
        player.body_mut().velocity.y = 5.0;

        for _ in 0..5 {
            player.bottom_collision = true;
            player.update(&KeyStates::new(), WIDTH, FLOOR);
            assert_eq!(player.body().velocity.y, 0.0);
            assert!(!player.is_jumping());
        }
        // 最初のティックで1回だけ打ち消される
        assert_eq!(player.body().position.y, 195.0);
    }

    #[test]
    fn test_jump_from_platform_is_cancelled_by_landing() {
        let mut player = Player::new(50.0, 50.0, 100.0, 200.0);
        player.bottom_collision = true;
        player.update(&keys_with(&[KEY_UP]), WIDTH, FLOOR);

        // y: 200 - 40 + 20
        assert_eq!(player.body().position.y, 180.0);
        assert_eq!(player.body().velocity.y, 0.0);
        assert!(!player.is_jumping());
    }

    #[test]
    fn test_friction_converges_without_reversing() {
        let mut player = Player::new(50.0, 50.0, 300.0, 100.0);
        player.body_mut().velocity.x = 10.0;
        let keys = KeyStates::new();

        let mut previous = player.body().velocity.x;
        for _ in 0..60 {
            player.update(&keys, WIDTH, FLOOR);
            let dx = player.body().velocity.x;
            assert!(dx >= 0.0);
            assert!(dx < previous);
            previous = dx;
        }
        assert!(previous < 0.1);
    }

    #[test]
    fn test_horizontal_keys() {
        let mut player = Player::new(50.0, 50.0, 300.0, 100.0);
        player.update(&keys_with(&[KEY_RIGHT]), WIDTH, FLOOR);
        assert_eq!(player.body().position.x, 302.0);
        assert!(approx_eq(player.body().velocity.x, 1.8));

        let mut player = Player::new(50.0, 50.0, 300.0, 100.0);
        player.update(&keys_with(&[KEY_LEFT]), WIDTH, FLOOR);
        assert_eq!(player.body().position.x, 298.0);

        // 両方押すと打ち消し合う
        let mut player = Player::new(50.0, 50.0, 300.0, 100.0);
        player.update(&keys_with(&[KEY_LEFT, KEY_RIGHT]), WIDTH, FLOOR);
        assert_eq!(player.body().position.x, 300.0);
        assert_eq!(player.body().velocity.x, 0.0);
    }

    #[test]
    fn test_right_boundary_clamp() {
        let mut player = Player::new(50.0, 50.0, 760.0, 100.0);
        player.body_mut().velocity.x = 3.0;
        player.update(&keys_with(&[KEY_RIGHT]), WIDTH, FLOOR);
        assert_eq!(player.body().velocity.x, 0.0);
        assert_eq!(player.body().position.x, 757.0);

        // 左キーを押していても最終的に速度はゼロ
        let mut player = Player::new(50.0, 50.0, 760.0, 100.0);
        player.body_mut().velocity.x = 3.0;
        player.update(&keys_with(&[KEY_LEFT]), WIDTH, FLOOR);
        assert_eq!(player.body().velocity.x, 0.0);
        assert_eq!(player.body().position.x, 755.0);
    }

    #[test]
    fn test_left_boundary_clamp() {
        let mut player = Player::new(50.0, 50.0, -5.0, 100.0);
        player.body_mut().velocity.x = -3.0;
        player.update(&keys_with(&[KEY_LEFT]), WIDTH, FLOOR);
        assert_eq!(player.body().velocity.x, 0.0);
        assert_eq!(player.body().position.x, -2.0);

        let mut player = Player::new(50.0, 50.0, -5.0, 100.0);
        player.body_mut().velocity.x = -3.0;
        player.update(&keys_with(&[KEY_RIGHT]), WIDTH, FLOOR);
        assert_eq!(player.body().velocity.x, 0.0);
        assert_eq!(player.body().position.x, 0.0);
    }

    #[test]
    fn test_on_collision_y() {
        let platform = SpriteBody::new(200.0, 15.0, 10.0, 470.0, 0.0, 0.0);

        // 下端が足場の下端より上
        let mut player = Player::new(50.0, 50.0, 10.0, 425.0);
        player.on_collision_y(&platform);
        assert!(player.has_bottom_collision());

        player.clear_bottom_collision();
        assert!(!player.has_bottom_collision());

        // 下端が足場の下端と同じか下なら接地しない
        let mut player = Player::new(50.0, 50.0, 10.0, 435.0);
        player.on_collision_y(&platform);
        assert!(!player.has_bottom_collision());

        // 足場の真横で重なっていても接地扱いになる
        let side = SpriteBody::new(200.0, 100.0, 60.0, 400.0, 0.0, 0.0);
        let mut player = Player::new(50.0, 50.0, 10.0, 420.0);
        player.on_collision_y(&side);
        assert!(player.has_bottom_collision());
    }
}
