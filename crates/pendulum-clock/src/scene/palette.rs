use pendulum_engine::paint::Color;

pub const WOOD_LIGHT: Color = Color::from_rgb_u8(185, 120, 75);
pub const WOOD_DARK: Color = Color::from_rgb_u8(110, 70, 40);
pub const DIAL_FACE: Color = Color::from_rgb_u8(248, 244, 235);
pub const HOUR_MARK: Color = Color::from_rgb_u8(20, 20, 20);
pub const BRASS: Color = Color::from_rgb_u8(200, 160, 70);
pub const BOB: Color = Color::from_rgb_u8(212, 190, 145);
pub const HAND: Color = Color::gray_u8(30);
pub const SECOND_HAND: Color = Color::from_rgb_u8(180, 30, 30);
pub const SHAFT: Color = Color::from_rgb_u8(80, 50, 20);
pub const HUB: Color = Color::gray_u8(30);
