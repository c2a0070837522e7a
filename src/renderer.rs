use image::RgbaImage;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use ratatui_image::{StatefulImage, picker::Picker, protocol::StatefulProtocol};

use crate::assets::{Assets, Sprites};
use crate::entities::{Enemy, Entity, Player, Projectile};

/// Fill colour of the play field
pub const FIELD_COLOR: Color = Color::Rgb(0, 255, 255);

/// Pixels with less alpha than this are treated as transparent
const ALPHA_THRESHOLD: u8 = 128;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub player: &'a Player,
    pub enemy: &'a Enemy,
    pub projectiles: &'a [Projectile],
    pub score: u32,
    pub health: i32,
    pub field_width: i32,
    pub field_height: i32,
}

/// A colour grid with two pixel rows per terminal cell.
///
/// Each cell is flushed as an upper-half block whose foreground is the upper
/// pixel and whose background is the lower one.
#[derive(Debug, Default)]
pub struct PixelCanvas {
    width: u16,
    height: u16,
    pixels: Vec<Color>,
}

impl PixelCanvas {
    /// Resizes the canvas to cover `area` and fills it with `color`
    pub fn reset(&mut self, area: Rect, color: Color) {
        self.width = area.width;
        self.height = area.height * 2;
        self.pixels.clear();
        self.pixels
            .resize(self.width as usize * self.height as usize, color);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Draws `image` stretched over the `width` x `height` block at (`x`, `y`).
    ///
    /// Uses nearest-neighbour sampling, skips transparent pixels and clips
    /// whatever falls outside the canvas.
    pub fn blit(&mut self, image: &RgbaImage, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 || image.width() == 0 || image.height() == 0 {
            return;
        }

        for dy in 0..height {
            let py = y + dy;
            if py < 0 || py >= self.height as i32 {
                continue;
            }
            let src_y = (dy as u32 * image.height()) / height as u32;

            for dx in 0..width {
                let px = x + dx;
                if px < 0 || px >= self.width as i32 {
                    continue;
                }
                let src_x = (dx as u32 * image.width()) / width as u32;

                let [r, g, b, a] = image.get_pixel(src_x, src_y).0;
                if a < ALPHA_THRESHOLD {
                    continue;
                }
                let idx = py as usize * self.width as usize + px as usize;
                self.pixels[idx] = Color::Rgb(r, g, b);
            }
        }
    }

    /// Writes the canvas into `buf` with its top-left cell at `area`'s origin
    pub fn flush(&self, buf: &mut Buffer, area: Rect) {
        for row in 0..self.height / 2 {
            for col in 0..self.width {
                let upper = self.get(col, row * 2).unwrap_or(FIELD_COLOR);
                let lower = self.get(col, row * 2 + 1).unwrap_or(FIELD_COLOR);
                buf.set_string(
                    area.x + col,
                    area.y + row,
                    "▀",
                    Style::default().fg(upper).bg(lower),
                );
            }
        }
    }
}

/// Converts field units into canvas pixels
#[derive(Debug, Clone, Copy)]
struct FieldScale {
    field_width: i64,
    field_height: i64,
    canvas_width: i64,
    canvas_height: i64,
}

impl FieldScale {
    fn x(&self, x: i32) -> i32 {
        (x as i64 * self.canvas_width / self.field_width) as i32
    }

    fn y(&self, y: i32) -> i32 {
        (y as i64 * self.canvas_height / self.field_height) as i32
    }

    /// Scaled length, never shorter than one pixel so nothing vanishes
    fn width(&self, width: i32) -> i32 {
        self.x(width).max(1)
    }

    fn height(&self, height: i32) -> i32 {
        self.y(height).max(1)
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    sprites: Sprites,
    background: StatefulProtocol,
    canvas: PixelCanvas,
}

impl GameRenderer {
    /// Creates a renderer; the start-screen background is encoded for `picker`
    pub fn new(assets: Assets, picker: &Picker) -> Self {
        let background = picker.new_resize_protocol(assets.background);
        Self {
            sprites: assets.sprites,
            background,
            canvas: PixelCanvas::default(),
        }
    }

    /// Renders the title screen: background image and a prompt
    pub fn render_start_screen(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_stateful_widget(StatefulImage::default(), area, &mut self.background);

        let prompt = Line::from(vec![Span::styled(
            " Click or press Enter to start, Esc to quit ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )]);
        let prompt_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(2),
            width: area.width,
            height: area.height.min(1),
        };
        frame.render_widget(Paragraph::new(prompt).centered(), prompt_area);
    }

    /// Renders one tick of play: field, entities, then the text overlays
    pub fn render_session(&mut self, frame: &mut Frame, view: &RenderView) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }

        self.canvas.reset(area, FIELD_COLOR);
        let scale = FieldScale {
            field_width: view.field_width.max(1) as i64,
            field_height: view.field_height.max(1) as i64,
            canvas_width: self.canvas.width() as i64,
            canvas_height: self.canvas.height() as i64,
        };

        self.draw_entity(view.player, scale);
        self.draw_entity(view.enemy, scale);
        for projectile in view.projectiles {
            self.draw_entity(projectile, scale);
        }
        self.canvas.flush(frame.buffer_mut(), area);

        self.render_overlay(frame, view, area);
    }

    fn draw_entity(&mut self, entity: &dyn Entity, scale: FieldScale) {
        let image = self.sprites.get(entity.sprite());
        let (x, y) = entity.position();
        // Sprites are pre-scaled to their size in field units
        self.canvas.blit(
            image,
            scale.x(x),
            scale.y(y),
            scale.width(image.width() as i32),
            scale.height(image.height() as i32),
        );
    }

    fn render_overlay(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let hud_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };

        let health = Line::from(Span::styled(
            format!("Health: {}", view.health),
            Style::default()
                .fg(Color::Red)
                .bg(FIELD_COLOR)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(health), hud_area);

        let score = Line::from(Span::styled(
            format!("Score: {}", view.score),
            Style::default()
                .fg(Color::Black)
                .bg(FIELD_COLOR)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(
            Paragraph::new(score).alignment(Alignment::Right),
            hud_area,
        );

        // Controls hint at bottom
        let controls = Line::from(Span::styled(
            "[←/→: Move] [Space: Fire] [Esc: Quit]",
            Style::default().fg(Color::DarkGray).bg(FIELD_COLOR),
        ));
        let controls_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn area(width: u16, height: u16) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    #[test]
    fn test_canvas_has_two_rows_per_cell() {
        let mut canvas = PixelCanvas::default();
        canvas.reset(area(10, 4), FIELD_COLOR);
        assert_eq!(canvas.width(), 10);
        assert_eq!(canvas.height(), 8);
        assert_eq!(canvas.get(9, 7), Some(FIELD_COLOR));
        assert_eq!(canvas.get(10, 0), None);
    }

    #[test]
    fn test_blit_stretches_and_clips() {
        let mut canvas = PixelCanvas::default();
        canvas.reset(area(4, 2), FIELD_COLOR);
        let image = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));

        canvas.blit(&image, 2, 2, 5, 5);

        assert_eq!(canvas.get(1, 2), Some(FIELD_COLOR));
        assert_eq!(canvas.get(2, 2), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(canvas.get(3, 3), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(canvas.get(2, 1), Some(FIELD_COLOR));
    }

    #[test]
    fn test_blit_skips_transparent_pixels() {
        let mut canvas = PixelCanvas::default();
        canvas.reset(area(2, 1), FIELD_COLOR);
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));

        canvas.blit(&image, 0, 0, 2, 1);

        assert_eq!(canvas.get(0, 0), Some(Color::Rgb(0, 0, 0)));
        assert_eq!(canvas.get(1, 0), Some(FIELD_COLOR));
    }

    #[test]
    fn test_blit_fully_offscreen_is_noop() {
        let mut canvas = PixelCanvas::default();
        canvas.reset(area(3, 3), FIELD_COLOR);
        let image = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));

        canvas.blit(&image, -10, -10, 4, 4);
        canvas.blit(&image, 3, 0, 4, 4);

        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                assert_eq!(canvas.get(x, y), Some(FIELD_COLOR));
            }
        }
    }

    #[test]
    fn test_flush_writes_half_blocks() {
        let mut canvas = PixelCanvas::default();
        canvas.reset(area(1, 1), FIELD_COLOR);
        let image = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 255]));
        canvas.blit(&image, 0, 0, 1, 1);

        let mut buf = Buffer::empty(area(1, 1));
        canvas.flush(&mut buf, area(1, 1));

        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(10, 20, 30));
        assert_eq!(cell.bg, FIELD_COLOR);
    }

    #[test]
    fn test_field_scale_keeps_small_sprites_visible() {
        let scale = FieldScale {
            field_width: 800,
            field_height: 600,
            canvas_width: 80,
            canvas_height: 48,
        };
        assert_eq!(scale.x(400), 40);
        assert_eq!(scale.y(570), 45);
        assert_eq!(scale.width(10), 1);
        assert_eq!(scale.height(5), 1);
        assert_eq!(scale.width(30), 3);
    }
}
