//! Macroquad-backed [`Surface`] implementation plus the texture cache and
//! text measurement helpers that go with it. Everything here is plain
//! immediate-mode macroquad; the engine never talks to the GPU directly.

use macroquad::prelude::{
    draw_line, draw_poly, draw_rectangle, draw_rectangle_lines, draw_text_ex, draw_texture_ex,
    get_internal_gl, load_texture, measure_text, Color as MqColor, DrawTextureParams, Font,
    TextParams, Texture2D, Vec2,
};
use macroquad::shapes::draw_triangle;

use crate::color::Color;
use crate::component::{ImageSource, ImageStyle, TextStyle};
use crate::draw::Surface;
use crate::math::{Dimensions, Rect, Vector2};

const PIXELS_PER_POINT: f32 = 2.0;

/// Global texture cache. Can also be used outside the renderer to manage
/// your own macroquad textures.
pub static TEXTURE_MANAGER: std::sync::LazyLock<std::sync::Mutex<TextureManager>> =
    std::sync::LazyLock::new(|| std::sync::Mutex::new(TextureManager::new()));

/// Caches textures by key and unloads the ones that stop being used.
///
/// Adjust `max_frames_not_used` to control how many frames a texture can go
/// unused before [`TextureManager::clean`] evicts it.
pub struct TextureManager {
    textures: std::collections::HashMap<String, TextureData>,
    pub max_frames_not_used: usize,
}

struct TextureData {
    frames_not_used: usize,
    texture: Texture2D,
}

impl TextureManager {
    pub fn new() -> Self {
        Self {
            textures: std::collections::HashMap::new(),
            max_frames_not_used: 1,
        }
    }

    /// Get a cached texture by its key.
    pub fn get(&mut self, key: &str) -> Option<&Texture2D> {
        let data = self.textures.get_mut(key)?;
        data.frames_not_used = 0;
        Some(&data.texture)
    }

    /// Get the cached texture by its path, or load the file and cache it.
    /// Loading happens at most once; a failed load is reported and retried
    /// next time.
    pub async fn get_or_load(&mut self, path: &'static str) -> Option<&Texture2D> {
        if !self.textures.contains_key(path) {
            match load_texture(path).await {
                Ok(texture) => {
                    self.textures.insert(
                        path.to_owned(),
                        TextureData {
                            frames_not_used: 0,
                            texture,
                        },
                    );
                }
                Err(error) => {
                    log::warn!("failed to load texture `{path}`: {error}");
                    return None;
                }
            }
        }
        let entry = self.textures.get_mut(path)?;
        entry.frames_not_used = 0;
        Some(&entry.texture)
    }

    /// Get the cached texture by its key, or create it with the provided
    /// function and cache it.
    pub fn get_or_create<F>(&mut self, key: String, create_fn: F) -> &Texture2D
    where
        F: FnOnce() -> Texture2D,
    {
        let entry = self
            .textures
            .entry(key)
            .or_insert_with(|| TextureData {
                frames_not_used: 0,
                texture: create_fn(),
            });
        entry.frames_not_used = 0;
        &entry.texture
    }

    /// Cache a texture under the given key, replacing any previous entry.
    pub fn cache(&mut self, key: String, texture: Texture2D) {
        self.textures.insert(
            key,
            TextureData {
                frames_not_used: 0,
                texture,
            },
        );
    }

    /// Evicts textures unused for longer than `max_frames_not_used` and ages
    /// the rest. Call once per frame, after drawing.
    pub fn clean(&mut self) {
        self.textures
            .retain(|_, data| data.frames_not_used <= self.max_frames_not_used);
        for data in self.textures.values_mut() {
            data.frames_not_used += 1;
        }
    }

    pub fn size(&self) -> usize {
        self.textures.len()
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}

fn to_macroquad_color(color: Color) -> MqColor {
    MqColor {
        r: color.r / 255.0,
        g: color.g / 255.0,
        b: color.b / 255.0,
        a: color.a / 255.0,
    }
}

/// Circle with a side count proportional to its circumference, so large
/// circles stay round without burning vertices on small ones.
fn draw_good_circle(x: f32, y: f32, radius: f32, color: MqColor) {
    let sides = ((2.0 * std::f32::consts::PI * radius) / PIXELS_PER_POINT).max(20.0);
    draw_poly(x, y, sides.min(255.0) as u8, radius, 0.0, color);
}

fn apply_scissor(clip: Option<Rect>) {
    let scissor = clip.map(|clip| {
        (
            clip.x as i32,
            clip.y as i32,
            clip.width as i32,
            clip.height as i32,
        )
    });
    unsafe {
        get_internal_gl().quad_gl.scissor(scissor);
    }
}

/// [`Surface`] drawing straight to the macroquad frame buffer. Create one
/// per window, hand it to [`crate::Ui::draw`] every frame, and call
/// [`MacroquadSurface::finish_frame`] afterwards so unused textures get
/// evicted.
pub struct MacroquadSurface {
    clip: Option<Rect>,
    font: Option<Font>,
}

impl MacroquadSurface {
    pub fn new() -> Self {
        Self {
            clip: None,
            font: None,
        }
    }

    pub fn with_font(font: Font) -> Self {
        Self {
            clip: None,
            font: Some(font),
        }
    }

    /// Ages the texture cache. Call once per frame, after drawing.
    pub fn finish_frame(&mut self) {
        if let Ok(mut manager) = TEXTURE_MANAGER.lock() {
            manager.clean();
        }
    }
}

impl Default for MacroquadSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MacroquadSurface {
    fn clip(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        if clip != self.clip {
            self.clip = clip;
            apply_scissor(clip);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            to_macroquad_color(color),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        draw_rectangle_lines(
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            thickness,
            to_macroquad_color(color),
        );
    }

    fn line(&mut self, from: Vector2, to: Vector2, thickness: f32, color: Color) {
        draw_line(from.x, from.y, to.x, to.y, thickness, to_macroquad_color(color));
    }

    fn polygon(&mut self, points: &[Vector2], color: Color) {
        if points.len() < 3 {
            return;
        }
        // Triangle fan; fine for the convex shapes the engine hands out.
        let color = to_macroquad_color(color);
        let first = Vec2::new(points[0].x, points[0].y);
        for pair in points[1..].windows(2) {
            draw_triangle(
                first,
                Vec2::new(pair[0].x, pair[0].y),
                Vec2::new(pair[1].x, pair[1].y),
                color,
            );
        }
    }

    fn circle(&mut self, center: Vector2, radius: f32, color: Color) {
        draw_good_circle(center.x, center.y, radius, to_macroquad_color(color));
    }

    fn text(&mut self, text: &str, style: &TextStyle, origin: Vector2) {
        let measured = measure_text(text, self.font.as_ref(), style.font_size, 1.0);
        draw_text_ex(
            text,
            origin.x,
            origin.y + measured.offset_y,
            TextParams {
                font: self.font.as_ref(),
                font_size: style.font_size,
                color: to_macroquad_color(style.color),
                ..Default::default()
            },
        );
    }

    fn blit(&mut self, source: &ImageSource, style: &ImageStyle, dest: Rect) {
        let Ok(mut manager) = TEXTURE_MANAGER.lock() else {
            return;
        };
        let texture = match source {
            ImageSource::Path(path) => match manager.get(path) {
                Some(texture) => texture.clone(),
                None => {
                    // File textures load asynchronously; preload them via
                    // `TEXTURE_MANAGER.get_or_load` before the first draw.
                    log::warn!("texture `{path}` not loaded, skipping blit");
                    return;
                }
            },
            ImageSource::Bytes { name, data } => manager
                .get_or_create(name.to_string(), || {
                    Texture2D::from_file_with_format(data, None)
                })
                .clone(),
        };
        draw_texture_ex(
            &texture,
            dest.x,
            dest.y,
            to_macroquad_color(style.tint),
            DrawTextureParams {
                dest_size: Some(Vec2::new(dest.width, dest.height)),
                ..Default::default()
            },
        );
    }
}

/// Builds an image measurer for [`crate::Ui::set_image_measurer`] backed by
/// the texture cache. Byte-embedded images are decoded on first use; file
/// images report zero until preloaded via [`TextureManager::get_or_load`].
pub fn image_measurer() -> impl FnMut(&ImageSource, &ImageStyle) -> Dimensions + 'static {
    |source: &ImageSource, _style: &ImageStyle| {
        let Ok(mut manager) = TEXTURE_MANAGER.lock() else {
            return Dimensions::default();
        };
        let texture = match source {
            ImageSource::Path(path) => manager.get(path),
            ImageSource::Bytes { name, data } => Some(manager.get_or_create(
                name.to_string(),
                || Texture2D::from_file_with_format(data, None),
            )),
        };
        match texture {
            Some(texture) => Dimensions::new(texture.width(), texture.height()),
            None => Dimensions::default(),
        }
    }
}

/// Builds a text measurer for [`crate::Ui::set_text_measurer`] backed by
/// macroquad's font metrics.
pub fn text_measurer(font: Option<Font>) -> impl FnMut(&str, &TextStyle) -> Dimensions + 'static {
    move |text: &str, style: &TextStyle| {
        let measured = measure_text(text, font.as_ref(), style.font_size, 1.0);
        let spacing = (text.chars().count().max(1) - 1) as f32 * style.letter_spacing as f32;
        let height = if style.line_height > 0 {
            style.line_height as f32
        } else {
            measured.height
        };
        Dimensions::new(measured.width + spacing, height)
    }
}
