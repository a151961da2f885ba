//! Diagonal stripe pattern - tile rasterization and overlay texture
//!
//! One tile holds a single sheared band against a transparent background.
//! The band's slanted edges meet the tile boundary at matching offsets, so
//! horizontal repetition is seamless. The tile is rasterized once (a pure
//! function of the spec) and uploaded as a repeat-wrapped GPU texture;
//! per-frame work is limited to painting that texture over the indicator
//! rect with a UV spanning the needed number of repeats.

use eframe::egui;
use egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, TextureWrapMode};
use log::{debug, trace};

/// Stable name for the overlay texture; installing under the same name
/// replaces the previous instance instead of stacking a duplicate.
pub const STRIPE_TEXTURE_NAME: &str = "stripe_overlay";

/// One repeat unit of the diagonal stripe pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripeSpec {
    /// Horizontal width of the band
    pub stripe_width: f32,
    /// Gap between bands
    pub stripe_spacing: f32,
    /// Band color, alpha included
    pub color: Color32,
    /// Tile height; matches the bar the pattern is painted over
    pub tile_height: f32,
}

impl Default for StripeSpec {
    fn default() -> Self {
        Self {
            stripe_width: 5.0,
            stripe_spacing: 15.0,
            color: Color32::from_black_alpha(128),
            tile_height: 30.0,
        }
    }
}

impl StripeSpec {
    /// Tile width in points - one band plus one gap.
    pub fn tile_width(&self) -> f32 {
        self.stripe_width + self.stripe_spacing
    }

    /// Rasterize one tile at the given scale (pixels per point).
    ///
    /// The band is the parallelogram (0,0) → (w,0) → (spacing+w,h) →
    /// (spacing,h): at row y the band spans `[t*spacing, t*spacing + w]`
    /// with t the row's vertical fraction. Horizontal pixel coverage gives
    /// smooth slanted edges at any display scale.
    ///
    /// Returns None if the scaled tile has no pixels; callers treat that
    /// as "no overlay", not as an error.
    pub fn rasterize(&self, scale: f32) -> Option<ColorImage> {
        if !(self.stripe_width > 0.0) || !(self.tile_height > 0.0) || self.stripe_spacing < 0.0 {
            debug!("Degenerate stripe spec {:?}, skipping overlay", self);
            return None;
        }
        let px_w = (self.tile_width() * scale).round() as usize;
        let px_h = (self.tile_height * scale).round() as usize;
        if px_w == 0 || px_h == 0 {
            debug!("Stripe tile empty at scale {}, skipping overlay", scale);
            return None;
        }

        let band_w = self.stripe_width * scale;
        let shear = self.stripe_spacing * scale;
        let [r, g, b, a] = self.color.to_srgba_unmultiplied();

        let mut rgba = vec![0u8; px_w * px_h * 4];
        for y in 0..px_h {
            // Band start shifts right linearly with depth
            let t = (y as f32 + 0.5) / px_h as f32;
            let x0 = t * shear;
            let x1 = x0 + band_w;
            for x in 0..px_w {
                let cov = coverage(x as f32, x as f32 + 1.0, x0, x1);
                if cov > 0.0 {
                    let i = (y * px_w + x) * 4;
                    rgba[i] = r;
                    rgba[i + 1] = g;
                    rgba[i + 2] = b;
                    rgba[i + 3] = (a as f32 * cov).round() as u8;
                }
            }
        }
        Some(ColorImage::from_rgba_unmultiplied([px_w, px_h], &rgba))
    }
}

/// Overlap of pixel span [px0,px1] with band [x0,x1], as a 0..=1 fraction.
fn coverage(px0: f32, px1: f32, x0: f32, x1: f32) -> f32 {
    (px1.min(x1) - px0.max(x0)).clamp(0.0, 1.0)
}

/// Owns the stripe texture and paints it tiled over the indicator.
///
/// Exactly one texture instance exists per overlay: `install()` drops the
/// previous handle (freeing its GPU allocation) before storing the new one.
pub struct StripeOverlay {
    spec: StripeSpec,
    texture: Option<TextureHandle>,
    scale: f32,
}

impl StripeOverlay {
    pub fn new(spec: StripeSpec) -> Self {
        Self {
            spec,
            texture: None,
            scale: 0.0,
        }
    }

    pub fn spec(&self) -> &StripeSpec {
        &self.spec
    }

    /// Whether a texture is currently installed.
    pub fn is_installed(&self) -> bool {
        self.texture.is_some()
    }

    /// (Re)generate the tile and upload it, replacing any previous instance.
    pub fn install(&mut self, ctx: &egui::Context) {
        let scale = ctx.pixels_per_point();
        // Drop the old instance first so the stable name never refers to two
        self.texture = None;
        self.scale = scale;
        let Some(image) = self.spec.rasterize(scale) else {
            return;
        };
        let options = TextureOptions {
            wrap_mode: TextureWrapMode::Repeat,
            ..TextureOptions::LINEAR
        };
        trace!(
            "Uploading {}x{} stripe tile at scale {}",
            image.width(),
            image.height(),
            scale
        );
        self.texture = Some(ctx.load_texture(STRIPE_TEXTURE_NAME, image, options));
    }

    /// Paint the pattern over `rect`, clipped to `corner_radius`.
    ///
    /// The UV origin sits at the rect's own min corner: the pattern is
    /// anchored to the indicator, not the track, so the painted area simply
    /// widens as progress grows without the stripes re-phasing.
    pub fn paint(&mut self, ui: &egui::Ui, rect: Rect, corner_radius: f32) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        // Regenerate on first use and when the display scale changes;
        // install() records the attempted scale, so a failed spec is not
        // retried every frame
        if self.scale != ui.ctx().pixels_per_point() {
            self.install(ui.ctx());
        }
        let Some(texture) = &self.texture else {
            return;
        };

        let repeats_x = rect.width() / self.spec.tile_width();
        let repeats_y = rect.height() / self.spec.tile_height;
        let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(repeats_x, repeats_y));

        egui::Image::from_texture(texture)
            .uv(uv)
            .corner_radius(corner_radius)
            .paint_at(ui, rect);
    }
}
