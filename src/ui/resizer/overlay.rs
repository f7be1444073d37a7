// SPDX-License-Identifier: MPL-2.0
//! Crop preview renderer.
//!
//! Paints one frame of the resizer surface: the source image shifted so the
//! crop square sits at the surface center, a zig-zag border around the square,
//! a dark mask over everything outside it, and a `W x H` caption above it.
//!
//! Drawing happens in a coordinate system whose origin is the surface center.
//! `tiny-skia` takes the transform per call, so nothing carries over from one
//! frame to the next.
//!
//! The caption font (DejaVu Sans) is embedded at compile time via
//! `include_bytes!`, so the caption renders without any installed fonts.

use crate::config::{defaults, Config};
use crate::domain::SquareRegion;
use resvg::usvg;
use std::sync::Arc;
use tiny_skia::{
    Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, PixmapPaint, Point, Rect, Stroke,
    Transform,
};

/// Caption font, loaded into every renderer's font database.
const CAPTION_FONT: &[u8] = include_bytes!("../../../assets/fonts/DejaVuSans.ttf");
const CAPTION_FONT_FAMILY: &str = "DejaVu Sans";

/// Font database holding the embedded caption font, also used for the
/// generic `sans-serif` family.
fn caption_fonts() -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(CAPTION_FONT.to_vec());
    db.set_sans_serif_family(CAPTION_FONT_FAMILY);
    db
}

/// Visual parameters of the crop preview.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub border_line_width: f32,
    pub border_color: Color,
    pub overlay_opacity: f32,
    pub label_font_size: f32,
    pub label_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            border_line_width: defaults::DEFAULT_BORDER_LINE_WIDTH,
            border_color: parse_hex_color(defaults::DEFAULT_BORDER_COLOR)
                .unwrap_or(Color::from_rgba8(0xff, 0xe7, 0x53, 0xff)),
            overlay_opacity: defaults::DEFAULT_OVERLAY_OPACITY,
            label_font_size: defaults::DEFAULT_LABEL_FONT_SIZE,
            label_color: parse_hex_color(defaults::DEFAULT_LABEL_COLOR).unwrap_or(Color::WHITE),
        }
    }
}

impl RenderStyle {
    /// Builds a style from user preferences, keeping defaults for missing or
    /// unparsable values.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut style = Self::default();
        if let Some(width) = config.border_line_width.filter(|width| width.is_finite()) {
            style.border_line_width = width.clamp(
                defaults::MIN_BORDER_LINE_WIDTH,
                defaults::MAX_BORDER_LINE_WIDTH,
            );
        }
        if let Some(hex) = config.border_color.as_deref() {
            match parse_hex_color(hex) {
                Some(color) => style.border_color = color,
                None => log::warn!("Ignoring invalid border color '{hex}'"),
            }
        }
        if let Some(opacity) = config.overlay_opacity.filter(|opacity| opacity.is_finite()) {
            style.overlay_opacity =
                opacity.clamp(defaults::MIN_OVERLAY_OPACITY, defaults::MAX_OVERLAY_OPACITY);
        }
        if let Some(size) = config
            .label_font_size
            .filter(|size| size.is_finite() && *size > 0.0)
        {
            style.label_font_size = size;
        }
        style
    }
}

/// Parses `#rrggbb` or `#rgb`.
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        6 => Some(Color::from_rgba8(
            channel(digits.get(0..2)?)?,
            channel(digits.get(2..4)?)?,
            channel(digits.get(4..6)?)?,
            0xff,
        )),
        3 => {
            let short = |i: usize| channel(digits.get(i..=i)?).map(|v| v * 17);
            Some(Color::from_rgba8(short(0)?, short(1)?, short(2)?, 0xff))
        }
        _ => None,
    }
}

/// Three-point polylines forming the zig-zag border of a square of `side`,
/// in center-origin coordinates.
///
/// Every edge is cut into [`defaults::ZIGZAG_SEGMENTS_PER_EDGE`] equal
/// segments; each pair of segments is one "V" whose tip touches the square
/// edge and whose ends sit one segment length inside it. Returned order:
/// for the positive side (bottom/right) then the negative side (top/left),
/// alternating horizontal and vertical strokes.
#[must_use]
pub fn zigzag_strokes(side: f32) -> Vec<[Point; 3]> {
    let segments = defaults::ZIGZAG_SEGMENTS_PER_EDGE;
    let half = side / 2.0;
    let segment = side / segments as f32;
    let mut strokes = Vec::with_capacity(segments * 2);

    for sign in [1.0_f32, -1.0] {
        let base = sign * (half - segment);
        let tip = sign * half;
        for i in (0..segments).step_by(2) {
            let start = -half + segment * i as f32;
            let middle = start + segment;
            let end = start + 2.0 * segment;
            strokes.push([
                Point::from_xy(start, base),
                Point::from_xy(middle, tip),
                Point::from_xy(end, base),
            ]);
            strokes.push([
                Point::from_xy(base, start),
                Point::from_xy(tip, middle),
                Point::from_xy(base, end),
            ]);
        }
    }
    strokes
}

/// Caption drawn above the crop square.
#[must_use]
pub fn label_text(width: u32, height: u32) -> String {
    format!("{width} x {height}")
}

/// Bottom-center anchor of the caption, in surface coordinates.
#[must_use]
pub fn label_anchor(surface_width: u32, surface_height: u32, region: SquareRegion, line_width: f32) -> Point {
    Point::from_xy(
        surface_width as f32 / 2.0,
        surface_height as f32 / 2.0 - region.side / 2.0 - line_width * defaults::LABEL_OFFSET_FACTOR,
    )
}

/// Draws crop preview frames.
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    style: RenderStyle,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new(RenderStyle::default())
    }
}

impl OverlayRenderer {
    /// Renderer using the embedded caption font.
    #[must_use]
    pub fn new(style: RenderStyle) -> Self {
        Self {
            style,
            fontdb: Arc::new(caption_fonts()),
        }
    }

    /// Adds the system fonts as fallbacks for the size caption.
    #[must_use]
    pub fn with_system_fonts(mut self) -> Self {
        let mut db = caption_fonts();
        db.load_system_fonts();
        log::debug!("Loaded {} font faces for the size caption", db.len());
        self.fontdb = Arc::new(db);
        self
    }

    #[must_use]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Repaints `surface` with `image` cropped around `region`.
    ///
    /// `image` must have the natural dimensions of the source; the caption
    /// reports them.
    pub fn render(&self, surface: &mut Pixmap, image: &Pixmap, region: SquareRegion) {
        surface.fill(Color::TRANSPARENT);

        let center = Transform::from_translate(
            surface.width() as f32 / 2.0,
            surface.height() as f32 / 2.0,
        );
        let focus = region.center();

        surface.draw_pixmap(
            0,
            0,
            image.as_ref(),
            &PixmapPaint::default(),
            center.pre_translate(-focus.x, -focus.y),
            None,
        );

        self.draw_border(surface, center, region.side);
        self.draw_mask(surface, center, region.side);
        self.draw_label(surface, region, image.width(), image.height());
    }

    fn draw_border(&self, surface: &mut Pixmap, center: Transform, side: f32) {
        let mut pb = PathBuilder::new();
        for [start, tip, end] in zigzag_strokes(side) {
            pb.move_to(start.x, start.y);
            pb.line_to(tip.x, tip.y);
            pb.line_to(end.x, end.y);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(self.style.border_color);
        paint.anti_alias = true;
        let stroke = Stroke {
            width: self.style.border_line_width,
            line_cap: LineCap::Square,
            ..Stroke::default()
        };
        surface.stroke_path(&path, &paint, &stroke, center, None);
    }

    /// Darkens the surface outside the square grown by half a border width,
    /// so the mask starts where the border stroke ends.
    fn draw_mask(&self, surface: &mut Pixmap, center: Transform, side: f32) {
        let width = surface.width() as f32;
        let height = surface.height() as f32;

        let mut pb = PathBuilder::new();
        let Some(outer) = Rect::from_xywh(-width / 2.0, -height / 2.0, width, height) else {
            return;
        };
        pb.push_rect(outer);
        let inner_half = side / 2.0 + self.style.border_line_width / 2.0;
        if let Some(inner) =
            Rect::from_xywh(-inner_half, -inner_half, inner_half * 2.0, inner_half * 2.0)
        {
            pb.push_rect(inner);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, (self.style.overlay_opacity * 255.0).round() as u8);
        surface.fill_path(&path, &paint, FillRule::EvenOdd, center, None);
    }

    /// Caption bottom edge sits on the anchor, like a canvas `bottom` baseline.
    fn draw_label(&self, surface: &mut Pixmap, region: SquareRegion, width: u32, height: u32) {
        let anchor = label_anchor(
            surface.width(),
            surface.height(),
            region,
            self.style.border_line_width,
        );
        let color = self.style.label_color.to_color_u8();
        let svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{sw}" height="{sh}"><text x="{x}" y="{y}" font-family="{family}, sans-serif" font-size="{size}" text-anchor="middle" dominant-baseline="text-after-edge" fill="rgb({r},{g},{b})">{text}</text></svg>"#,
            sw = surface.width(),
            sh = surface.height(),
            x = anchor.x,
            y = anchor.y,
            family = CAPTION_FONT_FAMILY,
            size = self.style.label_font_size,
            r = color.red(),
            g = color.green(),
            b = color.blue(),
            text = label_text(width, height),
        );

        let mut options = usvg::Options::default();
        options.fontdb = Arc::clone(&self.fontdb);
        match usvg::Tree::from_str(&svg, &options) {
            Ok(tree) => resvg::render(&tree, Transform::identity(), &mut surface.as_mut()),
            Err(err) => log::warn!("Failed to lay out size caption: {err}"),
        }
    }
}
