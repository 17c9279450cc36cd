//! Canvas2D painter: replays a display list onto a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use drift_engine::{Blend, DisplayList, DrawCommand, LineCap, Paint, Stroke};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::media::MediaLibrary;

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Set the backing-store size.
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Paint one frame. Alpha and blend state are reset before and after.
    pub fn paint(&self, list: &DisplayList, media: &MediaLibrary) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.set_global_composite_operation("source-over")?;

        for command in list.iter() {
            match command {
                DrawCommand::Clear { size } => {
                    ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
                }
                DrawCommand::FillRect { origin, size, paint } => {
                    self.apply_fill(paint)?;
                    ctx.fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::StrokeRect { origin, size, stroke } => {
                    self.apply_stroke(stroke)?;
                    ctx.stroke_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::FillCircles { circles, paint } => {
                    self.apply_fill(paint)?;
                    ctx.begin_path();
                    for (center, radius) in circles {
                        let (x, y, r) = (center.x as f64, center.y as f64, radius.max(0.0) as f64);
                        ctx.move_to(x + r, y);
                        ctx.arc(x, y, r, 0.0, TAU)?;
                    }
                    ctx.fill();
                }
                DrawCommand::FillPolygon { points, paint } => {
                    self.apply_fill(paint)?;
                    ctx.begin_path();
                    for (i, p) in points.iter().enumerate() {
                        if i == 0 {
                            ctx.move_to(p.x as f64, p.y as f64);
                        } else {
                            ctx.line_to(p.x as f64, p.y as f64);
                        }
                    }
                    ctx.close_path();
                    ctx.fill();
                }
                DrawCommand::StrokePolyline { points, stroke } => {
                    self.apply_stroke(stroke)?;
                    ctx.begin_path();
                    for (i, p) in points.iter().enumerate() {
                        if i == 0 {
                            ctx.move_to(p.x as f64, p.y as f64);
                        } else {
                            ctx.line_to(p.x as f64, p.y as f64);
                        }
                    }
                    ctx.stroke();
                }
                DrawCommand::StrokeSegments { segments, stroke } => {
                    self.apply_stroke(stroke)?;
                    ctx.begin_path();
                    for (a, b) in segments {
                        ctx.move_to(a.x as f64, a.y as f64);
                        ctx.line_to(b.x as f64, b.y as f64);
                    }
                    ctx.stroke();
                }
                DrawCommand::Sprite { asset, center, size, mirrored } => {
                    let Some(img) = media.image(*asset) else { continue };
                    let (w, h) = (size.x as f64, size.y as f64);
                    ctx.save();
                    ctx.translate(center.x as f64, center.y as f64)?;
                    if *mirrored {
                        ctx.scale(-1.0, 1.0)?;
                    }
                    let drawn = ctx.draw_image_with_html_image_element_and_dw_and_dh(img, -w / 2.0, -h / 2.0, w, h);
                    ctx.restore();
                    drawn?;
                }
                DrawCommand::VideoFrame { asset, origin, size } => {
                    let Some(video) = media.video(*asset) else { continue };
                    ctx.draw_image_with_html_video_element_and_dw_and_dh(
                        video,
                        origin.x as f64,
                        origin.y as f64,
                        size.x as f64,
                        size.y as f64,
                    )?;
                }
                DrawCommand::Text { text, position, size_px, color } => {
                    ctx.set_font(&format!("{}px sans-serif", size_px));
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_text(text, position.x as f64, position.y as f64)?;
                }
                DrawCommand::SetAlpha(alpha) => ctx.set_global_alpha(*alpha as f64),
                DrawCommand::SetBlend(blend) => {
                    let op = match blend {
                        Blend::Normal => "source-over",
                        Blend::Screen => "screen",
                    };
                    ctx.set_global_composite_operation(op)?;
                }
            }
        }

        ctx.set_global_alpha(1.0);
        ctx.set_global_composite_operation("source-over")?;
        Ok(())
    }

    /// Set the fill style, building a `CanvasGradient` for gradient paints.
    fn apply_fill(&self, paint: &Paint) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match paint {
            Paint::Solid(c) => ctx.set_fill_style_str(&c.to_css()),
            Paint::Linear { from, to, stops } => {
                let grad = ctx.create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64);
                for stop in stops {
                    grad.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css())?;
                }
                ctx.set_fill_style_canvas_gradient(&grad);
            }
            Paint::Radial { center, inner_radius, outer_radius, stops } => {
                let (x, y) = (center.x as f64, center.y as f64);
                let grad = ctx.create_radial_gradient(x, y, *inner_radius as f64, x, y, *outer_radius as f64)?;
                for stop in stops {
                    grad.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css())?;
                }
                ctx.set_fill_style_canvas_gradient(&grad);
            }
        }
        Ok(())
    }

    fn apply_stroke(&self, stroke: &Stroke) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&stroke.color.to_css());
        ctx.set_line_width(stroke.width as f64);
        ctx.set_line_cap(match stroke.cap {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        });
        let dash = match stroke.dash {
            Some([on, off]) => js_sys::Array::of2(&JsValue::from(on as f64), &JsValue::from(off as f64)),
            None => js_sys::Array::new(),
        };
        ctx.set_line_dash(&dash)?;
        Ok(())
    }
}
