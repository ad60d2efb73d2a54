//! Canvas rendering for the progress tree.
//!
//! Draws links first so nodes cover their end points, then every node as a
//! stack of background track, progress sweep, optional overflow sweep, the
//! percentage in the middle and the name beside it. Layout coordinates are
//! breadth-major, so a node at `(x, y)` is drawn at screen `(y, x)`.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::ring::RingBand;
use super::scene::{LinkVisual, NodeVisual};
use super::theme::{ProgressColor, Theme};
use super::view::TreeView;

/// Renders the complete scene at time `now`.
pub fn render(
	view: &TreeView,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	width: f64,
	height: f64,
	now: f64,
) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	let config = view.config();
	ctx.save();
	let _ = ctx.translate(config.margin.left, config.margin.top);

	for (&id, link) in &view.scene().links {
		let alpha = view.scene().link_opacity(id, now);
		draw_link(ctx, link, theme, alpha, now);
	}

	let band = RingBand {
		inner: config.inner_radius,
		outer: config.outer_radius,
	};
	let font = format!("{}px {}", config.font_size(), theme.node.font_family);
	ctx.set_font(&font);
	for visual in view.scene().nodes.values() {
		draw_node(ctx, visual, band, theme, now);
	}

	ctx.restore();
}

fn draw_link(
	ctx: &CanvasRenderingContext2d,
	link: &LinkVisual,
	theme: &Theme,
	alpha: f64,
	now: f64,
) {
	let ((sx, sy), (tx, ty)) = link.endpoints(now);
	let mid = (sy + ty) / 2.0;

	let color = theme.link.color;
	ctx.set_stroke_style_str(&color.with_alpha(color.a * alpha).to_css());
	ctx.set_line_width(theme.link.width);
	ctx.begin_path();
	ctx.move_to(sy, sx);
	ctx.bezier_curve_to(mid, sx, mid, tx, ty, tx);
	ctx.stroke();
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	visual: &NodeVisual,
	band: RingBand,
	theme: &Theme,
	now: f64,
) {
	let (x, y) = visual.position(now);
	let alpha = visual.opacity.value(now).clamp(0.0, 1.0);
	if alpha <= 0.001 {
		return;
	}

	ctx.save();
	let _ = ctx.translate(y, x);
	ctx.set_global_alpha(alpha);

	ctx.begin_path();
	let _ = ctx.arc(0.0, 0.0, band.inner, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&theme.node.fill_color.to_css());
	ctx.fill();

	fill_band(ctx, band, 360.0, &theme.node.track_color.to_css());

	let progress = &visual.progress;
	let primary = ProgressColor::for_value(progress.value.min(100.0)).color();
	fill_band(ctx, band, progress.sweep.value(now), &primary.to_css());

	if let Some(inner) = &progress.overflow_sweep {
		let overflow = ProgressColor::for_value(progress.value).color();
		fill_band(ctx, band.overflow(), inner.value(now), &overflow.to_css());
	}

	ctx.set_text_baseline("middle");
	ctx.set_text_align("center");
	ctx.set_fill_style_str(&theme.node.percent_color.to_css());
	let _ = ctx.fill_text(&progress.percent_label(now), 0.0, 0.0);

	let label = visual.label;
	ctx.set_text_align(label.anchor.as_css());
	ctx.set_fill_style_str(&theme.node.label_color.to_css());
	let _ = ctx.fill_text(&visual.name, label.dx, label.dy);

	ctx.restore();
}

/// Fills the annulus sector `[0, sweep_degrees]` of `band`.
fn fill_band(ctx: &CanvasRenderingContext2d, band: RingBand, sweep_degrees: f64, color: &str) {
	if sweep_degrees <= 0.0 || band.width() <= 0.0 {
		return;
	}
	// Canvas angles start at three o'clock; sweeps start at twelve.
	let start = -PI / 2.0;
	let end = start + sweep_degrees.min(360.0).to_radians();

	ctx.begin_path();
	let _ = ctx.arc(0.0, 0.0, band.outer, start, end);
	let _ = ctx.arc_with_anticlockwise(0.0, 0.0, band.inner, end, start, true);
	ctx.close_path();
	ctx.set_fill_style_str(color);
	ctx.fill();
}
