use std::collections::HashSet;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::SupplyMapState;
use super::tiles::{self, TileCache};

const BACKGROUND: &str = "#e5e7eb";

pub fn render(state: &SupplyMapState, tiles: &mut TileCache, ctx: &CanvasRenderingContext2d) {
	let vp = &state.viewport;
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, vp.width, vp.height);
	draw_tiles(state, tiles, ctx);
	draw_lines(state, ctx);
	draw_markers(state, ctx);
	draw_attribution(state, ctx);
}

fn draw_tiles(state: &SupplyMapState, cache: &mut TileCache, ctx: &CanvasRenderingContext2d) {
	let mut visible = HashSet::new();
	for tile in tiles::visible_tiles(&state.viewport) {
		let url = tiles::tile_url(&state.options, &tile);
		if let Some(img) = cache.get(&url) {
			// Slight overdraw hides seams at fractional zoom.
			let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
				img,
				tile.sx,
				tile.sy,
				tile.size + 0.5,
				tile.size + 0.5,
			);
		}
		visible.insert(url);
	}
	cache.retain(&visible);
}

fn draw_lines(state: &SupplyMapState, ctx: &CanvasRenderingContext2d) {
	let vp = &state.viewport;
	ctx.set_line_cap("round");
	for line in &state.scene.lines {
		let (x1, y1) = vp.to_screen(line.from.0, line.from.1);
		let (x2, y2) = vp.to_screen(line.to.0, line.to.1);
		ctx.set_global_alpha(line.opacity);
		ctx.set_stroke_style_str(line.color);
		ctx.set_line_width(line.width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_markers(state: &SupplyMapState, ctx: &CanvasRenderingContext2d) {
	let vp = &state.viewport;
	for m in &state.scene.markers {
		let (x, y) = vp.to_screen(m.lat, m.lon);
		if x < -m.radius || y < -m.radius || x > vp.width + m.radius || y > vp.height + m.radius {
			continue;
		}
		let hovered = state.hovered.as_deref() == Some(m.id.as_str());

		ctx.begin_path();
		let _ = ctx.arc(x, y, m.radius, 0.0, 2.0 * PI);
		ctx.set_global_alpha(if hovered { 1.0 } else { 0.9 });
		ctx.set_fill_style_str(m.fill);
		ctx.fill();
		ctx.set_global_alpha(1.0);
		ctx.set_stroke_style_str(m.stroke);
		ctx.set_line_width(m.stroke_width);
		ctx.stroke();
	}
}

fn draw_attribution(state: &SupplyMapState, ctx: &CanvasRenderingContext2d) {
	let vp = &state.viewport;
	let text = &state.options.attribution;
	ctx.set_font("11px sans-serif");
	let width = ctx.measure_text(text).map(|m| m.width()).unwrap_or(200.0);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
	ctx.fill_rect(vp.width - width - 8.0, vp.height - 16.0, width + 8.0, 16.0);
	ctx.set_fill_style_str("#333");
	let _ = ctx.fill_text(text, vp.width - width - 4.0, vp.height - 4.0);
}
