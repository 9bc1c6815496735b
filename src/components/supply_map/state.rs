use super::projection::Viewport;
use super::scene::MapScene;
use crate::config::MapOptions;

/// Pointer travel, in pixels, below which a press-release counts as a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub last_x: f64,
	pub last_y: f64,
}

pub struct SupplyMapState {
	pub options: MapOptions,
	pub viewport: Viewport,
	pub scene: MapScene,
	pub pan: PanState,
	pub hovered: Option<String>,
	pub dirty: bool,
}

impl SupplyMapState {
	pub fn new(options: MapOptions, width: f64, height: f64) -> Self {
		let viewport = Viewport::new(options.initial_center, options.initial_zoom, width, height);
		Self {
			options,
			viewport,
			scene: MapScene::default(),
			pan: PanState::default(),
			hovered: None,
			dirty: true,
		}
	}

	pub fn set_scene(&mut self, scene: MapScene) {
		if let Some(id) = &self.hovered {
			if !scene.markers.iter().any(|m| &m.id == id) {
				self.hovered = None;
			}
		}
		self.scene = scene;
		self.dirty = true;
	}

	/// Frames the current scene; an empty scene leaves the view alone.
	pub fn fit_to_scene(&mut self) {
		let Some(bounds) = self.scene.bounds else {
			return;
		};
		self.viewport
			.fit(&bounds, self.options.fit_padding, self.options.max_fit_zoom);
		log::debug!(
			"fit to {bounds:?}: zoom {} center {:?}",
			self.viewport.zoom,
			self.viewport.center_latlon()
		);
		self.dirty = true;
	}

	/// Swaps in the scene of a new graph and frames it. Hover never survives
	/// a replacement, even when an id is reused.
	pub fn replace_scene(&mut self, scene: MapScene) {
		self.hovered = None;
		self.set_scene(scene);
		self.fit_to_scene();
	}

	pub fn press(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start_x: x,
			start_y: y,
			last_x: x,
			last_y: y,
		};
	}

	/// Pans while pressed, otherwise tracks the hovered marker. Returns true
	/// when the hovered marker changed.
	pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
		if self.pan.active {
			let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
			if (dx * dx + dy * dy).sqrt() > CLICK_TOLERANCE {
				self.pan.moved = true;
			}
			if self.pan.moved {
				self.viewport
					.pan_by(x - self.pan.last_x, y - self.pan.last_y);
				self.dirty = true;
			}
			self.pan.last_x = x;
			self.pan.last_y = y;
			return false;
		}
		let hovered = self
			.scene
			.marker_at(&self.viewport, x, y)
			.map(|m| m.id.clone());
		if hovered == self.hovered {
			return false;
		}
		self.hovered = hovered;
		self.dirty = true;
		true
	}

	/// Ends a press; yields the clicked marker when the pointer barely moved.
	pub fn release(&mut self, x: f64, y: f64) -> Option<String> {
		let was_click = self.pan.active && !self.pan.moved;
		self.pan = PanState::default();
		if !was_click {
			return None;
		}
		self.scene
			.marker_at(&self.viewport, x, y)
			.map(|m| m.id.clone())
	}

	pub fn leave(&mut self) {
		self.pan = PanState::default();
		self.hovered = None;
	}

	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
		let step = if delta_y > 0.0 { -0.5 } else { 0.5 };
		let zoom = (self.viewport.zoom + step).clamp(self.options.min_zoom, self.options.max_zoom);
		if zoom != self.viewport.zoom {
			self.viewport.zoom_at(x, y, zoom);
			self.dirty = true;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport.resize(width, height);
		self.dirty = true;
	}
}
