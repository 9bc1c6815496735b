use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 256.0;
const MAX_LAT: f64 = 85.051_128_779_806_59;

/// Web Mercator, normalized so the whole world spans `0.0..1.0` on both axes.
pub fn project(lat: f64, lon: f64) -> (f64, f64) {
	let phi = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
	let x = (lon + 180.0) / 360.0;
	let y = (1.0 - (phi.tan() + 1.0 / phi.cos()).ln() / PI) / 2.0;
	(x, y)
}

pub fn unproject(x: f64, y: f64) -> (f64, f64) {
	let lon = x * 360.0 - 180.0;
	let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
	(lat, lon)
}

pub fn world_size(zoom: f64) -> f64 {
	TILE_SIZE * zoom.exp2()
}

/// Smallest lat/lon box holding a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
	pub south: f64,
	pub west: f64,
	pub north: f64,
	pub east: f64,
}

impl GeoBounds {
	pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points.into_iter().fold(None, |acc, (lat, lon)| {
			Some(match acc {
				None => GeoBounds {
					south: lat,
					west: lon,
					north: lat,
					east: lon,
				},
				Some(b) => GeoBounds {
					south: b.south.min(lat),
					west: b.west.min(lon),
					north: b.north.max(lat),
					east: b.east.max(lon),
				},
			})
		})
	}
}

/// Screen window onto the projected world.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	/// Center in normalized world coordinates.
	pub center: (f64, f64),
	pub zoom: f64,
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub fn new(center: (f64, f64), zoom: f64, width: f64, height: f64) -> Self {
		Self {
			center: project(center.0, center.1),
			zoom,
			width,
			height,
		}
	}

	/// Screen position of the world's top-left corner.
	pub fn origin(&self) -> (f64, f64) {
		let ws = world_size(self.zoom);
		(
			self.width / 2.0 - self.center.0 * ws,
			self.height / 2.0 - self.center.1 * ws,
		)
	}

	pub fn to_screen(&self, lat: f64, lon: f64) -> (f64, f64) {
		let (x, y) = project(lat, lon);
		let ws = world_size(self.zoom);
		let (ox, oy) = self.origin();
		(ox + x * ws, oy + y * ws)
	}

	pub fn to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		let ws = world_size(self.zoom);
		let (ox, oy) = self.origin();
		((sx - ox) / ws, (sy - oy) / ws)
	}

	pub fn center_latlon(&self) -> (f64, f64) {
		unproject(self.center.0, self.center.1)
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		let ws = world_size(self.zoom);
		self.center.0 -= dx / ws;
		self.center.1 = (self.center.1 - dy / ws).clamp(0.0, 1.0);
	}

	/// Zooms keeping the world point under `(sx, sy)` fixed on screen.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, zoom: f64) {
		let (wx, wy) = self.to_world(sx, sy);
		self.zoom = zoom;
		let ws = world_size(zoom);
		self.center = (
			wx - (sx - self.width / 2.0) / ws,
			wy - (sy - self.height / 2.0) / ws,
		);
	}

	/// Centers on `bounds` at the largest whole zoom where the box fits inside
	/// the padded viewport, never beyond `max_zoom`.
	pub fn fit(&mut self, bounds: &GeoBounds, padding: f64, max_zoom: f64) {
		let (x0, y0) = project(bounds.north, bounds.west);
		let (x1, y1) = project(bounds.south, bounds.east);
		let avail_w = (self.width - 2.0 * padding).max(1.0);
		let avail_h = (self.height - 2.0 * padding).max(1.0);

		let fit_axis = |span: f64, avail: f64| {
			if span <= f64::EPSILON {
				f64::INFINITY
			} else {
				(avail / (span * TILE_SIZE)).log2()
			}
		};
		let zoom = fit_axis(x1 - x0, avail_w)
			.min(fit_axis(y1 - y0, avail_h))
			.floor()
			.clamp(0.0, max_zoom);

		self.center = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
		self.zoom = zoom;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn projection_inverts() {
		for (lat, lon) in [(0.0, 0.0), (51.5, -0.12), (-33.9, 151.2), (35.7, 139.7)] {
			let (x, y) = project(lat, lon);
			let (lat2, lon2) = unproject(x, y);
			assert!(approx(lat, lat2) && approx(lon, lon2), "{lat},{lon}");
		}
		assert_eq!(project(0.0, 0.0), (0.5, 0.5));
	}

	#[test]
	fn bounds_are_exact_extremes() {
		let b = GeoBounds::from_points([(10.0, -5.0), (-20.5, 30.0), (3.0, 100.25)]).unwrap();
		assert_eq!(
			b,
			GeoBounds {
				south: -20.5,
				west: -5.0,
				north: 10.0,
				east: 100.25,
			}
		);
		assert_eq!(GeoBounds::from_points([]), None);
	}

	#[test]
	fn fit_keeps_every_point_inside_padding() {
		let pts = [(31.2, 121.5), (22.3, 114.2), (1.29, 103.85), (35.7, 139.7)];
		let b = GeoBounds::from_points(pts).unwrap();
		let mut vp = Viewport::new((20.0, 0.0), 2.0, 800.0, 600.0);
		vp.fit(&b, 40.0, 10.0);
		assert_eq!(vp.zoom.fract(), 0.0);
		for (lat, lon) in pts {
			let (sx, sy) = vp.to_screen(lat, lon);
			assert!((40.0 - 1e-6..=760.0 + 1e-6).contains(&sx), "x {sx}");
			assert!((40.0 - 1e-6..=560.0 + 1e-6).contains(&sy), "y {sy}");
		}
		// One more zoom level would overflow the padded area.
		let mut tighter = vp.clone();
		tighter.zoom += 1.0;
		let xs: Vec<f64> = pts.iter().map(|&(la, lo)| tighter.to_screen(la, lo).0).collect();
		let ys: Vec<f64> = pts.iter().map(|&(la, lo)| tighter.to_screen(la, lo).1).collect();
		let span = |v: &[f64]| v.iter().cloned().fold(f64::MIN, f64::max) - v.iter().cloned().fold(f64::MAX, f64::min);
		assert!(span(&xs) > 720.0 || span(&ys) > 520.0);
	}

	#[test]
	fn single_point_fits_at_max_zoom() {
		let b = GeoBounds::from_points([(48.85, 2.35)]).unwrap();
		let mut vp = Viewport::new((20.0, 0.0), 2.0, 800.0, 600.0);
		vp.fit(&b, 40.0, 10.0);
		assert_eq!(vp.zoom, 10.0);
		let (sx, sy) = vp.to_screen(48.85, 2.35);
		assert!(approx(sx, 400.0) && approx(sy, 300.0));
	}

	#[test]
	fn zoom_at_keeps_cursor_anchor() {
		let mut vp = Viewport::new((0.0, 0.0), 3.0, 800.0, 600.0);
		let before = vp.to_world(120.0, 80.0);
		vp.zoom_at(120.0, 80.0, 4.5);
		let after = vp.to_world(120.0, 80.0);
		assert!(approx(before.0, after.0) && approx(before.1, after.1));
	}
}
