use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use super::projection::{TILE_SIZE, Viewport};
use crate::config::MapOptions;

const MAX_TILE_ZOOM: f64 = 18.0;

/// One basemap tile and where it lands on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePlacement {
	pub z: u32,
	pub x: u32,
	pub y: u32,
	pub sx: f64,
	pub sy: f64,
	pub size: f64,
}

/// Tiles covering the viewport, fetched at the nearest whole zoom and scaled.
pub fn visible_tiles(viewport: &Viewport) -> Vec<TilePlacement> {
	let z = viewport.zoom.round().clamp(0.0, MAX_TILE_ZOOM);
	let size = TILE_SIZE * (viewport.zoom - z).exp2();
	let n = z.exp2() as i64;
	let (ox, oy) = viewport.origin();

	let first_x = ((0.0 - ox) / size).floor() as i64;
	let last_x = ((viewport.width - ox) / size).ceil() as i64 - 1;
	let first_y = (((0.0 - oy) / size).floor() as i64).max(0);
	let last_y = (((viewport.height - oy) / size).ceil() as i64 - 1).min(n - 1);

	let mut out = Vec::new();
	for ty in first_y..=last_y {
		for tx in first_x..=last_x {
			out.push(TilePlacement {
				z: z as u32,
				x: tx.rem_euclid(n) as u32,
				y: ty as u32,
				sx: ox + tx as f64 * size,
				sy: oy + ty as f64 * size,
				size,
			});
		}
	}
	out
}

pub fn tile_url(options: &MapOptions, tile: &TilePlacement) -> String {
	let sub = if options.tile_subdomains.is_empty() {
		String::new()
	} else {
		let i = (tile.x + tile.y) as usize % options.tile_subdomains.len();
		options.tile_subdomains[i].to_string()
	};
	options
		.tile_url
		.replace("{s}", &sub)
		.replace("{z}", &tile.z.to_string())
		.replace("{x}", &tile.x.to_string())
		.replace("{y}", &tile.y.to_string())
}

/// Basemap images by URL. Finished loads raise `loaded` so the next frame redraws.
pub struct TileCache {
	images: HashMap<String, HtmlImageElement>,
	on_load: Closure<dyn FnMut()>,
	pub loaded: Rc<Cell<bool>>,
}

impl TileCache {
	pub fn new() -> Self {
		let loaded = Rc::new(Cell::new(false));
		let flag = loaded.clone();
		Self {
			images: HashMap::new(),
			on_load: Closure::new(move || flag.set(true)),
			loaded,
		}
	}

	/// The image for `url` once it has finished loading; starts the fetch otherwise.
	pub fn get(&mut self, url: &str) -> Option<&HtmlImageElement> {
		if !self.images.contains_key(url) {
			let Ok(img) = HtmlImageElement::new() else {
				return None;
			};
			img.set_cross_origin(Some("anonymous"));
			img.set_onload(Some(self.on_load.as_ref().unchecked_ref()));
			img.set_src(url);
			log::debug!("loading tile {url}");
			self.images.insert(url.to_owned(), img);
		}
		self.images
			.get(url)
			.filter(|img| img.complete() && img.natural_width() > 0)
	}

	/// Drops every image whose URL is not in `keep`.
	pub fn retain(&mut self, keep: &HashSet<String>) {
		let dropped = retain_keys(&mut self.images, keep);
		if dropped > 0 {
			log::debug!("evicted {dropped} off-screen tiles");
		}
	}
}

/// Removes entries whose key is not in `keep`, returning how many went.
pub fn retain_keys<V>(map: &mut HashMap<String, V>, keep: &HashSet<String>) -> usize {
	let before = map.len();
	map.retain(|k, _| keep.contains(k));
	before - map.len()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn world_at_zoom_one_is_four_tiles() {
		let vp = Viewport::new((0.0, 0.0), 1.0, 512.0, 512.0);
		let tiles = visible_tiles(&vp);
		assert_eq!(tiles.len(), 4);
		assert!(tiles.iter().all(|t| t.z == 1 && t.size == 256.0));
		assert_eq!((tiles[0].sx, tiles[0].sy), (0.0, 0.0));
	}

	#[test]
	fn columns_wrap_and_rows_stay_in_range() {
		let vp = Viewport::new((0.0, 0.0), 1.0, 1200.0, 900.0);
		let tiles = visible_tiles(&vp);
		assert!(tiles.iter().all(|t| t.x < 2 && t.y < 2));
		assert!(tiles.len() > 4);
	}

	#[test]
	fn fractional_zoom_scales_tiles() {
		let vp = Viewport::new((20.0, 0.0), 2.4, 800.0, 600.0);
		let t = visible_tiles(&vp)[0];
		assert_eq!(t.z, 2);
		assert!((t.size - 256.0 * 0.4f64.exp2()).abs() < 1e-9);
	}

	#[test]
	fn retain_keys_drops_off_screen_entries() {
		let mut map: HashMap<String, u32> = ["a", "b", "c"]
			.into_iter()
			.enumerate()
			.map(|(i, k)| (k.to_string(), i as u32))
			.collect();
		let keep: HashSet<String> = ["b", "z"].into_iter().map(String::from).collect();
		assert_eq!(retain_keys(&mut map, &keep), 2);
		assert_eq!(map.len(), 1);
		assert_eq!(map.get("b"), Some(&1));
		assert_eq!(retain_keys(&mut map, &keep), 0);
	}

	#[test]
	fn pruned_cache_is_bounded_by_the_view() {
		let opts = MapOptions::default();
		let mut map: HashMap<String, ()> = HashMap::new();
		for zoom in [3.0, 6.0, 10.0, 14.0] {
			let vp = Viewport::new((51.9, 4.4), zoom, 800.0, 600.0);
			let keep: HashSet<String> =
				visible_tiles(&vp).iter().map(|t| tile_url(&opts, t)).collect();
			map.extend(keep.iter().map(|u| (u.clone(), ())));
			retain_keys(&mut map, &keep);
			assert_eq!(map.len(), keep.len());
		}
	}

	#[test]
	fn url_template_is_filled() {
		let opts = MapOptions::default();
		let t = TilePlacement {
			z: 3,
			x: 5,
			y: 2,
			sx: 0.0,
			sy: 0.0,
			size: 256.0,
		};
		assert_eq!(
			tile_url(&opts, &t),
			"https://d.basemaps.cartocdn.com/light_all/3/5/2.png"
		);
	}
}
