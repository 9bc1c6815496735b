//! Build-time and default settings for the API client and the map.

/// Name of the build-time variable overriding the API host.
pub const API_URL_ENV: &str = "SUPPLY_MAP_API_URL";

/// Where the backend lives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiConfig {
	base_url: String,
}

impl ApiConfig {
	/// Uses `base_url` as the API host; an empty string means same-origin.
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
		Self { base_url }
	}

	/// Reads `SUPPLY_MAP_API_URL` as captured at compile time.
	pub fn from_env() -> Self {
		let cfg = Self::new(option_env!("SUPPLY_MAP_API_URL").unwrap_or_default());
		if cfg.base_url.is_empty() {
			log::info!("{API_URL_ENV} unset, using same-origin API");
		} else {
			log::info!("API host from {API_URL_ENV}: {}", cfg.base_url);
		}
		cfg
	}

	/// The configured host, empty for same-origin.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Joins the base with an absolute API path such as `/api/ports`.
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}
}

/// Viewport and basemap settings for the supply map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
	/// Screen padding kept around fitted data, in pixels.
	pub fit_padding: f64,
	/// Fitting never zooms in further than this.
	pub max_fit_zoom: f64,
	/// `(lat, lon)` shown before any data arrives.
	pub initial_center: (f64, f64),
	/// Zoom shown before any data arrives.
	pub initial_zoom: f64,
	/// Lowest zoom reachable with the wheel.
	pub min_zoom: f64,
	/// Highest zoom reachable with the wheel.
	pub max_zoom: f64,
	/// Raster tile template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
	pub tile_url: String,
	/// Values substituted for `{s}`.
	pub tile_subdomains: Vec<char>,
	/// Credit line drawn in the corner.
	pub attribution: String,
}

impl Default for MapOptions {
	fn default() -> Self {
		Self {
			fit_padding: 40.0,
			max_fit_zoom: 10.0,
			initial_center: (20.0, 0.0),
			initial_zoom: 2.0,
			min_zoom: 1.0,
			max_zoom: 18.0,
			tile_url: "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}.png".into(),
			tile_subdomains: vec!['a', 'b', 'c', 'd'],
			attribution: "© OpenStreetMap contributors © CARTO".into(),
		}
	}
}
