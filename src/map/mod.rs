//! Digital map: fixed site coordinates and the viewport over them

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteKind {
    Factory,
    Warehouse,
    Vehicle,
    Sensor,
}

impl SiteKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Factory => "🏭",
            Self::Warehouse => "🏢",
            Self::Vehicle => "🚛",
            Self::Sensor => "📡",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Factory => "factory",
            Self::Warehouse => "warehouse",
            Self::Vehicle => "vehicle",
            Self::Sensor => "sensor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    Active,
    Maintenance,
    Offline,
}

impl SiteStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Maintenance => "MAINTENANCE",
            Self::Offline => "OFFLINE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSite {
    pub id: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub kind: SiteKind,
    pub status: SiteStatus,
    pub temperature: Option<f64>,
    pub efficiency: Option<f64>,
    pub last_update: &'static str,
}

pub fn default_sites() -> Vec<MapSite> {
    vec![
        MapSite {
            id: "1",
            name: "Manufacturing Plant A",
            lat: 37.7749,
            lng: -122.4194,
            kind: SiteKind::Factory,
            status: SiteStatus::Active,
            temperature: Some(72.0),
            efficiency: Some(94.0),
            last_update: "2 min ago",
        },
        MapSite {
            id: "2",
            name: "Distribution Center B",
            lat: 37.7849,
            lng: -122.4094,
            kind: SiteKind::Warehouse,
            status: SiteStatus::Active,
            temperature: Some(68.0),
            efficiency: Some(87.0),
            last_update: "1 min ago",
        },
        MapSite {
            id: "3",
            name: "Autonomous Vehicle Fleet",
            lat: 37.7649,
            lng: -122.4294,
            kind: SiteKind::Vehicle,
            status: SiteStatus::Active,
            temperature: None,
            efficiency: Some(91.0),
            last_update: "30 sec ago",
        },
        MapSite {
            id: "4",
            name: "IoT Sensor Network",
            lat: 37.7549,
            lng: -122.4394,
            kind: SiteKind::Sensor,
            status: SiteStatus::Maintenance,
            temperature: Some(75.0),
            efficiency: None,
            last_update: "5 min ago",
        },
    ]
}

pub const DEFAULT_CENTER: (f64, f64) = (37.7749, -122.4194);
pub const DEFAULT_ZOOM: u8 = 12;
const MIN_ZOOM: u8 = 8;
const MAX_ZOOM: u8 = 18;

/// Half the visible span in degrees at the default zoom
const BASE_HALF_SPAN: f64 = 0.04;

/// Visible window over the site coordinates, web-map style zoom levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: (f64, f64),
    pub zoom: u8,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapViewport {
    pub fn half_span(&self) -> f64 {
        BASE_HALF_SPAN / 2f64.powi(self.zoom as i32 - DEFAULT_ZOOM as i32)
    }

    /// `[min, max]` longitude bounds, the canvas x axis
    pub fn x_bounds(&self) -> [f64; 2] {
        let h = self.half_span();
        [self.center.1 - h, self.center.1 + h]
    }

    /// `[min, max]` latitude bounds, the canvas y axis
    pub fn y_bounds(&self) -> [f64; 2] {
        let h = self.half_span();
        [self.center.0 - h, self.center.0 + h]
    }

    pub fn contains(&self, site: &MapSite) -> bool {
        let [x0, x1] = self.x_bounds();
        let [y0, y1] = self.y_bounds();
        (x0..=x1).contains(&site.lng) && (y0..=y1).contains(&site.lat)
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Re-center on a site, keeping the zoom level
    pub fn focus(&mut self, site: &MapSite) {
        self.center = (site.lat, site.lng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_shows_every_site() {
        let viewport = MapViewport::default();
        assert!(default_sites().iter().all(|s| viewport.contains(s)));
    }

    #[test]
    fn zoom_halves_span_and_is_bounded() {
        let mut viewport = MapViewport::default();
        viewport.zoom_in();
        assert!((viewport.half_span() - 0.02).abs() < 1e-12);

        for _ in 0..20 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom, 18);
        for _ in 0..20 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom, 8);
    }

    #[test]
    fn zoomed_in_hides_distant_sites() {
        let mut viewport = MapViewport::default();
        for _ in 0..3 {
            viewport.zoom_in();
        }
        let sites = default_sites();
        let visible: Vec<&str> = sites
            .iter()
            .filter(|s| viewport.contains(s))
            .map(|s| s.id)
            .collect();
        assert_eq!(visible, vec!["1"]);
    }

    #[test]
    fn focus_and_reset() {
        let mut viewport = MapViewport::default();
        let sites = default_sites();
        viewport.zoom_in();
        viewport.focus(&sites[3]);
        assert_eq!(viewport.center, (37.7549, -122.4394));
        viewport.reset();
        assert_eq!(viewport, MapViewport::default());
    }
}
