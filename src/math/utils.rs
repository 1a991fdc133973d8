// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const PI: f32 = std::f32::consts::PI;

    /// Standard-Skalierung des Festkomma-Gitters (1 Welteinheit = 1000 Gitterschritte)
    pub const DEFAULT_FIXED_POINT_SCALE: f64 = 1000.0;
    /// Standard-Pinselradius in Welteinheiten
    pub const DEFAULT_BRUSH_RADIUS: f32 = 0.5;
    /// Standard-Eckenzahl des Kreis-Polygons
    pub const DEFAULT_BRUSH_RESOLUTION: usize = 20;
    /// Maximaler Stempelabstand relativ zum Radius
    pub const DEFAULT_STAMP_SPACING: f32 = 0.5;
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::PI;

    /// Konvertiert Grad zu Radiant
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * PI / 180.0
    }
}

/// Einfache geometrische Hilfsfunktionen
pub mod simple_geometry {
    use bevy::math::Vec2;

    /// Doppelte vorzeichenbehaftete Fläche eines Rings (Shoelace, in f64 akkumuliert)
    pub fn ring_double_area(vertices: &[Vec2]) -> f64 {
        if vertices.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0f64;
        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            sum += f64::from(a.x) * f64::from(b.y) - f64::from(b.x) * f64::from(a.y);
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::math::Vec2;

    #[test]
    fn test_deg_to_rad() {
        assert_relative_eq!(angles::deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(angles::deg_to_rad(90.0), constants::PI / 2.0);
        assert_eq!(angles::deg_to_rad(0.0), 0.0);
    }

    #[test]
    fn test_ring_double_area() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        assert_eq!(simple_geometry::ring_double_area(&square), 32.0);
        assert_eq!(simple_geometry::ring_double_area(&square[..2]), 0.0);
    }
}
