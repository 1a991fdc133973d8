// src/debug/visualization/svg.rs
use crate::erosion::ColliderPathSet;
use crate::math::{error::*, types::Bounds2D};
use bevy::log::info;
use bevy::math::Vec2;
use svg::{Document, Node};
use svg::node::element::{Circle, Path as SvgPath, Rectangle, Style, path::Data};

/// Pixelgröße der längeren Seite einer exportierten Datei
pub const DEFAULT_SVG_PIXEL_SIZE: f64 = 800.0;

/// Baut ein SVG-Dokument für Collider-Formen.
///
/// Die y-Achse wird gespiegelt, damit "oben" in der Welt auch im Bild oben liegt.
struct SvgBuilder {
    document: Document,
    stroke_w_normal: f64,
    stroke_w_thin: f64,
    point_radius: f64,
}

impl SvgBuilder {
    /// Erstellt ein Grundgerüst mit Stil und Hintergrund für `display_bounds`.
    fn new(display_bounds: &Bounds2D, svg_pixel_size: f64) -> Self {
        let viewbox_min_x = f64::from(display_bounds.min.x);
        let viewbox_min_y = -f64::from(display_bounds.max.y);
        let viewbox_width = f64::from(display_bounds.width());
        let viewbox_height = f64::from(display_bounds.height());

        let mean_extent = (viewbox_width + viewbox_height) / 2.0;
        let stroke_w_normal = mean_extent * 0.005;
        let stroke_w_thin = mean_extent * 0.002;
        let point_radius = mean_extent * 0.004;

        let aspect = if viewbox_width > 0.0 {
            viewbox_height / viewbox_width
        } else {
            1.0
        };
        let style = Style::new(format!(
            "
    .background {{ fill: #f0f0f0; }}
    .display-bounds {{ fill: none; stroke: #cccccc; stroke-width: {stroke_w_thin}; stroke-dasharray: 5,5; }}
    .collider {{ fill: rgba(200, 150, 255, 0.7); stroke: #5500aa; stroke-width: {stroke_w_normal}; }}
    .vertex {{ fill: #aaccff; stroke: #0000cc; stroke-width: {stroke_w_thin}; }}
"
        ));

        let document = Document::new()
            .set("width", svg_pixel_size)
            .set("height", svg_pixel_size * aspect)
            .set(
                "viewBox",
                (viewbox_min_x, viewbox_min_y, viewbox_width, viewbox_height),
            )
            .add(style)
            .add(
                Rectangle::new()
                    .set("x", viewbox_min_x)
                    .set("y", viewbox_min_y)
                    .set("width", viewbox_width)
                    .set("height", viewbox_height)
                    .set("class", "background"),
            );

        Self {
            document,
            stroke_w_normal,
            stroke_w_thin,
            point_radius,
        }
    }

    fn flip(point: Vec2) -> (f64, f64) {
        (f64::from(point.x), -f64::from(point.y))
    }

    /// Alle Ringe als ein einziges `<path>` mit Gerade-Ungerade-Füllung,
    /// damit Löcher ausgespart werden.
    fn draw_paths(&mut self, rings: &[&[Vec2]], class: &str) {
        let mut data = Data::new();
        for ring in rings.iter().filter(|ring| ring.len() >= 3) {
            data = data.move_to(Self::flip(ring[0]));
            for vertex in &ring[1..] {
                data = data.line_to(Self::flip(*vertex));
            }
            data = data.close();
        }
        self.add(
            SvgPath::new()
                .set("d", data)
                .set("fill-rule", "evenodd")
                .set("class", class),
        );
    }

    fn draw_circle(&mut self, center: Vec2, radius: f64, class: &str) {
        let (cx, cy) = Self::flip(center);
        self.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", radius)
                .set("class", class),
        );
    }

    fn draw_rect(&mut self, bounds: &Bounds2D, class: &str) {
        let (x, y) = Self::flip(Vec2::new(bounds.min.x, bounds.max.y));
        self.add(
            Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("stroke-width", self.stroke_w_thin)
                .set("class", class),
        );
    }

    fn add<N: Into<Box<dyn Node>>>(&mut self, node: N) {
        self.document.append(node);
    }

    fn finish(self) -> Document {
        self.document
    }
}

/// Erstellt ein SVG-Dokument der aktuellen Form.
///
/// # Arguments
/// * `paths` - Die zu zeichnende Form in lokalen Koordinaten.
/// * `svg_pixel_size` - Breite der Grafik in Pixeln.
/// * `show_vertices` - Markiert zusätzlich jeden Eckpunkt.
pub fn collider_svg_document(
    paths: &ColliderPathSet,
    svg_pixel_size: f64,
    show_vertices: bool,
) -> Document {
    let shape_bounds = paths.bounds();
    let display_bounds = if shape_bounds.is_empty() {
        Bounds2D::from_points(Vec2::splat(-1.0), Vec2::splat(1.0))
    } else {
        let margin = shape_bounds.width().max(shape_bounds.height()) * 0.05;
        shape_bounds.expand(margin.max(f32::EPSILON))
    };

    let mut svg = SvgBuilder::new(&display_bounds, svg_pixel_size);
    svg.draw_rect(&display_bounds, "display-bounds");

    let rings: Vec<&[Vec2]> = paths.paths().iter().map(|path| path.vertices()).collect();
    svg.draw_paths(&rings, "collider");

    if show_vertices {
        let radius = svg.point_radius.min(svg.stroke_w_normal * 2.0);
        for vertex in rings.iter().flat_map(|ring| ring.iter()) {
            svg.draw_circle(*vertex, radius, "vertex");
        }
    }

    svg.finish()
}

/// Schreibt die aktuelle Form als SVG-Datei.
pub fn export_collider_svg(
    filename: &str,
    paths: &ColliderPathSet,
    show_vertices: bool,
) -> ErosionResult<()> {
    let document = collider_svg_document(paths, DEFAULT_SVG_PIXEL_SIZE, show_vertices);
    svg::save(filename, &document)?;
    info!(
        "Collider SVG '{}' written ({} paths, {} vertices).",
        filename,
        paths.len(),
        paths.vertex_count()
    );
    Ok(())
}
