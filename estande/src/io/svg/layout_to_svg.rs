use log::{debug, warn};
use svg::Document;
use svg::node::element::{Group, Line, Title};
use thiserror::Error;

use crate::entities::{Layout, ZoneCatalog};
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Label written next to the entrance marker
pub const ENTRANCE_LABEL: &str = "ENTRADA";

const LEGEND_ROW_PX: f64 = 20.0;
const LEGEND_SWATCH_PX: f64 = 14.0;
const FONT_FAMILY: &str = "Arial, sans-serif";

/// Reasons why a layout cannot be drawn
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("{element} has non-finite geometry")]
    NonFiniteGeometry { element: String },
    #[error("{element} has a negative extent ({width} x {depth})")]
    NegativeExtent {
        element: String,
        width: f64,
        depth: f64,
    },
    #[error("invalid draw options: {0}")]
    InvalidOptions(String),
}

/// Renders a layout to a complete SVG file.
/// Never fails: if the layout cannot be drawn, a placeholder showing the error is returned instead.
pub fn render_layout(
    layout: &Layout,
    catalog: &ZoneCatalog,
    options: &SvgDrawOptions,
    title: &str,
) -> String {
    let document = match layout_to_svg(layout, catalog, options, title) {
        Ok(document) => document,
        Err(err) => {
            warn!("[SVG] rendering failed, drawing placeholder instead: {err}");
            fallback_svg(&err.to_string())
        }
    };
    format!("{XML_DECLARATION}\n{document}")
}

/// Draws the stand, corridors, zones, entrances, dimensions, a summary line and a legend.
/// The front edge of the stand (`y = 0`) is drawn at the bottom.
pub fn layout_to_svg(
    layout: &Layout,
    catalog: &ZoneCatalog,
    options: &SvgDrawOptions,
    title: &str,
) -> Result<Document, RenderError> {
    check_renderable(layout, options)?;

    let theme = &options.theme;
    let stand = layout.stand();
    let (width, depth) = (stand.width(), stand.depth());
    let scale = options.scale(width, depth);
    let margin = options.margin_px;
    let stroke_width = theme.stroke_width as f64;

    //stand coordinates of a rectangle to its top left corner on the canvas
    let to_canvas = |x: f64, y: f64, rect_depth: f64| -> (f64, f64) {
        (margin + x * scale, margin + (depth - y - rect_depth) * scale)
    };

    let kinds = layout.distinct_kinds();
    let legend_height = match options.legend && !kinds.is_empty() {
        true => LEGEND_ROW_PX * kinds.len() as f64 + LEGEND_ROW_PX / 2.0,
        false => 0.0,
    };
    let canvas_width = width * scale + 2.0 * margin;
    let canvas_height = depth * scale + 2.0 * margin + legend_height;

    debug!(
        "[SVG] drawing {:.2} x {:.2} m stand at {scale:.2} px/m on a {canvas_width:.0} x {canvas_height:.0} px canvas",
        width, depth
    );

    let background = svg_util::rect(
        0.0,
        0.0,
        canvas_width,
        canvas_height,
        &[("fill", &*theme.background_fill.to_string())],
    );

    let stand_group = {
        let (x, y) = to_canvas(0.0, 0.0, depth);
        Group::new()
            .set("id", "stand")
            .add(svg_util::rect(
                x,
                y,
                width * scale,
                depth * scale,
                &[
                    ("fill", &*theme.stand_fill.to_string()),
                    ("stroke", &*theme.stand_stroke.to_string()),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(Title::new(format!(
                "stand, {width:.2} x {depth:.2} m, area: {:.2} m²",
                stand.area_total()
            )))
    };

    let circulation_group = layout.circulation().iter().fold(
        Group::new().set("id", "circulation"),
        |group, corridor| {
            let (x, y) = to_canvas(corridor.x, corridor.y, corridor.depth);
            let color = corridor.color;
            group.add(
                svg_util::rect(
                    x,
                    y,
                    corridor.width * scale,
                    corridor.depth * scale,
                    &[
                        ("fill", &*color.to_string()),
                        ("fill-opacity", &*format!("{}", theme.circulation_opacity)),
                        ("stroke", &*svg_util::change_brightness(color, 0.7).to_string()),
                        ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
                        ("stroke-dasharray", "4 4"),
                    ],
                )
                .add(Title::new(format!(
                    "{}, {:.2} x {:.2} m",
                    corridor.kind, corridor.width, corridor.depth
                ))),
            )
        },
    );

    let zones_group = {
        let (min_label_w, min_label_h) = options.min_label_size;
        let mut zones_group = Group::new().set("id", "zones");
        for zone in layout.placed_zones() {
            let (x, y) = to_canvas(zone.x, zone.y, zone.depth);
            let (w_px, h_px) = (zone.width * scale, zone.depth * scale);
            let title = Title::new(format!(
                "{}, kind: {}, [x: {:.2}, y: {:.2}, width: {:.2}, depth: {:.2}], area: {:.2} m², priority: {}",
                zone.display_name, zone.kind, zone.x, zone.y, zone.width, zone.depth, zone.area, zone.priority
            ));
            let mut zone_group = Group::new().add(
                svg_util::rect(
                    x,
                    y,
                    w_px,
                    h_px,
                    &[
                        ("fill", &*zone.color.to_string()),
                        ("fill-opacity", &*format!("{}", theme.zone_opacity)),
                        ("stroke", &*theme.zone_stroke.to_string()),
                        ("stroke-width", &*format!("{stroke_width}")),
                    ],
                )
                .add(title),
            );
            if w_px >= min_label_w && h_px >= min_label_h {
                let (cx, cy) = (x + w_px / 2.0, y + h_px / 2.0);
                let text_style = [
                    ("text-anchor", "middle"),
                    ("font-family", FONT_FAMILY),
                    ("fill", &*theme.text_color.to_string()),
                ];
                zone_group = zone_group
                    .add(
                        svg_util::text(zone.display_name.clone(), cx, cy - 3.0, &text_style)
                            .set("font-size", 11)
                            .set("font-weight", "bold"),
                    )
                    .add(
                        svg_util::text(format!("{:.2} m²", zone.area), cx, cy + 11.0, &text_style)
                            .set("font-size", 10),
                    );
            }
            zones_group = zones_group.add(zone_group);
        }
        zones_group
    };

    let entrance_group = {
        let mut entrance_group = Group::new().set("id", "entrances");
        let color = theme.entrance_color.to_string();
        for entrance in layout.entrances() {
            let (x1, y1) = to_canvas(entrance.x, entrance.y, 0.0);
            let x2 = x1 + entrance.width * scale;
            entrance_group = entrance_group
                .add(
                    Line::new()
                        .set("x1", x1)
                        .set("y1", y1)
                        .set("x2", x2)
                        .set("y2", y1)
                        .set("stroke", &*color)
                        .set("stroke-width", 3.0 * stroke_width)
                        .add(Title::new(format!(
                            "entrance, x: {:.2}, width: {:.2}",
                            entrance.x, entrance.width
                        ))),
                )
                .add(
                    svg_util::text(
                        ENTRANCE_LABEL,
                        (x1 + x2) / 2.0,
                        y1 + 16.0,
                        &[
                            ("text-anchor", "middle"),
                            ("font-family", FONT_FAMILY),
                            ("fill", &*color),
                        ],
                    )
                    .set("font-size", 11)
                    .set("font-weight", "bold"),
                );
        }
        entrance_group
    };

    let annotation_group = {
        let text_color = theme.text_color.to_string();
        let mut summary = format!(
            "Área total: {:.2} m² | Área ocupada: {:.2} m² ({:.1}%)",
            stand.area_total(),
            layout.used_area(),
            layout.occupancy_pct()
        );
        if !layout.dropped_zones().is_empty() {
            summary.push_str(&format!(
                " | Não posicionadas: {}",
                layout.dropped_zones().len()
            ));
        }
        if !title.is_empty() {
            summary = format!("{title} | {summary}");
        }
        let mut group = Group::new().set("id", "annotations").add(
            svg_util::text(
                summary,
                margin,
                20.0,
                &[("font-family", FONT_FAMILY), ("fill", &*text_color)],
            )
            .set("font-size", 12),
        );
        if options.dimensions {
            let style = [
                ("text-anchor", "middle"),
                ("font-family", FONT_FAMILY),
                ("fill", &*text_color),
            ];
            let (x_mid, y_mid) = (margin + width * scale / 2.0, margin + depth * scale / 2.0);
            group = group
                .add(
                    svg_util::text(format!("{width:.2} m"), x_mid, margin - 8.0, &style)
                        .set("font-size", 11),
                )
                .add(
                    svg_util::text(format!("{depth:.2} m"), margin - 12.0, y_mid, &style)
                        .set("font-size", 11)
                        .set("transform", format!("rotate(-90 {} {})", margin - 12.0, y_mid)),
                );
        }
        group
    };

    let legend_group = match options.legend {
        false => None,
        true => {
            let y_start = depth * scale + 2.0 * margin;
            let group = kinds.iter().enumerate().fold(
                Group::new().set("id", "legend"),
                |group, (i, kind)| {
                    let y = y_start + i as f64 * LEGEND_ROW_PX;
                    group
                        .add(svg_util::rect(
                            margin,
                            y,
                            LEGEND_SWATCH_PX,
                            LEGEND_SWATCH_PX,
                            &[
                                ("fill", &*catalog.color(kind).to_string()),
                                ("stroke", &*theme.zone_stroke.to_string()),
                            ],
                        ))
                        .add(
                            svg_util::text(
                                catalog.display_name(kind),
                                margin + LEGEND_SWATCH_PX + 6.0,
                                y + LEGEND_SWATCH_PX - 3.0,
                                &[
                                    ("font-family", FONT_FAMILY),
                                    ("fill", &*theme.text_color.to_string()),
                                ],
                            )
                            .set("font-size", 11),
                        )
                },
            );
            Some(group)
        }
    };

    let document = Document::new()
        .set("width", canvas_width)
        .set("height", canvas_height)
        .set("viewBox", (0.0, 0.0, canvas_width, canvas_height))
        .add(background)
        .add(stand_group)
        .add(circulation_group)
        .add(zones_group)
        .add(entrance_group)
        .add(annotation_group);

    Ok(match legend_group {
        Some(legend_group) => document.add(legend_group),
        None => document,
    })
}

/// Minimal document showing an error message in place of a floor plan
pub fn fallback_svg(message: &str) -> Document {
    Document::new()
        .set("width", 400)
        .set("height", 120)
        .set("viewBox", (0, 0, 400, 120))
        .add(svg_util::rect(
            0.0,
            0.0,
            400.0,
            120.0,
            &[("fill", "#FFEBEE"), ("stroke", "#C62828")],
        ))
        .add(
            svg_util::text(
                "Erro ao gerar planta baixa",
                20.0,
                45.0,
                &[("font-family", FONT_FAMILY), ("fill", "#C62828")],
            )
            .set("font-size", 16)
            .set("font-weight", "bold"),
        )
        .add(
            svg_util::text(
                message,
                20.0,
                75.0,
                &[("font-family", FONT_FAMILY), ("fill", "#212121")],
            )
            .set("font-size", 11),
        )
}

fn check_renderable(layout: &Layout, options: &SvgDrawOptions) -> Result<(), RenderError> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(options.canvas_px) || !positive(options.max_scale) {
        return Err(RenderError::InvalidOptions(format!(
            "canvas size ({}) and maximum scale ({}) must be positive",
            options.canvas_px, options.max_scale
        )));
    }
    if !options.margin_px.is_finite() || options.margin_px < 0.0 {
        return Err(RenderError::InvalidOptions(format!(
            "margin must be non-negative, got {}",
            options.margin_px
        )));
    }

    let stand = layout.stand();
    let rects = std::iter::once(("stand".to_string(), 0.0, 0.0, stand.width(), stand.depth()))
        .chain(
            layout
                .placed_zones()
                .iter()
                .map(|z| (z.display_name.clone(), z.x, z.y, z.width, z.depth)),
        )
        .chain(
            layout
                .circulation()
                .iter()
                .map(|c| (c.kind.to_string(), c.x, c.y, c.width, c.depth)),
        )
        .chain(
            layout
                .entrances()
                .iter()
                .map(|e| ("entrance".to_string(), e.x, e.y, e.width, 0.0)),
        );

    for (element, x, y, width, depth) in rects {
        if ![x, y, width, depth].iter().all(|v| v.is_finite()) {
            return Err(RenderError::NonFiniteGeometry { element });
        }
        if width < 0.0 || depth < 0.0 {
            return Err(RenderError::NegativeExtent {
                element,
                width,
                depth,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        CirculationArea, CorridorKind, Entrance, PlacedZone, Priority, StandSpec, ZoneKind,
    };

    fn zone(kind: ZoneKind, name: &str, x: f64, y: f64, width: f64, depth: f64) -> PlacedZone {
        let catalog = ZoneCatalog::default();
        PlacedZone {
            color: catalog.color(&kind),
            kind,
            display_name: name.to_string(),
            x,
            y,
            width,
            depth,
            area: width * depth,
            priority: Priority::Medium,
        }
    }

    fn sample_layout() -> Layout {
        let stand = StandSpec::from_dimensions(11.0, 8.0).unwrap();
        Layout::new(
            stand,
            vec![
                zone(ZoneKind::Exhibition, "Exposição 1", 0.0, 0.0, 4.0, 3.0),
                zone(ZoneKind::Storage, "Depósito 1", 9.5, 6.5, 1.5, 1.5),
                zone(ZoneKind::Exhibition, "Exposição 2", 7.0, 0.0, 4.0, 3.0),
            ],
            vec![CirculationArea::new(
                CorridorKind::HorizontalCorridor,
                0.0,
                3.4,
                11.0,
                1.2,
            )],
            vec![Entrance::centered(&stand)],
            vec![],
        )
    }

    #[test]
    fn renders_complete_document() {
        let catalog = ZoneCatalog::default();
        let svg = render_layout(
            &sample_layout(),
            &catalog,
            &SvgDrawOptions::default(),
            "test",
        );
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Exposição 1"));
        assert!(svg.contains(ENTRANCE_LABEL));
        assert!(svg.contains("11.00 m"));
        assert!(svg.contains("#E3F2FD"));
    }

    #[test]
    fn small_zones_are_not_labelled() {
        let catalog = ZoneCatalog::default();
        //1.5 m at 50 px/m is 75 px: title and label
        let svg = render_layout(&sample_layout(), &catalog, &SvgDrawOptions::default(), "");
        assert_eq!(svg.matches("Depósito 1").count(), 2);

        //at 200/11 px/m the storage zone is only 27 px wide: title only
        let options = SvgDrawOptions {
            canvas_px: 200.0,
            ..SvgDrawOptions::default()
        };
        let svg = render_layout(&sample_layout(), &catalog, &options, "");
        assert_eq!(svg.matches("Depósito 1").count(), 1);
        assert_eq!(svg.matches("Exposição 1").count(), 2);
    }

    #[test]
    fn legend_lists_each_kind_once() {
        let catalog = ZoneCatalog::default();
        let with_legend = SvgDrawOptions::default();
        let without_legend = SvgDrawOptions {
            legend: false,
            ..SvgDrawOptions::default()
        };
        let count = |options: &SvgDrawOptions, name: &str| {
            layout_to_svg(&sample_layout(), &catalog, options, "")
                .unwrap()
                .to_string()
                .matches(name)
                .count()
        };
        for name in ["Exposição", "Depósito"] {
            assert_eq!(count(&with_legend, name), count(&without_legend, name) + 1);
        }
    }

    #[test]
    fn empty_layout_renders() {
        let stand = StandSpec::from_dimensions(5.0, 4.0).unwrap();
        let layout = Layout::new(stand, vec![], vec![], vec![], vec![]);
        let svg = render_layout(
            &layout,
            &ZoneCatalog::default(),
            &SvgDrawOptions::default(),
            "",
        );
        assert!(svg.starts_with("<?xml"));
        assert!(!svg.contains("Erro ao gerar"));
    }

    #[test]
    fn broken_geometry_degrades_to_placeholder() {
        let stand = StandSpec::from_dimensions(5.0, 4.0).unwrap();
        let layout = Layout::new(
            stand,
            vec![zone(ZoneKind::Demo, "Demonstração 1", f64::NAN, 0.0, 2.0, 2.0)],
            vec![],
            vec![],
            vec![],
        );
        let catalog = ZoneCatalog::default();
        let options = SvgDrawOptions::default();
        assert!(matches!(
            layout_to_svg(&layout, &catalog, &options, ""),
            Err(RenderError::NonFiniteGeometry { .. })
        ));
        let svg = render_layout(&layout, &catalog, &options, "");
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("Erro ao gerar planta baixa"));
    }
}
