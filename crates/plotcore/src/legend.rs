//! The legend box: series labels with a swatch, anchored in a plot corner.

use plotmath::{screen_point, ScreenRect};

use crate::render::{FontId, HAlign, LineJoin, RenderContext, Stroke, VAlign};
use crate::series::{LegendEntry, LegendSwatch};
use crate::Color32;

/// Where on the plot area the legend is anchored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Corner {
    LeftTop,
    #[default]
    RightTop,
    LeftBottom,
    RightBottom,
}

/// Legend configuration and layout.
#[derive(Clone, Debug)]
pub struct Legend {
    pub position: Corner,
    /// Distance from the plot-area edge.
    pub margin: f32,
    /// Inner padding between the border and the entries.
    pub padding: f32,
    pub entry_spacing: f32,
    pub swatch_width: f32,
    pub font: FontId,
    pub text_color: Color32,
    pub background: Option<Color32>,
    pub border: Stroke,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            position: Corner::RightTop,
            margin: 8.0,
            padding: 6.0,
            entry_spacing: 4.0,
            swatch_width: 18.0,
            font: FontId::default(),
            text_color: Color32::BLACK,
            background: Some(Color32::from_rgba_unmultiplied(255, 255, 255, 224)),
            border: Stroke::new(1.0, Color32::GRAY),
        }
    }
}

impl Legend {
    pub fn new(position: Corner) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// The size of the legend box for these entries, via text measurement.
    pub fn measure(&self, rc: &dyn RenderContext, entries: &[LegendEntry]) -> (f32, f32) {
        if entries.is_empty() {
            return (0.0, 0.0);
        }
        let mut max_label = 0.0_f32;
        let mut height = self.padding * 2.0;
        for (i, entry) in entries.iter().enumerate() {
            let metrics = rc.measure_text(&entry.label, &self.font);
            max_label = max_label.max(metrics.width);
            height += metrics.height;
            if i + 1 < entries.len() {
                height += self.entry_spacing;
            }
        }
        let width = self.padding * 2.0 + self.swatch_width + self.padding + max_label;
        (width, height)
    }

    /// Draw the legend for these entries inside `area`.
    pub fn render(&self, rc: &mut dyn RenderContext, entries: &[LegendEntry], area: ScreenRect) {
        if entries.is_empty() {
            return;
        }
        let (width, height) = self.measure(rc, entries);
        let rect = self.anchor_rect(area, width, height);

        if self.background.is_some() || !self.border.is_empty() {
            rc.draw_rect(rect, self.background, self.border);
        }

        let row_height = self.font.size * 1.2;
        let mut y = rect.min.y + self.padding;
        for entry in entries {
            let row_center = y + row_height * 0.5;
            let swatch_left = rect.min.x + self.padding;
            self.draw_swatch(rc, &entry.swatch, swatch_left, row_center);
            rc.draw_text(
                screen_point(swatch_left + self.swatch_width + self.padding, row_center),
                &entry.label,
                self.text_color,
                &self.font,
                0.0,
                HAlign::Left,
                VAlign::Center,
                None,
            );
            y += row_height + self.entry_spacing;
        }
    }

    fn draw_swatch(&self, rc: &mut dyn RenderContext, swatch: &LegendSwatch, left: f32, cy: f32) {
        match swatch {
            LegendSwatch::Line { stroke, style } => {
                let dash = style.dash_pattern(stroke.width);
                rc.draw_line(
                    &[
                        screen_point(left, cy),
                        screen_point(left + self.swatch_width, cy),
                    ],
                    *stroke,
                    dash.as_deref(),
                    LineJoin::Miter,
                    true,
                );
            }
            LegendSwatch::Marker(marker) => {
                rc.draw_ellipse(
                    screen_point(left + self.swatch_width * 0.5, cy),
                    marker.size,
                    marker.size,
                    Some(marker.fill),
                    marker.stroke,
                );
            }
            LegendSwatch::FilledBox(fill) => {
                let half = self.font.size * 0.4;
                rc.draw_rect(
                    ScreenRect::new(
                        screen_point(left, cy - half),
                        screen_point(left + self.swatch_width, cy + half),
                    ),
                    Some(*fill),
                    Stroke::NONE,
                );
            }
        }
    }

    fn anchor_rect(&self, area: ScreenRect, width: f32, height: f32) -> ScreenRect {
        let left = match self.position {
            Corner::LeftTop | Corner::LeftBottom => area.min.x + self.margin,
            Corner::RightTop | Corner::RightBottom => area.max.x - self.margin - width,
        };
        let top = match self.position {
            Corner::LeftTop | Corner::RightTop => area.min.y + self.margin,
            Corner::LeftBottom | Corner::RightBottom => area.max.y - self.margin - height,
        };
        ScreenRect::from_min_size(screen_point(left, top), width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{Primitive, RecordingContext};
    use crate::render::LineStyle;

    fn entries() -> Vec<LegendEntry> {
        vec![
            LegendEntry {
                label: "first".to_owned(),
                swatch: LegendSwatch::Line {
                    stroke: Stroke::new(2.0, Color32::RED),
                    style: LineStyle::Solid,
                },
            },
            LegendEntry {
                label: "second series".to_owned(),
                swatch: LegendSwatch::FilledBox(Color32::BLUE),
            },
        ]
    }

    #[test]
    fn measures_widest_label() {
        let rc = RecordingContext::new();
        let legend = Legend::default();
        let (w1, _) = legend.measure(&rc, &entries()[..1]);
        let (w2, h2) = legend.measure(&rc, &entries());
        assert!(w2 > w1, "wider label must widen the box");
        assert!(h2 > 0.0);
    }

    #[test]
    fn stays_inside_the_plot_area() {
        let area = ScreenRect::from_min_size(screen_point(0.0, 0.0), 300.0, 200.0);
        for position in [
            Corner::LeftTop,
            Corner::RightTop,
            Corner::LeftBottom,
            Corner::RightBottom,
        ] {
            let legend = Legend::new(position);
            let mut rc = RecordingContext::new();
            legend.render(&mut rc, &entries(), area);
            let background = rc
                .primitives()
                .iter()
                .find_map(|p| match p {
                    Primitive::Rect { rect, .. } => Some(*rect),
                    _ => None,
                })
                .unwrap();
            assert!(area.contains(background.min), "{position:?}");
            assert!(area.contains(background.max), "{position:?}");
        }
    }

    #[test]
    fn one_swatch_and_label_per_entry() {
        let area = ScreenRect::from_min_size(screen_point(0.0, 0.0), 300.0, 200.0);
        let legend = Legend::default();
        let mut rc = RecordingContext::new();
        legend.render(&mut rc, &entries(), area);
        assert_eq!(rc.texts().count(), 2);
        assert_eq!(rc.lines().count(), 1); // the line swatch
    }
}
