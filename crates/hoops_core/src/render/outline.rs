//! Half-court line drawing from [`CourtGeometry`].

use image::Rgb;

use super::canvas::Canvas;
use crate::court::CourtGeometry;

/// Draw every court marking onto `canvas`.
pub fn draw_court(canvas: &mut Canvas, geometry: &CourtGeometry, outer_lines: bool, color: Rgb<u8>) {
    let g = geometry;

    // Hoop and backboard
    canvas.circle((0.0, 0.0), g.hoop_radius, color);
    canvas.line(
        (-g.backboard_half_width, g.backboard_offset),
        (g.backboard_half_width, g.backboard_offset),
        color,
    );

    // Paint: outer and inner boxes from the baseline to the free-throw line
    let paint_height = g.paint_depth - g.baseline_y;
    canvas.rect(
        (-g.paint_outer_half_width, g.baseline_y),
        2.0 * g.paint_outer_half_width,
        paint_height,
        color,
    );
    canvas.rect(
        (-g.paint_inner_half_width, g.baseline_y),
        2.0 * g.paint_inner_half_width,
        paint_height,
        color,
    );

    // Free-throw circle, dashed inside the paint
    let free_throw = (0.0, g.paint_depth);
    canvas.arc(free_throw, g.free_throw_circle_radius, 0.0, 180.0, color, false);
    canvas.arc(free_throw, g.free_throw_circle_radius, 180.0, 360.0, color, true);

    canvas.arc((0.0, 0.0), g.restricted_radius, 0.0, 180.0, color, false);

    // Three-point line: corner segments up to where they meet the arc
    let break_y = g.arc_break_y();
    canvas.line((-g.corner_three_x, g.baseline_y), (-g.corner_three_x, break_y), color);
    canvas.line((g.corner_three_x, g.baseline_y), (g.corner_three_x, break_y), color);
    let arc_start = break_y.atan2(g.corner_three_x).to_degrees();
    canvas.arc((0.0, 0.0), g.three_point_radius, arc_start, 180.0 - arc_start, color, false);

    // Center circles at half court
    let center = (0.0, g.half_court_y);
    canvas.arc(center, g.center_circle_outer_radius, 180.0, 360.0, color, false);
    canvas.arc(center, g.center_circle_inner_radius, 180.0, 360.0, color, false);

    if outer_lines {
        // The far edges sit exactly on the image border; pull them in a pixel.
        let inset = 1.0 / canvas.scale();
        canvas.rect(
            (-g.sideline_x, g.baseline_y + inset),
            g.width() - inset,
            g.length() - inset,
            color,
        );
    }
}
