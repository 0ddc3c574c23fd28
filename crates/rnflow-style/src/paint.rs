//! Paint, border and shadow translation.
//!
//! The design tool stacks paints back to front: the last entry is on top.
//! CSS lists layers front to back, so every stack is reversed on the way out.

use rnflow_core::math::round;
use rnflow_core::{
    format_number, ColorStop, CornerRadius, Effect, GradientPaint, Paint, SceneNode, ShadowEffect,
    StrokeWeight, StyleMap,
};

/// CSS for one non-image paint layer. Image layers are resolved by the
/// resolver because they need the design tool.
pub fn paint_layer(paint: &Paint) -> String {
    match paint {
        Paint::Solid(solid) => {
            let color = solid.color.with_alpha(solid.opacity).to_css_string();
            format!("linear-gradient({color}, {color})")
        }
        Paint::GradientLinear(g) => format!("linear-gradient({})", gradient_stops(g)),
        Paint::GradientRadial(g) => format!("radial-gradient({})", gradient_stops(g)),
        Paint::GradientAngular(g) => format!("conic-gradient({})", gradient_stops(g)),
        Paint::GradientDiamond(g) => {
            format!("radial-gradient(circle farthest-side at center center, {})", gradient_stops(g))
        }
        Paint::Image(_) | Paint::Unsupported => "transparent".to_string(),
    }
}

fn gradient_stops(gradient: &GradientPaint) -> String {
    gradient
        .stops
        .iter()
        .map(color_stop)
        .collect::<Vec<_>>()
        .join(", ")
}

fn color_stop(stop: &ColorStop) -> String {
    let c = stop.color;
    format!(
        "rgba({}, {}, {}, {}) {}%",
        format_number(round(c.r * 255.0, 0)),
        format_number(round(c.g * 255.0, 0)),
        format_number(round(c.b * 255.0, 0)),
        format_number(c.a),
        format_number(round(stop.position * 100.0, 0)),
    )
}

fn visible_strokes(node: &SceneNode) -> impl DoubleEndedIterator<Item = &Paint> {
    node.strokes.iter().filter(|p| p.is_visible())
}

/// Insert border widths, radii, style and colors in declaration order.
pub fn insert_borders(node: &SceneNode, style: &mut StyleMap) {
    let stroked = visible_strokes(node).next().is_some();

    if stroked {
        let (top, right, bottom, left) = match node.stroke_weight {
            StrokeWeight::Uniform(w) => (w, w, w, w),
            StrokeWeight::PerEdge(e) => (e.top, e.right, e.bottom, e.left),
        };
        style.insert("borderTopWidth", top);
        style.insert("borderRightWidth", right);
        style.insert("borderBottomWidth", bottom);
        style.insert("borderLeftWidth", left);
    }

    let (top_left, top_right, bottom_right, bottom_left) = match node.corner_radius {
        CornerRadius::Uniform(r) => (r, r, r, r),
        CornerRadius::PerCorner(c) => (c.top_left, c.top_right, c.bottom_right, c.bottom_left),
    };
    style.insert("borderTopLeftRadius", top_left);
    style.insert("borderTopRightRadius", top_right);
    style.insert("borderBottomRightRadius", bottom_right);
    style.insert("borderBottomLeftRadius", bottom_left);

    // Dash patterns are not translated; every stroke is a solid border.
    if stroked {
        style.insert("borderStyle", "solid");
    }

    if let Some(color) = stroke_color(node) {
        style.insert("borderTopColor", color.as_str());
        style.insert("borderRightColor", color.as_str());
        style.insert("borderBottomColor", color.as_str());
        style.insert("borderLeftColor", color);
    }
}

/// Color of the topmost visible solid stroke.
pub fn stroke_color(node: &SceneNode) -> Option<String> {
    visible_strokes(node).rev().find_map(|p| match p {
        Paint::Solid(solid) => Some(solid.color.with_alpha(solid.opacity).to_css_string()),
        _ => None,
    })
}

fn visible_shadows(node: &SceneNode) -> impl DoubleEndedIterator<Item = (&ShadowEffect, bool)> {
    node.effects.iter().filter_map(|effect| match effect {
        Effect::DropShadow(s) if s.visible => Some((s, false)),
        Effect::InnerShadow(s) if s.visible => Some((s, true)),
        _ => None,
    })
}

/// Combined `boxShadow`, or `None` when there is no visible shadow.
pub fn box_shadow(node: &SceneNode) -> Option<String> {
    let shadows: Vec<String> = visible_shadows(node)
        .rev()
        .map(|(shadow, inset)| {
            format!(
                "{}px {}px {}px {}px {}{}",
                format_number(shadow.offset.x),
                format_number(shadow.offset.y),
                format_number(shadow.radius),
                format_number(shadow.spread),
                shadow.color.to_css_string(),
                if inset { " inset" } else { "" },
            )
        })
        .collect();
    (!shadows.is_empty()).then(|| shadows.join(", "))
}

/// Insert `textShadowColor`, `textShadowOffset` and `textShadowRadius` from
/// the last visible drop shadow.
pub fn insert_text_shadow(node: &SceneNode, style: &mut StyleMap) {
    let Some(shadow) = visible_shadows(node)
        .filter(|(_, inset)| !inset)
        .map(|(shadow, _)| shadow)
        .last()
    else {
        return;
    };

    style.insert("textShadowColor", shadow.color.to_css_string());
    if shadow.offset.x != 0.0 || shadow.offset.y != 0.0 {
        let offset = StyleMap::new()
            .with("width", shadow.offset.x)
            .with("height", shadow.offset.y);
        style.insert("textShadowOffset", offset);
    }
    style.insert("textShadowRadius", shadow.radius);
}

/// Text color from the topmost visible solid paint.
pub fn solid_color(paints: &[Paint]) -> Option<String> {
    paints.iter().rev().filter(|p| p.is_visible()).find_map(|p| match p {
        Paint::Solid(solid) => Some(solid.color.with_alpha(solid.opacity).to_css_string()),
        _ => None,
    })
}
