//! Typography resolution and rich-text markup.

use rnflow_assets::AssetStores;
use rnflow_core::{
    Fills, LetterSpacing, LineHeight, SceneNode, StyleMap, TextAlignHorizontal, TextContent,
    TextDecoration, TextRun,
};
use tracing::debug;

use crate::paint::solid_color;

/// Typography keys for one run, registering its font.
pub fn run_style(node: &SceneNode, text: &TextContent, run: &TextRun, assets: &mut AssetStores) -> StyleMap {
    assets.register_font(&run.font_name.family, &run.font_name.style);

    let size = run.font_size;
    let color = match &node.fills {
        Fills::Paints(paints) => solid_color(paints),
        Fills::Mixed => solid_color(&run.fills),
    };
    let letter_spacing = match run.letter_spacing {
        LetterSpacing::Pixels { value } => value,
        LetterSpacing::Percent { value } => size * value / 100.0,
    };
    let line_height = match run.line_height {
        LineHeight::Auto => None,
        LineHeight::Pixels { value } => Some(value),
        LineHeight::Percent { value } => Some(size * value / 100.0),
    };
    let decoration = match run.text_decoration {
        TextDecoration::None => None,
        TextDecoration::Underline => Some("underline"),
        TextDecoration::Strikethrough => Some("line-through"),
    };

    let mut style = StyleMap::new();
    style.insert("textAlign", text_align(text.text_align_horizontal));
    style.set("color", color);
    style.insert("fontFamily", run.font_name.family.as_str());
    style.insert("fontSize", size);
    style.insert("fontWeight", run.font_weight.to_string());
    style.insert("letterSpacing", letter_spacing);
    style.set("lineHeight", line_height);
    style.set("textDecorationLine", decoration);
    style
}

fn text_align(align: TextAlignHorizontal) -> &'static str {
    match align {
        TextAlignHorizontal::Left => "left",
        TextAlignHorizontal::Right => "right",
        TextAlignHorizontal::Center => "center",
        TextAlignHorizontal::Justified => "justify",
    }
}

/// The base typography of a text node. Empty text has none.
pub fn base_style(node: &SceneNode, assets: &mut AssetStores) -> StyleMap {
    let Some(text) = node.text.as_ref().filter(|t| !t.characters.is_empty()) else {
        return StyleMap::new();
    };
    match base_run(text) {
        Some(run) => run_style(node, text, run, assets),
        None => StyleMap::new(),
    }
}

/// The run at offset 0, falling back to the earliest run.
fn base_run(text: &TextContent) -> Option<&TextRun> {
    text.base_run().or_else(|| text.runs.iter().min_by_key(|r| r.start))
}

/// Inner markup of a text element.
///
/// The base run is emitted as a plain template literal; every later run
/// carries only the properties that differ from the base, wrapped in a
/// nested `Text` element. Runs identical to the base stay plain.
pub fn rich_text_markup(node: &SceneNode, assets: &mut AssetStores) -> String {
    let Some(text) = node.text.as_ref().filter(|t| !t.characters.is_empty()) else {
        return String::new();
    };
    let Some(base_run) = base_run(text) else {
        return literal(&text.characters);
    };

    let base = run_style(node, text, base_run, assets);
    let mut runs: Vec<&TextRun> = text.runs.iter().collect();
    runs.sort_by_key(|r| r.start);

    let mut out = String::new();
    for run in runs {
        let characters = text.run_text(run);
        if std::ptr::eq(run, base_run) {
            out.push_str(&literal(&characters));
            continue;
        }

        let style = run_style(node, text, run, assets);
        let diff: StyleMap = style
            .iter()
            .filter(|(key, value)| base.get(key) != Some(*value))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();

        if diff.is_empty() {
            out.push_str(&literal(&characters));
        } else {
            debug!(node = %node.name, start = run.start, keys = diff.len(), "text run override");
            // StyleMap serialization cannot fail: keys are strings and values are finite JSON.
            let json = serde_json::to_string(&diff).unwrap_or_else(|_| "{}".to_string());
            out.push_str(&format!("<Text style={{{json}}}>{}</Text>", literal(&characters)));
        }
    }
    out
}

/// `{`text`}` with template-literal escapes.
fn literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '`' => escaped.push_str("\\`"),
            '\n' => escaped.push_str("\\n"),
            '$' if chars.peek() == Some(&'{') => escaped.push_str("\\$"),
            other => escaped.push(other),
        }
    }
    format!("{{`{escaped}`}}")
}
