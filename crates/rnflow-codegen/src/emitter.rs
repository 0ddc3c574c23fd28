//! React Native module emission.

use indexmap::IndexSet;
use regex::{NoExpand, Regex};
use rnflow_ir::{IrKind, IrNode};
use serde::Serialize;

use crate::error::Result;
use crate::stylesheet;
use crate::templates::{TemplateEngine, MODULE};

/// Data handed to the module template.
#[derive(Serialize)]
struct ModuleData<'a> {
    imports: Vec<&'static str>,
    name: &'a str,
    pad: String,
    markup: String,
    body_indent: usize,
    styles: String,
    indent: usize,
}

/// Writes a uniquified IR tree as a React Native module.
pub struct ModuleEmitter<'a> {
    engine: TemplateEngine<'a>,
    indent: usize,
    svg_open: Regex,
}

impl<'a> ModuleEmitter<'a> {
    pub fn new(indent: usize) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_module_template()?,
            indent,
            svg_open: Regex::new(r"<svg\s+")?,
        })
    }

    /// Emit the module whose default export is `function_name`.
    ///
    /// A blank root emits nothing.
    pub fn emit(&self, root: &IrNode, function_name: &str) -> Result<String> {
        if root.is_blank() {
            return Ok(String::new());
        }

        let mut lines = Vec::new();
        self.markup(root, 0, &mut lines);

        let data = ModuleData {
            imports: imports(root),
            name: function_name,
            pad: " ".repeat(self.indent),
            markup: lines.join("\n"),
            body_indent: self.indent * 2,
            styles: stylesheet::render(root, self.indent),
            indent: self.indent,
        };
        self.engine.render(MODULE, &data)
    }

    /// Markup of `node` at `depth`, one entry per line.
    pub fn markup(&self, node: &IrNode, depth: usize, lines: &mut Vec<String>) {
        let pad = " ".repeat(depth * self.indent);
        let style = format!("style={{styles.{}}}", node.name);

        match &node.kind {
            IrKind::Blank => {}
            IrKind::Vector { svg } => {
                let replacement = format!("<svg {style} ");
                let svg = self.svg_open.replace_all(svg, NoExpand(&replacement));
                lines.extend(svg.lines().filter(|l| !l.trim().is_empty()).map(|l| format!("{pad}{l}")));
            }
            IrKind::Text { markup, max_lines } => {
                let lines_attr = max_lines.map(|n| format!(" numberOfLines={{{n}}}")).unwrap_or_default();
                lines.push(format!("{pad}<Text {style}{lines_attr}>"));
                lines.push(format!("{pad}{}{markup}", " ".repeat(self.indent)));
                lines.push(format!("{pad}</Text>"));
            }
            _ => {
                if depth > 0 {
                    if let Some(comment) = replacement_comment(node) {
                        lines.push(format!("{pad}{comment}"));
                    }
                }
                let tag = tag_name(node).unwrap_or("View");
                let source = node
                    .background_image()
                    .map(|file| format!(" source={{{{ uri: '{file}' }}}}"))
                    .unwrap_or_default();
                if node.children.is_empty() {
                    lines.push(format!("{pad}<{tag} {style}{source}/>"));
                } else {
                    lines.push(format!("{pad}<{tag} {style}{source}>"));
                    for child in &node.children {
                        self.markup(child, depth + 1, lines);
                    }
                    lines.push(format!("{pad}</{tag}>"));
                }
            }
        }
    }
}

/// Framework tag used for `node`. Vectors are inlined SVG and blanks
/// render nothing, so neither has a tag.
pub fn tag_name(node: &IrNode) -> Option<&'static str> {
    match &node.kind {
        IrKind::Component { .. } | IrKind::Instance { .. } | IrKind::Frame { .. } | IrKind::Rectangle { .. } => {
            Some(if node.background_image().is_some() { "ImageBackground" } else { "View" })
        }
        IrKind::Group => Some("View"),
        IrKind::Text { .. } => Some("Text"),
        IrKind::Vector { .. } | IrKind::Blank => None,
    }
}

/// Distinct framework tags in the tree, in first-use order.
pub fn imports(root: &IrNode) -> Vec<&'static str> {
    let mut tags = IndexSet::new();
    root.walk(&mut |node| {
        if let Some(tag) = tag_name(node) {
            tags.insert(tag);
        }
    });
    tags.into_iter().collect()
}

/// `{/* can be replaced with <Name prop={"value"} /> */}` for components
/// and instances.
fn replacement_comment(node: &IrNode) -> Option<String> {
    let (name, props) = match &node.kind {
        IrKind::Component { props, .. } => (node.name.as_str(), props),
        IrKind::Instance { main_component_name, props, .. } if !main_component_name.is_empty() => {
            (main_component_name.as_str(), props)
        }
        IrKind::Instance { props, .. } => (node.name.as_str(), props),
        _ => return None,
    };
    let mut element = format!("<{}", capitalize(name));
    for (key, value) in props {
        element.push_str(&format!(" {key}={{\"{value}\"}}"));
    }
    Some(format!("{{/* can be replaced with {element} /> */}}"))
}

pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
