//! Scene-graph model.
//!
//! These types mirror what the design tool reports for each node. Field
//! names and enum tags follow the design tool's own vocabulary so snapshots
//! deserialize without translation.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::color::{Rgb, Rgba};

/// Index of a node inside a [`SceneTree`](crate::SceneTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Node kind tag.
///
/// `ComponentSet` and `Other` can appear in a scene but are rejected by the
/// compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
    Component,
    ComponentSet,
    Instance,
    Frame,
    Rectangle,
    Group,
    Text,
    Ellipse,
    Line,
    Polygon,
    Star,
    Vector,
    BooleanOperation,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Frame => "FRAME",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Group => "GROUP",
            NodeKind::Text => "TEXT",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Line => "LINE",
            NodeKind::Polygon => "POLYGON",
            NodeKind::Star => "STAR",
            NodeKind::Vector => "VECTOR",
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Other(name) => name,
        }
    }

    /// Kinds exportable as one self-contained vector asset.
    pub fn is_vector_like(&self) -> bool {
        matches!(
            self,
            NodeKind::BooleanOperation
                | NodeKind::Ellipse
                | NodeKind::Line
                | NodeKind::Polygon
                | NodeKind::Star
                | NodeKind::Vector
        )
    }

    /// Kinds that can carry auto-layout properties.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance
        )
    }

    /// Kinds that never persist per-edge constraints.
    pub fn is_group_like(&self) -> bool {
        matches!(self, NodeKind::Group | NodeKind::BooleanOperation)
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "COMPONENT" => NodeKind::Component,
            "COMPONENT_SET" => NodeKind::ComponentSet,
            "INSTANCE" => NodeKind::Instance,
            "FRAME" => NodeKind::Frame,
            "RECTANGLE" => NodeKind::Rectangle,
            "GROUP" => NodeKind::Group,
            "TEXT" => NodeKind::Text,
            "ELLIPSE" => NodeKind::Ellipse,
            "LINE" => NodeKind::Line,
            "POLYGON" => NodeKind::Polygon,
            "STAR" => NodeKind::Star,
            "VECTOR" => NodeKind::Vector,
            "BOOLEAN_OPERATION" => NodeKind::BooleanOperation,
            _ => NodeKind::Other(value),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-edge anchoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintType {
    #[default]
    Min,
    Max,
    Stretch,
    Center,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Constraints {
    pub horizontal: ConstraintType,
    pub vertical: ConstraintType,
}

/// How an axis is sized relative to auto-layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutSizing {
    #[default]
    Fixed,
    Hug,
    Fill,
}

/// Cross-axis alignment of an auto-layout child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutAlign {
    Min,
    Center,
    Max,
    Stretch,
    #[default]
    Inherit,
}

/// Whether an auto-layout child takes part in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutPositioning {
    #[default]
    Auto,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    #[default]
    NoWrap,
    Wrap,
}

/// Main-axis distribution of an auto-layout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryAxisAlign {
    #[default]
    Min,
    Max,
    Center,
    SpaceBetween,
}

/// Cross-axis alignment of an auto-layout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAxisAlign {
    #[default]
    Min,
    Max,
    Center,
    Baseline,
}

/// One paint layer of a fill or stroke list. The last entry paints on top.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
    GradientDiamond(GradientPaint),
    Image(ImagePaint),
    #[serde(other)]
    Unsupported,
}

impl Paint {
    pub fn solid(color: Rgb, opacity: f64) -> Self {
        Paint::Solid(SolidPaint { color, opacity, visible: true })
    }

    pub fn image(hash: impl Into<String>) -> Self {
        Paint::Image(ImagePaint { image_hash: Some(hash.into()), visible: true })
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Paint::Solid(p) => p.visible,
            Paint::GradientLinear(p)
            | Paint::GradientRadial(p)
            | Paint::GradientAngular(p)
            | Paint::GradientDiamond(p) => p.visible,
            Paint::Image(p) => p.visible,
            Paint::Unsupported => true,
        }
    }

    /// Hide this layer.
    pub fn hidden(mut self) -> Self {
        match &mut self {
            Paint::Solid(p) => p.visible = false,
            Paint::GradientLinear(p)
            | Paint::GradientRadial(p)
            | Paint::GradientAngular(p)
            | Paint::GradientDiamond(p) => p.visible = false,
            Paint::Image(p) => p.visible = false,
            Paint::Unsupported => {}
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolidPaint {
    pub color: Rgb,
    #[serde(default = "one")]
    pub opacity: f64,
    #[serde(default = "yes")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradientPaint {
    #[serde(rename = "gradientStops")]
    pub stops: Vec<ColorStop>,
    #[serde(default = "yes")]
    pub visible: bool,
}

impl GradientPaint {
    pub fn new(stops: Vec<ColorStop>) -> Self {
        Self { stops, visible: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImagePaint {
    #[serde(default, rename = "imageHash")]
    pub image_hash: Option<String>,
    #[serde(default = "yes")]
    pub visible: bool,
}

/// A node's fill list, or the marker the design tool reports for text
/// whose runs carry different fills.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "FillsRepr")]
pub enum Fills {
    Paints(Vec<Paint>),
    Mixed,
}

impl Default for Fills {
    fn default() -> Self {
        Fills::Paints(Vec::new())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FillsRepr {
    Paints(Vec<Paint>),
    Marker(String),
}

impl TryFrom<FillsRepr> for Fills {
    type Error = String;

    fn try_from(value: FillsRepr) -> Result<Self, Self::Error> {
        match value {
            FillsRepr::Paints(paints) => Ok(Fills::Paints(paints)),
            FillsRepr::Marker(marker) if marker == "MIXED" => Ok(Fills::Mixed),
            FillsRepr::Marker(marker) => Err(format!("unexpected fills marker '{marker}'")),
        }
    }
}

/// Stroke weight, uniform or per edge.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StrokeWeight {
    Uniform(f64),
    PerEdge(EdgeWeights),
}

impl Default for StrokeWeight {
    fn default() -> Self {
        StrokeWeight::Uniform(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct EdgeWeights {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Corner radius, uniform or per corner.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CornerRadius {
    Uniform(f64),
    PerCorner(CornerRadii),
}

impl Default for CornerRadius {
    fn default() -> Self {
        CornerRadius::Uniform(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

/// A visual effect. Only shadows are translated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(ShadowEffect),
    InnerShadow(ShadowEffect),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ShadowEffect {
    pub color: Rgba,
    #[serde(default)]
    pub offset: Vector2,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub spread: f64,
    #[serde(default = "yes")]
    pub visible: bool,
}

impl ShadowEffect {
    pub fn new(color: Rgba, x: f64, y: f64, radius: f64, spread: f64) -> Self {
        Self {
            color,
            offset: Vector2 { x, y },
            radius,
            spread,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlignHorizontal {
    #[default]
    Left,
    Right,
    Center,
    Justified,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self { family: family.into(), style: style.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterSpacing {
    Pixels { value: f64 },
    Percent { value: f64 },
}

impl Default for LetterSpacing {
    fn default() -> Self {
        LetterSpacing::Pixels { value: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    #[default]
    Auto,
    Pixels { value: f64 },
    Percent { value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// A contiguous character range sharing one set of text properties.
/// `start` and `end` are UTF-16 code unit offsets as the design tool
/// reports them, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub start: usize,
    pub end: usize,
    pub font_name: FontName,
    pub font_size: f64,
    #[serde(default = "regular_weight")]
    pub font_weight: u32,
    #[serde(default)]
    pub letter_spacing: LetterSpacing,
    #[serde(default)]
    pub line_height: LineHeight,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    #[serde(default)]
    pub fills: Vec<Paint>,
}

impl TextRun {
    pub fn new(start: usize, end: usize, font_name: FontName, font_size: f64) -> Self {
        Self {
            start,
            end,
            font_name,
            font_size,
            font_weight: regular_weight(),
            letter_spacing: LetterSpacing::default(),
            line_height: LineHeight::default(),
            text_decoration: TextDecoration::default(),
            fills: Vec::new(),
        }
    }

    pub fn with_fills(mut self, fills: Vec<Paint>) -> Self {
        self.fills = fills;
        self
    }
}

/// Text payload of a `TEXT` node.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub characters: String,
    #[serde(default)]
    pub text_align_horizontal: TextAlignHorizontal,
    #[serde(default)]
    pub max_lines: Option<u32>,
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl TextContent {
    pub fn new(characters: impl Into<String>, runs: Vec<TextRun>) -> Self {
        Self {
            characters: characters.into(),
            runs,
            ..Default::default()
        }
    }

    /// The run covering offset 0; it defines the node's base style.
    pub fn base_run(&self) -> Option<&TextRun> {
        self.runs.iter().find(|run| run.start == 0)
    }

    /// Characters covered by `run`.
    ///
    /// Offsets past the end are clamped. A range that splits a surrogate pair
    /// yields U+FFFD for the orphaned half.
    pub fn run_text(&self, run: &TextRun) -> String {
        let units: Vec<u16> = self.characters.encode_utf16().collect();
        let end = run.end.min(units.len());
        let start = run.start.min(end);
        String::from_utf16_lossy(&units[start..end])
    }
}

/// What an instance knows about the component it was created from.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainComponent {
    pub name: String,
    #[serde(default)]
    pub variant_set_name: Option<String>,
    #[serde(default)]
    pub variant_properties: Option<IndexMap<String, String>>,
}

/// One node of the design tool's scene graph.
///
/// `id`, `parent` and `children` are arena links filled in by
/// [`SceneTree`](crate::SceneTree); everything else is reported by the design tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    #[serde(skip)]
    pub id: NodeId,
    #[serde(skip)]
    pub parent: Option<NodeId>,
    #[serde(skip)]
    pub children: Vec<NodeId>,

    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// The design tool's own node identifier.
    #[serde(default, rename = "id")]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "yes")]
    pub visible: bool,

    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Degrees, counter-clockwise.
    #[serde(default)]
    pub rotation: f64,

    #[serde(default)]
    pub constraints: Option<Constraints>,
    #[serde(default)]
    pub layout_sizing_horizontal: LayoutSizing,
    #[serde(default)]
    pub layout_sizing_vertical: LayoutSizing,
    #[serde(default)]
    pub layout_align: LayoutAlign,
    #[serde(default)]
    pub layout_grow: f64,
    #[serde(default)]
    pub layout_positioning: LayoutPositioning,

    #[serde(default)]
    pub layout_mode: LayoutMode,
    #[serde(default)]
    pub layout_wrap: LayoutWrap,
    #[serde(default)]
    pub primary_axis_align_items: PrimaryAxisAlign,
    #[serde(default)]
    pub counter_axis_align_items: CounterAxisAlign,
    #[serde(default)]
    pub item_spacing: f64,
    #[serde(default)]
    pub padding_top: f64,
    #[serde(default)]
    pub padding_right: f64,
    #[serde(default)]
    pub padding_bottom: f64,
    #[serde(default)]
    pub padding_left: f64,

    #[serde(default)]
    pub fills: Fills,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub stroke_weight: StrokeWeight,
    #[serde(default)]
    pub corner_radius: CornerRadius,
    #[serde(default)]
    pub effects: Vec<Effect>,

    #[serde(default)]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub variant_properties: Option<IndexMap<String, String>>,
    #[serde(default)]
    pub main_component: Option<MainComponent>,
}

impl SceneNode {
    /// Create a node with the design tool's defaults.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::default(),
            parent: None,
            children: Vec::new(),
            kind,
            key: String::new(),
            name: name.into(),
            visible: true,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            constraints: None,
            layout_sizing_horizontal: LayoutSizing::Fixed,
            layout_sizing_vertical: LayoutSizing::Fixed,
            layout_align: LayoutAlign::Inherit,
            layout_grow: 0.0,
            layout_positioning: LayoutPositioning::Auto,
            layout_mode: LayoutMode::None,
            layout_wrap: LayoutWrap::NoWrap,
            primary_axis_align_items: PrimaryAxisAlign::Min,
            counter_axis_align_items: CounterAxisAlign::Min,
            item_spacing: 0.0,
            padding_top: 0.0,
            padding_right: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
            fills: Fills::default(),
            strokes: Vec::new(),
            stroke_weight: StrokeWeight::default(),
            corner_radius: CornerRadius::default(),
            effects: Vec::new(),
            text: None,
            variant_properties: None,
            main_component: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_constraints(mut self, horizontal: ConstraintType, vertical: ConstraintType) -> Self {
        self.constraints = Some(Constraints { horizontal, vertical });
        self
    }

    pub fn with_sizing(mut self, horizontal: LayoutSizing, vertical: LayoutSizing) -> Self {
        self.layout_sizing_horizontal = horizontal;
        self.layout_sizing_vertical = vertical;
        self
    }

    pub fn with_auto_layout(mut self, mode: LayoutMode, item_spacing: f64) -> Self {
        self.layout_mode = mode;
        self.item_spacing = item_spacing;
        self
    }

    pub fn with_padding(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.padding_top = top;
        self.padding_right = right;
        self.padding_bottom = bottom;
        self.padding_left = left;
        self
    }

    pub fn with_layout_grow(mut self, grow: f64) -> Self {
        self.layout_grow = grow;
        self
    }

    pub fn with_layout_align(mut self, align: LayoutAlign) -> Self {
        self.layout_align = align;
        self
    }

    pub fn with_layout_positioning(mut self, positioning: LayoutPositioning) -> Self {
        self.layout_positioning = positioning;
        self
    }

    pub fn with_fills(mut self, fills: Vec<Paint>) -> Self {
        self.fills = Fills::Paints(fills);
        self
    }

    pub fn with_mixed_fills(mut self) -> Self {
        self.fills = Fills::Mixed;
        self
    }

    pub fn with_strokes(mut self, strokes: Vec<Paint>, weight: StrokeWeight) -> Self {
        self.strokes = strokes;
        self.stroke_weight = weight;
        self
    }

    pub fn with_corner_radius(mut self, radius: CornerRadius) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_text(mut self, text: TextContent) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_variant_properties(mut self, props: IndexMap<String, String>) -> Self {
        self.variant_properties = Some(props);
        self
    }

    pub fn with_main_component(mut self, main: MainComponent) -> Self {
        self.main_component = Some(main);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Horizontal and vertical constraints; absent constraints anchor to the near edges.
    pub fn constraints(&self) -> Constraints {
        self.constraints.unwrap_or_default()
    }

    /// True when any fill layer is an image, visible or not.
    pub fn has_image_fill(&self) -> bool {
        match &self.fills {
            Fills::Paints(paints) => paints.iter().any(|p| matches!(p, Paint::Image(_))),
            Fills::Mixed => false,
        }
    }
}

fn yes() -> bool {
    true
}

fn one() -> f64 {
    1.0
}

fn regular_weight() -> u32 {
    400
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_preserved() {
        assert_eq!(NodeKind::from("SLICE".to_string()), NodeKind::Other("SLICE".into()));
        assert_eq!(NodeKind::from("STAR".to_string()), NodeKind::Star);
        assert!(NodeKind::Star.is_vector_like());
        assert!(!NodeKind::Rectangle.is_vector_like());
    }

    #[test]
    fn test_deserialize_node() {
        let json = r#"{
            "type": "RECTANGLE",
            "id": "1:2",
            "name": "bg",
            "x": 10, "y": 20, "width": 100, "height": 50,
            "constraints": { "horizontal": "STRETCH", "vertical": "MIN" },
            "fills": [
                { "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0 } },
                { "type": "IMAGE", "imageHash": "abc" },
                { "type": "VIDEO" }
            ],
            "cornerRadius": { "topLeft": 4, "topRight": 4, "bottomRight": 0, "bottomLeft": 0 },
            "effects": [ { "type": "LAYER_BLUR", "radius": 4 } ]
        }"#;
        let node: SceneNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NodeKind::Rectangle);
        assert_eq!(node.key, "1:2");
        assert!(node.visible);
        assert_eq!(node.constraints().horizontal, ConstraintType::Stretch);
        assert!(node.has_image_fill());
        match &node.fills {
            Fills::Paints(paints) => {
                assert_eq!(paints.len(), 3);
                assert_eq!(paints[2], Paint::Unsupported);
            }
            Fills::Mixed => panic!("expected paints"),
        }
        assert!(matches!(node.corner_radius, CornerRadius::PerCorner(_)));
        assert_eq!(node.effects, vec![Effect::Other]);
    }

    #[test]
    fn test_deserialize_mixed_fills() {
        let node: SceneNode =
            serde_json::from_str(r#"{ "type": "TEXT", "fills": "MIXED" }"#).unwrap();
        assert_eq!(node.fills, Fills::Mixed);

        let err = serde_json::from_str::<SceneNode>(r#"{ "type": "TEXT", "fills": "SOMETIMES" }"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let result = serde_json::from_str::<SceneNode>(
            r#"{ "type": "FRAME", "primaryAxisAlignItems": "SPACE_AROUND" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_run_text_counts_utf16_units() {
        let font = FontName::new("Inter", "Regular");
        let text = TextContent::new(
            "😀ab",
            vec![
                TextRun::new(0, 3, font.clone(), 12.0),
                TextRun::new(3, 4, font, 12.0),
            ],
        );
        assert_eq!(text.run_text(&text.runs[0]), "😀a");
        assert_eq!(text.run_text(&text.runs[1]), "b");
        assert_eq!(text.run_text(&TextRun::new(2, 9, FontName::new("Inter", "Bold"), 12.0)), "ab");
    }

    #[test]
    fn test_run_text_uses_character_offsets() {
        let text = TextContent::new(
            "héllo world",
            vec![TextRun::new(0, 5, FontName::new("Inter", "Regular"), 12.0)],
        );
        assert_eq!(text.run_text(&text.runs[0]), "héllo");
        assert!(text.base_run().is_some());
    }
}
