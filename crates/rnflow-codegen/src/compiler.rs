//! The end-to-end compile pipeline.

use std::cell::RefCell;

use rnflow_assets::{AssetStores, CollectedAssets, HostedFontCatalog};
use rnflow_core::{DesignSource, NodeId, SceneTree};
use rnflow_ir::{uniquify, CodeNames, IrBuilder, IrNode};
use rnflow_style::StyleResolver;
use tracing::debug;

use crate::emitter::{capitalize, ModuleEmitter};
use crate::error::Result;
use crate::options::CompileOptions;

/// One compiled module and the assets it references.
#[derive(Debug, Clone)]
pub struct CompiledModule {
    /// Name of the default-exported function.
    pub name: String,
    /// Module source. Empty when the root lowered to a blank.
    pub code: String,
    pub assets: CollectedAssets,
}

impl CompiledModule {
    pub fn file_name(&self) -> String {
        format!("{}.tsx", self.name)
    }

    /// Stylesheet importing the hosted fonts. Local fonts have to be
    /// bundled by hand, so they are only listed.
    pub fn fonts_css(&self) -> String {
        let mut css = String::new();
        for rule in self.assets.hosted_import_rules() {
            css.push_str(&rule);
            css.push('\n');
        }
        let local: Vec<String> = self
            .assets
            .local_fonts()
            .map(|font| format!("{} {}", font.family, font.style))
            .collect();
        if !local.is_empty() {
            css.push_str(&format!("/* local fonts: {} */\n", local.join(", ")));
        }
        css
    }
}

/// Compiles scene selections into React Native modules.
///
/// A compiler owns its asset stores. Every compilation starts a fresh
/// collection, so one compiler can be reused for many selections, one at a
/// time.
pub struct Compiler<'a> {
    options: CompileOptions,
    names: CodeNames,
    emitter: ModuleEmitter<'a>,
    assets: RefCell<AssetStores>,
}

impl<'a> Compiler<'a> {
    pub fn new(options: CompileOptions) -> Result<Self> {
        Ok(Self {
            emitter: ModuleEmitter::new(options.indent)?,
            names: CodeNames::new()?,
            assets: RefCell::new(AssetStores::new()),
            options,
        })
    }

    /// Classify fonts against `catalog` instead of the built-in one.
    pub fn with_catalog(mut self, catalog: HostedFontCatalog) -> Self {
        self.assets = RefCell::new(AssetStores::with_catalog(catalog));
        self
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Lower `root` into a uniquified IR tree.
    ///
    /// Assets touched while lowering stay in the stores until the next
    /// compilation begins.
    #[tracing::instrument(skip_all, fields(root = %root))]
    pub async fn lower<S: DesignSource>(&self, tree: &SceneTree, root: NodeId, source: &S) -> Result<IrNode> {
        self.assets.borrow_mut().begin();
        let resolver = StyleResolver::new(tree, root, source, &self.assets);
        let builder = IrBuilder::new(resolver, &self.names).with_image_fills(self.options.image_fills);
        let mut ir = builder.build().await?;
        uniquify(&mut ir);
        Ok(ir)
    }

    /// Compile `root` into a module plus the fonts and media it uses.
    #[tracing::instrument(skip_all, fields(root = %root))]
    pub async fn compile<S: DesignSource>(&self, tree: &SceneTree, root: NodeId, source: &S) -> Result<CompiledModule> {
        let lowered = self.lower(tree, root, source).await;
        let assets = self.assets.borrow_mut().drain();
        let ir = lowered?;

        let name = match &self.options.component_name {
            Some(name) => name.clone(),
            None => capitalize(&ir.name),
        };
        let code = self.emitter.emit(&ir, &name)?;
        debug!(
            %name,
            nodes = ir.len(),
            fonts = assets.fonts.len(),
            media = assets.media.len(),
            "module compiled"
        );
        Ok(CompiledModule { name, code, assets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rnflow_core::{FontName, NodeKind, NullSource, Paint, Rgb, SceneNode, SourceError, TextContent, TextRun};

    const PNG: &[u8] = &[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

    struct PhotoSource;

    impl DesignSource for PhotoSource {
        async fn export_svg(&self, node: NodeId) -> std::result::Result<String, SourceError> {
            Err(SourceError::ExportUnavailable(node.to_string()))
        }

        async fn image_bytes(&self, hash: &str) -> std::result::Result<Option<Vec<u8>>, SourceError> {
            Ok((hash == "photo").then(|| PNG.to_vec()))
        }
    }

    fn card() -> (SceneTree, NodeId) {
        let mut tree = SceneTree::new();
        let root = tree.add_root(SceneNode::new(NodeKind::Frame, "Card").with_bounds(0.0, 0.0, 100.0, 50.0));
        tree.add_child(
            root,
            SceneNode::new(NodeKind::Rectangle, "bg")
                .with_bounds(0.0, 0.0, 100.0, 50.0)
                .with_fills(vec![Paint::solid(Rgb::new(1.0, 1.0, 1.0), 1.0)]),
        );
        (tree, root)
    }

    #[test]
    fn test_card_end_to_end() {
        let (tree, root) = card();
        let compiler = Compiler::new(CompileOptions::default()).unwrap();
        let module = pollster::block_on(compiler.compile(&tree, root, &NullSource)).unwrap();

        assert_eq!(module.name, "Card");
        assert_eq!(module.file_name(), "Card.tsx");
        let code = &module.code;
        assert!(code.contains("import { View } from 'react-native';"));
        assert!(!code.contains("Text"));
        assert!(!code.contains("ImageBackground"));
        assert!(code.contains("    <View style={styles.card}>\n      <View style={styles.bg}/>\n    </View>"));
        assert!(code.contains("\n  card: {"));
        assert!(code.contains("\n  bg: {"));
        assert!(code.contains("background: \"linear-gradient(rgba(255, 255, 255, 1), rgba(255, 255, 255, 1))\""));
        assert!(module.assets.fonts.is_empty());
        assert!(module.assets.media.is_empty());
    }

    #[test]
    fn test_duplicate_names_are_uniquified() {
        let (mut tree, root) = card();
        tree.add_child(root, SceneNode::new(NodeKind::Rectangle, "bg"));
        let compiler = Compiler::new(CompileOptions::default()).unwrap();
        let module = pollster::block_on(compiler.compile(&tree, root, &NullSource)).unwrap();
        assert!(module.code.contains("<View style={styles._bg}/>"));
        assert!(module.code.contains("\n  _bg: {"));
    }

    #[test]
    fn test_assets_are_collected_per_compilation() {
        let mut tree = SceneTree::new();
        let root = tree.add_root(
            SceneNode::new(NodeKind::Frame, "Hero")
                .with_bounds(0.0, 0.0, 300.0, 200.0)
                .with_fills(vec![Paint::image("photo")]),
        );
        tree.add_child(
            root,
            SceneNode::new(NodeKind::Text, "headline").with_text(TextContent::new(
                "Hello",
                vec![TextRun::new(0, 5, FontName::new("Roboto", "Bold"), 24.0)],
            )),
        );

        let compiler = Compiler::new(CompileOptions::default()).unwrap();
        let module = pollster::block_on(compiler.compile(&tree, root, &PhotoSource)).unwrap();
        assert_eq!(module.assets.media.len(), 1);
        assert_eq!(module.assets.media[0].filename, "photo.png");
        assert_eq!(module.assets.fonts.len(), 1);
        assert!(module.fonts_css().starts_with("@import url("));
        assert!(module.code.contains("import { View, Text } from 'react-native';"));

        let (tree, root) = card();
        let next = pollster::block_on(compiler.compile(&tree, root, &PhotoSource)).unwrap();
        assert!(next.assets.media.is_empty());
        assert!(next.assets.fonts.is_empty());
    }

    #[test]
    fn test_image_background_option() {
        let mut tree = SceneTree::new();
        let root = tree.add_root(
            SceneNode::new(NodeKind::Frame, "Hero")
                .with_bounds(0.0, 0.0, 300.0, 200.0)
                .with_fills(vec![Paint::image("photo")]),
        );
        let options = CompileOptions::default()
            .with_image_fills(rnflow_ir::ImageFillMode::ImageBackground)
            .with_component_name("HeroBanner");
        let compiler = Compiler::new(options).unwrap();
        let module = pollster::block_on(compiler.compile(&tree, root, &PhotoSource)).unwrap();
        assert_eq!(module.name, "HeroBanner");
        assert!(module.code.contains("<ImageBackground style={styles.hero} source={{ uri: 'photo.png' }}/>"));
        assert!(module.code.contains("import { ImageBackground } from 'react-native';"));
    }

    #[test]
    fn test_fatal_errors_carry_user_message() {
        let mut tree = SceneTree::new();
        let set = tree.add_root(SceneNode::new(NodeKind::ComponentSet, "Buttons"));
        let compiler = Compiler::new(CompileOptions::default()).unwrap();
        let err = pollster::block_on(compiler.compile(&tree, set, &NullSource)).unwrap_err();
        assert!(err.to_string().starts_with("COMPONENT_SET_IN_THE_NODE::"));
        assert!(err.user_message().contains("variant set"));
    }

    #[test]
    fn test_local_fonts_are_listed() {
        let mut tree = SceneTree::new();
        let root = tree.add_root(SceneNode::new(NodeKind::Frame, "Label"));
        tree.add_child(
            root,
            SceneNode::new(NodeKind::Text, "text").with_text(TextContent::new(
                "Hi",
                vec![TextRun::new(0, 2, FontName::new("Brand Sans", "Regular"), 14.0)],
            )),
        );
        let compiler = Compiler::new(CompileOptions::default()).unwrap();
        let module = pollster::block_on(compiler.compile(&tree, root, &NullSource)).unwrap();
        assert_eq!(module.fonts_css(), "/* local fonts: Brand Sans Regular */\n");
    }
}
