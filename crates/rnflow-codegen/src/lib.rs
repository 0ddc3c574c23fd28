//! React Native code generation for rnflow.
//!
//! [`Compiler`] runs the whole pipeline for one selection: style resolution,
//! IR lowering, name uniquification and module emission. The emitted module
//! imports only the framework tags it uses, default-exports one function
//! component and ends with a flat `styles` object keyed by node name.
//!
//! ```ignore
//! let compiler = Compiler::new(CompileOptions::default())?;
//! let module = pollster::block_on(compiler.compile(&tree, root, &source))?;
//! std::fs::write(module.file_name(), &module.code)?;
//! ```

pub mod compiler;
pub mod emitter;
pub mod error;
pub mod options;
pub mod stylesheet;
pub mod templates;

pub use compiler::{CompiledModule, Compiler};
pub use emitter::ModuleEmitter;
pub use error::{CodegenError, Result};
pub use options::CompileOptions;
pub use templates::TemplateEngine;
