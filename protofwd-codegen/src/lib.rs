//! File emission core of the protofwd Go generator.
//!
//! For every schema file of a [`DescriptorSet`](protofwd_descriptor::DescriptorSet)
//! the [`Generator`] writes one Go file:
//!
//! ```text
//! banner + version markers      (HeaderGenerator)
//! package clause
//! import block                  (ImportSet, inserted on materialization)
//! version assertions
//! forwarding blocks             (ImportResolver + PublicImportForwarder)
//! body                          (BodyTemplate)
//! ```
//!
//! Public imports are forwarded by generating the imported file in detached
//! mode, parsing the result with `protofwd-syntax` and aliasing its exported
//! declarations.

pub mod builder;

mod body;
mod diagnostic;
mod error;
mod file;
mod forward;
mod generator;
mod header;
mod imports;
mod options;
mod output;
mod resolve;

pub use body::{BodyTemplate, SkeletonBody};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{GenerateError, ImportChain};
pub use file::GeneratedFile;
pub use forward::{Declaration, UnrecognizedSpec, Verdict, collect_declarations};
pub use generator::Generator;
pub use header::{GENERATOR_NAME, HeaderGenerator};
pub use imports::{ImportLine, ImportSet};
pub use options::{Features, GEN_VERSION, Options, RuntimeLibrary};
pub use output::{GenerateOutput, OutputFile, OutputSet};
