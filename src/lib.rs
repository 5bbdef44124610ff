//! jheadgen - generate JNI native-method headers from Java sources.
//!
//! When Java code declares a `native` method, the JVM binds the call to an
//! exported symbol whose name is mangled from the class and method names
//! (`GetEnv.nativeCall` becomes `Java_GetEnv_nativeCall`). This crate is a
//! `javah`-style generator for that contract: it scans Java sources for
//! `native` declarations and produces either the classic C header or Rust
//! stub skeletons built on the `jni` crate, so a native library can define
//! exactly the symbols the JVM's resolver will look for.
//!
//! The mangling transform itself lives in [`mangle`] and is usable on its
//! own; [`signature`] parses JNI type descriptors such as `()V`.
//!
//! # Example
//!
//! ```
//! use jheadgen::Builder;
//!
//! let headers = Builder::new()
//!     .input_source(
//!         "GetEnv.java",
//!         "class GetEnv { static native void nativeCall(); }",
//!     )
//!     .generate()
//!     .unwrap();
//!
//! assert!(headers.to_string().contains("Java_GetEnv_nativeCall"));
//! ```

#![warn(missing_docs)]

pub mod errors;
mod generator;
mod java_parser;
pub mod mangle;
mod model;
pub mod signature;

use std::path::PathBuf;

use log::{info, warn};

use crate::errors::Result;

pub use crate::generator::{render, Flavor, GeneratedFile, Headers};
pub use crate::java_parser::{parse_java_file, parse_java_source};
pub use crate::model::{NativeClass, NativeMethod};

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Source { origin: PathBuf, text: String },
}

/// Configuration builder for a generator run.
#[derive(Debug, Default)]
pub struct Builder {
    inputs: Vec<Input>,
    flavor: Flavor,
}

impl Builder {
    /// Create a builder with no inputs, generating C headers by default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `.java` source file.
    pub fn input_java(mut self, path: impl Into<PathBuf>) -> Self {
        self.inputs.push(Input::File(path.into()));
        self
    }

    /// Add Java source text directly. `origin` is used in error messages
    /// the way a file path would be.
    pub fn input_source(mut self, origin: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.inputs.push(Input::Source {
            origin: origin.into(),
            text: text.into(),
        });
        self
    }

    /// Select the output flavor.
    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Parse every input and render one generated file per class that
    /// declares native methods. Classes without natives are skipped, as
    /// `javah` skipped them.
    pub fn generate(self) -> Result<Headers> {
        let mut headers = Headers::default();

        for input in &self.inputs {
            let class = match input {
                Input::File(path) => java_parser::parse_java_file(path)?,
                Input::Source { origin, text } => java_parser::parse_java_source(origin, text)?,
            };

            if class.methods.is_empty() {
                warn!(
                    "class {} declares no native methods, skipping",
                    class.binary_name
                );
                continue;
            }

            info!(
                "generating {} declaration(s) for class {}",
                class.methods.len(),
                class.binary_name
            );
            headers.push(generator::render(&class, self.flavor));
        }

        Ok(headers)
    }
}
