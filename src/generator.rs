//! Rendering of native-method declarations into generated files.
//!
//! Two back ends share the same intermediate model: the classic C header as
//! `javah` wrote it (byte for byte, so regenerating from unchanged input is
//! idempotent and diffs stay quiet), and Rust stub skeletons built on the
//! `jni` crate's safe wrapper types.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

use log::info;

use crate::errors::Result;
use crate::model::{NativeClass, NativeMethod};
use crate::signature::{JavaType, Primitive};

/// Output flavor for a generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    /// A `javah`-compatible C header declaring each export symbol.
    #[default]
    CHeader,
    /// Rust `#[no_mangle] extern "system"` stub skeletons.
    RustStubs,
}

/// A single generated file.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// File name `javah` would have used: the mangled class name plus the
    /// flavor's extension.
    pub file_name: String,
    /// Full file contents.
    pub contents: String,
}

/// The files produced by one generator run, one per input class.
#[derive(Debug, Clone, Default)]
pub struct Headers {
    files: Vec<GeneratedFile>,
}

impl Headers {
    /// Whether any file was generated.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of generated files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// The generated files in input order.
    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    pub(crate) fn push(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Write the concatenated output to a single file.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    /// Write one file per class into `dir`, creating it if needed.
    pub fn write_to_files(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        for file in &self.files {
            let path = dir.join(&file.file_name);
            fs::write(&path, &file.contents)?;
            info!("wrote {}", path.display());
        }
        Ok(())
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for file in &self.files {
            f.write_str(&file.contents)?;
        }
        Ok(())
    }
}

/// Render one class for the given flavor.
pub fn render(class: &NativeClass, flavor: Flavor) -> GeneratedFile {
    match flavor {
        Flavor::CHeader => GeneratedFile {
            file_name: format!("{}.h", class.mangled_name()),
            contents: render_c_header(class),
        },
        Flavor::RustStubs => GeneratedFile {
            file_name: format!("{}.rs", class.mangled_name()),
            contents: render_rust_stubs(class),
        },
    }
}

fn c_primitive(p: Primitive) -> &'static str {
    match p {
        Primitive::Boolean => "jboolean",
        Primitive::Byte => "jbyte",
        Primitive::Char => "jchar",
        Primitive::Short => "jshort",
        Primitive::Int => "jint",
        Primitive::Long => "jlong",
        Primitive::Float => "jfloat",
        Primitive::Double => "jdouble",
        Primitive::Void => "void",
    }
}

fn c_type(ty: &JavaType) -> &'static str {
    match ty {
        JavaType::Primitive(p) => c_primitive(*p),
        JavaType::Object(name) => match name.as_str() {
            "java/lang/String" => "jstring",
            "java/lang/Class" => "jclass",
            "java/lang/Throwable" => "jthrowable",
            _ => "jobject",
        },
        JavaType::Array(elem) => match elem.as_ref() {
            JavaType::Primitive(Primitive::Boolean) => "jbooleanArray",
            JavaType::Primitive(Primitive::Byte) => "jbyteArray",
            JavaType::Primitive(Primitive::Char) => "jcharArray",
            JavaType::Primitive(Primitive::Short) => "jshortArray",
            JavaType::Primitive(Primitive::Int) => "jintArray",
            JavaType::Primitive(Primitive::Long) => "jlongArray",
            JavaType::Primitive(Primitive::Float) => "jfloatArray",
            JavaType::Primitive(Primitive::Double) => "jdoubleArray",
            _ => "jobjectArray",
        },
    }
}

fn render_c_header(class: &NativeClass) -> String {
    let mangled = class.mangled_name();
    let mut out = String::new();

    out.push_str("/* DO NOT EDIT THIS FILE - it is machine generated */\n");
    out.push_str("#include <jni.h>\n");
    out.push_str(&format!("/* Header for class {mangled} */\n\n"));
    out.push_str(&format!("#ifndef _Included_{mangled}\n"));
    out.push_str(&format!("#define _Included_{mangled}\n"));
    out.push_str("#ifdef __cplusplus\n");
    out.push_str("extern \"C\" {\n");
    out.push_str("#endif\n");

    for method in &class.methods {
        out.push_str("/*\n");
        out.push_str(&format!(" * Class:     {mangled}\n"));
        out.push_str(&format!(" * Method:    {}\n", method.name));
        out.push_str(&format!(" * Signature: {}\n", method.descriptor));
        out.push_str(" */\n");
        out.push_str(&format!(
            "JNIEXPORT {} JNICALL {}\n",
            c_type(&method.descriptor.ret),
            class.symbol(method)
        ));

        let receiver = if method.is_static { "jclass" } else { "jobject" };
        out.push_str(&format!("  (JNIEnv *, {receiver}"));
        for arg in &method.descriptor.args {
            out.push_str(&format!(", {}", c_type(arg)));
        }
        out.push_str(");\n\n");
    }

    out.push_str("#ifdef __cplusplus\n");
    out.push_str("}\n");
    out.push_str("#endif\n");
    out.push_str("#endif\n");
    out
}

/// How a Java type spells in a Rust stub signature, and where its Rust type
/// is imported from.
enum RustType {
    /// Plain copy type from `jni::sys` (or nothing, for void returns).
    Sys(&'static str),
    /// Reference wrapper from `jni::objects`, carrying the `'local` frame
    /// lifetime.
    Object(&'static str),
}

fn rust_type(ty: &JavaType) -> RustType {
    match ty {
        JavaType::Primitive(p) => RustType::Sys(c_primitive(*p)),
        JavaType::Object(name) => match name.as_str() {
            "java/lang/String" => RustType::Object("JString"),
            "java/lang/Class" => RustType::Object("JClass"),
            "java/lang/Throwable" => RustType::Object("JThrowable"),
            _ => RustType::Object("JObject"),
        },
        JavaType::Array(elem) => match elem.as_ref() {
            JavaType::Primitive(Primitive::Boolean) => RustType::Object("JBooleanArray"),
            JavaType::Primitive(Primitive::Byte) => RustType::Object("JByteArray"),
            JavaType::Primitive(Primitive::Char) => RustType::Object("JCharArray"),
            JavaType::Primitive(Primitive::Short) => RustType::Object("JShortArray"),
            JavaType::Primitive(Primitive::Int) => RustType::Object("JIntArray"),
            JavaType::Primitive(Primitive::Long) => RustType::Object("JLongArray"),
            JavaType::Primitive(Primitive::Float) => RustType::Object("JFloatArray"),
            JavaType::Primitive(Primitive::Double) => RustType::Object("JDoubleArray"),
            _ => RustType::Object("JObjectArray"),
        },
    }
}

fn render_rust_stubs(class: &NativeClass) -> String {
    let mut objects: BTreeSet<&'static str> = BTreeSet::new();
    let mut sys: BTreeSet<&'static str> = BTreeSet::new();

    for method in &class.methods {
        objects.insert(if method.is_static { "JClass" } else { "JObject" });
        for ty in method
            .descriptor
            .args
            .iter()
            .chain(std::iter::once(&method.descriptor.ret))
        {
            match rust_type(ty) {
                RustType::Sys("void") => {}
                RustType::Sys(name) => {
                    sys.insert(name);
                }
                RustType::Object(name) => {
                    objects.insert(name);
                }
            }
        }
    }

    let mut out = String::new();
    out.push_str("// DO NOT EDIT THIS FILE - it is machine generated\n");
    out.push_str(&format!(
        "// Native method stubs for class {}\n\n",
        class.binary_name
    ));

    if !objects.is_empty() {
        let list: Vec<&str> = objects.iter().copied().collect();
        out.push_str(&format!("use jni::objects::{{{}}};\n", list.join(", ")));
    }
    if !sys.is_empty() {
        let list: Vec<&str> = sys.iter().copied().collect();
        out.push_str(&format!("use jni::sys::{{{}}};\n", list.join(", ")));
    }
    out.push_str("use jni::JNIEnv;\n");

    for method in &class.methods {
        // Reference returns must borrow from the local frame, so those stubs
        // name the `'local` lifetime explicitly; primitive and void stubs
        // elide it.
        let returns_reference = matches!(rust_type(&method.descriptor.ret), RustType::Object(_));
        let lt = if returns_reference { "<'local>" } else { "" };
        let param_lt = if returns_reference { "<'local>" } else { "" };

        out.push('\n');
        out.push_str(&format!("/// Class:     {}\n", class.binary_name));
        out.push_str(&format!("/// Method:    {}\n", method.name));
        out.push_str(&format!("/// Signature: {}\n", method.descriptor));
        out.push_str("#[no_mangle]\n");
        out.push_str(&format!(
            "pub extern \"system\" fn {}{lt}(\n",
            class.symbol(method)
        ));
        out.push_str(&format!("    _env: JNIEnv{param_lt},\n"));
        if method.is_static {
            out.push_str(&format!("    _class: JClass{param_lt},\n"));
        } else {
            out.push_str(&format!("    _this: JObject{param_lt},\n"));
        }
        for (i, arg) in method.descriptor.args.iter().enumerate() {
            let ty = match rust_type(arg) {
                RustType::Sys(name) => name.to_string(),
                RustType::Object(name) => format!("{name}{param_lt}"),
            };
            out.push_str(&format!("    _arg{i}: {ty},\n"));
        }

        match rust_type(&method.descriptor.ret) {
            RustType::Sys("void") => out.push_str(") {\n"),
            RustType::Sys(name) => out.push_str(&format!(") -> {name} {{\n")),
            RustType::Object(name) => out.push_str(&format!(") -> {name}<'local> {{\n")),
        }
        out.push_str("    todo!()\n");
        out.push_str("}\n");
    }

    out
}
