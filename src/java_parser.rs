//! Extraction of `native` method declarations from Java source text.
//!
//! This front end does what `javah` did with `.java` inputs: it needs the
//! package, the name of the top-level type and the shape of every `native`
//! declaration, nothing more. It therefore scans the source text directly
//! instead of driving a Java compiler, which keeps the tool standalone.
//!
//! The scanner first scrubs comments, string and character literals and
//! generic argument lists (native methods are declared post-erasure anyway),
//! then walks the remaining tokens.

use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::{Error, Result};
use crate::model::{NativeClass, NativeMethod};
use crate::signature::{JavaType, MethodDescriptor, Primitive};

/// Parse a `.java` file into the intermediate model.
pub fn parse_java_file(path: &Path) -> Result<NativeClass> {
    let text = fs::read_to_string(path)?;
    parse_java_source(path, &text)
}

/// Parse Java source text. `origin` is only used in error messages.
pub fn parse_java_source(origin: &Path, text: &str) -> Result<NativeClass> {
    let scrubbed = erase_generics(&scrub(text));
    let package = parse_package(&scrubbed);
    let simple_name =
        find_type_name(&scrubbed).ok_or_else(|| Error::NoClass(origin.to_path_buf()))?;
    let mut class = NativeClass::new(package, simple_name);

    for (depth, decl) in native_declarations(&scrubbed) {
        // Natives directly in the top-level class body sit at brace depth 1.
        // Anything deeper belongs to a nested type and would silently get
        // the wrong symbol if attributed to the top-level class.
        if depth != 1 {
            return Err(Error::ParseJava {
                file: origin.to_path_buf(),
                message: format!(
                    "native method in a nested type cannot be attributed to {}",
                    class.binary_name
                ),
            });
        }
        let method =
            parse_native_declaration(decl, &class.package).map_err(|e| Error::ParseJava {
                file: origin.to_path_buf(),
                message: format!("{e} in `{}`", decl.split_whitespace().collect::<Vec<_>>().join(" ")),
            })?;
        debug!(
            "found native method {}.{}{}",
            class.binary_name, method.name, method.descriptor
        );
        class.methods.push(method);
    }

    Ok(class)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$')
}

/// Replace comments and string/character literals with spaces, preserving
/// line structure so later slicing never lands inside a literal.
fn scrub(text: &str) -> String {
    enum State {
        Code,
        LineComment,
        BlockComment,
        Str,
        Chr,
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Code;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    out.push_str("  ");
                    state = State::BlockComment;
                }
                '"' => {
                    out.push(' ');
                    state = State::Str;
                }
                '\'' => {
                    out.push(' ');
                    state = State::Chr;
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    out.push('\n');
                    state = State::Code;
                } else {
                    out.push(' ');
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("  ");
                    state = State::Code;
                } else if c == '\n' {
                    out.push('\n');
                } else {
                    out.push(' ');
                }
            }
            State::Str => {
                if c == '\\' {
                    chars.next();
                    out.push_str("  ");
                } else if c == '"' {
                    out.push(' ');
                    state = State::Code;
                } else {
                    out.push(' ');
                }
            }
            State::Chr => {
                if c == '\\' {
                    chars.next();
                    out.push_str("  ");
                } else if c == '\'' {
                    out.push(' ');
                    state = State::Code;
                } else {
                    out.push(' ');
                }
            }
        }
    }

    out
}

/// Blank out balanced `<...>` spans that look like generic argument lists.
/// Anything else containing `<` (comparisons, shifts) is left alone.
fn erase_generics(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = chars.clone();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '<' {
            if let Some(end) = generic_span_end(&chars, i) {
                for c in out[i..=end].iter_mut() {
                    if *c != '\n' {
                        *c = ' ';
                    }
                }
                i = end + 1;
                continue;
            }
        }
        i += 1;
    }

    out.into_iter().collect()
}

fn generic_span_end(chars: &[char], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &c) in chars.iter().enumerate().skip(start) {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            c if is_ident_char(c)
                || matches!(c, '.' | ',' | '?' | '[' | ']' | '&' | ' ' | '\t' | '\r' | '\n') => {}
            _ => return None,
        }
    }
    None
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(is_ident_char(c) || c == '.'))
        .filter(|w| !w.is_empty())
}

fn parse_package(text: &str) -> Vec<String> {
    let mut iter = words(text);
    while let Some(word) = iter.next() {
        match word {
            "package" => {
                return iter
                    .next()
                    .map(|name| name.split('.').map(str::to_string).collect())
                    .unwrap_or_default();
            }
            // The package declaration must precede the type declaration.
            "class" | "interface" | "enum" | "record" => return Vec::new(),
            _ => {}
        }
    }
    Vec::new()
}

fn find_type_name(text: &str) -> Option<String> {
    let mut iter = words(text);
    while let Some(word) = iter.next() {
        if matches!(word, "class" | "interface" | "enum" | "record") {
            return iter.next().map(str::to_string);
        }
    }
    None
}

/// Slice out every statement containing the `native` modifier, from the
/// preceding `;`/`{`/`}` up to (excluding) the terminating `;`, paired with
/// the brace depth at which the declaration sits.
fn native_declarations(text: &str) -> Vec<(usize, &str)> {
    let mut decls = Vec::new();
    let mut search = 0;

    while let Some(pos) = text[search..].find("native") {
        let at = search + pos;
        search = at + "native".len();

        let boundary_before = text[..at].chars().next_back().map_or(true, |c| !is_ident_char(c));
        let boundary_after = text[search..].chars().next().is_some_and(|c| !is_ident_char(c));
        if !(boundary_before && boundary_after) {
            continue;
        }

        let start = text[..at].rfind([';', '{', '}']).map_or(0, |p| p + 1);
        let Some(end) = text[at..].find(';') else {
            continue;
        };
        let decl = &text[start..at + end];
        if decl.contains('(') && decl.contains(')') {
            decls.push((brace_depth(&text[..at]), decl));
        }
    }

    decls
}

fn brace_depth(text: &str) -> usize {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

const METHOD_MODIFIERS: [&str; 9] = [
    "public",
    "protected",
    "private",
    "abstract",
    "static",
    "final",
    "synchronized",
    "native",
    "strictfp",
];

fn parse_native_declaration(decl: &str, package: &[String]) -> Result<NativeMethod> {
    let malformed = || Error::ParseFailed("malformed native method declaration".to_string());

    let (head, rest) = decl.split_once('(').ok_or_else(malformed)?;
    let (params, _throws) = rest.split_once(')').ok_or_else(malformed)?;

    let mut head_tokens: Vec<&str> = head
        .split_whitespace()
        .filter(|t| !t.starts_with('@'))
        .collect();
    let name = head_tokens.pop().ok_or_else(malformed)?;
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(malformed());
    }

    let is_static = head_tokens.contains(&"static");
    let ret_src: String = head_tokens
        .iter()
        .filter(|t| !METHOD_MODIFIERS.contains(t))
        .copied()
        .collect();
    if ret_src.is_empty() {
        return Err(malformed());
    }

    let ret = java_type_from_source(&ret_src, package)?;

    let mut args = Vec::new();
    for param in params.split(',') {
        if param.trim().is_empty() {
            continue;
        }
        // Varargs are arrays after erasure.
        let param = param.replace("...", "[]");
        let mut tokens: Vec<&str> = param
            .split_whitespace()
            .filter(|t| !t.starts_with('@') && *t != "final")
            .collect();
        let mut arg_name = tokens.pop().ok_or_else(malformed)?;

        // C-style array brackets attached to the name count toward the type.
        let mut trailing_dims = 0usize;
        while let Some(stripped) = arg_name.strip_suffix("[]") {
            trailing_dims += 1;
            arg_name = stripped;
        }
        if tokens.is_empty() {
            return Err(malformed());
        }

        let mut ty_src: String = tokens.concat();
        for _ in 0..trailing_dims {
            ty_src.push_str("[]");
        }
        args.push(java_type_from_source(&ty_src, package)?);
    }

    Ok(NativeMethod {
        name: name.to_string(),
        descriptor: MethodDescriptor { args, ret },
        is_static,
    })
}

/// `java.lang` names that may appear unqualified in any compilation unit.
/// A full resolver would honor imports; anything else unqualified is taken
/// to live in the current package, which is what `javah` users relied on
/// for test classes like these.
const JAVA_LANG_SHORTHANDS: [(&str, &str); 8] = [
    ("String", "java/lang/String"),
    ("Object", "java/lang/Object"),
    ("Class", "java/lang/Class"),
    ("Throwable", "java/lang/Throwable"),
    ("Exception", "java/lang/Exception"),
    ("Runnable", "java/lang/Runnable"),
    ("Thread", "java/lang/Thread"),
    ("CharSequence", "java/lang/CharSequence"),
];

fn primitive_from_source(name: &str) -> Option<Primitive> {
    Some(match name {
        "boolean" => Primitive::Boolean,
        "byte" => Primitive::Byte,
        "char" => Primitive::Char,
        "short" => Primitive::Short,
        "int" => Primitive::Int,
        "long" => Primitive::Long,
        "float" => Primitive::Float,
        "double" => Primitive::Double,
        "void" => Primitive::Void,
        _ => return None,
    })
}

fn java_type_from_source(src: &str, package: &[String]) -> Result<JavaType> {
    let mut dims = 0usize;
    let mut base = src.trim();
    while let Some(stripped) = base.strip_suffix("[]") {
        dims += 1;
        base = stripped.trim_end();
    }
    if base.is_empty() {
        return Err(Error::UnknownType(src.to_string()));
    }

    let ty = if let Some(p) = primitive_from_source(base) {
        if p == Primitive::Void && dims > 0 {
            return Err(Error::UnknownType(src.to_string()));
        }
        JavaType::Primitive(p)
    } else if let Some((_, binary)) = JAVA_LANG_SHORTHANDS.iter().find(|(n, _)| *n == base) {
        JavaType::Object((*binary).to_string())
    } else if base.contains('.') {
        if base.split('.').any(|seg| seg.is_empty() || !seg.chars().all(is_ident_char)) {
            return Err(Error::UnknownType(src.to_string()));
        }
        JavaType::Object(base.replace('.', "/"))
    } else if base.chars().all(is_ident_char) {
        if package.is_empty() {
            JavaType::Object(base.to_string())
        } else {
            JavaType::Object(format!("{}/{}", package.join("/"), base))
        }
    } else {
        return Err(Error::UnknownType(src.to_string()));
    };

    Ok((0..dims).fold(ty, |elem, _| JavaType::Array(Box::new(elem))))
}
