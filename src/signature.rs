//! Parsing and display of JNI type descriptors.
//!
//! A descriptor is the compact type encoding the JVM uses in class files and
//! in native-method resolution: `I` is `int`, `Ljava/lang/String;` is
//! `java.lang.String`, `[D` is `double[]`, and a whole method is written as
//! `(Ljava/lang/String;I)V`. Parsing is structured so that printing a parsed
//! descriptor reproduces the input exactly.

use std::{fmt, str::FromStr};

use combine::{
    between, choice, many, many1, parser, satisfy, token, ParseError, Parser, StdParseResult,
    Stream,
};

use crate::errors::Error;

/// A primitive Java type. These are the things that can be represented
/// without an object reference.
#[allow(missing_docs)]
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Primitive {
    Boolean, // Z
    Byte,    // B
    Char,    // C
    Short,   // S
    Int,     // I
    Long,    // J
    Float,   // F
    Double,  // D
    Void,    // V
}

impl Primitive {
    /// The single-character descriptor code for this primitive.
    pub fn code(self) -> char {
        match self {
            Primitive::Boolean => 'Z',
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Short => 'S',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Float => 'F',
            Primitive::Double => 'D',
            Primitive::Void => 'V',
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Any Java field type: a primitive, a class reference holding the
/// slash-separated binary name, or an array of another type.
#[allow(missing_docs)]
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum JavaType {
    Primitive(Primitive),
    Object(String),
    Array(Box<JavaType>),
}

impl FromStr for JavaType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parser(field_type)
            .parse(s)
            .map_err(|e| Error::ParseFailed(format!("'{s}': {e}")))
            .map(|(ty, tail)| {
                if tail.is_empty() {
                    Ok(ty)
                } else {
                    Err(Error::ParseFailed(format!(
                        "trailing input '{tail}' in '{s}'"
                    )))
                }
            })?
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            JavaType::Primitive(ref ty) => ty.fmt(f),
            JavaType::Object(ref name) => write!(f, "L{name};"),
            JavaType::Array(ref elem) => write!(f, "[{elem}"),
        }
    }
}

/// A parsed method descriptor such as `(Ljava/lang/String;I)V`.
///
/// Unlike a bare [`JavaType`], the argument list here is fully typed because
/// header generation has to name each parameter type in the output.
#[allow(missing_docs)]
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MethodDescriptor {
    pub args: Vec<JavaType>,
    pub ret: JavaType,
}

impl MethodDescriptor {
    /// The argument segment of the descriptor, without the surrounding
    /// parentheses or the return type. This is the part that gets mangled
    /// into the long form of an overloaded symbol.
    pub fn args_descriptor(&self) -> String {
        let mut out = String::new();
        for arg in &self.args {
            out.push_str(&arg.to_string());
        }
        out
    }
}

impl FromStr for MethodDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parser(method_descriptor)
            .parse(s)
            .map_err(|e| Error::ParseFailed(format!("'{s}': {e}")))
            .map(|(desc, tail)| {
                if tail.is_empty() {
                    Ok(desc)
                } else {
                    Err(Error::ParseFailed(format!(
                        "trailing input '{tail}' in '{s}'"
                    )))
                }
            })?
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for arg in &self.args {
            arg.fmt(f)?;
        }
        write!(f, "){}", self.ret)
    }
}

fn primitive<S>(input: &mut S) -> StdParseResult<Primitive, S>
where
    S: Stream<Token = char>,
    S::Error: ParseError<char, S::Range, S::Position>,
{
    choice((
        token('Z').map(|_| Primitive::Boolean),
        token('B').map(|_| Primitive::Byte),
        token('C').map(|_| Primitive::Char),
        token('S').map(|_| Primitive::Short),
        token('I').map(|_| Primitive::Int),
        token('J').map(|_| Primitive::Long),
        token('F').map(|_| Primitive::Float),
        token('D').map(|_| Primitive::Double),
        token('V').map(|_| Primitive::Void),
    ))
    .parse_stream(input)
    .into()
}

fn object<S>(input: &mut S) -> StdParseResult<JavaType, S>
where
    S: Stream<Token = char>,
    S::Error: ParseError<char, S::Range, S::Position>,
{
    between(
        token('L'),
        token(';'),
        many1(satisfy(|c| !matches!(c, ';' | '(' | ')'))),
    )
    .map(JavaType::Object)
    .parse_stream(input)
    .into()
}

fn field_type<S>(input: &mut S) -> StdParseResult<JavaType, S>
where
    S: Stream<Token = char>,
    S::Error: ParseError<char, S::Range, S::Position>,
{
    choice((
        parser(primitive).map(JavaType::Primitive),
        parser(object),
        (token('['), parser(field_type)).map(|(_, elem)| JavaType::Array(Box::new(elem))),
    ))
    .parse_stream(input)
    .into()
}

fn method_descriptor<S>(input: &mut S) -> StdParseResult<MethodDescriptor, S>
where
    S: Stream<Token = char>,
    S::Error: ParseError<char, S::Range, S::Position>,
{
    (
        between(token('('), token(')'), many(parser(field_type))),
        parser(field_type),
    )
        .map(|(args, ret)| MethodDescriptor { args, ret })
        .parse_stream(input)
        .into()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn round_trips() {
        let inputs = [
            "()V",
            "(Ljava/lang/String;I)V",
            "(Ljava/lang/Object;Ljava/lang/Object;)Ljava/lang/Object;",
            "([[I[Ljava/lang/String;)J",
        ];

        for each in inputs {
            let desc = each.parse::<MethodDescriptor>().unwrap();
            assert_eq!(desc.to_string(), each);
        }
    }

    #[test]
    fn field_round_trips() {
        for each in ["Z", "Ljava/lang/Thread;", "[[D"] {
            let ty = each.parse::<JavaType>().unwrap();
            assert_eq!(ty.to_string(), each);
        }
    }

    #[test]
    fn structure_of_parsed_method() {
        let desc = "(Ljava/lang/String;I)V".parse::<MethodDescriptor>().unwrap();
        assert_eq!(desc.args.len(), 2);
        assert_eq!(desc.args[0], JavaType::Object("java/lang/String".into()));
        assert_eq!(desc.args[1], JavaType::Primitive(Primitive::Int));
        assert_eq!(desc.ret, JavaType::Primitive(Primitive::Void));
    }

    #[test]
    fn unterminated_object_is_rejected() {
        let err = "()Ljava/lang/List".parse::<MethodDescriptor>().unwrap_err();
        assert!(err.to_string().contains("Ljava/lang/List"));
    }

    #[test]
    fn trailing_input_is_rejected() {
        assert_matches!(
            "()VV".parse::<MethodDescriptor>(),
            Err(Error::ParseFailed(_))
        );
        assert_matches!("IZ".parse::<JavaType>(), Err(Error::ParseFailed(_)));
    }
}
