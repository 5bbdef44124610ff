//! Intermediate representation of classes that declare native methods.
//!
//! This is the hand-off point between the Java source front end and the
//! output back ends: just enough of a class to name every export symbol and
//! render every declaration.

use crate::mangle;
use crate::signature::MethodDescriptor;

/// A Java class and the `native` methods it declares.
#[derive(Debug, Clone)]
pub struct NativeClass {
    /// Dotted binary name (e.g. "com.example.GetEnv", or "GetEnv" for the
    /// default package)
    pub binary_name: String,
    /// Package parts, empty for the default package
    pub package: Vec<String>,
    /// Simple class name (e.g. "GetEnv")
    pub simple_name: String,
    /// Native methods in declaration order
    pub methods: Vec<NativeMethod>,
}

/// One `native` method declaration.
#[derive(Debug, Clone)]
pub struct NativeMethod {
    /// Java method name
    pub name: String,
    /// Parsed JNI method descriptor
    pub descriptor: MethodDescriptor,
    /// Whether the method is static. Static natives receive a `jclass`
    /// second parameter, instance natives a `jobject`.
    pub is_static: bool,
}

impl NativeClass {
    /// Create an empty class for the given package and simple name.
    pub fn new(package: Vec<String>, simple_name: impl Into<String>) -> Self {
        let simple_name = simple_name.into();
        let binary_name = if package.is_empty() {
            simple_name.clone()
        } else {
            format!("{}.{}", package.join("."), simple_name)
        };
        NativeClass {
            binary_name,
            package,
            simple_name,
            methods: Vec::new(),
        }
    }

    /// The mangled class component, used in symbols, include guards and
    /// generated file names.
    pub fn mangled_name(&self) -> String {
        mangle::mangle(&self.binary_name)
    }

    /// Whether more than one native method in this class shares `name`.
    pub fn is_overloaded(&self, name: &str) -> bool {
        self.methods.iter().filter(|m| m.name == name).count() > 1
    }

    /// The export symbol for one of this class's methods. Overloaded names
    /// get the long form with the mangled argument suffix.
    pub fn symbol(&self, method: &NativeMethod) -> String {
        if self.is_overloaded(&method.name) {
            mangle::long_symbol(&self.binary_name, &method.name, &method.descriptor)
        } else {
            mangle::short_symbol(&self.binary_name, &method.name)
        }
    }
}
