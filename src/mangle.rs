//! Mangling of Java method references into JNI export symbol names.
//!
//! The JVM resolves a `native` method by looking up a symbol derived from
//! the class and method names: `Java_` + mangled class + `_` + mangled
//! method. Within a component, `.` and `/` become `_`, while `_`, `;` and
//! `[` are escaped as `_1`, `_2` and `_3`. Any other character outside
//! `[A-Za-z0-9]` is escaped as `_0xxxx` with four lowercase hex digits of
//! its UTF-16 code unit. When a class declares overloaded native methods,
//! each symbol additionally carries `__` followed by the mangled argument
//! segment of the method descriptor.
//!
//! These transforms are pure string functions with no state, so regenerating
//! a symbol from unchanged input always yields identical output.

use crate::signature::MethodDescriptor;

/// Escape one symbol component (a class binary name, a method name, or the
/// argument segment of a descriptor) per the JNI resolution rules.
pub fn mangle(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for unit in component.encode_utf16() {
        match u8::try_from(unit).ok().map(char::from) {
            Some(c) if c.is_ascii_alphanumeric() => out.push(c),
            Some('.') | Some('/') => out.push('_'),
            Some('_') => out.push_str("_1"),
            Some(';') => out.push_str("_2"),
            Some('[') => out.push_str("_3"),
            // Everything else, including unpaired surrogates, is escaped by
            // code unit.
            _ => out.push_str(&format!("_0{unit:04x}")),
        }
    }
    out
}

/// The short export symbol: `Java_<class>_<method>`.
///
/// This is the form the JVM tries first and the only form `javah` ever
/// declares for a method whose name is unique within its class.
pub fn short_symbol(class: &str, method: &str) -> String {
    format!("Java_{}_{}", mangle(class), mangle(method))
}

/// The long export symbol that disambiguates overloads:
/// `Java_<class>_<method>__<mangled args>`.
pub fn long_symbol(class: &str, method: &str, descriptor: &MethodDescriptor) -> String {
    format!(
        "{}__{}",
        short_symbol(class, method),
        mangle(&descriptor.args_descriptor())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unqualified_class() {
        assert_eq!(short_symbol("GetEnv", "nativeCall"), "Java_GetEnv_nativeCall");
    }

    #[test]
    fn package_dots_become_underscores() {
        assert_eq!(
            short_symbol("com.example.Counter", "increment"),
            "Java_com_example_Counter_increment"
        );
        // Slash-separated names mangle identically.
        assert_eq!(
            short_symbol("com/example/Counter", "increment"),
            "Java_com_example_Counter_increment"
        );
    }

    #[test]
    fn underscores_are_escaped() {
        assert_eq!(
            short_symbol("my_pkg.Widget", "do_thing"),
            "Java_my_1pkg_Widget_do_1thing"
        );
    }

    #[test]
    fn inner_class_dollar_is_escaped() {
        assert_eq!(
            short_symbol("com.example.Outer$Inner", "poke"),
            "Java_com_example_Outer_00024Inner_poke"
        );
    }

    #[test]
    fn non_ascii_is_escaped_by_code_unit() {
        // U+00E9 LATIN SMALL LETTER E WITH ACUTE
        assert_eq!(mangle("caf\u{e9}"), "caf_000e9");
        // Supplementary-plane characters produce two escaped surrogates.
        assert_eq!(mangle("\u{10400}"), "_0d801_0dc00");
    }

    #[test]
    fn long_form_appends_mangled_arguments() {
        let desc: MethodDescriptor = "(Ljava/lang/String;I)V".parse().unwrap();
        assert_eq!(
            long_symbol("com.example.Greeter", "greet", &desc),
            "Java_com_example_Greeter_greet__Ljava_lang_String_2I"
        );

        let empty: MethodDescriptor = "()V".parse().unwrap();
        assert_eq!(
            long_symbol("GetEnv", "nativeCall", &empty),
            "Java_GetEnv_nativeCall__"
        );
    }
}
