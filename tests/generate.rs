//! Tests for jheadgen generation which only check the contents of the
//! generated output, without compiling or loading it.

use std::fs;
use std::path::PathBuf;

use jheadgen::{Builder, Flavor};

/// Helper to set up a clean per-test output directory
fn setup_test_output(test_name: &str) -> PathBuf {
    let out_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR"))
        .join("jheadgen_tests")
        .join(test_name);

    let _ = fs::remove_dir_all(&out_dir);
    fs::create_dir_all(&out_dir).expect("Failed to create test output directory");

    out_dir
}

/// The header `javah` produced for GetEnv.java, byte for byte. The native
/// implementation in `testlib` defines exactly this symbol and signature.
const GET_ENV_HEADER: &str = "\
/* DO NOT EDIT THIS FILE - it is machine generated */
#include <jni.h>
/* Header for class GetEnv */

#ifndef _Included_GetEnv
#define _Included_GetEnv
#ifdef __cplusplus
extern \"C\" {
#endif
/*
 * Class:     GetEnv
 * Method:    nativeCall
 * Signature: ()V
 */
JNIEXPORT void JNICALL Java_GetEnv_nativeCall
  (JNIEnv *, jclass);

#ifdef __cplusplus
}
#endif
#endif
";

#[test]
fn get_env_header_is_exact() {
    let headers = Builder::new()
        .input_java("testlib/java/GetEnv.java")
        .generate()
        .expect("Failed to generate header");

    assert_eq!(headers.len(), 1);
    assert_eq!(headers.files()[0].file_name, "GetEnv.h");
    assert_eq!(headers.to_string(), GET_ENV_HEADER);
}

#[test]
fn regeneration_is_byte_identical() {
    let generate = || {
        Builder::new()
            .input_java("testlib/java/GetEnv.java")
            .input_java("tests/java/TestGC.java")
            .generate()
            .expect("Failed to generate headers")
            .to_string()
    };

    assert_eq!(generate(), generate());
}

#[test]
fn test_gc_declarations() {
    let headers = Builder::new()
        .input_java("tests/java/TestGC.java")
        .generate()
        .expect("Failed to generate header")
        .to_string();

    assert!(headers.contains("JNIEXPORT void JNICALL Java_TestGC_setVerboseOff\n  (JNIEnv *, jclass);"));
    assert!(headers.contains(
        "JNIEXPORT jobject JNICALL Java_TestGC_testgc\n  (JNIEnv *, jclass, jobject, jobject);"
    ));
    assert!(headers.contains(" * Signature: (Ljava/lang/Object;Ljava/lang/Object;)Ljava/lang/Object;"));
}

#[test]
fn overloads_use_long_symbols() {
    let headers = Builder::new()
        .input_java("tests/java/Overloads.java")
        .generate()
        .expect("Failed to generate header")
        .to_string();

    assert!(headers.contains("Java_com_example_Overloads_add__II"));
    assert!(headers.contains("Java_com_example_Overloads_add__DD"));
    // The unique method keeps the short form.
    assert!(headers.contains("JNICALL Java_com_example_Overloads_bump\n"));
    assert!(headers.contains("#ifndef _Included_com_example_Overloads"));
}

#[test]
fn signature_change_changes_the_declaration() {
    let generate = |source: &str| {
        Builder::new()
            .input_source("Drift.java", source)
            .generate()
            .expect("Failed to generate header")
            .to_string()
    };

    let before = generate("class Drift { static native int poke(int level); }");
    let after = generate("class Drift { static native long poke(String level); }");

    assert!(before.contains("JNIEXPORT jint JNICALL Java_Drift_poke\n  (JNIEnv *, jclass, jint);"));
    assert!(after.contains("JNIEXPORT jlong JNICALL Java_Drift_poke\n  (JNIEnv *, jclass, jstring);"));
    assert_ne!(before, after);
}

#[test]
fn rust_stubs_compilable_shape() {
    let stubs = Builder::new()
        .input_java("testlib/java/GetEnv.java")
        .flavor(Flavor::RustStubs)
        .generate()
        .expect("Failed to generate stubs")
        .to_string();

    assert!(stubs.contains("#[no_mangle]"));
    assert!(stubs.contains("pub extern \"system\" fn Java_GetEnv_nativeCall(\n"));
    assert!(stubs.contains("_env: JNIEnv"));
    assert!(stubs.contains("_class: JClass"));

    // The stub carries the same symbol the testlib cdylib actually exports.
    let implementation =
        fs::read_to_string("testlib/src/lib.rs").expect("Failed to read testlib source");
    assert!(implementation.contains("pub extern \"system\" fn Java_GetEnv_nativeCall("));
}

#[test]
fn write_to_files_uses_javah_naming() {
    let out_dir = setup_test_output("write_to_files");

    let headers = Builder::new()
        .input_java("testlib/java/GetEnv.java")
        .input_java("tests/java/Overloads.java")
        .generate()
        .expect("Failed to generate headers");

    headers
        .write_to_files(&out_dir)
        .expect("Failed to write headers");

    let get_env = fs::read_to_string(out_dir.join("GetEnv.h")).expect("GetEnv.h missing");
    assert_eq!(get_env, GET_ENV_HEADER);

    let overloads = fs::read_to_string(out_dir.join("com_example_Overloads.h"))
        .expect("com_example_Overloads.h missing");
    assert!(overloads.contains("Java_com_example_Overloads_add__II"));
}

#[test]
fn classes_without_natives_are_skipped() {
    let headers = Builder::new()
        .input_source("Plain.java", "class Plain { int x; void touch() {} }")
        .generate()
        .expect("Failed to generate");

    assert!(headers.is_empty());
}
