//! Native side of `java/GetEnv.java`.
//!
//! The exported symbol name and signature are exactly what the header
//! generated from that source declares; if either drifts, the JVM fails the
//! binding with `UnsatisfiedLinkError` on the first call.

use jni::objects::JClass;
use jni::JNIEnv;

/// Class:     GetEnv
/// Method:    nativeCall
/// Signature: ()V
///
/// Fetches the `JavaVM` from the calling thread's env and asks it back for
/// the current thread's env, which is the round trip the Java test drives.
/// Failures are thrown back into the JVM rather than panicking across the
/// FFI boundary.
#[no_mangle]
pub extern "system" fn Java_GetEnv_nativeCall(mut env: JNIEnv, _class: JClass) {
    let vm = match env.get_java_vm() {
        Ok(vm) => vm,
        Err(e) => {
            let _ = env.throw_new(
                "java/lang/IllegalStateException",
                format!("GetJavaVM failed: {e}"),
            );
            return;
        }
    };

    if let Err(e) = vm.get_env() {
        let _ = env.throw_new(
            "java/lang/IllegalStateException",
            format!("GetEnv on the JavaVM failed: {e}"),
        );
    }
}
