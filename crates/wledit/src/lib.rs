// WLEditor native library - loaded by MainActivity via System.loadLibrary("wledit")

// Global editor instance shared by the JNI entry points
pub mod session;

// Android KeyEvent code mapping
pub mod keycodes;

// JNI exports for com.wleditor.app.MainActivity
pub mod android_jni;
