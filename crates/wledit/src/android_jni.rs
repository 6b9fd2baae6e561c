use jni::{
    JNIEnv, JavaVM,
    objects::{JClass, JString},
    sys::{JNI_FALSE, JNI_TRUE, JNI_VERSION_1_6, jboolean, jint, jstring},
};
use std::ffi::c_void;
use std::sync::Once;

use crate::session;

// Static initialization for logging
static INIT: Once = Once::new();

fn max_level() -> log::LevelFilter {
    if cfg!(feature = "debug-logs") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Initialize logging and panic hook
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(target_os = "android")]
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(max_level())
                .with_tag("wledit"),
        );
        #[cfg(not(target_os = "android"))]
        log::set_max_level(max_level());

        std::panic::set_hook(Box::new(|info| {
            let payload = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "Unknown panic".to_string());

            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown".to_string());

            log::error!("PANIC at {}: {}", location, payload);
        }));
    });
}

fn to_jboolean(value: bool) -> jboolean {
    if value { JNI_TRUE } else { JNI_FALSE }
}

/// Called by the VM when `System.loadLibrary("wledit")` loads us.
#[unsafe(no_mangle)]
pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
    init_logging();
    log::info!("wledit native library loaded");
    JNI_VERSION_1_6
}

/// Create the editor instance.
///
/// Called from MainActivity.onCreate()
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_nativeInit(_env: JNIEnv, _class: JClass) {
    init_logging();
    log::info!("nativeInit called");
    session::init();
}

/// Insert text at the cursor. A null string is ignored.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_insertText(
    mut env: JNIEnv,
    _class: JClass,
    text: JString,
) {
    if text.is_null() {
        log::warn!("insertText called with null");
        return;
    }

    let text: String = match env.get_string(&text) {
        Ok(s) => s.into(),
        Err(e) => {
            log::error!("Failed to get insertText string: {:?}", e);
            return;
        }
    };

    session::insert_text(&text);
}

/// Return the whole buffer. Empty before nativeInit.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_getText(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    match env.new_string(session::text()) {
        Ok(s) => s.into_raw(),
        Err(e) => {
            log::error!("Failed to create text string: {:?}", e);
            std::ptr::null_mut()
        }
    }
}

/// Delete the character before the cursor.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_deleteChar(_env: JNIEnv, _class: JClass) {
    session::delete_char();
}

/// Move the cursor to a character index.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_setCursor(
    _env: JNIEnv,
    _class: JClass,
    position: jint,
) {
    session::set_cursor(position);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_getCursor(
    _env: JNIEnv,
    _class: JClass,
) -> jint {
    session::cursor()
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_undo(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    to_jboolean(session::undo())
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_redo(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    to_jboolean(session::redo())
}

/// Edit > Select All
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_selectAll(_env: JNIEnv, _class: JClass) {
    session::select_all();
}

/// Edit > Copy
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_copy(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    to_jboolean(session::copy())
}

/// Edit > Cut
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_cut(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    to_jboolean(session::cut())
}

/// Edit > Paste
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_paste(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    to_jboolean(session::paste())
}

/// Hardware key event
///
/// # Arguments
/// * `key_code` - The Android KeyCode
/// * `unicode` - The unicode character (0 if none)
/// * `ctrl` - Whether Ctrl was held
///
/// # Returns
/// Whether the WordStar keymap consumed the key
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_keyEvent(
    _env: JNIEnv,
    _class: JClass,
    key_code: jint,
    unicode: jint,
    ctrl: jboolean,
) -> jboolean {
    log::debug!(
        "keyEvent: key_code={}, unicode={}, ctrl={}",
        key_code,
        unicode,
        ctrl
    );
    to_jboolean(session::key_event(key_code, unicode, ctrl != JNI_FALSE))
}

/// Release the editor.
///
/// Called from MainActivity.onDestroy()
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_wleditor_app_MainActivity_nativeDestroy(
    _env: JNIEnv,
    _class: JClass,
) {
    log::info!("nativeDestroy called");
    session::shutdown();
}
