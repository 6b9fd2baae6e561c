use std::env;

fn main() {
    let target = env::var("TARGET").unwrap_or_default();

    if target.contains("android") {
        // __android_log_write lives in liblog
        println!("cargo:rustc-link-lib=log");
    }
}
