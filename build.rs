use std::env;
use std::fs;
use std::path::Path;

fn main() {
    copy_config();
}

/// Copies config.json to the target directory so the executable finds it.
fn copy_config() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let out_path = Path::new(&out_dir);
    let target_dir = out_path
        .ancestors()
        .nth(3) // OUT_DIR is <profile>/build/<pkg>-<hash>/out
        .expect("Could not find target directory");

    let config_src = Path::new("config.json");
    let config_dst = target_dir.join("config.json");

    println!("cargo:rerun-if-changed=config.json");
    if config_src.exists() {
        let _ = fs::copy(config_src, &config_dst);
    }
}
