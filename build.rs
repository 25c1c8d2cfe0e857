use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");

    let package_name = package_name(&Path::new(&manifest_dir).join("Cargo.toml"));
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let git_hash = short_git_hash().unwrap_or_else(|| "unknown".to_string());

    let generated = format!(
        "pub const PACKAGE_NAME: &str = {package_name:?};\n\
         pub const BUILD_TIME: &str = {build_time:?};\n\
         pub const GIT_HASH: &str = {git_hash:?};\n"
    );
    fs::write(Path::new(&out_dir).join("version.rs"), generated)
        .expect("version.rs should be writable in OUT_DIR");
}

fn package_name(manifest: &Path) -> String {
    fs::read_to_string(manifest)
        .ok()
        .and_then(|text| text.parse::<toml::Table>().ok())
        .and_then(|table| {
            table
                .get("package")?
                .get("name")?
                .as_str()
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown".to_string())
}

fn short_git_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string())
}
