//! Build tooling for M3dB plugins.
//!
//! Usage: cargo xtask bundle <package> [--release] [--install]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 || args[1] != "bundle" {
        print_usage();
        std::process::exit(1);
    }

    let package = &args[2];
    let release = args.iter().any(|a| a == "--release");
    let install = args.iter().any(|a| a == "--install");

    if let Err(e) = bundle(package, release, install) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: cargo xtask bundle <package> [--release] [--install]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  bundle    Build a plugin and package it as a VST2 plugin");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --release    Build in release mode");
    eprintln!("  --install    Install to the user VST2 plugin directory");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  cargo xtask bundle m3db --release --install");
}

fn bundle(package: &str, release: bool, install: bool) -> Result<(), String> {
    println!("Bundling {} (release: {})...", package, release);

    let workspace_root = get_workspace_root()?;

    println!("Building...");
    let mut cmd = Command::new("cargo");
    cmd.arg("build")
        .arg("-p")
        .arg(package)
        .current_dir(&workspace_root);

    if release {
        cmd.arg("--release");
    }

    let status = cmd.status().map_err(|e| format!("Failed to run cargo: {}", e))?;
    if !status.success() {
        return Err("Build failed".to_string());
    }

    let profile = if release { "release" } else { "debug" };
    let target_dir = workspace_root.join("target").join(profile);

    // Package names use hyphens, library file names underscores
    let lib_name = package.replace('-', "_");
    let library_path = target_dir.join(library_file_name(&lib_name));

    if !library_path.exists() {
        return Err(format!("Built library not found: {}", library_path.display()));
    }

    let plugin_name = to_plugin_name(package);
    let bundle_path = if cfg!(target_os = "macos") {
        bundle_macos(package, &plugin_name, &target_dir, &library_path)?
    } else {
        copy_library(&plugin_name, &target_dir, &library_path)?
    };

    if install {
        install_vst2(&bundle_path)?;
    }

    Ok(())
}

/// Platform file name of a cdylib called `lib_name`.
fn library_file_name(lib_name: &str) -> String {
    if cfg!(target_os = "macos") {
        format!("lib{}.dylib", lib_name)
    } else if cfg!(target_os = "windows") {
        format!("{}.dll", lib_name)
    } else {
        format!("lib{}.so", lib_name)
    }
}

/// Create `<Name>.vst` with the layout macOS hosts scan for.
fn bundle_macos(
    package: &str,
    plugin_name: &str,
    target_dir: &Path,
    library_path: &Path,
) -> Result<PathBuf, String> {
    let bundle_dir = target_dir.join(format!("{}.vst", plugin_name));
    let contents_dir = bundle_dir.join("Contents");
    let macos_dir = contents_dir.join("MacOS");
    let resources_dir = contents_dir.join("Resources");

    println!("Creating VST2 bundle at {}...", bundle_dir.display());

    if bundle_dir.exists() {
        fs::remove_dir_all(&bundle_dir).map_err(|e| format!("Failed to remove old bundle: {}", e))?;
    }

    fs::create_dir_all(&macos_dir).map_err(|e| format!("Failed to create MacOS dir: {}", e))?;
    fs::create_dir_all(&resources_dir)
        .map_err(|e| format!("Failed to create Resources dir: {}", e))?;

    fs::copy(library_path, macos_dir.join(plugin_name))
        .map_err(|e| format!("Failed to copy dylib: {}", e))?;

    fs::write(contents_dir.join("Info.plist"), create_info_plist(package, plugin_name))
        .map_err(|e| format!("Failed to write Info.plist: {}", e))?;

    fs::write(contents_dir.join("PkgInfo"), "BNDL????")
        .map_err(|e| format!("Failed to write PkgInfo: {}", e))?;

    // Ad-hoc code sign (required for modern macOS)
    println!("Code signing...");
    let sign_status = Command::new("codesign")
        .arg("--force")
        .arg("--deep")
        .arg("--sign")
        .arg("-")
        .arg(&bundle_dir)
        .status();

    match sign_status {
        Ok(status) if status.success() => println!("Code signing successful"),
        Ok(_) => println!("Warning: Code signing failed (plugin may not load)"),
        Err(e) => println!("Warning: Could not run codesign: {}", e),
    }

    println!("VST2 bundle created: {}", bundle_dir.display());
    Ok(bundle_dir)
}

/// On Linux and Windows a VST2 plugin is the bare library, renamed.
fn copy_library(plugin_name: &str, target_dir: &Path, library_path: &Path) -> Result<PathBuf, String> {
    let extension = library_path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| format!("Library has no extension: {}", library_path.display()))?;

    let out_dir = target_dir.join("vst2");
    fs::create_dir_all(&out_dir).map_err(|e| format!("Failed to create output dir: {}", e))?;

    let dest = out_dir.join(format!("{}.{}", plugin_name, extension));
    fs::copy(library_path, &dest).map_err(|e| format!("Failed to copy library: {}", e))?;

    println!("VST2 plugin created: {}", dest.display());
    Ok(dest)
}

fn get_workspace_root() -> Result<PathBuf, String> {
    let output = Command::new("cargo")
        .args(["locate-project", "--workspace", "--message-format=plain"])
        .output()
        .map_err(|e| format!("Failed to locate workspace: {}", e))?;

    if !output.status.success() {
        return Err("Failed to locate workspace".to_string());
    }

    let cargo_toml = String::from_utf8_lossy(&output.stdout);
    let path = PathBuf::from(cargo_toml.trim());
    path.parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| "Invalid workspace path".to_string())
}

/// "m3db" -> "M3db", "my-gain" -> "MyGain"
fn to_plugin_name(package: &str) -> String {
    package
        .split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

fn create_info_plist(package: &str, executable_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>CFBundleDevelopmentRegion</key>
    <string>English</string>
    <key>CFBundleExecutable</key>
    <string>{executable}</string>
    <key>CFBundleIdentifier</key>
    <string>com.pongasoft.{package}</string>
    <key>CFBundleInfoDictionaryVersion</key>
    <string>6.0</string>
    <key>CFBundleName</key>
    <string>{executable}</string>
    <key>CFBundlePackageType</key>
    <string>BNDL</string>
    <key>CFBundleSignature</key>
    <string>????</string>
    <key>CFBundleVersion</key>
    <string>{version}</string>
    <key>CFBundleShortVersionString</key>
    <string>{version}</string>
</dict>
</plist>
"#,
        executable = executable_name,
        package = package,
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// User-level VST2 directory for the current platform.
fn vst2_install_dir() -> Result<PathBuf, String> {
    if cfg!(target_os = "windows") {
        let common = std::env::var("COMMONPROGRAMFILES").map_err(|_| "COMMONPROGRAMFILES not set")?;
        Ok(PathBuf::from(common).join("VST2"))
    } else {
        let home = std::env::var("HOME").map_err(|_| "HOME not set")?;
        let home = PathBuf::from(home);
        if cfg!(target_os = "macos") {
            Ok(home.join("Library").join("Audio").join("Plug-Ins").join("VST"))
        } else {
            Ok(home.join(".vst"))
        }
    }
}

fn install_vst2(plugin_path: &Path) -> Result<(), String> {
    let install_dir = vst2_install_dir()?;
    fs::create_dir_all(&install_dir).map_err(|e| format!("Failed to create VST2 dir: {}", e))?;

    let file_name = plugin_path
        .file_name()
        .ok_or_else(|| format!("Invalid plugin path: {}", plugin_path.display()))?;
    let dest = install_dir.join(file_name);

    if dest.is_dir() {
        fs::remove_dir_all(&dest).map_err(|e| format!("Failed to remove old installation: {}", e))?;
    } else if dest.exists() {
        fs::remove_file(&dest).map_err(|e| format!("Failed to remove old installation: {}", e))?;
    }

    if plugin_path.is_dir() {
        copy_dir_all(plugin_path, &dest)?;
    } else {
        fs::copy(plugin_path, &dest).map_err(|e| format!("Failed to copy plugin: {}", e))?;
    }

    println!("VST2 installed to: {}", dest.display());
    Ok(())
}

fn copy_dir_all(src: &Path, dst: &Path) -> Result<(), String> {
    fs::create_dir_all(dst).map_err(|e| format!("Failed to create dir: {}", e))?;

    for entry in fs::read_dir(src).map_err(|e| format!("Failed to read dir: {}", e))? {
        let entry = entry.map_err(|e| format!("Failed to read entry: {}", e))?;
        let ty = entry
            .file_type()
            .map_err(|e| format!("Failed to get file type: {}", e))?;

        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)
                .map_err(|e| format!("Failed to copy file: {}", e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_name() {
        assert_eq!(to_plugin_name("m3db"), "M3db");
        assert_eq!(to_plugin_name("my-gain"), "MyGain");
    }

    #[test]
    fn test_library_file_name() {
        let name = library_file_name("m3db");
        assert!(name.contains("m3db"));
        assert!(name.ends_with(".dylib") || name.ends_with(".dll") || name.ends_with(".so"));
    }

    #[test]
    fn test_info_plist_names_executable() {
        let plist = create_info_plist("m3db", "M3db");
        assert!(plist.contains("<string>M3db</string>"));
        assert!(plist.contains("com.pongasoft.m3db"));
        assert!(plist.contains("<string>BNDL</string>"));
    }
}
