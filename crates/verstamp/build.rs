use cargo_metadata::MetadataCommand;

fn main() {
    let metadata = MetadataCommand::new()
        .no_deps()
        .exec()
        .expect("Failed to read cargo metadata");

    let pkg_name = std::env::var("CARGO_PKG_NAME").expect("CARGO_PKG_NAME not set");

    // The package being built must carry a version; a manifest without one
    // fails the build here instead of shipping an unversioned artifact.
    let version = metadata
        .packages
        .iter()
        .find(|package| package.name == pkg_name)
        .map(|package| package.version.to_string())
        .expect("package version missing from cargo metadata");

    assert!(!version.is_empty(), "package version is empty");

    // Pass the version to the library as a compile-time constant
    println!("cargo:rustc-env=VERSTAMP_BUILD_VERSION={version}");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
