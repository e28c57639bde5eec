use rustc_version::{version_meta, Channel};

// NOTE: Activates the 'nightly' feature described in the Cargo.toml file, so the `Parser` trait
//       can carry on_unimplemented messages when built with a nightly toolchain.
fn main() {
    if matches!(version_meta(), Ok(meta) if meta.channel == Channel::Nightly) {
        println!("cargo:rustc-cfg=feature=\"nightly\"");
    }
}
