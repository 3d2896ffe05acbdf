//! Validation of the point shader with naga.
//!
//! Catches WGSL errors without a GPU, and checks that the uniform structs
//! declared in WGSL have the same sizes as their Rust counterparts.

use galaxy::shader::{
    CameraUniforms, MaterialUniforms, SHADER_SOURCE, UPSCALE_SHADER_SOURCE,
};
use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

fn parse_source(source: &str) -> naga::Module {
    match wgsl::parse_str(source) {
        Ok(module) => module,
        Err(err) => panic!("{}", err.emit_to_string(source)),
    }
}

fn parse() -> naga::Module {
    parse_source(SHADER_SOURCE)
}

#[test]
fn test_points_shader_validates() {
    let module = parse();
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    if let Err(err) = validator.validate(&module) {
        panic!("validation failed: {}", err);
    }
}

#[test]
fn test_entry_points_present() {
    let module = parse();
    let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"vs_main"));
    assert!(names.contains(&"fs_main"));
}

#[test]
fn test_uniform_layouts_match() {
    let module = parse();
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    validator.validate(&module).unwrap();

    let size_of = |name: &str| {
        module
            .types
            .iter()
            .find(|(_, ty)| ty.name.as_deref() == Some(name))
            .map(|(_, ty)| ty.inner.size(module.to_ctx()))
            .unwrap_or_else(|| panic!("struct {} not found", name))
    };

    assert_eq!(size_of("Camera") as usize, std::mem::size_of::<CameraUniforms>());
    assert_eq!(size_of("Material") as usize, std::mem::size_of::<MaterialUniforms>());
}

#[test]
fn test_upscale_shader_validates() {
    let module = parse_source(UPSCALE_SHADER_SOURCE);
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    if let Err(err) = validator.validate(&module) {
        panic!("validation failed: {}", err);
    }
    let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["vs_main", "fs_main"]);
}
