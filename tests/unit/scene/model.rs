use super::*;

#[test]
fn builtin_manifest_has_every_mesh() {
    let manifest = ModelManifest::builtin();
    manifest.validate().unwrap();
    for name in MeshName::ALL {
        assert!(
            manifest.meshes.iter().any(|m| m.name == name),
            "missing {name}"
        );
    }
}

#[test]
fn load_scales_height_to_visual_height() {
    let tracker = ResourceTracker::new();
    let model = CardModel::from_manifest(&ModelManifest::builtin(), &tracker).unwrap();
    let size = model.scaled_size();
    assert!((size.y - CARD_VISUAL_HEIGHT).abs() < 1e-4);
    assert!((size.x / size.y - 85.6 / 53.98).abs() < 1e-3);
    assert_eq!(tracker.live_materials(), MeshName::ALL.len());
}

#[test]
fn world_matrix_centers_the_model() {
    let tracker = ResourceTracker::new();
    let manifest = ModelManifest {
        meshes: vec![MeshDef {
            name: MeshName::CardBase,
            center: [10.0, 20.0],
            size: [4.0, 2.0],
            z: 0.0,
            facing: Facing::Front,
            color: None,
            render_order: 0,
            visible: true,
        }],
    };
    let model = CardModel::from_manifest(&manifest, &tracker).unwrap();
    let origin = model.world_matrix().transform_point3(Vec3::new(10.0, 20.0, 0.0));
    assert!(origin.length() < 1e-5);
    let corner = model.world_matrix().transform_point3(Vec3::new(12.0, 21.0, 0.0));
    assert!((corner.y - CARD_VISUAL_HEIGHT / 2.0).abs() < 1e-5);
}

#[test]
fn manifest_without_card_base_is_rejected() {
    let json = r#"{"meshes":[{"name":"Chip","center":[0,0],"size":[1,1],"z":0}]}"#;
    let err = ModelManifest::from_json(json).unwrap_err();
    assert!(err.to_string().contains("CardBase"));
}

#[test]
fn duplicate_and_degenerate_meshes_are_rejected() {
    let dup = r#"{"meshes":[
        {"name":"CardBase","center":[0,0],"size":[1,1],"z":0},
        {"name":"CardBase","center":[0,0],"size":[1,1],"z":0}]}"#;
    assert!(ModelManifest::from_json(dup).is_err());
    let flat = r#"{"meshes":[{"name":"CardBase","center":[0,0],"size":[0,1],"z":0}]}"#;
    assert!(ModelManifest::from_json(flat).is_err());
}

#[test]
fn manifest_json_defaults() {
    let json = r#"{"meshes":[{"name":"CardBase","center":[0,0],"size":[2,1],"z":0.1}]}"#;
    let manifest = ModelManifest::from_json(json).unwrap();
    let def = &manifest.meshes[0];
    assert_eq!(def.facing, Facing::Front);
    assert!(def.visible);
    assert_eq!(def.render_order, 0);
}

#[test]
fn back_facing_corners_are_mirrored() {
    let tracker = ResourceTracker::new();
    let model = CardModel::from_manifest(&ModelManifest::builtin(), &tracker).unwrap();
    let front = model.mesh(MeshName::CardBase).unwrap();
    let back = model.mesh(MeshName::CardBack).unwrap();
    assert!(front.corners()[0].x < front.corners()[1].x);
    assert!(back.corners()[0].x > back.corners()[1].x);
    assert_eq!(back.normal(), Vec3::NEG_Z);
}

#[test]
fn initial_materials_follow_mesh_roles() {
    let tracker = ResourceTracker::new();
    let model = CardModel::from_manifest(&ModelManifest::builtin(), &tracker).unwrap();
    let name = model.mesh(MeshName::CardName).unwrap().material().get().desc();
    assert!(name.is_invisible());
    assert!((name.alpha_test - 0.1).abs() < f32::EPSILON);

    let chip_base = model.mesh(MeshName::ChipBase).unwrap().material().get().desc();
    assert_eq!(chip_base.color, Rgba8::from_rgb_u32(0x1a1a1a));
    assert!((chip_base.metalness - 1.0).abs() < f32::EPSILON);

    assert!(!model.mesh(MeshName::LogoMastercard).unwrap().visible);
}
