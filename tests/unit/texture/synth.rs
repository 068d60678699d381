use std::io::Cursor;

use super::*;
use crate::assets::object_url::ObjectUrlRegistry;
use crate::scene::model::ModelManifest;
use crate::state::active::DesignColors;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn design(logo_url: Option<String>, position: LogoPosition) -> ActiveDesign {
    ActiveDesign {
        colors: DesignColors::Classic {
            color: "#04091B".to_string(),
        },
        name: String::new(),
        logo_url,
        logo_position: position,
        template_id: None,
    }
}

fn setup() -> (CardModel, ResourceTracker) {
    let tracker = ResourceTracker::new();
    let model = CardModel::from_manifest(&ModelManifest::builtin(), &tracker).unwrap();
    (model, tracker)
}

fn visible_logos(model: &CardModel) -> Vec<MeshName> {
    LogoPosition::ALL
        .into_iter()
        .map(logo_mesh)
        .filter(|name| {
            let mesh = model.mesh(*name).unwrap();
            mesh.visible && !mesh.material().get().desc().is_invisible()
        })
        .collect()
}

#[test]
fn no_model_is_a_no_op() {
    let tracker = ResourceTracker::new();
    let urls = ObjectUrlRegistry::default();
    let report = update_card_model_from_state(
        None,
        &tracker,
        &design(None, LogoPosition::Center),
        &urls,
        None,
    );
    assert!(report.is_none());
    assert_eq!(tracker.live_textures(), 0);
}

#[test]
fn background_replaces_the_previous_map() {
    let (mut model, tracker) = setup();
    let urls = ObjectUrlRegistry::default();
    let active = design(None, LogoPosition::Center);

    let report =
        update_card_model_from_state(Some(&mut model), &tracker, &active, &urls, None).unwrap();
    assert!(report.background_applied);
    assert_eq!(report.text_color, Rgba8::WHITE);
    assert_eq!(tracker.live_textures(), 1);

    update_card_model_from_state(Some(&mut model), &tracker, &active, &urls, None).unwrap();
    assert_eq!(tracker.live_textures(), 1);
    assert_eq!(tracker.released_textures(), 1);

    let base = model.mesh(MeshName::CardBase).unwrap().material().get().desc();
    assert_eq!(base.color, Rgba8::WHITE);
    let map = base.map.as_ref().unwrap();
    assert_eq!(map.image().pixel(10, 10), [0x04, 0x09, 0x1B, 255]);
}

#[test]
fn empty_name_hides_the_name_mesh() {
    let (mut model, tracker) = setup();
    let urls = ObjectUrlRegistry::default();
    let mut active = design(None, LogoPosition::Center);
    active.name = "   ".to_string();

    let report =
        update_card_model_from_state(Some(&mut model), &tracker, &active, &urls, None).unwrap();
    assert!(!report.name_visible);
    let name = model.mesh(MeshName::CardName).unwrap();
    assert!(!name.visible);
    assert!(name.material().get().desc().is_invisible());
}

#[test]
fn name_without_font_stays_hidden() {
    let (mut model, tracker) = setup();
    let urls = ObjectUrlRegistry::default();
    let mut active = design(None, LogoPosition::Center);
    active.name = "Ada".to_string();

    let report =
        update_card_model_from_state(Some(&mut model), &tracker, &active, &urls, None).unwrap();
    assert!(!report.name_visible);
    assert!(!model.mesh(MeshName::CardName).unwrap().visible);
}

fn first_opaque_column(image: &PreparedImage) -> u32 {
    (0..image.width)
        .find(|&x| (0..image.height).any(|y| image.pixel(x, y)[3] > 0))
        .unwrap()
}

#[test]
fn name_is_drawn_as_typed() {
    let (mut model, tracker) = setup();
    let urls = ObjectUrlRegistry::default();
    let mut names = NameRenderer::with_default_font().unwrap();
    let mut active = design(None, LogoPosition::Center);

    active.name = "Ada".to_string();
    let report =
        update_card_model_from_state(Some(&mut model), &tracker, &active, &urls, Some(&mut names))
            .unwrap();
    assert!(report.name_visible);
    let name = model.mesh(MeshName::CardName).unwrap();
    assert!(name.visible);
    let plain = first_opaque_column(name.material().get().desc().map.as_ref().unwrap().image());

    active.name = "   Ada".to_string();
    update_card_model_from_state(Some(&mut model), &tracker, &active, &urls, Some(&mut names))
        .unwrap();
    let name = model.mesh(MeshName::CardName).unwrap();
    let padded = first_opaque_column(name.material().get().desc().map.as_ref().unwrap().image());
    assert!(padded > plain + 10, "{plain} vs {padded}");
}

#[test]
fn switching_logo_position_leaves_exactly_one_visible_logo() {
    let (mut model, tracker) = setup();
    let mut urls = ObjectUrlRegistry::default();
    let url = urls.create(png_bytes(), "image/png").as_str().to_string();

    let report = update_card_model_from_state(
        Some(&mut model),
        &tracker,
        &design(Some(url.clone()), LogoPosition::TopRight),
        &urls,
        None,
    )
    .unwrap();
    assert_eq!(report.logo_mesh, Some(MeshName::LogoTopRight));
    assert_eq!(visible_logos(&model), vec![MeshName::LogoTopRight]);

    let report = update_card_model_from_state(
        Some(&mut model),
        &tracker,
        &design(Some(url), LogoPosition::Center),
        &urls,
        None,
    )
    .unwrap();
    assert_eq!(report.logo_mesh, Some(MeshName::LogoCenter));
    assert_eq!(visible_logos(&model), vec![MeshName::LogoCenter]);

    let center = model.mesh(MeshName::LogoCenter).unwrap();
    assert_eq!(center.offset.x, LOGO_CENTER_NUDGE_X);
    assert_eq!(center.render_order, DECAL_RENDER_ORDER);
    let desc = center.material().get().desc();
    assert_eq!(desc.shading, Shading::Unlit);
    assert_eq!(desc.map.as_ref().unwrap().image().width, 512);

    // only the background and the active logo remain alive
    assert_eq!(tracker.live_textures(), 2);
}

#[test]
fn undecodable_logo_hides_every_logo_mesh() {
    let (mut model, tracker) = setup();
    let mut urls = ObjectUrlRegistry::default();
    let url = urls.create(b"not an image".to_vec(), "image/png").as_str().to_string();

    let report = update_card_model_from_state(
        Some(&mut model),
        &tracker,
        &design(Some(url), LogoPosition::Right),
        &urls,
        None,
    )
    .unwrap();
    assert_eq!(report.logo_mesh, None);
    assert!(visible_logos(&model).is_empty());
}

#[test]
fn remote_logos_are_not_fetched() {
    let (mut model, tracker) = setup();
    let urls = ObjectUrlRegistry::default();
    let report = update_card_model_from_state(
        Some(&mut model),
        &tracker,
        &design(
            Some("https://example.com/logo.png".to_string()),
            LogoPosition::Center,
        ),
        &urls,
        None,
    )
    .unwrap();
    assert_eq!(report.logo_mesh, None);
}
