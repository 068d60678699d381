use super::*;

#[test]
fn defaults_match_first_visit() {
    let s = CardState::default();
    assert_eq!(s.tab, Tab::Customize);
    assert_eq!(s.custom_design, Design::Classic);
    assert_eq!(s.classic_color, "#04091B");
    assert_eq!(s.custom_color_one, "#FFB900");
    assert_eq!(s.custom_color_two, "#111427");
    assert_eq!(s.custom_gradient_type, GradientType::Radial);
    assert_eq!(s.custom_gradient_color_one, "#667ED8");
    assert_eq!(s.custom_gradient_color_two, "#69F7DB");
    assert_eq!(s.selected_template_id, None);
    assert_eq!(s.name, "");
    assert_eq!(s.logo, None);
    assert_eq!(s.logo_position, LogoPosition::Center);
}

#[test]
fn duotone_moves_logo_to_corner() {
    assert_eq!(Design::Duotone.default_logo_position(), LogoPosition::TopRight);
    assert_eq!(Design::Classic.default_logo_position(), LogoPosition::Center);
    assert_eq!(Design::Gradient.default_logo_position(), LogoPosition::Center);
}

#[test]
fn color_slots_address_distinct_fields() {
    let mut s = CardState::default();
    for (i, slot) in ColorSlot::ALL.into_iter().enumerate() {
        *s.color_mut(slot) = format!("#00000{i}");
    }
    for (i, slot) in ColorSlot::ALL.into_iter().enumerate() {
        assert_eq!(s.color(slot), format!("#00000{i}"));
    }
}

#[test]
fn state_json_uses_camel_case_and_defaults() {
    let s = CardState::from_json(
        r##"{ "tab": "templates", "selectedTemplateId": "02", "name": "Ada",
             "logoUrl": "file:///tmp/logo.png", "logoPosition": "topright" }"##,
    )
    .unwrap();
    assert_eq!(s.tab, Tab::Templates);
    assert_eq!(s.selected_template_id.as_deref(), Some("02"));
    assert_eq!(s.logo_url(), Some("file:///tmp/logo.png"));
    assert_eq!(s.logo_position, LogoPosition::TopRight);
    assert_eq!(s.classic_color, "#04091B");

    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["customDesign"], "classic");
    assert_eq!(json["logoUrl"], "file:///tmp/logo.png");
}

#[test]
fn state_json_rejects_unknown_enum_values() {
    assert!(CardState::from_json(r#"{ "customDesign": "plaid" }"#).is_err());
}
