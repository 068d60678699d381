use super::*;

fn elements() -> Vec<StepElement> {
    vec![
        StepElement {
            customize_step: Some(1),
            template_step: None,
        },
        StepElement {
            customize_step: Some(2),
            template_step: None,
        },
        StepElement {
            customize_step: None,
            template_step: Some(1),
        },
        StepElement {
            customize_step: Some(3),
            template_step: Some(2),
        },
    ]
}

#[test]
fn customize_tab_shows_customize_steps() {
    let tabs = TabController::new(Tab::Customize, elements());
    let r = tabs.render();
    assert!(r.customize_pane_visible);
    assert!(!r.templates_pane_visible);
    assert_eq!(r.form_host, FormHost::CustomizeStep);
    let visible: Vec<bool> = r.steps.iter().map(|s| s.visible).collect();
    assert_eq!(visible, vec![true, true, false, true]);
    assert_eq!(r.steps[3].counter, Some(3));
    assert_eq!(r.steps[3].mode, Some(StepMode::Customize));
    assert_eq!(r.steps[0].mode, None);
}

#[test]
fn switching_to_templates_moves_form_and_renumbers() {
    let mut tabs = TabController::new(Tab::Customize, elements());
    let r = tabs.switch(Tab::Templates);
    assert_eq!(tabs.active(), Tab::Templates);
    assert!(r.templates_pane_visible);
    assert_eq!(r.form_host, FormHost::TemplatesPane);
    let visible: Vec<bool> = r.steps.iter().map(|s| s.visible).collect();
    assert_eq!(visible, vec![false, false, true, true]);
    assert_eq!(r.steps[2].counter, Some(1));
    assert_eq!(r.steps[3].counter, Some(2));
    assert_eq!(r.steps[3].mode, Some(StepMode::Template));
}

#[test]
fn mask_follows_active_tab_bounds() {
    let mut tabs = TabController::new(Tab::Customize, elements());
    assert_eq!(tabs.mask(), None);
    let mask = tabs
        .relayout(
            TabBounds {
                offset_left: 4.0,
                width: 120.0,
            },
            TabBounds {
                offset_left: 130.0,
                width: 110.0,
            },
        )
        .unwrap();
    assert_eq!(
        mask,
        MaskGeometry {
            left: 3.5,
            width: 122.0
        }
    );
    let r = tabs.switch(Tab::Templates);
    assert_eq!(
        r.mask,
        Some(MaskGeometry {
            left: 129.5,
            width: 112.0
        })
    );
}
