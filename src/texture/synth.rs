use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::object_url::LogoSource;
use crate::foundation::core::Rgba8;
use crate::foundation::error::CardResult;
use crate::scene::model::{CardModel, MeshName};
use crate::scene::resources::{MaterialDesc, ResourceTracker, Shading};
use crate::state::active::ActiveDesign;
use crate::state::card::LogoPosition;
use crate::texture::background::{BackgroundFill, render_background};
use crate::texture::logo::{LOGO_CENTER_NUDGE_X, render_logo};
use crate::texture::name::{NAME_BUMP_SCALE, NameRenderer, name_tint};

/// Render order of decals drawn over the card face.
pub const DECAL_RENDER_ORDER: i32 = 999;

/// Mesh carrying the logo for `position`.
pub fn logo_mesh(position: LogoPosition) -> MeshName {
    match position {
        LogoPosition::Center => MeshName::LogoCenter,
        LogoPosition::TopRight => MeshName::LogoTopRight,
        LogoPosition::Right => MeshName::LogoRight,
    }
}

/// What one model update produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthReport {
    /// Contrast color used for the name.
    pub text_color: Rgba8,
    /// CardBase got a fresh background map.
    pub background_applied: bool,
    /// CardName is drawn.
    pub name_visible: bool,
    /// Logo mesh that is drawn, if any.
    pub logo_mesh: Option<MeshName>,
}

/// Regenerate the card textures from `active` and install them on `model`.
///
/// Returns `None` while no model is loaded. Asset failures never abort the update: the affected
/// mesh is hidden or keeps its previous map, and a warning is logged.
#[tracing::instrument(skip_all, fields(design = ?active.design(), position = ?active.logo_position))]
pub fn update_card_model_from_state(
    model: Option<&mut CardModel>,
    tracker: &ResourceTracker,
    active: &ActiveDesign,
    logos: &dyn LogoSource,
    names: Option<&mut NameRenderer>,
) -> Option<SynthReport> {
    let model = model?;
    let fill = BackgroundFill::from_colors(&active.colors);
    let text_color = fill.text_color();

    let background_applied = apply_background(model, tracker, fill);
    let name_visible = apply_name(model, tracker, &active.name, text_color, names);
    let logo_mesh = apply_logo(model, tracker, active, logos);

    tracing::debug!(
        text = %text_color.to_hex(),
        background_applied,
        name_visible,
        logo = ?logo_mesh,
        "card model updated"
    );
    Some(SynthReport {
        text_color,
        background_applied,
        name_visible,
        logo_mesh,
    })
}

fn apply_background(model: &mut CardModel, tracker: &ResourceTracker, fill: BackgroundFill) -> bool {
    let Some(base) = model.mesh_mut(MeshName::CardBase) else {
        return false;
    };
    match render_background(fill) {
        Ok(image) => {
            let texture = tracker.texture("background", image);
            let slot = base.material_mut();
            slot.replace_map(Some(texture));
            slot.get_mut().desc_mut().color = Rgba8::WHITE;
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, "background texture failed");
            false
        }
    }
}

fn hide(model: &mut CardModel, tracker: &ResourceTracker, name: MeshName) {
    if let Some(mesh) = model.mesh_mut(name) {
        mesh.material_mut().replace(tracker.hidden_material());
        mesh.visible = false;
    }
}

fn apply_name(
    model: &mut CardModel,
    tracker: &ResourceTracker,
    text: &str,
    text_color: Rgba8,
    names: Option<&mut NameRenderer>,
) -> bool {
    if text.trim().is_empty() {
        hide(model, tracker, MeshName::CardName);
        return false;
    }
    let Some(renderer) = names else {
        tracing::warn!("no name font loaded; name hidden");
        hide(model, tracker, MeshName::CardName);
        return false;
    };
    let image = match renderer.render(text, text_color) {
        Ok(image) => image,
        Err(err) => {
            tracing::warn!(error = %err, "name texture failed");
            hide(model, tracker, MeshName::CardName);
            return false;
        }
    };
    let Some(mesh) = model.mesh_mut(MeshName::CardName) else {
        return false;
    };

    let texture = tracker.texture("name", image);
    let material = tracker.material(MaterialDesc {
        shading: Shading::Lit,
        color: name_tint(text_color),
        transparent: true,
        map: Some(texture.clone()),
        bump_map: Some(texture),
        bump_scale: NAME_BUMP_SCALE,
        alpha_test: 0.1,
        roughness: 0.9,
        metalness: 0.0,
        ..MaterialDesc::default()
    });
    mesh.material_mut().replace(material);
    mesh.render_order = DECAL_RENDER_ORDER;
    mesh.visible = true;
    true
}

fn logo_texture(logos: &dyn LogoSource, url: &str) -> CardResult<PreparedImage> {
    let bytes = logos.fetch(url)?;
    let image = decode_image(&bytes)?;
    render_logo(&image)
}

fn apply_logo(
    model: &mut CardModel,
    tracker: &ResourceTracker,
    active: &ActiveDesign,
    logos: &dyn LogoSource,
) -> Option<MeshName> {
    let target = logo_mesh(active.logo_position);
    for position in LogoPosition::ALL {
        if position != active.logo_position {
            hide(model, tracker, logo_mesh(position));
        }
    }

    let Some(url) = active.logo_url.as_deref() else {
        hide(model, tracker, target);
        return None;
    };
    let image = match logo_texture(logos, url) {
        Ok(image) => image,
        Err(err) => {
            tracing::warn!(%url, error = %err, "logo texture failed");
            hide(model, tracker, target);
            return None;
        }
    };
    let mesh = model.mesh_mut(target)?;

    let texture = tracker.texture(target.as_str(), image);
    let material = tracker.material(MaterialDesc {
        shading: Shading::Unlit,
        color: Rgba8::WHITE,
        transparent: true,
        map: Some(texture),
        alpha_test: 0.1,
        ..MaterialDesc::default()
    });
    mesh.material_mut().replace(material);
    mesh.render_order = DECAL_RENDER_ORDER;
    mesh.visible = true;
    if target == MeshName::LogoCenter {
        mesh.offset.x = LOGO_CENTER_NUDGE_X;
    }
    Some(target)
}

#[cfg(test)]
#[path = "../../tests/unit/texture/synth.rs"]
mod tests;
