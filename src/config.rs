use std::io::Read;
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Viewport};
use crate::foundation::error::{CardError, CardResult};
use crate::scene::stage::StaticTexturePaths;
use crate::ui::accordion::StepDef;
use crate::ui::tabs::StepElement;

/// Session configuration, loaded from JSON. Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AppConfig {
    /// Browser viewport used for device-class decisions.
    pub viewport: Viewport,
    /// Render canvas size.
    pub canvas: Canvas,
    /// Model manifest; the built-in card when unset.
    pub model: Option<PathBuf>,
    /// Static card textures.
    pub textures: StaticTexturePaths,
    /// Font override for the cardholder name and placeholder text; the bundled font otherwise.
    pub name_font: Option<PathBuf>,
    /// Steps of the customize wizard.
    pub customize_steps: Vec<StepDef>,
    /// Steps of the templates wizard.
    pub template_steps: Vec<StepDef>,
    /// Step elements of the markup and their wizard positions.
    pub step_elements: Vec<StepElement>,
    /// Where exports are written.
    pub downloads_dir: PathBuf,
    /// Persisted logo cache file; in-memory when unset.
    pub logo_storage: Option<PathBuf>,
    /// Minimum seconds the loader stays up.
    pub min_loading_s: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1440, 900),
            canvas: Canvas::new(800, 600),
            model: None,
            textures: StaticTexturePaths::default(),
            name_font: None,
            customize_steps: vec![
                StepDef::new("Choose design", 220.0),
                StepDef::new("Adjust colors", 180.0),
                StepDef::new("Add name & logo", 260.0),
            ],
            template_steps: vec![
                StepDef::new("Choose template", 240.0),
                StepDef::new("Add name & logo", 260.0),
            ],
            step_elements: vec![
                StepElement {
                    customize_step: Some(1),
                    template_step: None,
                },
                StepElement {
                    customize_step: Some(2),
                    template_step: None,
                },
                StepElement {
                    customize_step: Some(3),
                    template_step: Some(2),
                },
                StepElement {
                    customize_step: None,
                    template_step: Some(1),
                },
            ],
            downloads_dir: PathBuf::from("downloads"),
            logo_storage: None,
            min_loading_s: 5.0,
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON document.
    pub fn from_reader(reader: impl Read) -> CardResult<Self> {
        let config: Self = serde_json::from_reader(reader)
            .map_err(|e| CardError::serde(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_path(path: &Path) -> CardResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            CardError::validation(format!("failed to open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Check ranges the rest of the crate relies on.
    pub fn validate(&self) -> CardResult<()> {
        if !self.min_loading_s.is_finite() || self.min_loading_s < 0.0 {
            return Err(CardError::validation("min-loading-s must be finite and >= 0"));
        }
        for step in self.customize_steps.iter().chain(&self.template_steps) {
            if !step.content_height.is_finite() || step.content_height < 0.0 {
                return Err(CardError::validation(format!(
                    "step '{}' has an invalid content height",
                    step.title
                )));
            }
        }
        for e in &self.step_elements {
            let out_of_range = |n: Option<usize>, total: usize| n.is_some_and(|n| n == 0 || n > total);
            if out_of_range(e.customize_step, self.customize_steps.len())
                || out_of_range(e.template_step, self.template_steps.len())
            {
                return Err(CardError::validation(format!(
                    "step element {e:?} points past its wizard"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
