//! One command line session: open, replay, save.

use crate::config::{AppConfig, ConfigError};
use crate::script::{ReplaySummary, Script, ScriptError};
use sketcher_core::{Editor, EditorError, Storage, StorageError};
use sketcher_render::SceneRenderer;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// What to do in a session, in order.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Document to load before replaying.
    pub open: Option<String>,
    /// Script to replay.
    pub script: Option<PathBuf>,
    /// Name to save the resulting document under.
    pub save: Option<String>,
}

/// Editor wired with the scene renderer and the configured drawing defaults.
pub fn new_editor(config: &AppConfig) -> Editor<SceneRenderer> {
    let mut renderer = SceneRenderer::new();
    renderer.pick_tolerance = config.pick_tolerance;
    let mut editor = Editor::new(renderer);
    editor.set_current_color(config.default_color.as_str());
    editor
}

/// Run a session against `storage` and hand back the editor.
pub fn run_session(
    config: &AppConfig,
    options: &SessionOptions,
    storage: &dyn Storage,
) -> Result<(Editor<SceneRenderer>, ReplaySummary), AppError> {
    let mut editor = new_editor(config);

    if let Some(name) = &options.open {
        editor.load_from(storage, name)?;
    }

    let summary = match &options.script {
        Some(path) => {
            let script = Script::from_path(path)?;
            let summary = script.run(&mut editor)?;
            log::info!(
                "Replayed {} steps, {} shapes drawn",
                summary.steps,
                summary.committed.len()
            );
            summary
        }
        None => ReplaySummary::default(),
    };

    if let Some(name) = &options.save {
        editor.save_to(storage, name)?;
    }

    Ok((editor, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketcher_core::{MemoryStorage, Renderer};

    #[test]
    fn test_new_editor_uses_config() {
        let config = AppConfig {
            default_color: "#123456".to_string(),
            pick_tolerance: 2.0,
            ..AppConfig::default()
        };
        let editor = new_editor(&config);
        assert_eq!(editor.current_color(), "#123456");
        assert!((editor.renderer().pick_tolerance - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_open_missing_document() {
        let storage = MemoryStorage::new();
        let options = SessionOptions {
            open: Some("nothing".to_string()),
            ..SessionOptions::default()
        };
        let result = run_session(&AppConfig::default(), &options, &storage);
        assert!(matches!(
            result,
            Err(AppError::Editor(EditorError::Storage(StorageError::NotFound(_))))
        ));
    }

    #[test]
    fn test_open_then_save_copy() {
        let storage = MemoryStorage::new();
        let mut source = new_editor(&AppConfig::default());
        source
            .load_json(
                r##"[{"id":"6f1c1b8e-4a5b-4c6d-8e9f-0a1b2c3d4e5f","type":"circle",
                     "color":"#333333","visible":true,"center":{"x":1.0,"y":2.0},"radius":3.0}]"##,
            )
            .unwrap();
        source.save_to(&storage, "original").unwrap();

        let options = SessionOptions {
            open: Some("original".to_string()),
            save: Some("copy".to_string()),
            ..SessionOptions::default()
        };
        let (editor, summary) = run_session(&AppConfig::default(), &options, &storage).unwrap();

        assert_eq!(summary, ReplaySummary::default());
        assert_eq!(editor.document().len(), 1);
        assert_eq!(editor.renderer().len(), 1);
        assert_eq!(storage.load("copy").unwrap(), storage.load("original").unwrap());
        assert_eq!(
            editor.renderer().pick(kurbo::Point::new(4.0, 2.0)),
            editor.document().shape_id_at(0)
        );
    }
}
