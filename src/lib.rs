pub mod causes;
pub mod config;
pub mod constants;
pub mod error;
pub mod frames;
pub mod record;
pub mod renderer;
pub mod serialize;
pub mod stack;
pub mod style;

use serde_json::Value as JsonValue;

pub use config::{EnvProvider, MapEnvProvider, ProcessEnvProvider, RenderOptions};
pub use error::RenderError;
pub use record::is_error;
pub use renderer::{ErrorRenderer, RenderedLine};
pub use stack::{Frame, FrameKind, PathShortener, StackParser, V8StackParser};

/// Renders an error log record with default options.
///
/// Returns no lines when `raw` is `false` and `record` does not wrap an
/// error. See [`ErrorRenderer::render`].
pub fn render(record: &JsonValue, raw: bool) -> Vec<RenderedLine> {
    ErrorRenderer::default().render(record, raw)
}

/// Renders with options resolved from `env`.
pub fn render_with_env(
    record: &JsonValue,
    raw: bool,
    env: &dyn EnvProvider,
) -> Result<Vec<RenderedLine>, RenderError> {
    let options = RenderOptions::from_env(env)?;
    Ok(ErrorRenderer::new(&options).render(record, raw))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{render, render_with_env, MapEnvProvider};

    #[test]
    fn non_error_records_render_nothing() {
        assert!(render(&json!({"level": 30, "msg": "listening"}), false).is_empty());
        assert!(render(&json!("text"), true).is_empty());
    }

    #[test]
    fn env_options_apply() {
        let record = json!({"err": {
            "message": "boom",
            "stack": "Error: boom\n    at run (/srv/app/src/run.js:4:2)"
        }});
        let lines = render_with_env(
            &record,
            false,
            &MapEnvProvider::from_pairs(&[("NO_COLOR", "1"), ("ERR_PRETTY_ROOT", "/srv/app")]),
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![
                "    message: boom",
                "    stack: [1 Frames]",
                "     • src/run.js:4 - run",
            ]
        );
    }

    #[test]
    fn invalid_env_is_reported() {
        let env = MapEnvProvider::from_pairs(&[("ERR_PRETTY_ROOT", "")]);
        let err = render_with_env(&json!({}), true, &env).unwrap_err();
        assert!(err.to_string().contains("ERR_PRETTY_ROOT"));
    }
}
