use std::path::Path;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use serde::Serialize;

use tracing::{debug, info};

use crate::errors::{StarterError, StarterErrorKind};

use super::join::NetworkJoinConfig;

/// Values the configuration template can reference.
#[derive(Debug, Serialize)]
struct Bindings<'a> {
    gateway_id: &'a str,
    ttn_config: &'a NetworkJoinConfig,
}

/// Renders the Jinja `template` with `gateway_id` and `ttn_config` bound.
///
/// The output is not escaped, and variables the template references but that are not bound
/// render as an empty string. The trailing newline of the template is kept, so text without
/// placeholders comes back unchanged and rendering an already rendered document is a no-op.
pub fn render_template(
    template: &str,
    gateway_id: &str,
    join_config: &NetworkJoinConfig,
) -> Result<String, StarterError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Lenient);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);

    let bindings = Bindings {
        gateway_id,
        ttn_config: join_config,
    };

    env.render_str(template, &bindings).map_err(|e| {
        StarterError::with_source(
            StarterErrorKind::RenderConfig,
            format!("Error rendering config template: {}", e),
            e,
        )
    })
}

/// Reads the template at `template_path`, renders it and writes the result to `output_path`.
///
/// NOTE: Both paths are usually the same file, which is then overwritten in place without locking
/// or an atomic rename. Once rendered, the file no longer holds its placeholders, so a later run
/// with a different identifier keeps the old one unless the template is seeded again.
pub async fn render_config(
    template_path: &Path,
    output_path: &Path,
    gateway_id: &str,
    join_config: &NetworkJoinConfig,
) -> Result<(), StarterError> {
    let template = tokio::fs::read_to_string(template_path)
        .await
        .map_err(|e| {
            StarterError::with_source(
                StarterErrorKind::ReadTemplate,
                format!(
                    "Error reading config template {}: {}",
                    template_path.display(),
                    e
                ),
                e,
            )
        })?;

    debug!(path = %template_path.display(), "config template read");

    let rendered = render_template(&template, gateway_id, join_config)?;

    tokio::fs::write(output_path, rendered).await.map_err(|e| {
        StarterError::with_source(
            StarterErrorKind::WriteConfig,
            format!("Error writing config {}: {}", output_path.display(), e),
            e,
        )
    })?;

    info!(path = %output_path.display(), gateway_id = gateway_id, "Config rendered");

    Ok(())
}
