use crate::application::read_models::LicenseReportReadModel;
use crate::license_aggregation::domain::{OutputFormatInfo, OutputFormatVariant};
use crate::shared::{LicenseInfoError, Result};
use tera::{Context, Tera};

/// Descriptor for generator `name` rendering `variant`
pub fn output_format_info(
    name: &str,
    file_extension: &str,
    description: &str,
    is_output_binary: bool,
    mime_type: &str,
    variant: OutputFormatVariant,
) -> OutputFormatInfo {
    OutputFormatInfo {
        generator_id: format!("{}::{}", name, variant),
        file_extension: file_extension.to_string(),
        description: description.to_string(),
        is_output_binary,
        mime_type: mime_type.to_string(),
        variant,
    }
}

/// Joins an error with all of its sources; tera reports the useful part
/// (line, filter, variable) in the source chain
fn error_details(error: &dyn std::error::Error) -> String {
    let mut details = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        details.push_str(": ");
        details.push_str(&cause.to_string());
        source = cause.source();
    }
    details
}

/// Template context holding the read model, with `variant` forced to the
/// generator's own variant
pub fn model_context(
    info: &OutputFormatInfo,
    model: &LicenseReportReadModel,
) -> Result<Context> {
    let mut context = Context::from_serialize(model)
        .map_err(|e| LicenseInfoError::rendering(&info.generator_id, error_details(&e)))?;
    context.insert("variant", &info.variant);
    Ok(context)
}

/// Renders a bundled template. Autoescaping follows the template name
/// (`.html` templates are escaped).
pub fn render_template(
    generator_id: &str,
    template_name: &str,
    template_source: &str,
    context: &Context,
) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_source)
        .map_err(|e| LicenseInfoError::rendering(generator_id, error_details(&e)))?;

    tera.render(template_name, context)
        .map_err(|e| LicenseInfoError::rendering(generator_id, error_details(&e)).into())
}
