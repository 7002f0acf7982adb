// Template catalog CLI commands

use crate::app_data::AppData;
use crate::types::internal::context::RequestContext;

/// Register a template in the catalog
///
/// Warns when the namespace is not one the broker serves templates from,
/// since such a template can never be provisioned.
pub async fn register_template(
    app_data: &AppData,
    uid: &str,
    namespace: &str,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("template_register");

    if !app_data.settings.is_template_namespace(namespace) {
        println!(
            "⚠️  WARNING: namespace '{}' is not listed in TEMPLATE_NAMESPACES; the template will not be provisionable.",
            namespace
        );
    }

    let template = app_data.template_store.register(uid, namespace, name).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        actor = %ctx.actor_id,
        uid = %template.uid,
        namespace = %template.namespace,
        "Template registered"
    );
    println!("✅ Registered template {}/{} as service {}", template.namespace, template.name, template.uid);

    Ok(())
}
