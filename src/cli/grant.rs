// Grant management CLI command

use crate::app_data::AppData;
use crate::types::internal::context::RequestContext;

/// Insert a namespace grant
///
/// # Arguments
/// * `app_data` - Application data holding the grant store
/// * `subject` - `user:<name>` or `group:<name>`
/// * `namespace` - Target namespace or `*`
/// * `verb` - Allowed verb or `*`
pub async fn add_grant(
    app_data: &AppData,
    subject: &str,
    namespace: &str,
    verb: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::for_cli("grant");

    let id = app_data.grant_store.add_grant(subject, namespace, verb).await?;

    tracing::info!(
        request_id = %ctx.request_id,
        actor = %ctx.actor_id,
        grant_id = id,
        subject,
        namespace,
        verb,
        "Namespace grant added"
    );
    println!("✅ Granted {} '{}' in namespace '{}' (grant {})", subject, verb, namespace, id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::providers::authorization_provider::VERB_CREATE;
    use crate::providers::{AccessReview, AccessReviewer};
    use crate::test::utils::{ConflictingStore, ScriptedReviewer, build_test_app_data};
    use crate::types::internal::Principal;

    #[tokio::test]
    async fn test_add_grant_allows_review() {
        let app_data = build_test_app_data(
            Arc::new(ScriptedReviewer::deny()),
            Arc::new(ConflictingStore::new()),
        )
        .await;

        add_grant(&app_data, "user:alice", "team-a", VERB_CREATE).await.unwrap();

        let review = AccessReview {
            principal: Principal::new("alice"),
            namespace: "team-a".to_string(),
            verb: VERB_CREATE.to_string(),
            resource: "templateinstances".to_string(),
        };
        assert!(app_data.grant_store.review(&review).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_grant_rejects_bare_subject() {
        let app_data = build_test_app_data(
            Arc::new(ScriptedReviewer::deny()),
            Arc::new(ConflictingStore::new()),
        )
        .await;

        assert!(add_grant(&app_data, "alice", "team-a", VERB_CREATE).await.is_err());
    }
}
