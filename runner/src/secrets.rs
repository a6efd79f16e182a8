use crate::error::{RunnerError, RunnerResult};
use crate::settings::Settings;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ssm::error::DisplayErrorContext;
use tracing::{debug, error};

/// Obtain the GitHub token for this invocation.
///
/// `GITHUB_TOKEN_OVERRIDE` short-circuits the Parameter Store lookup so the
/// runner can be exercised without AWS access. Settings refuse the override
/// in production before this point is reached.
pub async fn resolve_token(settings: &Settings) -> RunnerResult<String> {
    if let Some(token) = &settings.token_override {
        debug!("Using GITHUB_TOKEN_OVERRIDE instead of Parameter Store");
        return Ok(token.clone());
    }

    fetch_parameter(settings).await
}

async fn fetch_parameter(settings: &Settings) -> RunnerResult<String> {
    debug!(
        "Fetching GitHub token from SSM parameter {}",
        settings.token_param
    );

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()));
    if let Some(endpoint) = &settings.localstack_endpoint {
        loader = loader.endpoint_url(endpoint.clone());
    }
    let sdk_config = loader.load().await;
    let client = aws_sdk_ssm::Client::new(&sdk_config);

    let response = client
        .get_parameter()
        .name(&settings.token_param)
        .with_decryption(true)
        .send()
        .await
        .map_err(|err| {
            let message = DisplayErrorContext(err).to_string();
            error!("Failed to fetch GitHub token from SSM: {}", message);
            RunnerError::Credential { message }
        })?;

    response
        .parameter
        .and_then(|parameter| parameter.value)
        .ok_or_else(|| RunnerError::Credential {
            message: format!("Parameter {} has no value", settings.token_param),
        })
}
