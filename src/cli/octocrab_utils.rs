use anyhow::{Context, Result};
use futures::TryStreamExt;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};

use super::AuthArgs;

enum Auth {
    AppKey { app_id: u64, key: SecretString },
    GitHubToken(SecretString),
    Anonymous,
}

impl From<AuthArgs> for Auth {
    fn from(args: AuthArgs) -> Self {
        match (args.app_id, args.app_key, args.github_token) {
            (Some(app_id), Some(key), _) => Auth::AppKey {
                app_id,
                key: key.into(),
            },
            (_, _, Some(token)) => Auth::GitHubToken(token.into()),
            _ => Auth::Anonymous,
        }
    }
}

impl AuthArgs {
    pub(crate) async fn try_into_octocrab(self) -> Result<Octocrab> {
        let api_url = self.api_url.clone();
        let builder = || -> Result<_> {
            let builder = Octocrab::builder();
            Ok(match &api_url {
                Some(url) => builder
                    .base_uri(url.as_str())
                    .with_context(|| format!("invalid API URL {url}"))?,
                None => builder,
            })
        };
        match Auth::from(self) {
            Auth::AppKey { app_id, key } => {
                let key = jsonwebtoken::EncodingKey::from_rsa_pem(key.expose_secret().as_bytes())?;
                let base = builder()?.app(app_id.into(), key).build()?;
                let insts = base
                    .apps()
                    .installations()
                    .send()
                    .await?
                    .into_stream(&base)
                    .try_collect::<Vec<_>>()
                    .await?;
                tracing::info!("Installations: {}", serde_json5::to_string(&insts)?);
                let inst = insts.first().context("GitHub App has no installations")?;
                Ok(Octocrab::installation(&base, inst.id))
            }
            Auth::GitHubToken(github_token) => {
                Ok(builder()?
                    // https://github.com/XAMPPRocky/octocrab/issues/594
                    .personal_token(github_token.expose_secret().to_owned())
                    .build()?)
            }
            Auth::Anonymous => {
                tracing::warn!("No GitHub credentials given, merging will fail");
                Ok(builder()?.build()?)
            }
        }
    }
}
