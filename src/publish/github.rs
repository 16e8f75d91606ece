use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{AutotagError, Result};
use crate::publish::{RefCreation, RefStore};

const GITHUB_API_URL: &str = "https://api.github.com";

/// Ref store backed by the GitHub git-data REST API.
pub struct GithubRefStore {
    client: Client,
    token: String,
    owner: String,
    repo: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct CreateTagRequest<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    r#type: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRefRequest<'a> {
    r#ref: &'a str,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateRefRequest<'a> {
    sha: &'a str,
    force: bool,
}

#[derive(Debug, Deserialize)]
struct ObjectSha {
    sha: String,
}

impl GithubRefStore {
    /// Creates a client for `owner/repo` authenticated with `token`.
    pub fn new(token: &str, owner: &str, repo: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("pr-autotag/0.1"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(GithubRefStore {
            client,
            token: token.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            base_url: GITHUB_API_URL.to_string(),
        })
    }

    /// Points the client at a different API root. Used against test servers.
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/git/{}",
            self.base_url, self.owner, self.repo, path
        )
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

fn error_from_response(response: reqwest::blocking::Response) -> AutotagError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    AutotagError::publish(status, body)
}

impl RefStore for GithubRefStore {
    fn create_tag_object(&self, tag: &str, commit_sha: &str, message: &str) -> Result<String> {
        let request = CreateTagRequest {
            tag,
            message,
            object: commit_sha,
            r#type: "commit",
        };

        let response = self
            .client
            .post(self.url("tags"))
            .header(AUTHORIZATION, self.auth_header())
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }

        let created: ObjectSha = response.json()?;
        Ok(created.sha)
    }

    fn create_ref(&self, ref_name: &str, sha: &str) -> Result<RefCreation> {
        let request = CreateRefRequest { r#ref: ref_name, sha };

        let response = self
            .client
            .post(self.url("refs"))
            .header(AUTHORIZATION, self.auth_header())
            .json(&request)
            .send()?;

        // 422 is how the API reports a ref that already exists
        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(RefCreation::AlreadyExists);
        }

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }

        Ok(RefCreation::Created)
    }

    fn update_ref(&self, ref_name: &str, sha: &str, force: bool) -> Result<()> {
        // The update endpoint takes the ref without the leading "refs/"
        let short_ref = ref_name.strip_prefix("refs/").unwrap_or(ref_name);
        let request = UpdateRefRequest { sha, force };

        let response = self
            .client
            .patch(self.url(&format!("refs/{}", short_ref)))
            .header(AUTHORIZATION, self.auth_header())
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(error_from_response(response));
        }

        Ok(())
    }
}
