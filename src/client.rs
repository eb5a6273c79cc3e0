use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{Result, UsersError};
use crate::store::UserStore;
use crate::types::{User, UserId};

const USERS_PATH: &str = "users";

/// REST client for the `/users` resource.
pub struct UsersClient {
    http: Client,
    base_url: Url,
}

impl UsersClient {
    pub fn new(base_url: Url, http: Client) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::new(config.base_url()?, http))
    }

    fn users_url(&self, id: Option<UserId>) -> Result<Url> {
        let path = match id {
            Some(id) => format!("{USERS_PATH}/{id}"),
            None => USERS_PATH.to_string(),
        };

        self.base_url
            .join(&path)
            .map_err(|_| UsersError::InvalidUrl(format!("{}{path}", self.base_url)))
    }

    fn request(&self, method: Method, id: Option<UserId>) -> Result<RequestBuilder> {
        let url = self.users_url(id)?;
        tracing::debug!(%method, %url, "sending request");
        Ok(self
            .http
            .request(method, url)
            .header("Accept", "application/json"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(UsersError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        Ok(self.send(request).await?.json().await?)
    }
}

impl UserStore for UsersClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.json(self.request(Method::GET, None)?).await
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        self.json(self.request(Method::POST, None)?.json(user)).await
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        self.json(self.request(Method::PUT, Some(user.id))?.json(user))
            .await
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        self.send(self.request(Method::DELETE, Some(id))?).await?;
        Ok(())
    }
}

/// `Url::join` drops the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> UsersClient {
        UsersClient::new(Url::parse(base).unwrap(), Client::new())
    }

    #[test]
    fn test_users_url_at_root() {
        let client = client("https://jsonplaceholder.typicode.com");
        assert_eq!(
            client.users_url(None).unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/users"
        );
        assert_eq!(
            client.users_url(Some(3)).unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/users/3"
        );
    }

    #[test]
    fn test_users_url_keeps_base_path() {
        let client = client("https://example.com/api/v1");
        assert_eq!(
            client.users_url(Some(12)).unwrap().as_str(),
            "https://example.com/api/v1/users/12"
        );
    }
}
