// Auth and user endpoints
//
// Token validation and the current-user lookup used to title a new
// connection during setup.

use tracing::debug;

use crate::client::ImmichClient;
use crate::error::Error;
use crate::models::{UserInfo, ValidateTokenResponse};

impl ImmichClient {
    /// Check whether the server accepts our API key.
    ///
    /// `POST /api/auth/validateToken`
    ///
    /// Returns `false` when the server rejects the key, either with
    /// `authStatus: false` or with 401/403. Transport failures and other
    /// non-2xx responses are still errors.
    pub async fn authenticate(&self) -> Result<bool, Error> {
        debug!("validating API token");
        let result: Result<ValidateTokenResponse, Error> = self
            .post::<_, ()>(&["api", "auth", "validateToken"], None)
            .await;
        match result {
            Ok(resp) => {
                debug!(auth_status = resp.auth_status, "token validation finished");
                Ok(resp.auth_status)
            }
            Err(Error::Api {
                status: status @ (401 | 403),
                ..
            }) => {
                debug!(status, "API key rejected");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch the user that owns the API key.
    ///
    /// `GET /api/users/me`
    pub async fn get_my_user(&self) -> Result<UserInfo, Error> {
        debug!("fetching current user");
        self.get(&["api", "users", "me"]).await
    }
}
