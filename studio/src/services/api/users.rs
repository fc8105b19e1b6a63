//! # User Endpoints

use reqwest::Method;
use shared::GemBalance;

use super::client::ApiClient;
use crate::core::Result;

/// Current gem balance of the signed-in user.
pub async fn get_balance(client: &ApiClient, token: &str) -> Result<GemBalance> {
    client
        .send(client.request(Method::GET, "/users/balance", Some(token)))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppError;
    use crate::services::api::stub::StubServer;

    #[tokio::test]
    async fn test_balance_error_detail_and_bearer() {
        let server = StubServer::respond(402, r#"{"detail":"Insufficient gems"}"#).await;
        let client = ApiClient::new(server.base_url.clone());

        let err = get_balance(&client, "tok").await.unwrap_err();
        assert!(matches!(err, AppError::Api(msg) if msg == "Insufficient gems"));

        let request = server.request().await.to_ascii_lowercase();
        assert!(request.contains("authorization: bearer tok"));
    }
}
