use crate::{
    config::Config,
    error::{DEFAULT_MESSAGE, ServerError},
};
use database::Dataset;
use log::debug;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

/// Error body returned by the mock backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP access to the mock backend.
///
/// Every call sleeps for `latency` once the response (or the failure) is in,
/// so the client behaves as if it talked to a slow remote server.
#[derive(Debug, Clone)]
pub struct Api {
    http: Client,
    base_url: String,
    latency: Duration,
}

impl Api {
    pub fn new(base_url: impl Into<String>, latency: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            latency,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url, config.latency)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("{method} {url}");

        self.http.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServerError> {
        let result = Self::execute(request).await;
        tokio::time::sleep(self.latency).await;

        result
    }

    async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ServerError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| DEFAULT_MESSAGE.to_string());

            return Err(ServerError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// `GET /{path}?key=value...`
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ServerError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServerError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServerError> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServerError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// The first record matching `key=value`, or `NotFound`
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        key: &str,
        value: &str,
    ) -> Result<T, ServerError> {
        let mut records: Vec<T> = self.get(collection, &[(key, value)]).await?;
        if records.is_empty() {
            return Err(ServerError::not_found(format!("{collection} with {key}={value}")));
        }

        Ok(records.swap_remove(0))
    }

    /// The whole dataset, used by the lookup layer to resolve references
    pub async fn snapshot(&self) -> Result<Dataset, ServerError> {
        self.get("db", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_backend;
    use models::course::Course;
    use serde_json::{Value, json};
    use std::time::Instant;

    #[tokio::test]
    async fn test_get_with_query() {
        let (api, _db) = spawn_backend().await;
        let courses: Vec<Course> = api.get("courses", &[("year", "1")]).await.unwrap();

        assert_eq!(courses.len(), 2);
    }

    #[tokio::test]
    async fn test_errors_are_normalized() {
        let (api, _db) = spawn_backend().await;

        let err = api.get::<Value>("lectures", &[]).await.unwrap_err();
        assert!(matches!(err, ServerError::Status { status: 404, .. }));
        assert_eq!(err.to_string(), "Unknown collection: lectures");

        let err = api
            .post::<Value, _>("shifts", &json!({ "day": "Sunday" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Status { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let api = Api::new("http://127.0.0.1:9", Duration::ZERO);
        let err = api.get::<Value>("courses", &[]).await.unwrap_err();

        assert!(matches!(err, ServerError::Transport(_)));
    }

    #[tokio::test]
    async fn test_latency_applies_to_success_and_failure() {
        let (api, _db) = spawn_backend().await;
        let api = Api::new(api.base_url(), Duration::from_millis(50));

        let started = Instant::now();
        api.get::<Value>("courses", &[]).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));

        let started = Instant::now();
        api.get::<Value>("courses/99", &[]).await.unwrap_err();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_find_one_and_snapshot() {
        let (api, _db) = spawn_backend().await;

        let course: Course = api.find_one("courses", "abbreviation", "BD").await.unwrap();
        assert_eq!(course.name, "Bases de Dados");

        let err = api
            .find_one::<Course>("courses", "abbreviation", "XYZ")
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let data = api.snapshot().await.unwrap();
        assert_eq!(data.students.len(), 4);
    }
}
