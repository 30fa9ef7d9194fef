//! Cloudinary REST Gateway
//!
//! Signed uploads and deletions against the Cloudinary upload API.
//! Requests are form posts; the signature is the SHA-1 hex digest of the
//! alphabetically sorted `key=value` parameters joined by `&`, followed by the
//! API secret.

use serde::Deserialize;

use crate::application::config::MediaConfig;
use crate::domain::gateway::MediaGateway;
use crate::domain::media::{MediaFolder, MediaHandle, MediaPayload, UploadedAsset};
use crate::error::{MediaError, MediaResult};

/// Cloudinary-backed [`MediaGateway`]
#[derive(Clone, Debug)]
pub struct CloudinaryGateway {
    http_client: reqwest::Client,
    config: MediaConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    resource_type: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryGateway {
    pub fn new(config: MediaConfig) -> MediaResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Signed form fields for `params` at `timestamp`
    fn signed_form(&self, params: &[(&str, String)], timestamp: i64) -> Vec<(String, String)> {
        let mut signed: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        signed.push(("timestamp".to_string(), timestamp.to_string()));

        let signature = sign(&signed, &self.config.api_secret);

        signed.push(("api_key".to_string(), self.config.api_key.clone()));
        signed.push(("signature".to_string(), signature));
        signed
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> MediaResult<reqwest::Response> {
        let response = self.http_client.post(url).form(form).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        Err(MediaError::Upstream {
            status: status.as_u16(),
            message,
        })
    }
}

/// Cloudinary request signature
///
/// `file`, `api_key`, `resource_type` and `signature` itself are never signed.
pub fn sign(params: &[(String, String)], api_secret: &str) -> String {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), "file" | "api_key" | "resource_type" | "signature"))
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    platform::crypto::sha1_hex(format!("{}{}", to_sign, api_secret).as_bytes())
}

impl MediaGateway for CloudinaryGateway {
    async fn upload(
        &self,
        payload: &MediaPayload,
        folder: MediaFolder,
    ) -> MediaResult<UploadedAsset> {
        if payload.is_empty() {
            return Err(MediaError::EmptyPayload);
        }

        let folder_path = folder.path(&self.config.root_folder);
        let mut form = self.signed_form(
            &[("folder", folder_path.clone())],
            chrono::Utc::now().timestamp(),
        );
        form.push(("file".to_string(), payload.as_upload_field(folder)));

        let url = self.config.endpoint(folder.upload_resource_type(), "upload");
        let response = self.post_form(&url, &form).await?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            public_id = %body.public_id,
            folder = %folder_path,
            "Uploaded media asset"
        );

        Ok(UploadedAsset {
            url: body.secure_url,
            handle: MediaHandle::new(body.public_id, body.resource_type),
        })
    }

    async fn delete(&self, handle: &MediaHandle) -> MediaResult<()> {
        let form = self.signed_form(
            &[("public_id", handle.public_id.clone())],
            chrono::Utc::now().timestamp(),
        );

        let url = self.config.endpoint(&handle.resource_type, "destroy");
        let response = self.post_form(&url, &form).await?;

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| MediaError::InvalidResponse(e.to_string()))?;

        match body.result.as_str() {
            "ok" => {
                tracing::debug!(public_id = %handle.public_id, "Deleted media asset");
                Ok(())
            }
            "not found" => {
                tracing::warn!(public_id = %handle.public_id, "Media asset already gone");
                Ok(())
            }
            other => Err(MediaError::InvalidResponse(format!(
                "destroy result {:?}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Form, Path, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_sign_documented_vector() {
        let params = pairs(&[
            ("timestamp", "1315060510"),
            ("public_id", "sample_image"),
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop"),
        ]);
        assert_eq!(
            sign(&params, "abcd"),
            "bfd09f95f331f558cbd1320e67aa8d488770583e"
        );
    }

    #[test]
    fn test_sign_ignores_unsigned_fields() {
        let base = pairs(&[("folder", "Readsy/images"), ("timestamp", "1700000000")]);
        let mut with_extras = base.clone();
        with_extras.extend(pairs(&[
            ("file", "data:image/png;base64,AAAA"),
            ("api_key", "123"),
        ]));

        assert_eq!(sign(&base, "secret"), sign(&with_extras, "secret"));
        assert_eq!(
            sign(&base, "secret"),
            "6133375f96f71e8df6f7104494ea65350424ef45"
        );
    }

    #[test]
    fn test_signed_form_fields() {
        let gateway = CloudinaryGateway::new(MediaConfig::new("demo", "key-1", "secret")).unwrap();
        let form = gateway.signed_form(&[("public_id", "Readsy/images/abc".to_string())], 1700000000);
        let map: HashMap<_, _> = form.into_iter().collect();

        assert_eq!(map["timestamp"], "1700000000");
        assert_eq!(map["api_key"], "key-1");
        assert_eq!(
            map["signature"],
            "58700a0215e889df7a69b04c60a22363df7325ac"
        );
    }

    // ========================================================================
    // Fake media host
    // ========================================================================

    #[derive(Clone, Default)]
    struct FakeHost {
        calls: Arc<Mutex<Vec<(String, String, HashMap<String, String>)>>>,
        destroy_result: Arc<Mutex<String>>,
    }

    async fn fake_upload(
        State(host): State<FakeHost>,
        Path((_cloud, resource_type)): Path<(String, String)>,
        Form(form): Form<HashMap<String, String>>,
    ) -> impl IntoResponse {
        let folder = form.get("folder").cloned().unwrap_or_default();
        host.calls
            .lock()
            .unwrap()
            .push(("upload".into(), resource_type.clone(), form));

        let stored_type = if resource_type == "auto" {
            "image".to_string()
        } else {
            resource_type
        };
        Json(serde_json::json!({
            "secure_url": format!("https://res.example.com/demo/{}/upload/v1/{}/abc.png", stored_type, folder),
            "public_id": format!("{}/abc", folder),
            "resource_type": stored_type,
        }))
    }

    async fn fake_destroy(
        State(host): State<FakeHost>,
        Path((_cloud, resource_type)): Path<(String, String)>,
        Form(form): Form<HashMap<String, String>>,
    ) -> impl IntoResponse {
        host.calls
            .lock()
            .unwrap()
            .push(("destroy".into(), resource_type, form));
        let result = host.destroy_result.lock().unwrap().clone();
        Json(serde_json::json!({ "result": result }))
    }

    async fn fake_reject() -> impl IntoResponse {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": { "message": "Invalid Signature" } })),
        )
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn gateway_for(host: &FakeHost) -> CloudinaryGateway {
        let router = Router::new()
            .route("/{cloud}/{resource_type}/upload", post(fake_upload))
            .route("/{cloud}/{resource_type}/destroy", post(fake_destroy))
            .with_state(host.clone());
        let base = spawn(router).await;

        CloudinaryGateway::new(MediaConfig {
            api_base: base,
            ..MediaConfig::new("demo", "key-1", "secret")
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_pdf_uses_auto_and_pdf_folder() {
        let host = FakeHost::default();
        let gateway = gateway_for(&host).await;

        let asset = gateway
            .upload(&MediaPayload::new("JVBERi0xLjQ="), MediaFolder::Pdfs)
            .await
            .unwrap();

        assert_eq!(asset.handle.public_id, "Readsy/pdfs/abc");
        assert_eq!(asset.handle.resource_type, "image");
        assert!(asset.url.starts_with("https://"));

        let calls = host.calls.lock().unwrap();
        let (action, resource_type, form) = &calls[0];
        assert_eq!(action, "upload");
        assert_eq!(resource_type, "auto");
        assert_eq!(form["folder"], "Readsy/pdfs");
        assert_eq!(form["file"], "data:application/pdf;base64,JVBERi0xLjQ=");
        assert_eq!(form["api_key"], "key-1");
        let signed = pairs(&[
            ("folder", form["folder"].as_str()),
            ("timestamp", form["timestamp"].as_str()),
        ]);
        assert_eq!(form["signature"], sign(&signed, "secret"));
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_payload_without_request() {
        let host = FakeHost::default();
        let gateway = gateway_for(&host).await;

        let err = gateway
            .upload(&MediaPayload::new(""), MediaFolder::Images)
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::EmptyPayload));
        assert!(host.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_uses_handle_resource_type() {
        let host = FakeHost::default();
        *host.destroy_result.lock().unwrap() = "ok".to_string();
        let gateway = gateway_for(&host).await;

        gateway
            .delete(&MediaHandle::new("Readsy/pdfs/book", "raw"))
            .await
            .unwrap();

        let calls = host.calls.lock().unwrap();
        let (action, resource_type, form) = &calls[0];
        assert_eq!(action, "destroy");
        assert_eq!(resource_type, "raw");
        assert_eq!(form["public_id"], "Readsy/pdfs/book");
    }

    #[tokio::test]
    async fn test_delete_not_found_is_not_an_error() {
        let host = FakeHost::default();
        *host.destroy_result.lock().unwrap() = "not found".to_string();
        let gateway = gateway_for(&host).await;

        assert!(
            gateway
                .delete(&MediaHandle::new("Readsy/images/gone", "image"))
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_upstream_error_message() {
        let base = spawn(Router::new().route("/{cloud}/{resource_type}/upload", post(fake_reject))).await;
        let gateway = CloudinaryGateway::new(MediaConfig {
            api_base: base,
            ..MediaConfig::new("demo", "key-1", "wrong")
        })
        .unwrap();

        let err = gateway
            .upload(&MediaPayload::new("data:image/png;base64,AAAA"), MediaFolder::Images)
            .await
            .unwrap_err();

        match err {
            MediaError::Upstream { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid Signature");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
