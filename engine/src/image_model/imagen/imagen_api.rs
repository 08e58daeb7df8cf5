use color_eyre::{
    Result,
    eyre::{bail, eyre},
};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

mod error;
pub use error::ServiceError;

use crate::image_model::{AspectRatio, Image};

pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";
pub const NO_IMAGE_DATA: &str = "No image data returned from the API.";

#[derive(Debug, Serialize)]
pub struct RequestBody {
    pub instances: Vec<Instance>,
    pub parameters: Parameters,
}

#[derive(Debug, Serialize)]
pub struct Instance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub sample_count: u8,
    pub aspect_ratio: AspectRatio,
    pub output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub mime_type: String,
}

impl RequestBody {
    /// Exactly one JPEG image for `prompt`.
    pub fn single_jpeg(prompt: &str, aspect_ratio: AspectRatio) -> Self {
        Self {
            instances: vec![Instance {
                prompt: prompt.into(),
            }],
            parameters: Parameters {
                sample_count: 1,
                aspect_ratio,
                output_options: OutputOptions {
                    mime_type: OUTPUT_MIME_TYPE.into(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
    pub rai_filtered_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    status: Option<String>,
}

impl PredictResponse {
    /// Only the first prediction counts, the request never asks for more than one.
    pub fn into_first_image(self) -> Result<Image> {
        let prediction = self
            .predictions
            .into_iter()
            .next()
            .ok_or(eyre!(NO_IMAGE_DATA))?;

        match prediction.bytes_base64_encoded {
            Some(data) if !data.is_empty() => Ok(Image {
                base64_data: data,
                mime_type: prediction
                    .mime_type
                    .unwrap_or_else(|| OUTPUT_MIME_TYPE.into()),
            }),
            _ => match prediction.rai_filtered_reason {
                Some(reason) => bail!(reason),
                None => bail!(NO_IMAGE_DATA),
            },
        }
    }
}

pub fn predict_url(api_base: &str, model_id: &str) -> String {
    format!(
        "{}/v1beta/models/{model_id}:predict",
        api_base.trim_end_matches('/')
    )
}

/// Sends one predict call and returns the parsed body.
/// Non-success statuses turn into a [`ServiceError`] when the body carries a message.
pub async fn predict(
    body: &RequestBody,
    url: &str,
    api_key: &str,
    client: &Client,
) -> Result<PredictResponse> {
    let resp = client
        .post(url)
        .header("x-goog-api-key", api_key)
        .json(body)
        .send()
        .await?;

    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        debug!("Imagen error body: {text}");
        return Err(match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody {
                error:
                    ErrorDetail {
                        message: Some(message),
                        status: service_status,
                    },
            }) if !message.is_empty() => {
                ServiceError::from_status(service_status.as_deref().unwrap_or_default(), message)
                    .into()
            }
            _ => eyre!("Imagen request failed: {status}"),
        });
    }

    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::*;

    #[test]
    fn request_serialization() {
        let body = RequestBody::single_jpeg("a red fox", AspectRatio::Cinematic);

        let expect = expect![[r#"{"instances":[{"prompt":"a red fox"}],"parameters":{"sampleCount":1,"aspectRatio":"16:9","outputOptions":{"mimeType":"image/jpeg"}}}"#]];
        expect.assert_eq(&serde_json::to_string(&body).unwrap());
    }

    #[test]
    fn url_building() {
        assert_eq!(
            predict_url("https://example.com/", "imagen-4.0-generate-001"),
            "https://example.com/v1beta/models/imagen-4.0-generate-001:predict"
        );
    }

    #[test]
    fn first_prediction_is_used() {
        let resp: PredictResponse = serde_json::from_str(
            r#"{"predictions":[
                {"bytesBase64Encoded":"AAAA","mimeType":"image/jpeg"},
                {"bytesBase64Encoded":"BBBB","mimeType":"image/jpeg"}
            ]}"#,
        )
        .unwrap();

        let image = resp.into_first_image().unwrap();
        assert_eq!(image.base64_data, "AAAA");
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn missing_predictions_are_an_error() {
        for body in [r#"{}"#, r#"{"predictions":[]}"#, r#"{"predictions":[{}]}"#] {
            let resp: PredictResponse = serde_json::from_str(body).unwrap();
            let err = resp.into_first_image().unwrap_err();
            assert_eq!(err.to_string(), NO_IMAGE_DATA);
        }
    }

    #[test]
    fn empty_bytes_are_an_error() {
        let resp: PredictResponse =
            serde_json::from_str(r#"{"predictions":[{"bytesBase64Encoded":""}]}"#).unwrap();
        assert_eq!(resp.into_first_image().unwrap_err().to_string(), NO_IMAGE_DATA);
    }

    #[test]
    fn filter_reason_is_surfaced() {
        let resp: PredictResponse = serde_json::from_str(
            r#"{"predictions":[{"raiFilteredReason":"Blocked by safety filter"}]}"#,
        )
        .unwrap();
        assert_eq!(
            resp.into_first_image().unwrap_err().to_string(),
            "Blocked by safety filter"
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServiceError::from_status("RESOURCE_EXHAUSTED", "quota exceeded"),
            ServiceError::ResourceExhausted {
                message: "quota exceeded".into()
            }
        );
        let unknown = ServiceError::from_status("WEIRD", "huh");
        assert_eq!(unknown.to_string(), "huh");
        assert!(matches!(unknown, ServiceError::Unexpected { .. }));
    }
}
