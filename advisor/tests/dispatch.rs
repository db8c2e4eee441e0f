use advisor::{Advisor, AdvisorError, Coordinate, CsvFileSource, StaticSource, TaskRequest};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{DynamicImage, Rgba, RgbaImage};
use llm::{LLMError, ModelGateway, Prompt};
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Gateway double that records every prompt and answers with a fixed reply.
#[derive(Clone, Default)]
struct Recorder {
    prompts: Arc<Mutex<Vec<Prompt>>>,
    fail_with: Option<&'static str>,
}

impl Recorder {
    fn failing(message: &'static str) -> Self {
        Self {
            fail_with: Some(message),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Prompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for Recorder {
    async fn generate(&self, prompt: &Prompt) -> Result<String, LLMError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        match self.fail_with {
            Some(msg) => Err(LLMError::Status {
                code: 429,
                status: "RESOURCE_EXHAUSTED".into(),
                message: msg.into(),
            }),
            None => Ok(format!("reply to {} chars", prompt.text().len())),
        }
    }
}

fn advisor(recorder: &Recorder) -> Advisor {
    Advisor::new(Box::new(recorder.clone()))
}

fn photo_b64(w: u32, h: u32) -> String {
    let img = RgbaImage::from_pixel(w, h, Rgba([120, 80, 40, 255]));
    let png = vision::encode_png(&DynamicImage::ImageRgba8(img)).unwrap();
    BASE64.encode(png)
}

#[tokio::test]
async fn voice_query_in_hindi() {
    let rec = Recorder::default();
    advisor(&rec)
        .answer_voice_query("When should I plant rice?", Some("Hindi"))
        .await
        .unwrap();
    let calls = rec.calls();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0];
    assert!(!prompt.is_multimodal());
    assert!(prompt.text().contains("When should I plant rice?"));
    assert!(prompt.text().ends_with("reply completely in the Hindi language."));
}

#[tokio::test]
async fn voice_query_defaults_to_english() {
    let rec = Recorder::default();
    advisor(&rec)
        .answer_voice_query("Best fertilizer for wheat?", None)
        .await
        .unwrap();
    assert!(rec.calls()[0].text().ends_with("in the English language."));
}

#[tokio::test]
async fn soil_without_image_is_text_only() {
    let rec = Recorder::default();
    advisor(&rec)
        .match_soil_and_crops(12.9, 77.6, None)
        .await
        .unwrap();
    let calls = rec.calls();
    assert_eq!(calls.len(), 1);
    let Prompt::Text(text) = &calls[0] else {
        panic!("expected text prompt");
    };
    assert!(text.contains("Lat: 12.9, Lng: 77.6"));
    assert!(!text.contains("image"));
    assert!(text.contains("climate"));
}

#[tokio::test]
async fn soil_with_image_is_multimodal() {
    let rec = Recorder::default();
    advisor(&rec)
        .match_soil_and_crops("Unknown", "Unknown", Some(&photo_b64(20, 10)))
        .await
        .unwrap();
    let calls = rec.calls();
    let Prompt::TextPlusImage(text, image) = &calls[0] else {
        panic!("expected multimodal prompt");
    };
    assert!(text.contains("Lat: Unknown, Lng: Unknown"));
    assert!(text.contains("attached soil image"));
    assert_eq!(image.dimensions(), (20, 10));
}

#[tokio::test]
async fn disease_with_image_is_multimodal() {
    let rec = Recorder::default();
    let url = format!("data:image/png;base64,{}", photo_b64(32, 24));
    advisor(&rec).diagnose_disease(Some(&url)).await.unwrap();
    let calls = rec.calls();
    assert_eq!(calls.len(), 1);
    let image = calls[0].image().expect("image attached");
    assert_eq!(image.dimensions(), (32, 24));
    assert!(calls[0].text().contains("Identify the crop name"));
}

#[tokio::test]
async fn disease_without_image_never_calls_gateway() {
    let rec = Recorder::default();
    let err = advisor(&rec).diagnose_disease(None).await.unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidImage(_)));
    assert_eq!(err.to_string(), "invalid image: no image provided");
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn corrupt_image_never_calls_gateway() {
    let rec = Recorder::default();
    let err = advisor(&rec)
        .diagnose_disease(Some(&BASE64.encode(b"definitely not a picture")))
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::InvalidImage(_)));
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn schemes_request_three() {
    let rec = Recorder::default();
    let adv = advisor(&rec);
    adv.lookup_schemes(Some("solar pumps")).await.unwrap();
    adv.lookup_schemes(None).await.unwrap();
    let calls = rec.calls();
    assert!(calls[0].text().starts_with("List 3 "));
    assert!(calls[0].text().contains("'solar pumps'"));
    assert!(calls[1].text().contains("'Agricultural subsidies'"));
}

#[tokio::test]
async fn yield_without_table_never_calls_gateway() {
    let rec = Recorder::default();
    let adv = advisor(&rec);
    let err = adv.predict_yield(None).await.unwrap_err();
    assert!(matches!(err, AdvisorError::DataUnavailable(_)));
    let err = adv
        .predict_yield_from(&StaticSource::empty())
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::DataUnavailable(_)));
    let err = adv
        .predict_yield_from(&CsvFileSource::new("/nonexistent/farm_data.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::DataUnavailable(ref m) if m.contains("farm_data.csv")));
    assert!(rec.calls().is_empty());
}

#[tokio::test]
async fn yield_from_csv_file_embeds_table() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "year,crop,yield,rainfall\n2022,rice,3.2,1100\n2023,rice,2.9,870\n").unwrap();
    let rec = Recorder::default();
    advisor(&rec)
        .predict_yield_from(&CsvFileSource::new(file.path()))
        .await
        .unwrap();
    let calls = rec.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0]
        .text()
        .contains("year,crop,yield,rainfall\n2022,rice,3.2,1100\n2023,rice,2.9,870\n"));
    assert!(!calls[0].is_multimodal());
}

#[tokio::test]
async fn gateway_error_is_surfaced_verbatim() {
    let rec = Recorder::failing("Quota exceeded");
    let err = advisor(&rec)
        .lookup_schemes(Some("seeds"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisorError::ModelGateway(LLMError::Status { code: 429, .. })));
    assert!(err.to_string().contains("Quota exceeded"));
    assert_eq!(rec.calls().len(), 1);
}

#[tokio::test]
async fn failure_does_not_affect_next_request() {
    let rec = Recorder::default();
    let adv = advisor(&rec);
    assert!(adv.diagnose_disease(None).await.is_err());
    let reply = adv.answer_voice_query("hello", None).await.unwrap();
    assert!(reply.starts_with("reply to"));
}

#[tokio::test]
async fn reply_passes_through_unchanged() {
    struct Fixed;

    #[async_trait]
    impl ModelGateway for Fixed {
        async fn generate(&self, _: &Prompt) -> Result<String, LLMError> {
            Ok("  1. Ragi\n2. Maize  \n".into())
        }
    }

    let adv = Advisor::new(Box::new(Fixed));
    let reply = adv
        .dispatch(TaskRequest::SoilMatch {
            lat: Coordinate::unknown(),
            lng: Coordinate::unknown(),
            image: None,
        })
        .await
        .unwrap();
    assert_eq!(reply, "  1. Ragi\n2. Maize  \n");
}

#[tokio::test]
async fn concurrent_dispatches_are_independent() {
    let rec = Recorder::default();
    let adv = Arc::new(advisor(&rec));
    let mut handles = Vec::new();
    for i in 0..8 {
        let adv = adv.clone();
        handles.push(tokio::spawn(async move {
            adv.lookup_schemes(Some(&format!("topic {i}"))).await
        }));
    }
    for h in handles {
        assert!(h.await.unwrap().is_ok());
    }
    assert_eq!(rec.calls().len(), 8);
}
