//! Pipeline integration tests
//!
//! Exercises the full detect -> estimate -> redact flow over an injected
//! OCR engine, without requiring tesseract on the test machine.

use image::{GrayImage, Rgb, RgbImage};
use textscrub::{
    loader, OcrEngine, OcrError, PipelineConfig, RedactionPipeline, TextRegion,
};

/// Engine returning a fixed set of tokens
struct ScriptedEngine {
    regions: Vec<TextRegion>,
    text: String,
}

impl OcrEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn recognize_regions(&self, _image: &GrayImage) -> Result<Vec<TextRegion>, OcrError> {
        Ok(self.regions.clone())
    }

    fn recognize_text(&self, _image: &GrayImage) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

/// Engine whose backing service is missing
struct MissingEngine;

impl OcrEngine for MissingEngine {
    fn name(&self) -> &'static str {
        "missing"
    }

    fn recognize_regions(&self, _image: &GrayImage) -> Result<Vec<TextRegion>, OcrError> {
        Err(OcrError::Unavailable("no ocr binary".to_string()))
    }

    fn recognize_text(&self, _image: &GrayImage) -> Result<String, OcrError> {
        Err(OcrError::Unavailable("no ocr binary".to_string()))
    }
}

fn token(text: &str, x: u32, y: u32, w: u32, h: u32, confidence: i32) -> TextRegion {
    TextRegion {
        text: text.to_string(),
        x,
        y,
        width: w,
        height: h,
        confidence,
    }
}

/// A red sign with dark "HELLO" glyph pixels at (20,20)-(70,30)
fn red_sign() -> RgbImage {
    let mut image = RgbImage::from_pixel(100, 100, Rgb([200, 0, 0]));
    for y in 20..30 {
        for x in 20..70 {
            if (x + y) % 3 == 0 {
                image.put_pixel(x, y, Rgb([20, 20, 20]));
            }
        }
    }
    image
}

#[test]
fn clean_erases_token_into_background() {
    let engine = ScriptedEngine {
        regions: vec![token("HELLO", 20, 20, 50, 10, 90)],
        text: "HELLO\n".to_string(),
    };
    let pipeline = RedactionPipeline::with_engine(PipelineConfig::default(), Box::new(engine));

    let image = red_sign();
    let cleaned = pipeline.clean(&image).unwrap();

    // Margin 5: (15,15)-(70,30) clamps inside the buffer and must be
    // entirely the dominant red
    for y in 15..30 {
        for x in 15..70 {
            assert_eq!(*cleaned.get_pixel(x, y), Rgb([200, 0, 0]));
        }
    }

    // A corner far from the token is untouched
    assert_eq!(*cleaned.get_pixel(99, 99), Rgb([200, 0, 0]));
}

#[test]
fn clean_drops_low_confidence_tokens() {
    // One confident token, one noise token below the threshold
    let engine = ScriptedEngine {
        regions: vec![
            token("HELLO", 20, 20, 50, 10, 90),
            token("~", 80, 80, 10, 10, 30),
        ],
        text: String::new(),
    };
    let pipeline = RedactionPipeline::with_engine(PipelineConfig::default(), Box::new(engine));

    let mut image = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
    image.put_pixel(85, 85, Rgb([0, 0, 0]));

    let cleaned = pipeline.clean(&image).unwrap();

    // The noise token's glyph pixel survives
    assert_eq!(*cleaned.get_pixel(85, 85), Rgb([0, 0, 0]));
}

#[test]
fn clean_is_stable_when_rerun_on_its_own_output() {
    let regions = vec![token("HELLO", 20, 20, 50, 10, 90)];
    let image = red_sign();

    let first = RedactionPipeline::with_engine(
        PipelineConfig::default(),
        Box::new(ScriptedEngine {
            regions: regions.clone(),
            text: String::new(),
        }),
    )
    .clean(&image)
    .unwrap();

    let second = RedactionPipeline::with_engine(
        PipelineConfig::default(),
        Box::new(ScriptedEngine {
            regions,
            text: String::new(),
        }),
    )
    .clean(&first)
    .unwrap();

    assert_eq!(first, second);
}

#[test]
fn extract_returns_engine_transcript_verbatim() {
    let engine = ScriptedEngine {
        regions: vec![],
        text: "LINE ONE\nLINE TWO\n".to_string(),
    };
    let pipeline = RedactionPipeline::with_engine(PipelineConfig::default(), Box::new(engine));

    let transcript = pipeline.extract_text(&red_sign()).unwrap();
    assert_eq!(transcript, "LINE ONE\nLINE TWO\n");
}

#[test]
fn unavailable_engine_fails_detection_but_not_redaction() {
    let pipeline =
        RedactionPipeline::with_engine(PipelineConfig::default(), Box::new(MissingEngine));
    let image = red_sign();

    assert!(pipeline.detect_regions(&image).is_err());
    assert!(pipeline.extract_text(&image).is_err());

    // Background estimation and fills stay operable
    assert_eq!(
        textscrub::redact::dominant_color(&image).unwrap(),
        Rgb([200, 0, 0])
    );
    let mut buffer = image.clone();
    textscrub::TextRedactor::redact_regions(
        &mut buffer,
        &[token("X", 10, 10, 5, 5, 99)],
        Rgb([200, 0, 0]),
        5,
    )
    .unwrap();
}

#[test]
fn file_roundtrip_through_loader() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input_path = temp_dir.path().join("sign.png");
    let output_path = temp_dir.path().join("processed_sign.png");

    red_sign().save(&input_path).unwrap();

    let engine = ScriptedEngine {
        regions: vec![token("HELLO", 20, 20, 50, 10, 90)],
        text: String::new(),
    };
    let pipeline = RedactionPipeline::with_engine(PipelineConfig::default(), Box::new(engine));

    let image = loader::load_path(&input_path).unwrap();
    let cleaned = pipeline.clean(&image).unwrap();
    cleaned.save(&output_path).unwrap();

    let reloaded = loader::load_path(&output_path).unwrap();
    assert_eq!(reloaded.dimensions(), (100, 100));
    assert_eq!(*reloaded.get_pixel(25, 25), Rgb([200, 0, 0]));
}

#[test]
fn annotate_composites_onto_cleaned_buffer() {
    if textscrub::overlay::resolve_font_path(None).is_err() {
        eprintln!("no system font available - skipping annotate test");
        return;
    }

    let engine = ScriptedEngine {
        regions: vec![token("HELLO", 20, 20, 50, 10, 90)],
        text: String::new(),
    };
    let pipeline = RedactionPipeline::with_engine(PipelineConfig::default(), Box::new(engine));

    let cleaned = pipeline.clean(&red_sign()).unwrap();
    let annotated = pipeline.annotate(&cleaned, "GOODBYE").unwrap();

    assert_ne!(annotated, cleaned);
    // Cleaned buffer is not mutated by annotation
    assert_eq!(*cleaned.get_pixel(12, 15), Rgb([200, 0, 0]));
}
