use cropcure_core::{
    AppConfig, Catalog, Diagnoser, Error, FixedScores, IngestionError, Language, NUM_CLASSES,
    format_class_name, resolve_tip, translate_class,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use rstest::rstest;
use std::io::Cursor;
use std::sync::Arc;

fn leaf_png() -> Vec<u8> {
    let img = RgbImage::from_fn(640, 480, |x, y| Rgb([(x % 256) as u8, 140, (y % 256) as u8]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn septoria_scores() -> Vec<f32> {
    let mut scores = vec![0.0; NUM_CLASSES];
    scores[13] = 0.55;
    scores[5] = 0.25;
    scores[12] = 0.2;
    scores
}

#[rstest]
#[case(Language::English, "Tomato Septoria Leaf Spot", "Gray centers with brown borders.")]
#[case(Language::Tamil, "தக்காளி செப்டோரியா இலை புள்ளி", "சாம்பல் நடு மற்றும் பழுப்பு விளிம்பு.")]
#[case(Language::Hindi, "टमाटर सेप्टोरिया पत्ती धब्बा", "भूरे किनारे वाले ग्रे केंद्र।")]
fn upload_to_summary(#[case] lang: Language, #[case] name: &str, #[case] description: &str) {
    let diagnoser = Diagnoser::new(Arc::new(FixedScores::new(septoria_scores()))).unwrap();
    let diagnosis = diagnoser.diagnose_bytes(&leaf_png(), "png", lang).unwrap();

    let indices: Vec<usize> = diagnosis.predictions.iter().map(|p| p.class_index).collect();
    assert_eq!(indices, vec![13, 5, 12]);
    assert_eq!(diagnosis.summary.display_name, name);
    assert_eq!(diagnosis.summary.description, description);
    assert_eq!(
        diagnosis.summary.tip,
        resolve_tip("Tomato_Septoria_leaf_spot", lang)
    );
    assert_eq!(diagnosis.summary.confidence.to_string(), "55.00");
    assert_eq!(diagnosis.language, lang);
}

#[test]
fn rejected_upload_produces_no_result() {
    let diagnoser = Diagnoser::new(Arc::new(FixedScores::new(septoria_scores()))).unwrap();
    let err = diagnoser
        .diagnose_bytes(&leaf_png(), "bmp", Language::English)
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Ingestion(IngestionError::UnsupportedType(_))
    ));
}

#[test]
fn default_config_validates() {
    let config = AppConfig::default();
    let diagnoser =
        Diagnoser::from_config(Arc::new(FixedScores::new(septoria_scores())), &config).unwrap();
    assert_eq!(diagnoser.top_k(), 3);
}

#[test]
fn catalog_wide_properties() {
    let catalog = Catalog::builtin();
    for id in catalog.identifiers() {
        let formatted = format_class_name(id);
        assert_eq!(format_class_name(&formatted), formatted);
        assert_eq!(translate_class(catalog, id, Language::English).unwrap(), id);
        for lang in [Language::Tamil, Language::Hindi] {
            assert!(!translate_class(catalog, id, lang).unwrap().is_empty());
        }
    }
}
