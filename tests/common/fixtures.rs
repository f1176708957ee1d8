use image::{DynamicImage, ImageBuffer, Rgb};
use serde_json::{Value, json};

/// `(category, score, (left, top, width, height))` shorthand for building
/// canned responses.
pub type DetSpec = (&'static str, f32, (f32, f32, f32, f32));

pub const DOG_AND_PERSON: &[DetSpec] = &[
    ("dog", 0.91, (10.0, 20.0, 100.0, 150.0)),
    ("person", 0.3, (5.0, 5.0, 50.0, 60.0)),
];

fn bounding_box_objects(dets: &[DetSpec]) -> Value {
    Value::Array(
        dets.iter()
            .map(|(category, score, (left, top, width, height))| {
                json!({
                    "category": category,
                    "score": score,
                    "bounding_box": {
                        "left": left,
                        "top": top,
                        "width": width,
                        "height": height,
                    },
                })
            })
            .collect(),
    )
}

/// Response body as a model `:test` endpoint shapes it: a single nested
/// `output` object.
pub fn model_test_body(dets: &[DetSpec]) -> Value {
    json!({
        "output": {
            "detection_outputs": [
                { "bounding_box_objects": bounding_box_objects(dets) }
            ]
        }
    })
}

/// Response body as a pipeline `:trigger` endpoint shapes it: a list of
/// outputs, detections at index 0.
pub fn pipeline_trigger_body(dets: &[DetSpec]) -> Value {
    json!({
        "output": [
            {
                "detection_outputs": [
                    { "bounding_box_objects": bounding_box_objects(dets) }
                ]
            }
        ]
    })
}

/// Flat gray test image, big enough for the canned detections.
pub fn test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |_, _| {
        Rgb([120u8, 120u8, 120u8])
    }))
}
