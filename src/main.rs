use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use pipelens::api::{ApiError, BackendConfig, EndpointKind, InferenceClient};
use pipelens::fetch::fetch_image;
use pipelens::models::InferenceResult;
use pipelens::render::draw_detections;
use pipelens::table::DetectionTable;

/// An inference target: a pipeline or a deployed model instance, told
/// apart by its resource-name prefix.
#[derive(Debug, Clone)]
struct Target {
    name: String,
    kind: EndpointKind,
}

fn parse_target(s: &str) -> Result<Target, String> {
    let kind = EndpointKind::from_resource_name(s).ok_or_else(|| {
        format!(
            "expected `pipelines/{{id}}` or `models/{{id}}/instances/{{instance}}`, got `{s}`"
        )
    })?;
    Ok(Target {
        name: s.to_string(),
        kind,
    })
}

#[derive(Parser)]
#[command(name = "pipelens")]
#[command(about = "Compare two detection pipelines side by side on one image")]
struct Cli {
    /// Model backend base URL (for `models/…:test` targets)
    #[arg(long, default_value = "http://localhost:8080")]
    model_backend_base_url: String,

    /// Pipeline backend base URL (for `pipelines/…:trigger` targets)
    #[arg(long, default_value = "http://localhost:8081")]
    pipeline_backend_base_url: String,

    /// API version prefix
    #[arg(long, default_value = "v1alpha")]
    api_version: String,

    /// Left pane target, e.g. `pipelines/yolov4`
    #[arg(long, default_value = "pipelines/yolov4", value_parser = parse_target)]
    left: Target,

    /// Right pane target, e.g. `pipelines/yolov7`
    #[arg(long, default_value = "pipelines/yolov7", value_parser = parse_target)]
    right: Target,

    /// Directory annotated images are written to
    #[arg(long, value_name = "DIR", default_value = "out")]
    out_dir: PathBuf,

    /// Inference request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Dump raw JSON responses
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let timeout = Duration::from_secs(args.timeout_secs);
    let model_client = InferenceClient::new(
        BackendConfig::new(&args.model_backend_base_url, &args.api_version),
        timeout,
    )?;
    let pipeline_client = InferenceClient::new(
        BackendConfig::new(&args.pipeline_backend_base_url, &args.api_version),
        timeout,
    )?;

    println!("Comparing {} vs. {}", args.left.name, args.right.name);
    println!("Annotated images are written to {:?}", args.out_dir);

    let stdin = std::io::stdin();
    loop {
        print!("\nImage URL (empty line to quit): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let image_url = line.trim();
        if image_url.is_empty() {
            break;
        }

        // A bad URL or undecodable body aborts only this interaction.
        let image = match fetch_image(image_url).await {
            Ok(img) => img,
            Err(e) => {
                println!("Could not load image: {e:#}");
                continue;
            }
        };
        println!("Loaded {}x{} image", image.width(), image.height());

        // The two calls are independent; fan out concurrently.
        let (left_result, right_result) = tokio::join!(
            infer(&model_client, &pipeline_client, &args.left, image_url),
            infer(&model_client, &pipeline_client, &args.right, image_url),
        );

        render_pane(&args, &args.left, left_result, &image)?;
        render_pane(&args, &args.right, right_result, &image)?;
    }

    Ok(())
}

async fn infer(
    model_client: &InferenceClient,
    pipeline_client: &InferenceClient,
    target: &Target,
    image_url: &str,
) -> Result<InferenceResult, ApiError> {
    match target.kind {
        EndpointKind::ModelTest => model_client.test_model_instance(&target.name, image_url).await,
        EndpointKind::PipelineTrigger => {
            pipeline_client.trigger_pipeline(&target.name, image_url).await
        }
    }
}

/// Renders one pane: annotated image on disk plus a summary table. A
/// failed call prints an inline error and leaves the other pane alone.
fn render_pane(
    args: &Cli,
    target: &Target,
    result: Result<InferenceResult, ApiError>,
    image: &image::DynamicImage,
) -> anyhow::Result<()> {
    println!("\n=== {} ===", target.name);
    let result = match result {
        Ok(r) if r.success => r,
        Ok(_) => {
            println!("inference error (backend returned a non-200 status)");
            return Ok(());
        }
        Err(e) => {
            println!("inference error: {e}");
            return Ok(());
        }
    };

    let annotated = draw_detections(image, &result.detections);
    let path = args.out_dir.join(format!("{}.png", file_stem(&target.name)));
    annotated
        .save(&path)
        .with_context(|| format!("failed to save annotated image to {path:?}"))?;
    println!(
        "{} detections, annotated image saved to {:?}",
        result.detections.len(),
        path
    );
    print!("{}", DetectionTable::from_detections(&result.detections));

    if args.verbose {
        if let Some(raw) = &result.raw_response {
            println!("{}", serde_json::to_string_pretty(raw)?);
        }
    }
    Ok(())
}

fn file_stem(target_name: &str) -> String {
    target_name.replace('/', "-")
}
